use is_terminal::IsTerminal;

/// What the process's terminal and CI runner allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Prompts can be answered
    pub stdin_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
    /// Runner turns `::warning::`/`::error::` lines into annotations
    pub annotations: bool,
}

pub fn detect_capabilities() -> TerminalCapabilities {
    from_env(
        |key| std::env::var(key).ok(),
        std::io::stdout().is_terminal(),
        std::io::stdin().is_terminal(),
    )
}

fn from_env(
    get_env: impl Fn(&str) -> Option<String>,
    stdout_tty: bool,
    stdin_tty: bool,
) -> TerminalCapabilities {
    let dumb = get_env("TERM").is_some_and(|term| term.eq_ignore_ascii_case("dumb"));
    let annotations = get_env("GITHUB_ACTIONS").is_some();
    // Generic `CI` covers most runners; GitLab also sets its own marker.
    let is_ci = annotations || get_env("CI").is_some() || get_env("GITLAB_CI").is_some();

    TerminalCapabilities {
        stdin_tty,
        supports_color: stdout_tty && !dumb && get_env("NO_COLOR").is_none(),
        supports_unicode: !dumb && !ascii_locale(&get_env),
        is_ci,
        annotations,
    }
}

/// First locale variable set decides; C/POSIX cannot draw box frames.
fn ascii_locale(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|key| get_env(key))
        .map(|locale| {
            let locale = locale.to_lowercase();
            locale == "c" || locale == "posix"
        })
        .unwrap_or(false)
}
