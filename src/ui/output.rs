use bucketship::config::ConfigWarning;

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::theme::icons;

pub fn format_config_warning(warning: &ConfigWarning) -> String {
    let mut out = match warning.line {
        Some(line) => format!(
            "{} Unknown config key '{}' in {}:{}\n",
            icons::WARNING,
            warning.key,
            warning.file.display(),
            line
        ),
        None => format!(
            "{} Unknown config key '{}' in {}\n",
            icons::WARNING,
            warning.key,
            warning.file.display()
        ),
    };
    if let Some(suggestion) = &warning.suggestion {
        out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
    }
    out
}

/// Unknown keys never stop a run; they are reported on stderr.
pub fn print_config_warnings(ui: &UiContext, warnings: &[ConfigWarning]) {
    if ui.json {
        return;
    }
    for warning in warnings {
        if ui.caps.annotations {
            let file = warning.file.display().to_string();
            println!(
                "{}",
                github_actions_annotation(
                    AnnotationLevel::Warning,
                    &format!("Unknown config key '{}'", warning.key),
                    Some(&file),
                    warning.line,
                    Some("bucketship"),
                )
            );
        }
        eprint!("{}", format_config_warning(warning));
    }
}
