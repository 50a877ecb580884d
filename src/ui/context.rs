use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use bucketship::config::{ColorMode, Config};
use bucketship::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    /// A person can answer prompts
    pub interactive: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorWhen>, config: &Config) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, verbose, cli_color, config, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        let interactive = !json && caps.stdin_tty && !caps.is_ci;

        Self {
            json,
            verbose,
            caps,
            color,
            unicode,
            interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            stdin_tty: true,
            supports_color: true,
            supports_unicode: true,
            is_ci: true,
            annotations: true,
        }
    }

    fn desktop_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            is_ci: false,
            annotations: false,
            ..ci_caps()
        }
    }

    #[test]
    fn ci_defaults_to_no_color_when_auto() {
        let config = Config::default();
        let ui = UiContext::from_caps(false, 0, None, &config, ci_caps());
        assert!(!ui.color);
    }

    #[test]
    fn ci_allows_explicit_color_always_flag() {
        let config = Config::default();
        let ui = UiContext::from_caps(false, 0, Some(ColorWhen::Always), &config, ci_caps());
        assert!(ui.color);
    }

    #[test]
    fn config_can_disable_unicode() {
        let mut config = Config::default();
        config.output.unicode = false;
        let ui = UiContext::from_caps(false, 0, None, &config, desktop_caps());
        assert!(!ui.unicode);
    }

    #[test]
    fn prompts_need_a_terminal_outside_ci_and_json() {
        let config = Config::default();
        assert!(UiContext::from_caps(false, 0, None, &config, desktop_caps()).interactive);
        assert!(!UiContext::from_caps(true, 0, None, &config, desktop_caps()).interactive);
        assert!(!UiContext::from_caps(false, 0, None, &config, ci_caps()).interactive);
    }
}
