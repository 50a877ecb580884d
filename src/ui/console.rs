//! Terminal progress for deploys
//!
//! Lines go to stderr so `bucketship deploy > out.txt` only captures results.
//! Every event is also forwarded to a [`LogEventSink`] so `-v` adds the
//! structured records underneath.

use std::io::{self, Write};

use bucketship::domain::ports::{DeployEvent, DeployEventSink, DeployStep};
use bucketship::infrastructure::LogEventSink;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Uploads are listed one by one up to this many files unless `-v` is set
const FILE_LINE_LIMIT: usize = 20;

pub struct ConsoleEventSink {
    ui: UiContext,
    log: LogEventSink,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self {
            ui,
            log: LogEventSink::new(),
        }
    }
}

fn step_label(step: DeployStep) -> &'static str {
    match step {
        DeployStep::CreateBucket => "Creating bucket",
        DeployStep::SyncFiles => "Uploading files",
        DeployStep::ConfigureWebsite => "Configuring website hosting",
        DeployStep::ApplyCors => "Applying CORS policy",
        DeployStep::GenerateUrls => "Generating URLs",
    }
}

/// The line printed for one event, if any
pub fn format_event(event: &DeployEvent, verbose: u8, color: bool, unicode: bool) -> Option<String> {
    match event {
        DeployEvent::Started { .. } | DeployEvent::Completed { .. } => None,
        DeployEvent::Planned { key, .. } => Some(format!(
            "  {} {}",
            Icon::Pending.colored(color, unicode),
            key
        )),
        DeployEvent::StepStarted { step } => Some(format!(
            "{} {}",
            Icon::Progress.colored(color, unicode),
            step_label(*step)
        )),
        DeployEvent::StepWarning { step, message } => Some(format!(
            "{} {}: {}",
            Icon::Warning.colored(color, unicode),
            step_label(*step),
            ColoredText::warning(message.as_str()).render(color)
        )),
        DeployEvent::FileUploaded { index, total, key } => {
            if verbose == 0 && *total > FILE_LINE_LIMIT {
                return None;
            }
            Some(format!(
                "  {} {}",
                Icon::Success.colored(color, unicode),
                ColoredText::dim(format!("[{index}/{total}] {key}")).render(color)
            ))
        }
        DeployEvent::FileFailed { key, error, .. } => Some(format!(
            "  {} {}: {}",
            Icon::Error.colored(color, unicode),
            key,
            ColoredText::error(error.as_str()).render(color)
        )),
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        if let Some(line) = format_event(&event, self.ui.verbose, self.ui.color, self.ui.unicode) {
            let mut err = io::stderr().lock();
            let _ = writeln!(err, "{line}");
        }
        self.log.on_event(event);
    }

    fn wants_detailed_events(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn planned_files_render_as_pending() {
        let event = DeployEvent::Planned {
            local: PathBuf::from("dist/index.html"),
            bucket: "b".to_string(),
            key: "index.html".to_string(),
        };
        assert_eq!(
            format_event(&event, 0, false, false).as_deref(),
            Some("  [ ] index.html")
        );
    }

    #[test]
    fn large_uploads_are_quiet_without_verbose() {
        let event = DeployEvent::FileUploaded {
            index: 3,
            total: 500,
            key: "a.js".to_string(),
        };
        assert_eq!(format_event(&event, 0, false, false), None);
        assert_eq!(
            format_event(&event, 1, false, false).as_deref(),
            Some("  [OK] [3/500] a.js")
        );
    }

    #[test]
    fn step_warnings_name_the_step() {
        let event = DeployEvent::StepWarning {
            step: DeployStep::ApplyCors,
            message: "AccessDenied".to_string(),
        };
        assert_eq!(
            format_event(&event, 0, false, false).as_deref(),
            Some("[WARN] Applying CORS policy: AccessDenied")
        );
    }

    #[test]
    fn failures_are_always_shown() {
        let event = DeployEvent::FileFailed {
            index: 1,
            key: "b.css".to_string(),
            error: "timeout".to_string(),
        };
        assert_eq!(
            format_event(&event, 0, false, true),
            Some(format!("  {} b.css: timeout", crate::ui::theme::icons::ERROR))
        );
    }
}
