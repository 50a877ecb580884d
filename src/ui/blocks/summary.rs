use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Partial,
    Failed,
}

/// Boxed end-of-command summary
#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    outcome: Outcome,
    stats: Vec<(String, usize)>,
    details: Vec<String>,
    infos: Vec<String>,
    warnings: Vec<String>,
    next_step: Option<String>,
}

impl ResultSummary {
    fn new(title: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            title: title.into(),
            outcome,
            stats: Vec::new(),
            details: Vec::new(),
            infos: Vec::new(),
            warnings: Vec::new(),
            next_step: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, Outcome::Success)
    }

    pub fn partial(title: impl Into<String>) -> Self {
        Self::new(title, Outcome::Partial)
    }

    pub fn failed(title: impl Into<String>) -> Self {
        Self::new(title, Outcome::Failed)
    }

    pub fn add_stat(&mut self, label: impl Into<String>, count: usize) {
        self.stats.push((label.into(), count));
    }

    /// A line shown as-is below the stats
    pub fn add_detail(&mut self, line: impl Into<String>) {
        self.details.push(line.into());
    }

    pub fn add_info(&mut self, message: impl Into<String>) {
        self.infos.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (style, icon, title) = match self.outcome {
            Outcome::Success => (
                PanelStyle::Success,
                Icon::Success,
                ColoredText::success(self.title.as_str()),
            ),
            Outcome::Partial => (
                PanelStyle::Warning,
                Icon::Warning,
                ColoredText::warning(self.title.as_str()),
            ),
            Outcome::Failed => (
                PanelStyle::Error,
                Icon::Error,
                ColoredText::error(self.title.as_str()),
            ),
        };

        let mut panel = Panel::with_title(format!(
            "{} {}",
            icon.colored(supports_color, supports_unicode),
            title.bold().render(supports_color)
        ))
        .style(style);

        if !self.stats.is_empty() {
            panel.add_empty();
            for (label, count) in &self.stats {
                panel.add_line(format!("{count} {label}"));
            }
        }

        if !self.details.is_empty() {
            panel.add_empty();
            for line in &self.details {
                panel.add_line(line.as_str());
            }
        }

        let sections = [(Icon::Link, &self.infos), (Icon::Warning, &self.warnings)];
        for (icon, lines) in sections {
            if lines.is_empty() {
                continue;
            }
            panel.add_empty();
            for line in lines {
                panel.add_line(format!(
                    "{} {}",
                    icon.colored(supports_color, supports_unicode),
                    line
                ));
            }
        }

        if let Some(next_step) = &self.next_step {
            panel.add_empty();
            panel.add_line(format!(
                "{} {} {}",
                Icon::Arrow.colored(supports_color, supports_unicode),
                ColoredText::dim("Next:").render(supports_color),
                next_step
            ));
        }

        panel.render(supports_color, supports_unicode)
    }
}
