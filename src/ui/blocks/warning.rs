use crate::ui::primitives::icon::Icon;
use crate::ui::widgets::panel::{Panel, PanelStyle};

/// Boxed warning shown before a risky action
#[derive(Debug, Clone)]
pub struct WarningBlock {
    title: String,
    lines: Vec<String>,
}

impl WarningBlock {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut panel = Panel::with_title(format!(
            "{} {}",
            Icon::Warning.colored(supports_color, supports_unicode),
            self.title
        ))
        .style(PanelStyle::Warning);
        for line in &self.lines {
            panel.add_line(line.as_str());
        }
        panel.render(supports_color, supports_unicode)
    }
}
