use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};

/// Boxed error with an optional fix hint
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    message: String,
    context: Vec<String>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            fix: None,
        }
    }

    pub fn with_context(mut self, line: impl Into<String>) -> Self {
        self.context.push(line.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut panel = Panel::with_title(ColoredText::error("ERROR").bold().render(supports_color))
            .style(PanelStyle::Error);
        panel.add_empty();
        panel.add_line(self.message.as_str());

        for line in &self.context {
            panel.add_line(ColoredText::dim(line.as_str()).render(supports_color));
        }

        if let Some(fix) = &self.fix {
            panel.add_empty();
            panel.add_line(format!("FIX: {fix}"));
        }

        panel.render(supports_color, supports_unicode)
    }
}
