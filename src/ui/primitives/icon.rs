use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Pending,
    Arrow,
    Deploy,
    Check,
    Remote,
    Trash,
    Link,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        if supports_unicode {
            match self {
                Icon::Success => theme::icons::SUCCESS,
                Icon::Error => theme::icons::ERROR,
                Icon::Warning => theme::icons::WARNING,
                Icon::Progress => theme::icons::PROGRESS,
                Icon::Pending => theme::icons::PENDING,
                Icon::Arrow => theme::icons::ARROW,
                Icon::Deploy => theme::icons::DEPLOY,
                Icon::Check => theme::icons::CHECK,
                Icon::Remote => theme::icons::REMOTE,
                Icon::Trash => theme::icons::TRASH,
                Icon::Link => theme::icons::LINK,
            }
        } else {
            match self {
                Icon::Success => theme::icons_ascii::SUCCESS,
                Icon::Error => theme::icons_ascii::ERROR,
                Icon::Warning => theme::icons_ascii::WARNING,
                Icon::Progress => theme::icons_ascii::PROGRESS,
                Icon::Pending => theme::icons_ascii::PENDING,
                Icon::Arrow => theme::icons_ascii::ARROW,
                Icon::Deploy => theme::icons_ascii::DEPLOY,
                Icon::Check => theme::icons_ascii::CHECK,
                Icon::Remote => theme::icons_ascii::REMOTE,
                Icon::Trash => theme::icons_ascii::TRASH,
                Icon::Link => theme::icons_ascii::LINK,
            }
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress | Icon::Trash => theme::colors::WARNING,
            Icon::Pending | Icon::Arrow => theme::colors::DIM,
            Icon::Deploy | Icon::Check | Icon::Remote | Icon::Link => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
