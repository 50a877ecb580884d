use bucketship::domain::services::FileUrls;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_urls(urls: &[FileUrls], supports_color: bool, supports_unicode: bool) -> String {
    let mut out = String::new();
    for entry in urls {
        out.push_str(&format!(
            "{} {}\n",
            Icon::Link.colored(supports_color, supports_unicode),
            ColoredText::info(entry.file.as_str()).bold().render(supports_color)
        ));
        out.push_str(&format!("  direct:  {}\n", entry.direct));
        if let Some(website) = &entry.website {
            out.push_str(&format!("  website: {website}\n"));
        }
    }
    out
}
