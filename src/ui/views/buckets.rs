use bucketship::domain::entities::{BucketDetails, BucketInfo, BucketStatus};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::table::Table;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

pub fn render_bucket_list(buckets: &[BucketInfo], supports_color: bool) -> String {
    if buckets.is_empty() {
        return format!("{}\n", ColoredText::dim("No buckets found.").render(supports_color));
    }

    let mut table = Table::new(["NAME", "REGION", "CREATED", "WEBSITE", "CORS"]);
    for bucket in buckets {
        let created = bucket
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row([
            bucket.name.clone(),
            bucket.region.clone(),
            created,
            yes_no(bucket.website_enabled).to_string(),
            yes_no(bucket.cors_enabled).to_string(),
        ]);
    }
    let mut out = table.render(supports_color);
    out.push_str(&format!("\n{} bucket(s)\n", buckets.len()));
    out
}

pub fn render_bucket_details(
    details: &BucketDetails,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let (icon, status) = match &details.status {
        BucketStatus::Exists => (Icon::Success, "exists".to_string()),
        BucketStatus::Missing => (Icon::Pending, "does not exist".to_string()),
        BucketStatus::Forbidden => (Icon::Error, "exists, access forbidden".to_string()),
        BucketStatus::Unknown(reason) => (Icon::Warning, format!("unknown ({reason})")),
    };
    let mut header = CommandHeader::new(Icon::Remote, details.name.as_str());
    header.add("Region", details.region.as_str());
    header.add("Endpoint", details.endpoint.as_str());
    header.add(
        "Status",
        format!("{} {status}", icon.colored(supports_color, supports_unicode)),
    );
    header.render(supports_color, supports_unicode)
}

pub fn render_file_list(
    bucket: &str,
    prefix: &str,
    keys: &[String],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Remote, format!("Files in {bucket}"));
    if !prefix.is_empty() {
        header.add("Prefix", prefix);
    }
    header.add("Count", keys.len().to_string());
    let mut out = header.render(supports_color, supports_unicode);
    for key in keys {
        out.push_str(&format!("  {key}\n"));
    }
    out
}
