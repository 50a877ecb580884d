use bucketship::application::CorsTestReport;
use bucketship::domain::services::EnvironmentCorsSet;
use bucketship::CorsSettings;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_cors_report(
    report: &CorsTestReport,
    path: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, "CORS preflight");
    header.add("Bucket", report.bucket.as_str());
    header.add("Path", path);
    let mut out = header.render(supports_color, supports_unicode);

    for check in &report.checks {
        let (icon, detail) = if check.passed {
            let allowed = check.allow_origin.as_deref().unwrap_or("*");
            (Icon::Success, format!("allowed ({allowed})"))
        } else if let Some(error) = &check.error {
            (Icon::Error, ColoredText::error(error.as_str()).render(supports_color))
        } else {
            let status = check
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            (Icon::Error, format!("blocked (HTTP {status})"))
        };
        out.push_str(&format!(
            "  {} {}  {}\n",
            icon.colored(supports_color, supports_unicode),
            check.origin,
            detail
        ));
    }

    if report.checks.is_empty() {
        out.push_str(&format!(
            "  {} no origins to test\n",
            Icon::Warning.colored(supports_color, supports_unicode)
        ));
    }
    out
}

pub fn render_cors_summary(
    reports: &[CorsTestReport],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let passed = reports.iter().filter(|r| r.all_passed()).count();
    let mut summary = if passed == reports.len() {
        ResultSummary::success("CORS checks passed")
    } else {
        ResultSummary::failed("CORS checks failed")
    };
    summary.add_stat("buckets passed", passed);
    summary.add_stat("buckets failed", reports.len() - passed);
    if passed != reports.len() {
        summary.with_next_step("Redeploy without --skip-cors, or add the origin with --origin");
    }
    summary.render(supports_color, supports_unicode)
}

fn settings_lines(settings: &CorsSettings) -> Vec<(&'static str, String)> {
    let join = |values: &[String]| {
        if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        }
    };
    vec![
        ("Origins", join(&settings.allowed_origins)),
        ("Methods", join(&settings.allowed_methods)),
        ("Headers", join(&settings.allowed_headers)),
        ("Expose", join(&settings.expose_headers)),
        ("Max age", format!("{}s", settings.max_age)),
    ]
}

pub fn render_cors_settings(
    title: &str,
    settings: &CorsSettings,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, title);
    for (label, value) in settings_lines(settings) {
        header.add(label, value);
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_cors_template(
    name: &str,
    set: &EnvironmentCorsSet,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    [
        ("development", &set.development),
        ("staging", &set.staging),
        ("production", &set.production),
    ]
    .iter()
    .map(|(env, settings)| {
        render_cors_settings(
            &format!("{name} template: {env}"),
            settings,
            supports_color,
            supports_unicode,
        )
    })
    .collect::<Vec<_>>()
    .join("\n")
}
