use std::path::Path;

use bucketship::domain::entities::{CancelReason, DeployOutcome, DeploymentResult};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub struct DeployHeader<'a> {
    pub environment: &'a str,
    pub bucket: &'a str,
    pub region: &'a str,
    pub source: &'a Path,
    pub prefix: &'a str,
    pub dry_run: bool,
}

pub fn render_deploy_header(
    header: &DeployHeader<'_>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut block = CommandHeader::new(Icon::Deploy, format!("Deploy to {}", header.environment));
    block.add("Source", header.source.display().to_string());
    block.add("Bucket", header.bucket);
    block.add("Region", header.region);
    if !header.prefix.is_empty() {
        block.add("Prefix", header.prefix);
    }
    if header.dry_run {
        block.add("Mode", "dry run");
    }
    block.render(supports_color, supports_unicode)
}

fn add_result(summary: &mut ResultSummary, result: &DeploymentResult) {
    let label = if result.dry_run {
        "files planned"
    } else {
        "files uploaded"
    };
    summary.add_stat(label, result.file_count());
    if !result.errors.is_empty() {
        summary.add_stat("errors", result.errors.len());
    }
    if let Some(url) = &result.website_url {
        summary.add_info(format!("Website: {url}"));
    }
    if let Some(url) = result.direct_urls.first() {
        summary.add_info(format!("Direct:  {url}"));
    }
    for warning in &result.warnings {
        summary.add_warning(warning.as_str());
    }
    for error in result.errors.iter().take(5) {
        summary.add_warning(error.as_str());
    }
    if result.errors.len() > 5 {
        summary.add_warning(format!("... and {} more errors", result.errors.len() - 5));
    }
}

pub fn render_deploy_outcome(
    outcome: &DeployOutcome,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let summary = match outcome {
        DeployOutcome::Succeeded(result) => {
            let mut summary = if result.dry_run {
                ResultSummary::success("Dry run complete")
            } else if result.warnings.is_empty() {
                ResultSummary::success("Deployment complete")
            } else {
                ResultSummary::partial("Deployment complete with warnings")
            };
            add_result(&mut summary, result);
            if result.dry_run {
                summary.with_next_step("Run again with --no-dry-run to upload");
            }
            summary
        }
        DeployOutcome::Cancelled(reason) => {
            let mut summary = ResultSummary::partial("Deployment cancelled");
            summary.add_warning(match reason {
                CancelReason::DeclinedByUser => "Nothing was deployed",
                CancelReason::Interrupted => "Interrupted; created buckets are being removed",
            });
            summary
        }
        DeployOutcome::Failed { result, error } => {
            let mut summary = ResultSummary::failed("Deployment failed");
            if let Some(result) = result {
                add_result(&mut summary, result);
            }
            summary.add_warning(error.as_str());
            summary
        }
    };
    summary.render(supports_color, supports_unicode)
}
