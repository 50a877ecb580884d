use bucketship::application::{CleanupResult, CleanupStatus};
use bucketship::domain::entities::BucketInfo;

use crate::ui::blocks::summary::ResultSummary;
use crate::ui::blocks::warning::WarningBlock;

/// The list shown before any destructive prompt
pub fn render_deletion_plan(
    scope: &str,
    buckets: &[BucketInfo],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut block = WarningBlock::new(format!(
        "{} bucket(s) will be permanently deleted from {scope}",
        buckets.len()
    ));
    for bucket in buckets {
        let created = bucket
            .created_at
            .map(|at| format!("  created {}", at.format("%Y-%m-%d")))
            .unwrap_or_default();
        block.add_line(format!("- {}{created}", bucket.name));
    }
    block.add_line("All objects and versions inside them are removed too.");
    block.render(supports_color, supports_unicode)
}

pub fn render_cleanup_result(
    result: &CleanupResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let summary = match result.status {
        CleanupStatus::NothingToDelete => ResultSummary::success("Nothing to delete"),
        CleanupStatus::DryRun => {
            let mut summary = ResultSummary::success("Dry run: nothing deleted");
            summary.add_stat("buckets would be deleted", result.matched.len());
            summary
        }
        CleanupStatus::Declined => {
            let mut summary = ResultSummary::partial("Cleanup cancelled");
            summary.add_warning("Confirmation did not match; nothing was deleted");
            summary
        }
        CleanupStatus::Finished => {
            let mut summary = if result.is_success() {
                ResultSummary::success("Cleanup complete")
            } else {
                ResultSummary::failed("Cleanup incomplete")
            };
            summary.add_stat("buckets deleted", result.deleted.len());
            summary.add_stat("buckets failed", result.failed.len());
            for name in &result.failed {
                summary.add_warning(format!("{name} could not be deleted"));
            }
            summary
        }
    };
    summary.render(supports_color, supports_unicode)
}
