use bucketship::application::{EnvironmentStatus, MultiEnvReport};
use bucketship::domain::entities::DeployOutcome;

use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

fn status_icon(status: EnvironmentStatus) -> Icon {
    match status {
        EnvironmentStatus::Succeeded => Icon::Success,
        EnvironmentStatus::Failed => Icon::Error,
        EnvironmentStatus::Cancelled => Icon::Warning,
        EnvironmentStatus::Skipped | EnvironmentStatus::NotAttempted => Icon::Pending,
    }
}

fn status_detail(status: EnvironmentStatus) -> &'static str {
    match status {
        EnvironmentStatus::Succeeded => "deployed",
        EnvironmentStatus::Failed => "failed",
        EnvironmentStatus::Cancelled => "cancelled",
        EnvironmentStatus::Skipped => "skipped",
        EnvironmentStatus::NotAttempted => "not attempted",
    }
}

pub fn render_rollout_report(
    report: &MultiEnvReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if report.all_succeeded() {
        ResultSummary::success("Rollout complete")
    } else if report.with_status(EnvironmentStatus::Failed).is_empty() {
        ResultSummary::partial("Rollout stopped")
    } else {
        ResultSummary::failed("Rollout failed")
    };

    summary.add_stat(
        "environments deployed",
        report.with_status(EnvironmentStatus::Succeeded).len(),
    );

    for run in &report.runs {
        let mut line = format!(
            "{} {}: {}",
            status_icon(run.status).colored(supports_color, supports_unicode),
            run.environment,
            status_detail(run.status)
        );
        match (&run.outcome, &run.error) {
            (_, Some(error)) => line.push_str(&format!(" ({error})")),
            (Some(DeployOutcome::Failed { error, .. }), None) => {
                line.push_str(&format!(" ({error})"))
            }
            (Some(outcome), None) => {
                if let Some(result) = outcome.result() {
                    line.push_str(&format!(" ({} files)", result.file_count()));
                }
            }
            (None, None) => {}
        }
        summary.add_detail(line);
    }

    if let Some(env) = report.stopped_at() {
        summary.with_next_step(format!("Fix {env} and rerun deploy-all"));
    }

    summary.render(supports_color, supports_unicode)
}
