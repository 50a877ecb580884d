//! Deploy command handlers
//!
//! `deploy` publishes one environment; `deploy-all` rolls out across
//! environments in order and stops at the first failure.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use bucketship::application::{
    CleanupGuard, CorsTestReport, EnvironmentStatus, MultiEnvOptions, MultiEnvReport,
    MultiEnvironmentCoordinator, TrackedBuckets,
};
use bucketship::domain::entities::{
    CancelReason, DeployKind, DeployOutcome, Environment, EnvironmentOverrides,
};
use bucketship::domain::ports::{DeployEventSink, StoreConnector};
use bucketship::domain::value_objects::CorsPreset;
use bucketship::presentation::{create_event_sink, create_tracked_deploy_use_case, TargetArgs};
use bucketship::DeployOptions;

use super::{Exit, Session};
use crate::ui::console::ConsoleEventSink;
use crate::ui::json;
use crate::ui::views::cors::render_cors_report;
use crate::ui::views::deploy::{render_deploy_header, render_deploy_outcome, DeployHeader};
use crate::ui::views::multi_env::render_rollout_report;

pub struct DeployRequest {
    pub environment: Option<Environment>,
    pub source: PathBuf,
    pub target: TargetArgs,
    pub dest_prefix: String,
    pub cors_type: Option<CorsPreset>,
    pub origins: Vec<String>,
    pub skip_cors: bool,
    pub dry_run: Option<bool>,
    pub no_confirm: bool,
    pub ephemeral: bool,
    pub verify_cors: bool,
}

pub struct DeployAllRequest {
    pub source: PathBuf,
    pub kind: DeployKind,
    pub include_production: bool,
    pub dry_run: Option<bool>,
    pub skip_cors: bool,
    pub no_confirm: bool,
}

fn event_sink(session: &Session) -> Arc<dyn DeployEventSink> {
    if session.ui.json {
        create_event_sink(true)
    } else {
        Arc::new(ConsoleEventSink::new(session.ui))
    }
}

fn outcome_exit(outcome: &DeployOutcome) -> Exit {
    match outcome {
        DeployOutcome::Succeeded(_) => Exit::Success,
        DeployOutcome::Cancelled(CancelReason::DeclinedByUser) => Exit::Success,
        DeployOutcome::Cancelled(CancelReason::Interrupted) => Exit::Interrupted,
        DeployOutcome::Failed { .. } => Exit::Failure,
    }
}

pub(crate) fn outcome_json(outcome: &DeployOutcome) -> serde_json::Value {
    match outcome {
        DeployOutcome::Succeeded(result) => serde_json::json!({
            "status": "succeeded",
            "result": result,
        }),
        DeployOutcome::Cancelled(reason) => serde_json::json!({
            "status": "cancelled",
            "reason": reason,
        }),
        DeployOutcome::Failed { result, error } => serde_json::json!({
            "status": "failed",
            "error": error,
            "result": result,
        }),
    }
}

pub fn cmd_deploy(session: &Session, request: DeployRequest) -> Result<Exit> {
    let ui = session.ui;
    let environment = session.environment(request.environment)?;
    let overrides = EnvironmentOverrides {
        bucket_prefix: request.target.bucket_prefix.clone(),
        region: request.target.region.clone(),
        cors: request.cors_type,
        extra_origins: request.origins.clone(),
        require_confirmation: request.no_confirm.then_some(false),
        ..EnvironmentOverrides::default()
    };
    let config = session.environment_config(environment, &overrides);

    let mut options = DeployOptions::new(config, &request.source)
        .with_kind(request.target.kind.into())
        .with_destination_prefix(request.dest_prefix.as_str())
        .with_skip_cors(request.skip_cors)
        .with_dry_run(request.dry_run);
    if let Some(bucket) = &request.target.bucket {
        options = options.with_bucket_name(bucket.as_str());
    }

    // Reject bad names and regions before touching credentials
    let bucket = options.bucket()?;
    let region = options.config.region_config()?;

    let connector = session.connector()?;
    let registry = Arc::new(TrackedBuckets::new());
    let store_connector: Arc<dyn StoreConnector> = connector.clone();
    let mut guard = CleanupGuard::new(Arc::clone(&registry), store_connector);

    let use_case = create_tracked_deploy_use_case(
        connector,
        session.confirmer(),
        &session.config,
        registry,
        Arc::clone(&session.interrupt),
    )?;

    if !ui.json {
        print!(
            "{}",
            render_deploy_header(
                &DeployHeader {
                    environment: environment.as_str(),
                    bucket: bucket.as_str(),
                    region: region.id(),
                    source: &request.source,
                    prefix: &request.dest_prefix,
                    dry_run: options.preview_first(),
                },
                ui.color,
                ui.unicode,
            )
        );
    }

    let outcome = use_case.execute_with_events(&options, event_sink(session));

    let cors_report: Option<CorsTestReport> = match &outcome {
        DeployOutcome::Succeeded(result) if request.verify_cors && !result.dry_run => {
            match use_case.verify_cors(&options, result) {
                Ok(report) => Some(report),
                Err(err) => {
                    tracing::warn!(error = %err, "CORS verification could not run");
                    None
                }
            }
        }
        _ => None,
    };

    let interrupted = matches!(outcome, DeployOutcome::Cancelled(CancelReason::Interrupted));
    if request.ephemeral || interrupted {
        tracing::info!(tracked = guard.registry().len(), "removing buckets created by this run");
    } else {
        guard.disarm();
    }

    if ui.json {
        let mut event = outcome_json(&outcome);
        event["event"] = "complete".into();
        event["command"] = "deploy".into();
        event["environment"] = environment.as_str().into();
        if let Some(report) = &cors_report {
            event["cors"] = serde_json::to_value(report)?;
        }
        json::emit(event)?;
    } else {
        print!("{}", render_deploy_outcome(&outcome, ui.color, ui.unicode));
        if let Some(report) = &cors_report {
            print!(
                "{}",
                render_cors_report(report, bucketship::application::DEFAULT_TEST_PATH, ui.color, ui.unicode)
            );
        }
    }

    let exit = outcome_exit(&outcome);
    if exit == Exit::Success && cors_report.is_some_and(|r| !r.all_passed()) {
        return Ok(Exit::Failure);
    }
    Ok(exit)
}

fn rollout_exit(report: &MultiEnvReport) -> Exit {
    let interrupted = report.runs.iter().any(|run| {
        matches!(
            run.outcome,
            Some(DeployOutcome::Cancelled(CancelReason::Interrupted))
        )
    });
    if interrupted {
        Exit::Interrupted
    } else {
        Exit::from_success(report.with_status(EnvironmentStatus::Failed).is_empty())
    }
}

fn rollout_json(report: &MultiEnvReport) -> serde_json::Value {
    let runs: Vec<serde_json::Value> = report
        .runs
        .iter()
        .map(|run| {
            let mut value = serde_json::json!({
                "environment": run.environment.as_str(),
                "status": run.status,
            });
            if let Some(outcome) = &run.outcome {
                value["outcome"] = outcome_json(outcome);
            }
            if let Some(error) = &run.error {
                value["error"] = error.as_str().into();
            }
            value
        })
        .collect();
    serde_json::json!({
        "event": "complete",
        "command": "deploy-all",
        "success": report.all_succeeded(),
        "environments": runs,
    })
}

pub fn cmd_deploy_all(session: &Session, request: DeployAllRequest) -> Result<Exit> {
    let ui = session.ui;
    let overrides = EnvironmentOverrides {
        require_confirmation: request.no_confirm.then_some(false),
        ..EnvironmentOverrides::default()
    };

    let connector = session.connector()?;
    let registry = Arc::new(TrackedBuckets::new());
    let store_connector: Arc<dyn StoreConnector> = connector.clone();
    let mut guard = CleanupGuard::new(Arc::clone(&registry), store_connector);

    let use_case = create_tracked_deploy_use_case(
        connector,
        session.confirmer(),
        &session.config,
        registry,
        Arc::clone(&session.interrupt),
    )?;
    let options = MultiEnvOptions::new(&request.source)
        .with_production(request.include_production)
        .with_kind(request.kind)
        .with_dry_run(request.dry_run)
        .with_skip_cors(request.skip_cors);

    let report = MultiEnvironmentCoordinator::new(&use_case).deploy_all(
        &options,
        |environment| Ok(session.environment_config(environment, &overrides)),
        event_sink(session),
    );

    let exit = rollout_exit(&report);
    if exit != Exit::Interrupted {
        guard.disarm();
    }

    if ui.json {
        json::emit(rollout_json(&report))?;
    } else {
        print!("{}", render_rollout_report(&report, ui.color, ui.unicode));
    }
    Ok(exit)
}
