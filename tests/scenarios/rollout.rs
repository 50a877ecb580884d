//! Scenario: rolling a site out across development, staging and production.

use std::sync::Arc;

use bucketship::application::{
    DeployOptions, DeployUseCase, EnvironmentStatus, MultiEnvOptions, MultiEnvironmentCoordinator,
    DEPLOY_PROMPT, PROCEED_PROMPT,
};
use bucketship::domain::entities::{CancelReason, DeployKind, DeployOutcome, Environment};
use bucketship::domain::ports::DeployEvent;

use crate::common::{
    shop_config, site, EchoProbe, MemoryConnector, MemoryStore, RecordingSink, ScriptedConfirmer,
};

fn use_case(
    connector: &MemoryConnector,
    answers: &[&str],
) -> (DeployUseCase<MemoryConnector, EchoProbe>, Arc<ScriptedConfirmer>) {
    let confirmer = Arc::new(ScriptedConfirmer::new(answers));
    let use_case = DeployUseCase::new(connector.clone(), EchoProbe { allow: true })
        .with_confirmer(confirmer.clone());
    (use_case, confirmer)
}

#[test]
fn development_deploy_publishes_site_with_website_and_cors() {
    let (_dir, root) = site();
    let connector = MemoryConnector::new(MemoryStore::new());
    let (use_case, confirmer) = use_case(&connector, &[]);

    let outcome = use_case.execute(&DeployOptions::new(shop_config(Environment::Development), &root));

    let DeployOutcome::Succeeded(result) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(result.bucket_name, "shop-dev-frontend");
    assert_eq!(result.region, "EU-WEST-PAR");
    assert_eq!(result.file_count(), 3);
    assert!(result.website_url.is_some());
    assert!(confirmer.prompts().is_empty());

    let bucket = connector.store().bucket("shop-dev-frontend").unwrap();
    assert_eq!(bucket.objects.len(), 3);
    assert!(bucket.website.is_some());
    assert!(bucket.cors.is_some());
}

#[test]
fn staging_previews_then_deploys_after_second_confirmation() {
    let (_dir, root) = site();
    let connector = MemoryConnector::new(MemoryStore::new());
    let (use_case, confirmer) = use_case(&connector, &["y", "y"]);
    let sink = Arc::new(RecordingSink::default());

    let outcome = use_case.execute_with_events(
        &DeployOptions::new(shop_config(Environment::Staging), &root),
        sink.clone(),
    );

    assert!(outcome.is_success());
    assert!(!outcome.result().unwrap().dry_run);
    assert_eq!(confirmer.prompts(), vec![DEPLOY_PROMPT, PROCEED_PROMPT]);

    let events = sink.events();
    let planned = events
        .iter()
        .filter(|e| matches!(e, DeployEvent::Planned { .. }))
        .count();
    let uploaded = events
        .iter()
        .filter(|e| matches!(e, DeployEvent::FileUploaded { .. }))
        .count();
    assert_eq!(planned, 3);
    assert_eq!(uploaded, 3);
}

#[test]
fn assets_deploy_keeps_directory_structure() {
    let (_dir, root) = site();
    let connector = MemoryConnector::new(MemoryStore::new());
    let (use_case, _) = use_case(&connector, &[]);

    let options = DeployOptions::new(shop_config(Environment::Development), &root)
        .with_kind(DeployKind::Assets);
    assert!(use_case.execute(&options).is_success());

    let bucket = connector.store().bucket("shop-dev-assets").unwrap();
    assert!(bucket.objects.contains_key("assets/app.js"));
    assert!(bucket.website.is_none());
}

#[test]
fn rollout_stops_at_declined_staging() {
    let (_dir, root) = site();
    let connector = MemoryConnector::new(MemoryStore::new());
    let (use_case, _) = use_case(&connector, &["n"]);

    let options = MultiEnvOptions::new(&root).with_production(true);
    let report = MultiEnvironmentCoordinator::new(&use_case).deploy_all(
        &options,
        |environment| Ok(shop_config(environment)),
        Arc::new(RecordingSink::default()),
    );

    let statuses: Vec<EnvironmentStatus> = report.runs.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            EnvironmentStatus::Succeeded,
            EnvironmentStatus::Cancelled,
            EnvironmentStatus::NotAttempted,
        ]
    );
    assert_eq!(
        report.runs[1].outcome,
        Some(DeployOutcome::Cancelled(CancelReason::DeclinedByUser))
    );
    assert_eq!(report.stopped_at(), Some(Environment::Staging));
    assert!(!report.all_succeeded());
    assert_eq!(connector.store().bucket_names(), vec!["shop-dev-frontend"]);
}

#[test]
fn rollout_skips_production_unless_included() {
    let (_dir, root) = site();
    let connector = MemoryConnector::new(MemoryStore::new());
    let (use_case, _) = use_case(&connector, &["y", "y"]);

    let report = MultiEnvironmentCoordinator::new(&use_case).deploy_all(
        &MultiEnvOptions::new(&root),
        |environment| Ok(shop_config(environment)),
        Arc::new(RecordingSink::default()),
    );

    assert_eq!(
        report.with_status(EnvironmentStatus::Succeeded),
        vec![Environment::Development, Environment::Staging]
    );
    assert_eq!(
        report.with_status(EnvironmentStatus::Skipped),
        vec![Environment::Production]
    );
    assert!(connector.store().bucket("shop-prod-frontend").is_none());
}

#[test]
fn cors_check_after_deploy_covers_every_domain() {
    let (_dir, root) = site();
    let connector = MemoryConnector::new(MemoryStore::new());
    let (use_case, _) = use_case(&connector, &[]);
    let options = DeployOptions::new(shop_config(Environment::Development), &root);

    let outcome = use_case.execute(&options);
    let report = use_case
        .verify_cors(&options, outcome.result().unwrap())
        .unwrap();

    assert_eq!(report.checks.len(), options.config.domains.len());
    assert!(report.all_passed());
}
