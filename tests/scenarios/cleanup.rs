//! Scenario: removing an environment's buckets, and everything at once.

use std::sync::Arc;

use bucketship::application::{today_phrase, CleanupOptions, CleanupStatus, CleanupUseCase};
use bucketship::domain::entities::Environment;
use bucketship::domain::value_objects::RegionCatalog;

use crate::common::{shop_config, MemoryConnector, MemoryStore, ScriptedConfirmer};

fn store() -> MemoryStore {
    MemoryStore::new()
        .with_bucket("shop-dev-frontend", &["index.html", "assets/app.js"])
        .with_bucket("shop-dev-assets", &[])
        .with_bucket("shop-staging-frontend", &["index.html"])
}

#[test]
fn typed_phrase_deletes_only_matching_buckets() {
    let connector = MemoryConnector::new(store());
    let confirmer = Arc::new(ScriptedConfirmer::new(&["DELETE-development"]));
    let use_case = CleanupUseCase::new(connector.clone()).with_confirmer(confirmer.clone());

    let result = use_case
        .execute(&shop_config(Environment::Development), &CleanupOptions::new())
        .unwrap();

    assert_eq!(result.status, CleanupStatus::Finished);
    assert!(result.is_success());
    assert_eq!(result.deleted.len(), 2);
    assert_eq!(connector.store().bucket_names(), vec!["shop-staging-frontend"]);
    assert_eq!(confirmer.prompts().len(), 1);
    assert!(confirmer.prompts()[0].contains("DELETE-development"));
}

#[test]
fn wrong_phrase_deletes_nothing() {
    let connector = MemoryConnector::new(store());
    let confirmer = Arc::new(ScriptedConfirmer::new(&["yes"]));
    let use_case = CleanupUseCase::new(connector.clone()).with_confirmer(confirmer);

    let result = use_case
        .execute(&shop_config(Environment::Development), &CleanupOptions::new())
        .unwrap();

    assert!(result.is_declined());
    assert_eq!(connector.store().bucket_names().len(), 3);
    assert_eq!(connector.store().count("delete_bucket"), 0);
}

#[test]
fn dry_run_lists_without_prompting() {
    let connector = MemoryConnector::new(store());
    let confirmer = Arc::new(ScriptedConfirmer::new(&[]));
    let use_case = CleanupUseCase::new(connector.clone()).with_confirmer(confirmer.clone());

    let result = use_case
        .execute(
            &shop_config(Environment::Staging),
            &CleanupOptions::new().with_dry_run(true),
        )
        .unwrap();

    assert_eq!(result.status, CleanupStatus::DryRun);
    assert_eq!(result.matched, vec!["shop-staging-frontend"]);
    assert!(confirmer.prompts().is_empty());
    assert_eq!(connector.store().bucket_names().len(), 3);
}

#[test]
fn delete_all_needs_date_and_yes() {
    let connector = MemoryConnector::new(store());
    let today = today_phrase();
    let confirmer = Arc::new(ScriptedConfirmer::new(&[today.as_str(), "yes"]));
    let use_case = CleanupUseCase::new(connector.clone()).with_confirmer(confirmer.clone());
    let region = RegionCatalog::get("GRA").unwrap();

    let result = use_case.delete_all(&region, &CleanupOptions::new()).unwrap();

    assert!(result.is_success());
    assert_eq!(result.deleted.len(), 3);
    assert!(connector.store().bucket_names().is_empty());
    assert_eq!(confirmer.prompts().len(), 2);
}

#[test]
fn delete_all_stops_on_wrong_date() {
    let connector = MemoryConnector::new(store());
    let confirmer = Arc::new(ScriptedConfirmer::new(&["1999-01-01", "yes"]));
    let use_case = CleanupUseCase::new(connector.clone()).with_confirmer(confirmer.clone());
    let region = RegionCatalog::get("GRA").unwrap();

    let result = use_case.delete_all(&region, &CleanupOptions::new()).unwrap();

    assert!(result.is_declined());
    assert_eq!(connector.store().bucket_names().len(), 3);
    assert_eq!(confirmer.prompts().len(), 1);
}
