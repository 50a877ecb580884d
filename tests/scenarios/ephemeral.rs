//! Scenario: buckets created by a run are removed when the run is ephemeral.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use bucketship::application::{CleanupGuard, DeployOptions, DeployUseCase, TrackedBuckets};
use bucketship::domain::entities::{CancelReason, DeployOutcome, Environment};
use bucketship::domain::ports::StoreConnector;

use crate::common::{shop_config, site, EchoProbe, MemoryConnector, MemoryStore};

fn tracked_use_case(
    connector: &MemoryConnector,
    registry: &Arc<TrackedBuckets>,
) -> DeployUseCase<MemoryConnector, EchoProbe> {
    DeployUseCase::new(connector.clone(), EchoProbe { allow: true })
        .with_registry(Arc::clone(registry))
}

#[test]
fn armed_guard_removes_created_bucket_on_drop() {
    let (_dir, root) = site();
    let connector = MemoryConnector::new(MemoryStore::new());
    let registry = Arc::new(TrackedBuckets::new());
    let guard_connector: Arc<dyn StoreConnector> = Arc::new(connector.clone());

    {
        let _guard = CleanupGuard::new(Arc::clone(&registry), guard_connector);
        let outcome = tracked_use_case(&connector, &registry)
            .execute(&DeployOptions::new(shop_config(Environment::Development), &root));
        assert!(outcome.is_success());
        assert_eq!(registry.tracked(), vec!["shop-dev-frontend"]);
        assert!(connector.store().bucket("shop-dev-frontend").is_some());
    }

    assert!(connector.store().bucket_names().is_empty());
    assert!(registry.is_empty());
}

#[test]
fn disarmed_guard_keeps_everything() {
    let (_dir, root) = site();
    let connector = MemoryConnector::new(MemoryStore::new());
    let registry = Arc::new(TrackedBuckets::new());
    let guard_connector: Arc<dyn StoreConnector> = Arc::new(connector.clone());

    {
        let mut guard = CleanupGuard::new(Arc::clone(&registry), guard_connector);
        tracked_use_case(&connector, &registry)
            .execute(&DeployOptions::new(shop_config(Environment::Development), &root));
        guard.disarm();
    }

    assert_eq!(connector.store().bucket_names(), vec!["shop-dev-frontend"]);
}

#[test]
fn pre_existing_bucket_survives_ephemeral_run() {
    let (_dir, root) = site();
    let connector =
        MemoryConnector::new(MemoryStore::new().with_bucket("shop-dev-frontend", &["old.html"]));
    let registry = Arc::new(TrackedBuckets::new());
    let guard_connector: Arc<dyn StoreConnector> = Arc::new(connector.clone());

    {
        let _guard = CleanupGuard::new(Arc::clone(&registry), guard_connector);
        tracked_use_case(&connector, &registry)
            .execute(&DeployOptions::new(shop_config(Environment::Development), &root));
        assert!(registry.is_empty());
    }

    assert!(connector.store().bucket("shop-dev-frontend").is_some());
}

#[test]
fn raised_interrupt_cancels_before_upload() {
    let (_dir, root) = site();
    let connector = MemoryConnector::new(MemoryStore::new());
    let interrupt = Arc::new(AtomicBool::new(true));

    let outcome = DeployUseCase::new(connector.clone(), EchoProbe { allow: true })
        .with_interrupt(interrupt)
        .execute(&DeployOptions::new(shop_config(Environment::Development), &root));

    assert_eq!(outcome, DeployOutcome::Cancelled(CancelReason::Interrupted));
    assert_eq!(connector.store().count("put_object"), 0);
}
