//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::{CleanupUseCase, DeployUseCase, TrackedBuckets};
use crate::config::{Config, CredentialChain};
use crate::domain::ports::{Confirmer, DeployEventSink};
use crate::error::BucketshipResult;
use crate::infrastructure::{HttpPreflightProbe, JsonEventSink, LogEventSink, S3Connector};

/// Connector shared by every use case of one run
pub type SharedConnector = Arc<S3Connector>;

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<SharedConnector, HttpPreflightProbe>;

/// Type alias for the concrete CleanupUseCase with all dependencies
pub type ConcreteCleanupUseCase = CleanupUseCase<SharedConnector>;

/// Resolve credentials and open a connector.
///
/// `explicit` wins over everything the chain would look at.
pub fn create_connector(
    chain: &CredentialChain,
    explicit: Option<(&str, &str)>,
) -> BucketshipResult<SharedConnector> {
    let credentials = chain.resolve(explicit)?;
    tracing::debug!(access_key = %credentials.masked_access_key(), "using credentials");
    Ok(Arc::new(S3Connector::new(credentials)?))
}

/// Create a deploy use case with all dependencies wired up
///
/// Worker count and excluded names come from the `[sync]` settings.
pub fn create_deploy_use_case(
    connector: SharedConnector,
    confirmer: Arc<dyn Confirmer>,
    config: &Config,
) -> BucketshipResult<ConcreteDeployUseCase> {
    let probe = HttpPreflightProbe::new()?;
    Ok(DeployUseCase::new(connector, probe)
        .with_confirmer(confirmer)
        .with_workers(config.sync.workers())
        .with_exclude(config.sync.exclude.clone()))
}

/// Deploy use case that records created buckets and stops on interrupt
pub fn create_tracked_deploy_use_case(
    connector: SharedConnector,
    confirmer: Arc<dyn Confirmer>,
    config: &Config,
    registry: Arc<TrackedBuckets>,
    interrupt: Arc<AtomicBool>,
) -> BucketshipResult<ConcreteDeployUseCase> {
    Ok(create_deploy_use_case(connector, confirmer, config)?
        .with_registry(registry)
        .with_interrupt(interrupt))
}

/// Create a cleanup use case with all dependencies wired up
pub fn create_cleanup_use_case(
    connector: SharedConnector,
    confirmer: Arc<dyn Confirmer>,
) -> ConcreteCleanupUseCase {
    CleanupUseCase::new(connector).with_confirmer(confirmer)
}

/// NDJSON on stdout for `--json`, `tracing` records otherwise
pub fn create_event_sink(json: bool) -> Arc<dyn DeployEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(LogEventSink::new())
    }
}
