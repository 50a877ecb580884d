//! Deploy Use Case
//!
//! Runs one deployment through its states:
//! 1. Validating - source path, bucket name and region
//! 2. ConfirmationPending - only when the environment requires it
//! 3. DryRunPreview - plan without uploading, then ask again
//! 4. Executing - create, sync, website, CORS, URLs, in that order
//!
//! Cancellation is an outcome, not an error. Failures inside the execution
//! steps are captured in the returned [`DeployOutcome`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::buckets::{BucketLifecycleManager, CreateOutcome};
use crate::application::cors::{CorsPolicyEngine, CorsTestReport};
use crate::application::registry::TrackedBuckets;
use crate::application::sync::{FileSyncEngine, SyncOptions, DEFAULT_WORKERS};
use crate::application::website::WebsiteConfigurator;
use crate::domain::entities::{CancelReason, DeployOutcome, DeployState, DeploymentResult};
use crate::domain::ports::{
    confirm, AlwaysDecline, CannedAcl, Confirmer, DeployEvent, DeployEventSink, DeployStep,
    NoopEventSink, ObjectStore, PreflightProbe, StoreConnector,
};
use crate::domain::services::{direct_url, website_url};
use crate::domain::value_objects::{BucketName, RegionConfig};
use crate::error::{BucketshipError, BucketshipResult};

use super::options::{DeployOptions, DEPLOY_PROMPT, PROCEED_PROMPT};

/// Inputs that passed validation
struct Validated {
    bucket: BucketName,
    region: RegionConfig,
}

/// Deploy use case - drives one deployment to a terminal outcome
///
/// Parameterized by its ports so tests can run it against in-memory
/// storage and scripted answers.
pub struct DeployUseCase<C, P>
where
    C: StoreConnector,
    P: PreflightProbe,
{
    connector: C,
    probe: P,
    confirmer: Arc<dyn Confirmer>,
    registry: Option<Arc<TrackedBuckets>>,
    interrupt: Option<Arc<AtomicBool>>,
    workers: usize,
    exclude: Vec<String>,
}

impl<C, P> DeployUseCase<C, P>
where
    C: StoreConnector,
    P: PreflightProbe,
{
    pub fn new(connector: C, probe: P) -> Self {
        Self {
            connector,
            probe,
            confirmer: Arc::new(AlwaysDecline),
            registry: None,
            interrupt: None,
            workers: DEFAULT_WORKERS,
            exclude: Vec::new(),
        }
    }

    /// Where confirmation answers come from; declines everything by default
    pub fn with_confirmer(mut self, confirmer: Arc<dyn Confirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    /// Record buckets this deployment creates
    pub fn with_registry(mut self, registry: Arc<TrackedBuckets>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Extra file or directory names never uploaded
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Execute the deployment without progress reporting
    pub fn execute(&self, options: &DeployOptions) -> DeployOutcome {
        self.run(options, &NoopEventSink)
    }

    /// Execute the deployment, reporting progress to `event_sink`
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> DeployOutcome {
        self.run(options, event_sink.as_ref())
    }

    /// Live CORS check of a finished deployment against the environment's domains.
    ///
    /// A failing check is reported in the returned report; it never changes
    /// the deployment's own outcome.
    pub fn verify_cors(
        &self,
        options: &DeployOptions,
        result: &DeploymentResult,
    ) -> BucketshipResult<CorsTestReport> {
        self.enter(DeployState::PostValidating, &result.bucket_name);
        let bucket = BucketName::parse(&result.bucket_name)?;
        let region = options.config.region_config()?;
        let store = self.connector.connect(&region)?;
        let engine = CorsPolicyEngine::new(store.as_ref(), &self.probe, &region);
        Ok(engine.test_environment(&bucket, &options.config))
    }

    fn run(&self, options: &DeployOptions, events: &dyn DeployEventSink) -> DeployOutcome {
        let target = options
            .bucket_name
            .clone()
            .unwrap_or_else(|| options.config.bucket_prefix.clone());
        self.enter(DeployState::Validating, &target);
        let Validated { bucket, region } = match self.validate(options) {
            Ok(valid) => valid,
            Err(err) => return failed(None, err),
        };
        let preview_first = options.preview_first();

        events.on_event(DeployEvent::Started {
            environment: options.config.environment.to_string(),
            bucket: bucket.to_string(),
            source: options.source.clone(),
            dry_run: preview_first,
        });

        if self.interrupted() {
            return DeployOutcome::Cancelled(CancelReason::Interrupted);
        }

        if options.config.require_confirmation {
            self.enter(DeployState::ConfirmationPending, bucket.as_str());
            if !confirm(self.confirmer.as_ref(), DEPLOY_PROMPT) {
                // Ctrl+C aborts an open prompt, which reads as a refusal
                if self.interrupted() {
                    return DeployOutcome::Cancelled(CancelReason::Interrupted);
                }
                tracing::info!(bucket = %bucket, "deployment declined");
                return DeployOutcome::Cancelled(CancelReason::DeclinedByUser);
            }
        }

        let store = match self.connector.connect(&region) {
            Ok(store) => store,
            Err(err) => return failed(None, err),
        };

        if preview_first {
            self.enter(DeployState::DryRunPreview, bucket.as_str());
            let preview = self.sync_options(options).with_dry_run(true);
            let engine = self.sync_engine(store.as_ref());
            if let Err(err) = engine.sync(&options.source, &bucket, &preview, events) {
                return failed(None, err);
            }
            if !confirm(self.confirmer.as_ref(), PROCEED_PROMPT) {
                if self.interrupted() {
                    return DeployOutcome::Cancelled(CancelReason::Interrupted);
                }
                tracing::info!(bucket = %bucket, "stopping after dry run");
                return DeployOutcome::Succeeded(DeploymentResult::dry_run(
                    bucket.as_str(),
                    region.id(),
                ));
            }
        }

        if self.interrupted() {
            return DeployOutcome::Cancelled(CancelReason::Interrupted);
        }

        self.enter(DeployState::Executing, bucket.as_str());
        self.execute_steps(options, store.as_ref(), &bucket, &region, events)
    }

    fn validate(&self, options: &DeployOptions) -> BucketshipResult<Validated> {
        if !options.source.exists() {
            return Err(BucketshipError::SourceNotFound {
                path: options.source.clone(),
            });
        }
        let bucket = options.bucket()?;
        let region = options.config.region_config()?;
        Ok(Validated { bucket, region })
    }

    fn execute_steps(
        &self,
        options: &DeployOptions,
        store: &dyn ObjectStore,
        bucket: &BucketName,
        region: &RegionConfig,
        events: &dyn DeployEventSink,
    ) -> DeployOutcome {
        let static_website = options.static_website();
        let mut result = DeploymentResult::empty(bucket.as_str(), region.id());
        let manager = BucketLifecycleManager::new(store, region);

        // 1. Create bucket; an existing one is fine and a failure surfaces in sync
        events.on_event(DeployEvent::StepStarted {
            step: DeployStep::CreateBucket,
        });
        match manager.create(bucket, CannedAcl::PublicRead) {
            Ok(CreateOutcome::Created) => {
                if let Some(registry) = &self.registry {
                    registry.track(bucket, region);
                }
            }
            Ok(CreateOutcome::AlreadyOwned) => {}
            Err(err) => warn(&mut result, events, DeployStep::CreateBucket, err),
        }

        // 2. Sync files
        events.on_event(DeployEvent::StepStarted {
            step: DeployStep::SyncFiles,
        });
        let report = match self.sync_engine(store).sync(
            &options.source,
            bucket,
            &self.sync_options(options),
            events,
        ) {
            Ok(report) => report,
            Err(err) => return failed(Some(result), err),
        };
        if report.interrupted {
            return DeployOutcome::Cancelled(CancelReason::Interrupted);
        }
        result.files_uploaded = report.uploaded_keys();
        result.errors.extend(
            report
                .failures
                .iter()
                .map(|f| format!("upload of {} failed: {}", f.key, f.error)),
        );
        if report.nothing_uploaded() {
            let message = format!("none of the {} files could be uploaded", report.planned);
            return failed(Some(result), message);
        }

        // 3. Website hosting and public ACLs
        if static_website {
            events.on_event(DeployEvent::StepStarted {
                step: DeployStep::ConfigureWebsite,
            });
            let website =
                WebsiteConfigurator::new(store).with_documents(options.website.clone());
            if let Err(err) = website.configure(bucket) {
                warn(&mut result, events, DeployStep::ConfigureWebsite, err);
            }
            if let Err(err) = website.make_bucket_public(bucket) {
                warn(&mut result, events, DeployStep::ConfigureWebsite, err);
            }
            let keys = match manager.list_files(bucket, None) {
                Ok(keys) => keys,
                Err(err) => {
                    tracing::debug!(error = %err, "listing failed; using uploaded keys");
                    result.files_uploaded.clone()
                }
            };
            let acl = website.make_objects_public(bucket, &keys);
            if !acl.is_complete() {
                let message = format!("public-read not set on {} objects", acl.failed.len());
                warn(&mut result, events, DeployStep::ConfigureWebsite, message);
            }
        }

        // 4. CORS
        if !options.skip_cors {
            events.on_event(DeployEvent::StepStarted {
                step: DeployStep::ApplyCors,
            });
            let engine = CorsPolicyEngine::new(store, &self.probe, region);
            let settings = options.cors_settings_for(bucket, region);
            if !engine.apply(bucket, &settings) {
                warn(
                    &mut result,
                    events,
                    DeployStep::ApplyCors,
                    "CORS policy could not be applied",
                );
            }
        }

        // 5. URLs
        events.on_event(DeployEvent::StepStarted {
            step: DeployStep::GenerateUrls,
        });
        result.direct_urls = result
            .files_uploaded
            .iter()
            .map(|key| direct_url(bucket, key, region))
            .collect();
        if static_website {
            result.website_url = Some(website_url(bucket, "", region));
        }

        events.on_event(DeployEvent::Completed {
            uploaded: result.files_uploaded.len(),
            failed: report.failures.len(),
        });
        self.enter(DeployState::Succeeded, bucket.as_str());
        DeployOutcome::Succeeded(result)
    }

    fn sync_engine<'s>(&self, store: &'s dyn ObjectStore) -> FileSyncEngine<'s> {
        let engine = FileSyncEngine::new(store);
        match &self.interrupt {
            Some(flag) => engine.with_interrupt(Arc::clone(flag)),
            None => engine,
        }
    }

    fn sync_options(&self, options: &DeployOptions) -> SyncOptions {
        SyncOptions::new()
            .with_prefix(options.destination_prefix.clone())
            .with_static_website(options.static_website())
            .with_workers(self.workers)
            .with_exclude(self.exclude.clone())
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn enter(&self, state: DeployState, bucket: &str) {
        tracing::debug!(state = ?state, bucket, "deploy state");
    }
}

fn warn(
    result: &mut DeploymentResult,
    events: &dyn DeployEventSink,
    step: DeployStep,
    message: impl fmt::Display,
) {
    let message = message.to_string();
    tracing::warn!(step = step.as_str(), error = %message, "deploy step failed");
    events.on_event(DeployEvent::StepWarning {
        step,
        message: message.clone(),
    });
    result.warnings.push(format!("{}: {}", step.as_str(), message));
}

fn failed(result: Option<DeploymentResult>, error: impl fmt::Display) -> DeployOutcome {
    let error = error.to_string();
    tracing::error!(error = %error, "deployment failed");
    let result = result.map(|mut result| {
        result.success = false;
        result.errors.push(error.clone());
        result
    });
    DeployOutcome::Failed { result, error }
}
