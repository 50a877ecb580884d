//! Multi-Environment Deployment
//!
//! Deploys one source to several environments, one at a time, in rollout
//! order. Production only runs when asked for. The first environment that
//! fails or is cancelled stops the rollout; later ones are not attempted.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::application::cors::CorsTestReport;
use crate::application::deploy::{DeployOptions, DeployUseCase};
use crate::domain::entities::{
    DeployKind, DeployOutcome, DeploymentResult, Environment, EnvironmentConfig,
};
use crate::domain::ports::{DeployEventSink, PreflightProbe, StoreConnector};
use crate::error::BucketshipResult;

/// How one environment fared in a rollout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentStatus {
    Succeeded,
    Failed,
    Cancelled,
    /// Left out on purpose (production without opt-in)
    Skipped,
    /// Never reached because an earlier environment stopped the rollout
    NotAttempted,
}

/// One environment's entry in a rollout report
#[derive(Debug, Clone)]
pub struct EnvironmentRun {
    pub environment: Environment,
    pub status: EnvironmentStatus,
    pub outcome: Option<DeployOutcome>,
    /// Set when the environment's configuration could not be resolved
    pub error: Option<String>,
}

impl EnvironmentRun {
    fn without_outcome(environment: Environment, status: EnvironmentStatus) -> Self {
        Self {
            environment,
            status,
            outcome: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MultiEnvReport {
    pub runs: Vec<EnvironmentRun>,
}

impl MultiEnvReport {
    /// True when nothing failed, was cancelled or was left unattempted
    pub fn all_succeeded(&self) -> bool {
        self.runs.iter().all(|r| {
            matches!(
                r.status,
                EnvironmentStatus::Succeeded | EnvironmentStatus::Skipped
            )
        })
    }

    pub fn with_status(&self, status: EnvironmentStatus) -> Vec<Environment> {
        self.runs
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.environment)
            .collect()
    }

    /// Environment that stopped the rollout, if any
    pub fn stopped_at(&self) -> Option<Environment> {
        self.runs
            .iter()
            .find(|r| {
                matches!(
                    r.status,
                    EnvironmentStatus::Failed | EnvironmentStatus::Cancelled
                )
            })
            .map(|r| r.environment)
    }
}

/// Options for a rollout
#[derive(Debug, Clone)]
pub struct MultiEnvOptions {
    pub environments: Vec<Environment>,
    pub include_production: bool,
    pub source: PathBuf,
    pub kind: DeployKind,
    pub dry_run: Option<bool>,
    pub skip_cors: bool,
}

impl MultiEnvOptions {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            environments: Environment::ALL.to_vec(),
            include_production: false,
            source: source.into(),
            kind: DeployKind::Frontend,
            dry_run: None,
            skip_cors: false,
        }
    }

    pub fn with_environments(mut self, environments: Vec<Environment>) -> Self {
        self.environments = environments;
        self
    }

    pub fn with_production(mut self, include: bool) -> Self {
        self.include_production = include;
        self
    }

    pub fn with_kind(mut self, kind: DeployKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_dry_run(mut self, dry_run: Option<bool>) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_skip_cors(mut self, skip: bool) -> Self {
        self.skip_cors = skip;
        self
    }

    fn deploy_options(&self, config: EnvironmentConfig) -> DeployOptions {
        DeployOptions::new(config, self.source.clone())
            .with_kind(self.kind)
            .with_dry_run(self.dry_run)
            .with_skip_cors(self.skip_cors)
    }
}

/// Runs a [`DeployUseCase`] per environment
pub struct MultiEnvironmentCoordinator<'a, C, P>
where
    C: StoreConnector,
    P: PreflightProbe,
{
    deploy: &'a DeployUseCase<C, P>,
}

impl<'a, C, P> MultiEnvironmentCoordinator<'a, C, P>
where
    C: StoreConnector,
    P: PreflightProbe,
{
    pub fn new(deploy: &'a DeployUseCase<C, P>) -> Self {
        Self { deploy }
    }

    /// Deploy to every selected environment.
    ///
    /// `resolve` turns an environment into its configuration; a resolution
    /// error counts as that environment failing.
    pub fn deploy_all<F>(
        &self,
        options: &MultiEnvOptions,
        resolve: F,
        events: Arc<dyn DeployEventSink>,
    ) -> MultiEnvReport
    where
        F: Fn(Environment) -> BucketshipResult<EnvironmentConfig>,
    {
        let mut report = MultiEnvReport::default();
        let mut stopped = false;

        for &environment in &options.environments {
            if environment == Environment::Production && !options.include_production {
                tracing::info!("skipping production; opt in to deploy it");
                report.runs.push(EnvironmentRun::without_outcome(
                    environment,
                    EnvironmentStatus::Skipped,
                ));
                continue;
            }
            if stopped {
                report.runs.push(EnvironmentRun::without_outcome(
                    environment,
                    EnvironmentStatus::NotAttempted,
                ));
                continue;
            }

            tracing::info!(environment = %environment, "deploying environment");
            let config = match resolve(environment) {
                Ok(config) => config,
                Err(err) => {
                    tracing::error!(environment = %environment, error = %err, "invalid configuration");
                    stopped = true;
                    report.runs.push(EnvironmentRun {
                        environment,
                        status: EnvironmentStatus::Failed,
                        outcome: None,
                        error: Some(err.to_string()),
                    });
                    continue;
                }
            };

            let outcome = self
                .deploy
                .execute_with_events(&options.deploy_options(config), Arc::clone(&events));
            let status = match &outcome {
                DeployOutcome::Succeeded(_) => EnvironmentStatus::Succeeded,
                DeployOutcome::Cancelled(_) => EnvironmentStatus::Cancelled,
                DeployOutcome::Failed { .. } => EnvironmentStatus::Failed,
            };
            if status != EnvironmentStatus::Succeeded {
                tracing::warn!(environment = %environment, status = ?status, "stopping rollout");
                stopped = true;
            }
            report.runs.push(EnvironmentRun {
                environment,
                status,
                outcome: Some(outcome),
                error: None,
            });
        }

        report
    }

    /// Live CORS check of each environment's bucket, independently.
    pub fn test_all_cors<F>(
        &self,
        options: &MultiEnvOptions,
        resolve: F,
    ) -> Vec<(Environment, BucketshipResult<CorsTestReport>)>
    where
        F: Fn(Environment) -> BucketshipResult<EnvironmentConfig>,
    {
        options
            .environments
            .iter()
            .map(|&environment| {
                let report = resolve(environment).and_then(|config| {
                    let deploy_options = options.deploy_options(config);
                    let bucket = deploy_options.bucket()?;
                    let region = deploy_options.config.region_config()?;
                    let deployed = DeploymentResult::empty(bucket.as_str(), region.id());
                    self.deploy.verify_cors(&deploy_options, &deployed)
                });
                (environment, report)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{
        MemoryStore, ScriptedConfirmer, SharedConnector, StaticProbe,
    };
    use crate::domain::entities::EnvironmentOverrides;
    use crate::domain::ports::NoopEventSink;
    use crate::error::BucketshipError;
    use std::fs;

    fn site() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("build");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("index.html"), "<html></html>").unwrap();
        (dir, root)
    }

    /// Every environment deploys without prompts unless `gated` is set.
    fn resolver(gated: bool) -> impl Fn(Environment) -> BucketshipResult<EnvironmentConfig> {
        move |env| {
            Ok(EnvironmentConfig::builtin(env).with_overrides(&EnvironmentOverrides {
                require_confirmation: Some(gated),
                dry_run_first: Some(false),
                ..Default::default()
            }))
        }
    }

    fn deploy(
        store: &Arc<MemoryStore>,
        answers: &[&str],
    ) -> DeployUseCase<SharedConnector, StaticProbe> {
        DeployUseCase::new(
            SharedConnector(Arc::clone(store)),
            StaticProbe(Some("*".into())),
        )
        .with_confirmer(Arc::new(ScriptedConfirmer::new(answers)))
    }

    #[test]
    fn production_is_skipped_by_default() {
        let (_dir, root) = site();
        let store = Arc::new(MemoryStore::new());
        let deploy = deploy(&store, &[]);

        let report = MultiEnvironmentCoordinator::new(&deploy).deploy_all(
            &MultiEnvOptions::new(&root),
            resolver(false),
            Arc::new(NoopEventSink),
        );

        assert_eq!(
            report.with_status(EnvironmentStatus::Succeeded),
            vec![Environment::Development, Environment::Staging]
        );
        assert_eq!(
            report.with_status(EnvironmentStatus::Skipped),
            vec![Environment::Production]
        );
        assert!(report.all_succeeded());
        assert!(store.bucket("myapp-prod-frontend").is_none());
    }

    #[test]
    fn production_runs_when_included() {
        let (_dir, root) = site();
        let store = Arc::new(MemoryStore::new());
        let deploy = deploy(&store, &[]);

        let report = MultiEnvironmentCoordinator::new(&deploy).deploy_all(
            &MultiEnvOptions::new(&root).with_production(true),
            resolver(false),
            Arc::new(NoopEventSink),
        );

        assert_eq!(report.with_status(EnvironmentStatus::Succeeded).len(), 3);
        assert!(store.bucket("myapp-prod-frontend").is_some());
    }

    #[test]
    fn first_failure_stops_the_rollout() {
        let (_dir, root) = site();
        let store = Arc::new(MemoryStore::new());
        let deploy = deploy(&store, &[]);
        let resolve = |env: Environment| {
            if env == Environment::Development {
                Err(BucketshipError::UnknownRegion {
                    region: "MARS".to_string(),
                    available: vec![],
                })
            } else {
                resolver(false)(env)
            }
        };

        let report = MultiEnvironmentCoordinator::new(&deploy).deploy_all(
            &MultiEnvOptions::new(&root).with_production(true),
            resolve,
            Arc::new(NoopEventSink),
        );

        assert_eq!(report.stopped_at(), Some(Environment::Development));
        assert_eq!(
            report.with_status(EnvironmentStatus::NotAttempted),
            vec![Environment::Staging, Environment::Production]
        );
        assert!(!report.all_succeeded());
        assert!(store.bucket_names().is_empty());
    }

    #[test]
    fn failed_deployment_leaves_later_environments_unattempted() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let deploy = deploy(&store, &[]);

        let report = MultiEnvironmentCoordinator::new(&deploy).deploy_all(
            &MultiEnvOptions::new(dir.path().join("missing")),
            resolver(false),
            Arc::new(NoopEventSink),
        );

        assert_eq!(report.runs[0].status, EnvironmentStatus::Failed);
        assert_eq!(report.runs[1].status, EnvironmentStatus::NotAttempted);
        assert_eq!(report.runs[2].status, EnvironmentStatus::Skipped);
    }

    #[test]
    fn cancellation_also_stops_the_rollout() {
        let (_dir, root) = site();
        let store = Arc::new(MemoryStore::new());
        let deploy = deploy(&store, &["y", "n"]);

        let report = MultiEnvironmentCoordinator::new(&deploy).deploy_all(
            &MultiEnvOptions::new(&root).with_production(true),
            resolver(true),
            Arc::new(NoopEventSink),
        );

        assert_eq!(report.runs[0].status, EnvironmentStatus::Succeeded);
        assert_eq!(report.runs[1].status, EnvironmentStatus::Cancelled);
        assert_eq!(report.runs[2].status, EnvironmentStatus::NotAttempted);
    }

    #[test]
    fn cors_is_tested_per_environment() {
        let store = Arc::new(MemoryStore::new());
        let deploy = deploy(&store, &[]);

        let results = MultiEnvironmentCoordinator::new(&deploy)
            .test_all_cors(&MultiEnvOptions::new("."), resolver(false));

        assert_eq!(results.len(), 3);
        for (_, report) in results {
            assert!(report.unwrap().all_passed());
        }
    }
}
