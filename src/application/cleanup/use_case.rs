//! Cleanup Use Case
//!
//! Each bucket is force-deleted on its own; one failure does not stop the
//! rest.

use std::sync::Arc;

use crate::application::buckets::{today_phrase, BucketLifecycleManager};
use crate::domain::entities::{BucketInfo, Environment, EnvironmentConfig};
use crate::domain::ports::{confirm_phrase, AlwaysDecline, Confirmer, StoreConnector};
use crate::domain::value_objects::{BucketName, RegionConfig};
use crate::error::BucketshipResult;

use super::options::CleanupOptions;
use super::result::{CleanupResult, CleanupStatus};

/// Second question of the delete-everything flow; only `yes` proceeds
pub const FINAL_PROMPT: &str = "Delete every listed bucket? (yes/no)";

pub fn phrase_prompt(environment: Environment) -> String {
    format!("Type '{}' to confirm deletion", environment.deletion_phrase())
}

pub fn date_prompt() -> String {
    format!("Type today's date ({}) to confirm", today_phrase())
}

pub struct CleanupUseCase<C: StoreConnector> {
    connector: C,
    confirmer: Arc<dyn Confirmer>,
}

impl<C: StoreConnector> CleanupUseCase<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            confirmer: Arc::new(AlwaysDecline),
        }
    }

    pub fn with_confirmer(mut self, confirmer: Arc<dyn Confirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    /// Buckets belonging to the environment (name starts with its prefix)
    pub fn find(&self, config: &EnvironmentConfig) -> BucketshipResult<Vec<BucketInfo>> {
        let region = config.region_config()?;
        let store = self.connector.connect(&region)?;
        BucketLifecycleManager::new(store.as_ref(), &region)
            .list_with_prefix(&config.bucket_prefix)
    }

    /// Find and delete the environment's buckets
    pub fn execute(
        &self,
        config: &EnvironmentConfig,
        options: &CleanupOptions,
    ) -> BucketshipResult<CleanupResult> {
        let matched = self.find(config)?;
        self.delete_matched(config, &matched, options)
    }

    /// Delete buckets already found with [`Self::find`]
    pub fn delete_matched(
        &self,
        config: &EnvironmentConfig,
        matched: &[BucketInfo],
        options: &CleanupOptions,
    ) -> BucketshipResult<CleanupResult> {
        let names: Vec<String> = matched.iter().map(|b| b.name.clone()).collect();
        if names.is_empty() {
            tracing::info!(environment = %config.environment, "no buckets to delete");
            return Ok(CleanupResult::new(CleanupStatus::NothingToDelete, names));
        }
        if options.dry_run {
            return Ok(CleanupResult::new(CleanupStatus::DryRun, names));
        }

        if options.require_confirmation {
            let phrase = config.environment.deletion_phrase();
            let prompt = phrase_prompt(config.environment);
            if !confirm_phrase(self.confirmer.as_ref(), &prompt, &phrase) {
                tracing::info!(environment = %config.environment, "cleanup declined");
                return Ok(CleanupResult::new(CleanupStatus::Declined, names));
            }
        }

        let region = config.region_config()?;
        Ok(self.delete_each(&region, names))
    }

    /// Every visible bucket, after typing today's date and then `yes`
    pub fn delete_all(
        &self,
        region: &RegionConfig,
        options: &CleanupOptions,
    ) -> BucketshipResult<CleanupResult> {
        let store = self.connector.connect(region)?;
        let names: Vec<String> = BucketLifecycleManager::new(store.as_ref(), region)
            .list()?
            .into_iter()
            .map(|b| b.name)
            .collect();

        if names.is_empty() {
            return Ok(CleanupResult::new(CleanupStatus::NothingToDelete, names));
        }
        if options.dry_run {
            return Ok(CleanupResult::new(CleanupStatus::DryRun, names));
        }

        let confirmer = self.confirmer.as_ref();
        if options.require_confirmation
            && !(confirm_phrase(confirmer, &date_prompt(), &today_phrase())
                && confirm_phrase(confirmer, FINAL_PROMPT, "yes"))
        {
            tracing::info!("deletion of all buckets declined");
            return Ok(CleanupResult::new(CleanupStatus::Declined, names));
        }

        Ok(self.delete_each(region, names))
    }

    fn delete_each(&self, region: &RegionConfig, names: Vec<String>) -> CleanupResult {
        let mut result = CleanupResult::new(CleanupStatus::Finished, names);
        let store = match self.connector.connect(region) {
            Ok(store) => store,
            Err(err) => {
                tracing::error!(error = %err, "cannot reach region");
                result.failed = result.matched.clone();
                return result;
            }
        };
        let manager = BucketLifecycleManager::new(store.as_ref(), region);

        for name in &result.matched {
            let deleted = match BucketName::parse(name) {
                Ok(bucket) => manager.delete(&bucket, true),
                Err(err) => {
                    tracing::warn!(bucket = %name, error = %err, "skipping unparseable bucket name");
                    false
                }
            };
            if deleted {
                result.deleted.push(name.clone());
            } else {
                result.failed.push(name.clone());
            }
        }

        tracing::info!(
            deleted = result.deleted.len(),
            total = result.matched.len(),
            "cleanup complete"
        );
        result
    }
}
