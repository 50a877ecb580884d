//! Command handlers for the `bucketship` binary
//!
//! ## Structure
//!
//! - `deploy` - single-environment deploy (`deploy`) and rollout (`deploy-all`)
//! - `cors` - live preflight checks (`test-cors`) and settings printers (`cors`)
//! - `cleanup` - typed-confirmation removal of an environment's buckets
//! - `buckets` - bucket and object utilities
//! - `info` - offline helpers (`regions`, `urls`)
//!
//! Every handler receives the [`Session`] and returns an [`Exit`].

pub mod buckets;
pub mod cleanup;
pub mod cors;
pub mod deploy;
pub mod info;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;

use bucketship::config::{Config, CredentialChain};
use bucketship::domain::entities::{Environment, EnvironmentConfig, EnvironmentOverrides};
use bucketship::domain::ports::Confirmer;
use bucketship::infrastructure::select_confirmer;
use bucketship::presentation::{create_connector, CredentialArgs, SharedConnector};
use bucketship::{RegionCatalog, RegionConfig};

use crate::ui::context::UiContext;

/// How the process should end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Done, or cancelled by the user
    Success,
    Failure,
    Interrupted,
}

impl Exit {
    pub fn code(self) -> i32 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
            Exit::Interrupted => 130,
        }
    }

    pub fn from_success(success: bool) -> Self {
        if success {
            Exit::Success
        } else {
            Exit::Failure
        }
    }
}

/// Everything a handler needs besides its own arguments
pub struct Session {
    pub ui: UiContext,
    pub config: Config,
    pub assume_yes: bool,
    pub credentials: CredentialArgs,
    pub interrupt: Arc<AtomicBool>,
}

pub(crate) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl Session {
    pub fn confirmer(&self) -> Arc<dyn Confirmer> {
        select_confirmer(self.assume_yes, self.ui.interactive)
    }

    pub fn connector(&self) -> Result<SharedConnector> {
        let mut chain = CredentialChain::new();
        if let Some(path) = &self.credentials.credentials_file {
            chain = chain.with_config_file(path);
        }
        Ok(create_connector(&chain, self.credentials.explicit())?)
    }

    /// The named environment, or the configured default
    pub fn environment(&self, named: Option<Environment>) -> Result<Environment> {
        match named {
            Some(environment) => Ok(environment),
            None => Ok(self.config.default_environment()?),
        }
    }

    /// Settings file and environment variables, then CLI overrides
    pub fn environment_config(
        &self,
        environment: Environment,
        overrides: &EnvironmentOverrides,
    ) -> EnvironmentConfig {
        self.config
            .environment(environment, process_env)
            .with_overrides(overrides)
    }

    /// `--region` if given, otherwise the default environment's region
    pub fn region(&self, explicit: Option<&str>) -> Result<RegionConfig> {
        let id = match explicit {
            Some(id) => id.to_string(),
            None => {
                let environment = self.config.default_environment()?;
                self.config.environment(environment, process_env).region
            }
        };
        Ok(RegionCatalog::get(&id)?)
    }
}

/// `--dry-run` / `--no-dry-run` as a tri-state
pub fn dry_run_flag(dry_run: bool, no_dry_run: bool) -> Option<bool> {
    match (dry_run, no_dry_run) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
