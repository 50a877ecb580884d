//! Deploy Module
//!
//! Publishes one source tree to one environment's bucket.
//!
//! ## Structure
//!
//! - `options` - What to deploy and where (`DeployOptions`)
//! - `use_case` - The state machine (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use bucketship::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(connector, probe).with_confirmer(confirmer);
//! let outcome = use_case.execute(&DeployOptions::new(config, "./dist"));
//! ```

mod options;
mod use_case;

pub use options::{DeployOptions, DEPLOY_PROMPT, PROCEED_PROMPT};
pub use use_case::DeployUseCase;
