//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! Terminal rendering lives in the binary's `ui` module.
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use bucketship::presentation::factory;
//!
//! let connector = factory::create_connector(&CredentialChain::new(), None)?;
//! let use_case = factory::create_deploy_use_case(connector, confirmer, &config)?;
//! let outcome = use_case.execute(&options);
//! ```

pub mod cli;
pub mod factory;

pub use cli::{
    BucketsCommand, Cli, ColorWhen, Commands, CorsCommand, CredentialArgs, KindArg, TargetArgs,
    TemplateArg,
};
pub use factory::{
    create_cleanup_use_case, create_connector, create_deploy_use_case, create_event_sink,
    create_tracked_deploy_use_case, ConcreteCleanupUseCase, ConcreteDeployUseCase,
    SharedConnector,
};
