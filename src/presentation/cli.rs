//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --yes, credentials) are inherited by all subcommands
//! - Environment names are parsed with their aliases (`dev`, `stage`, `prod`)
//! - Domain enums stay free of clap; `KindArg` and `TemplateArg` convert at this boundary

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::entities::{DeployKind, Environment};
use crate::domain::services::FrameworkTemplate;
use crate::domain::value_objects::CorsPreset;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// What is being deployed
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Frontend,
    Assets,
    Docs,
}

impl From<KindArg> for DeployKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Frontend => DeployKind::Frontend,
            KindArg::Assets => DeployKind::Assets,
            KindArg::Docs => DeployKind::Docs,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateArg {
    React,
    Vue,
    StaticSite,
}

impl From<TemplateArg> for FrameworkTemplate {
    fn from(template: TemplateArg) -> Self {
        match template {
            TemplateArg::React => FrameworkTemplate::React,
            TemplateArg::Vue => FrameworkTemplate::Vue,
            TemplateArg::StaticSite => FrameworkTemplate::StaticSite,
        }
    }
}

/// Bucketship - environment-aware deployments to S3-compatible storage
#[derive(Parser, Debug)]
#[command(name = "bucketship")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Credentials come from --access-key/--secret-key, \
AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY, or rclone.conf.")]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Answer yes to yes/no prompts (typed phrases are still required)
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Explicit credentials; both keys or neither
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Access key id
    #[arg(long, global = true, requires = "secret_key")]
    pub access_key: Option<String>,

    /// Secret access key
    #[arg(long, global = true, requires = "access_key")]
    pub secret_key: Option<String>,

    /// rclone-style credentials file to read instead of the default search path
    #[arg(long, global = true, value_name = "PATH")]
    pub credentials_file: Option<PathBuf>,
}

impl CredentialArgs {
    pub fn explicit(&self) -> Option<(&str, &str)> {
        match (&self.access_key, &self.secret_key) {
            (Some(access), Some(secret)) => Some((access.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

/// Bucket selection shared by commands that address one deployment target
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// What is being deployed; decides the bucket suffix
    #[arg(short, long, value_enum, default_value = "frontend")]
    pub kind: KindArg,

    /// Use this bucket instead of `{prefix}-{kind}`
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Override the environment's bucket prefix
    #[arg(long)]
    pub bucket_prefix: Option<String>,

    /// Override the environment's region
    #[arg(short, long)]
    pub region: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a build directory to one environment
    Deploy {
        /// Target environment (defaults to DEPLOY_ENV or the configured default)
        environment: Option<Environment>,

        /// Directory or file to publish
        #[arg(short, long, default_value = "dist")]
        source: PathBuf,

        #[command(flatten)]
        target: TargetArgs,

        /// Prefix added to every remote key
        #[arg(long, default_value = "")]
        dest_prefix: String,

        /// CORS preset to apply instead of the environment's
        #[arg(long, value_name = "TYPE")]
        cors_type: Option<CorsPreset>,

        /// Extra allowed origin; CORS becomes bucket-derived (can be specified multiple times)
        #[arg(long = "origin", value_name = "ORIGIN")]
        origins: Vec<String>,

        /// Leave the bucket's CORS configuration untouched
        #[arg(long)]
        skip_cors: bool,

        /// Preview the upload plan before asking to proceed
        #[arg(long, conflicts_with = "no_dry_run")]
        dry_run: bool,

        /// Skip the dry-run preview even if the environment asks for one
        #[arg(long)]
        no_dry_run: bool,

        /// Do not ask for confirmation
        #[arg(long)]
        no_confirm: bool,

        /// Delete buckets created by this run when it exits
        #[arg(long)]
        ephemeral: bool,

        /// Test CORS from each environment domain after deploying
        #[arg(long)]
        verify_cors: bool,
    },

    /// Deploy to development, staging and (optionally) production in order
    DeployAll {
        /// Directory or file to publish
        #[arg(short, long, default_value = "dist")]
        source: PathBuf,

        /// What is being deployed; decides the bucket suffix
        #[arg(short, long, value_enum, default_value = "frontend")]
        kind: KindArg,

        /// Also deploy to production
        #[arg(long)]
        include_production: bool,

        /// Preview the upload plan in every environment
        #[arg(long, conflicts_with = "no_dry_run")]
        dry_run: bool,

        /// Skip dry-run previews
        #[arg(long)]
        no_dry_run: bool,

        /// Leave CORS configuration untouched
        #[arg(long)]
        skip_cors: bool,

        /// Do not ask for confirmation
        #[arg(long)]
        no_confirm: bool,
    },

    /// Send CORS preflight requests to a deployed bucket
    TestCors {
        /// Environment whose bucket and domains are tested
        environment: Option<Environment>,

        #[command(flatten)]
        target: TargetArgs,

        /// Origin to test (can be specified multiple times; defaults to the environment's domains)
        #[arg(long = "origin", value_name = "ORIGIN")]
        origins: Vec<String>,

        /// Object path to probe
        #[arg(long, default_value = "index.html")]
        path: String,

        /// Test every environment
        #[arg(long, conflicts_with = "environment")]
        all: bool,
    },

    /// Delete every bucket belonging to an environment
    Cleanup {
        /// Environment whose buckets are deleted
        environment: Option<Environment>,

        /// Skip the typed confirmation
        #[arg(long)]
        no_confirm: bool,

        /// Only list what would be deleted
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect and manage buckets
    Buckets {
        #[command(subcommand)]
        action: BucketsCommand,
    },

    /// List the built-in storage regions
    Regions,

    /// Print the public URLs of deployed files
    Urls {
        /// Environment whose bucket is used
        environment: Option<Environment>,

        #[command(flatten)]
        target: TargetArgs,

        /// Object keys (defaults to index.html)
        files: Vec<String>,

        /// Include static website URLs
        #[arg(long)]
        website: bool,
    },

    /// Preview CORS settings
    Cors {
        #[command(subcommand)]
        action: CorsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum BucketsCommand {
    /// List buckets, optionally filtered by name prefix
    List {
        /// Only buckets whose name starts with this
        #[arg(long)]
        prefix: Option<String>,

        /// Region to query (defaults to the default environment's)
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Show whether a bucket exists and where it lives
    Info {
        name: String,

        #[arg(short, long)]
        region: Option<String>,
    },

    /// Delete one bucket
    Delete {
        name: String,

        /// Empty the bucket first (every version and delete marker)
        #[arg(short, long)]
        force: bool,

        #[arg(short, long)]
        region: Option<String>,
    },

    /// Delete every visible bucket (asks for today's date, then "yes")
    DeleteAll {
        #[arg(short, long)]
        region: Option<String>,

        /// Only list what would be deleted
        #[arg(long)]
        dry_run: bool,
    },

    /// List the objects in a bucket
    Files {
        name: String,

        /// Only keys starting with this
        #[arg(long, default_value = "")]
        prefix: String,

        #[arg(short, long)]
        region: Option<String>,

        /// Delete this key instead of listing
        #[arg(long, value_name = "KEY")]
        delete: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CorsCommand {
    /// Settings an environment deployment would apply
    Show {
        environment: Option<Environment>,

        /// Preset to show instead of the environment's
        #[arg(long, value_name = "TYPE")]
        cors_type: Option<CorsPreset>,
    },

    /// Development, staging and production settings for a framework
    Template {
        #[arg(value_enum)]
        framework: TemplateArg,

        /// Production domain, e.g. example.com
        #[arg(long)]
        domain: String,
    },
}
