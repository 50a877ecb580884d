//! Bucketship CLI - environment-aware deployments to S3-compatible storage
//!
//! Usage: bucketship [OPTIONS] <COMMAND>
//!
//! Commands:
//!   deploy      Deploy a build directory to one environment
//!   deploy-all  Roll out across development, staging and production
//!   test-cors   Send CORS preflight requests to a deployed bucket
//!   cleanup     Delete every bucket belonging to an environment
//!   buckets     Inspect and manage buckets
//!   regions     List the built-in storage regions
//!   urls        Print the public URLs of deployed files
//!   cors        Preview CORS settings

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use bucketship::config::load_or_default_with_warnings;
use bucketship::presentation::{Cli, Commands, CorsCommand};

mod commands;
mod ui;

use commands::cors::TestCorsRequest;
use commands::deploy::{DeployAllRequest, DeployRequest};
use commands::{dry_run_flag, Exit, Session};
use ui::context::UiContext;

fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn install_interrupt_handler() -> Arc<AtomicBool> {
    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    if let Err(err) = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    }) {
        tracing::warn!(error = %err, "could not install Ctrl+C handler");
    }
    interrupt
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    match run(cli) {
        Ok(exit) => std::process::exit(exit.code()),
        Err(err) => {
            ui::error::print_error(&err, json);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Exit> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(Exit::Success);
    };

    let cwd = std::env::current_dir()?;
    let (config, warnings) = load_or_default_with_warnings(Some(&cwd));
    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
    ui::output::print_config_warnings(&ui, &warnings);

    let session = Session {
        ui,
        config,
        assume_yes: cli.yes,
        credentials: cli.credentials,
        interrupt: install_interrupt_handler(),
    };

    match command {
        Commands::Deploy {
            environment,
            source,
            target,
            dest_prefix,
            cors_type,
            origins,
            skip_cors,
            dry_run,
            no_dry_run,
            no_confirm,
            ephemeral,
            verify_cors,
        } => commands::deploy::cmd_deploy(
            &session,
            DeployRequest {
                environment,
                source,
                target,
                dest_prefix,
                cors_type,
                origins,
                skip_cors,
                dry_run: dry_run_flag(dry_run, no_dry_run),
                no_confirm,
                ephemeral,
                verify_cors,
            },
        ),
        Commands::DeployAll {
            source,
            kind,
            include_production,
            dry_run,
            no_dry_run,
            skip_cors,
            no_confirm,
        } => commands::deploy::cmd_deploy_all(
            &session,
            DeployAllRequest {
                source,
                kind: kind.into(),
                include_production,
                dry_run: dry_run_flag(dry_run, no_dry_run),
                skip_cors,
                no_confirm,
            },
        ),
        Commands::TestCors {
            environment,
            target,
            origins,
            path,
            all,
        } => commands::cors::cmd_test_cors(
            &session,
            TestCorsRequest {
                environment,
                target,
                origins,
                path,
                all,
            },
        ),
        Commands::Cleanup {
            environment,
            no_confirm,
            dry_run,
        } => commands::cleanup::cmd_cleanup(&session, environment, no_confirm, dry_run),
        Commands::Buckets { action } => commands::buckets::cmd_buckets(&session, action),
        Commands::Regions => commands::info::cmd_regions(&session),
        Commands::Urls {
            environment,
            target,
            files,
            website,
        } => commands::info::cmd_urls(&session, environment, &target, &files, website),
        Commands::Cors { action } => match action {
            CorsCommand::Show {
                environment,
                cors_type,
            } => commands::cors::cmd_cors_show(&session, environment, cors_type),
            CorsCommand::Template { framework, domain } => {
                let name = framework_name(framework);
                commands::cors::cmd_cors_template(&session, framework.into(), name, &domain)
            }
        },
    }
}

fn framework_name(framework: bucketship::presentation::TemplateArg) -> &'static str {
    use bucketship::presentation::TemplateArg;
    match framework {
        TemplateArg::React => "react",
        TemplateArg::Vue => "vue",
        TemplateArg::StaticSite => "static-site",
    }
}
