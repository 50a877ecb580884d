//! Cleanup command handler
//!
//! Lists every bucket of an environment and deletes them after the user
//! types the environment's deletion phrase.

use anyhow::Result;

use bucketship::application::CleanupOptions;
use bucketship::domain::entities::{Environment, EnvironmentOverrides};
use bucketship::presentation::create_cleanup_use_case;

use super::{Exit, Session};
use crate::ui::json;
use crate::ui::views::cleanup::{render_cleanup_result, render_deletion_plan};

pub fn cmd_cleanup(
    session: &Session,
    environment: Option<Environment>,
    no_confirm: bool,
    dry_run: bool,
) -> Result<Exit> {
    let ui = session.ui;
    let environment = session.environment(environment)?;
    let config = session.environment_config(environment, &EnvironmentOverrides::default());
    let options = CleanupOptions::new()
        .with_confirmation(!no_confirm)
        .with_dry_run(dry_run);

    let use_case = create_cleanup_use_case(session.connector()?, session.confirmer());
    let matched = use_case.find(&config)?;

    if !ui.json && !matched.is_empty() {
        print!(
            "{}",
            render_deletion_plan(environment.as_str(), &matched, ui.color, ui.unicode)
        );
    }

    let result = use_case.delete_matched(&config, &matched, &options)?;

    if ui.json {
        json::emit(serde_json::json!({
            "event": "complete",
            "command": "cleanup",
            "environment": environment.as_str(),
            "success": result.is_success(),
            "result": result,
        }))?;
    } else {
        print!("{}", render_cleanup_result(&result, ui.color, ui.unicode));
    }

    Ok(Exit::from_success(result.is_success() || result.is_declined()))
}
