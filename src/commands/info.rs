//! Offline helpers: `regions` and `urls`
//!
//! Neither command needs credentials or network access.

use anyhow::Result;

use bucketship::domain::entities::{Environment, EnvironmentOverrides};
use bucketship::domain::services::file_urls;
use bucketship::domain::value_objects::DEFAULT_REGION;
use bucketship::presentation::TargetArgs;
use bucketship::{DeployOptions, RegionCatalog};

use super::{Exit, Session};
use crate::ui::json;
use crate::ui::views::regions::render_regions;
use crate::ui::views::urls::render_urls;

pub fn cmd_regions(session: &Session) -> Result<Exit> {
    let ui = session.ui;
    let regions = RegionCatalog::all();
    if ui.json {
        json::emit_result("regions", "regions", &regions)?;
    } else {
        print!("{}", render_regions(&regions, DEFAULT_REGION, ui.color));
    }
    Ok(Exit::Success)
}

pub fn cmd_urls(
    session: &Session,
    environment: Option<Environment>,
    target: &TargetArgs,
    files: &[String],
    website: bool,
) -> Result<Exit> {
    let ui = session.ui;
    let environment = session.environment(environment)?;
    let overrides = EnvironmentOverrides {
        bucket_prefix: target.bucket_prefix.clone(),
        region: target.region.clone(),
        ..EnvironmentOverrides::default()
    };
    let mut options = DeployOptions::new(session.environment_config(environment, &overrides), ".")
        .with_kind(target.kind.into());
    if let Some(bucket) = &target.bucket {
        options = options.with_bucket_name(bucket.as_str());
    }
    let bucket = options.bucket()?;
    let region = options.config.region_config()?;

    let files: Vec<&str> = if files.is_empty() {
        vec!["index.html"]
    } else {
        files.iter().map(String::as_str).collect()
    };
    let urls = file_urls(&bucket, &files, &region, website);

    if ui.json {
        json::emit(serde_json::json!({
            "event": "urls",
            "command": "urls",
            "bucket": bucket.as_str(),
            "region": region.id(),
            "data": urls,
        }))?;
    } else {
        print!("{}", render_urls(&urls, ui.color, ui.unicode));
    }
    Ok(Exit::Success)
}
