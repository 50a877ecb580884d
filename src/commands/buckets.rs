//! Bucket utility handlers (`buckets list|info|delete|delete-all|files`)

use anyhow::Result;

use bucketship::application::{BucketLifecycleManager, CleanupOptions};
use bucketship::domain::ports::{confirm, StoreConnector};
use bucketship::presentation::{create_cleanup_use_case, BucketsCommand};
use bucketship::BucketName;

use super::{Exit, Session};
use crate::ui::json;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::buckets::{render_bucket_details, render_bucket_list, render_file_list};
use crate::ui::views::cleanup::{render_cleanup_result, render_deletion_plan};

pub fn cmd_buckets(session: &Session, action: BucketsCommand) -> Result<Exit> {
    match action {
        BucketsCommand::List { prefix, region } => list(session, prefix.as_deref(), region.as_deref()),
        BucketsCommand::Info { name, region } => info(session, &name, region.as_deref()),
        BucketsCommand::Delete {
            name,
            force,
            region,
        } => delete(session, &name, force, region.as_deref()),
        BucketsCommand::DeleteAll { region, dry_run } => {
            delete_all(session, region.as_deref(), dry_run)
        }
        BucketsCommand::Files {
            name,
            prefix,
            region,
            delete,
        } => files(session, &name, &prefix, region.as_deref(), delete.as_deref()),
    }
}

fn list(session: &Session, prefix: Option<&str>, region: Option<&str>) -> Result<Exit> {
    let ui = session.ui;
    let region = session.region(region)?;
    let store = session.connector()?.connect(&region)?;
    let manager = BucketLifecycleManager::new(store.as_ref(), &region);
    let buckets = match prefix {
        Some(prefix) => manager.list_with_prefix(prefix)?,
        None => manager.list()?,
    };

    if ui.json {
        json::emit_result("buckets", "buckets list", &buckets)?;
    } else {
        print!("{}", render_bucket_list(&buckets, ui.color));
    }
    Ok(Exit::Success)
}

fn info(session: &Session, name: &str, region: Option<&str>) -> Result<Exit> {
    let ui = session.ui;
    let bucket = BucketName::parse(name)?;
    let region = session.region(region)?;
    let store = session.connector()?.connect(&region)?;
    let details = BucketLifecycleManager::new(store.as_ref(), &region).details(&bucket);

    if ui.json {
        json::emit_result("bucket", "buckets info", &details)?;
    } else {
        print!("{}", render_bucket_details(&details, ui.color, ui.unicode));
    }
    Ok(Exit::Success)
}

fn delete(session: &Session, name: &str, force: bool, region: Option<&str>) -> Result<Exit> {
    let ui = session.ui;
    let bucket = BucketName::parse(name)?;
    let region = session.region(region)?;

    let prompt = if force {
        format!("Delete bucket '{bucket}' and every object in it? (y/N)")
    } else {
        format!("Delete bucket '{bucket}'? (y/N)")
    };
    if !confirm(session.confirmer().as_ref(), &prompt) {
        if ui.json {
            json::emit(serde_json::json!({
                "event": "complete",
                "command": "buckets delete",
                "bucket": bucket.as_str(),
                "deleted": false,
                "cancelled": true,
            }))?;
        } else {
            println!("Cancelled; '{bucket}' was not deleted.");
        }
        return Ok(Exit::Success);
    }

    let store = session.connector()?.connect(&region)?;
    let deleted = BucketLifecycleManager::new(store.as_ref(), &region).delete(&bucket, force);

    if ui.json {
        json::emit(serde_json::json!({
            "event": "complete",
            "command": "buckets delete",
            "bucket": bucket.as_str(),
            "deleted": deleted,
        }))?;
    } else if deleted {
        println!("{} Deleted {bucket}", Icon::Success.colored(ui.color, ui.unicode));
    } else {
        println!(
            "{} Could not delete {bucket}{}",
            Icon::Error.colored(ui.color, ui.unicode),
            if force { "" } else { " (not empty? retry with --force)" }
        );
    }
    Ok(Exit::from_success(deleted))
}

fn delete_all(session: &Session, region: Option<&str>, dry_run: bool) -> Result<Exit> {
    let ui = session.ui;
    let region = session.region(region)?;
    let connector = session.connector()?;

    if !ui.json {
        let store = connector.connect(&region)?;
        let buckets = BucketLifecycleManager::new(store.as_ref(), &region).list()?;
        if !buckets.is_empty() {
            let scope = format!("region {}", region.id());
            print!("{}", render_deletion_plan(&scope, &buckets, ui.color, ui.unicode));
        }
    }

    let result = create_cleanup_use_case(connector, session.confirmer())
        .delete_all(&region, &CleanupOptions::new().with_dry_run(dry_run))?;

    if ui.json {
        json::emit(serde_json::json!({
            "event": "complete",
            "command": "buckets delete-all",
            "region": region.id(),
            "success": result.is_success(),
            "result": result,
        }))?;
    } else {
        print!("{}", render_cleanup_result(&result, ui.color, ui.unicode));
    }
    Ok(Exit::from_success(result.is_success() || result.is_declined()))
}

fn files(
    session: &Session,
    name: &str,
    prefix: &str,
    region: Option<&str>,
    delete: Option<&str>,
) -> Result<Exit> {
    let ui = session.ui;
    let bucket = BucketName::parse(name)?;
    let region = session.region(region)?;
    let store = session.connector()?.connect(&region)?;
    let manager = BucketLifecycleManager::new(store.as_ref(), &region);

    if let Some(key) = delete {
        let deleted = manager.delete_file(&bucket, key);
        if ui.json {
            json::emit(serde_json::json!({
                "event": "complete",
                "command": "buckets files",
                "bucket": bucket.as_str(),
                "key": key,
                "deleted": deleted,
            }))?;
        } else if deleted {
            println!("{} Deleted {key}", Icon::Success.colored(ui.color, ui.unicode));
        } else {
            println!("{} Could not delete {key}", Icon::Error.colored(ui.color, ui.unicode));
        }
        return Ok(Exit::from_success(deleted));
    }

    let keys = manager.list_files(&bucket, (!prefix.is_empty()).then_some(prefix))?;
    if ui.json {
        json::emit(serde_json::json!({
            "event": "files",
            "command": "buckets files",
            "bucket": bucket.as_str(),
            "prefix": prefix,
            "data": keys,
        }))?;
    } else {
        print!(
            "{}",
            render_file_list(bucket.as_str(), prefix, &keys, ui.color, ui.unicode)
        );
    }
    Ok(Exit::Success)
}
