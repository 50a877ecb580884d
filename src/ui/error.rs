use bucketship::BucketshipError;

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::ci::{github_actions_annotation, AnnotationLevel};

/// Render a library error with the fix a user most likely needs
pub fn format_bucketship_error(
    err: &BucketshipError,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let block = match err {
        BucketshipError::NoCredentials { searched } => {
            let mut block = ErrorBlock::new("No storage credentials found.");
            for source in searched {
                block = block.with_context(format!("searched: {source}"));
            }
            block.with_fix(
                "Set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY, or pass --access-key and --secret-key",
            )
        }
        BucketshipError::UnknownRegion { .. } => ErrorBlock::new(err.to_string())
            .with_fix("Run `bucketship regions` to list the available regions"),
        BucketshipError::SourceNotFound { .. } => ErrorBlock::new(err.to_string())
            .with_fix("Build the project first, or point --source at the build output"),
        BucketshipError::BucketForbidden { .. } => ErrorBlock::new(err.to_string())
            .with_fix("The bucket belongs to another account; pick a different --bucket-prefix"),
        BucketshipError::InvalidBucketName { .. } => ErrorBlock::new(err.to_string()).with_fix(
            "Use 3-63 lowercase letters, digits, '-' or '.', starting and ending with a letter or digit",
        ),
        BucketshipError::Config { .. } => {
            ErrorBlock::new(err.to_string()).with_fix("Fix the settings file and run again")
        }
        other => ErrorBlock::new(other.to_string()),
    };
    block.render(supports_color, supports_unicode)
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    if let Some(err) = err.downcast_ref::<BucketshipError>() {
        return format_bucketship_error(err, supports_color, supports_unicode);
    }
    ErrorBlock::new(format!("{err:#}")).render(supports_color, supports_unicode)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "message": format!("{err:#}"),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    if caps.annotations {
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Error,
                &format!("{err:#}"),
                None,
                None,
                Some("bucketship"),
            )
        );
    }

    eprint!(
        "{}",
        format_error(err, caps.supports_color, caps.supports_unicode)
    );
}
