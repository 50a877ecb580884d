//! Reusable site fixtures.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use bucketship::domain::entities::{Environment, EnvironmentConfig, EnvironmentOverrides};

/// A small static site: `index.html`, `error.html`, `assets/app.js`
pub fn site() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create site dir");
    let root = dir.path().join("dist");
    fs::create_dir_all(root.join("assets")).expect("create assets dir");
    fs::write(root.join("index.html"), "<html><body>hi</body></html>").expect("write index");
    fs::write(root.join("error.html"), "<html>oops</html>").expect("write error page");
    fs::write(root.join("assets/app.js"), "console.log('hi')").expect("write script");
    (dir, root)
}

/// Built-in settings for `environment` with the bucket prefix replaced
pub fn shop_config(environment: Environment) -> EnvironmentConfig {
    EnvironmentConfig::builtin(environment).with_overrides(&EnvironmentOverrides {
        bucket_prefix: Some(format!("shop-{}", environment.var_prefix().to_ascii_lowercase())),
        ..EnvironmentOverrides::default()
    })
}
