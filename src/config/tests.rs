//! Tests for the config module

use super::loader::with_env_overrides;
use super::types::*;
use crate::domain::entities::Environment;
use crate::domain::value_objects::CorsPreset;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.environments.is_empty());
    assert_eq!(config.sync.workers(), 4);
    assert!(config.output.unicode);
    assert_eq!(config.output.color, ColorMode::Auto);
    assert_eq!(config.default_environment().unwrap(), Environment::Development);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
default_environment = "staging"

[environments.staging]
bucket_prefix = "shop-staging"
region = "SBG"
cors = "secure_api"
domains = ["https://staging.shop.example"]

[environments.prod]
require_confirmation = false

[sync]
workers = 8
exclude = ["node_modules"]

[output]
color = "never"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.default_environment().unwrap(), Environment::Staging);
    assert_eq!(config.sync.workers(), 8);
    assert_eq!(config.sync.exclude, vec!["node_modules"]);
    assert_eq!(config.output.color, ColorMode::Never);

    let staging = config.environment(Environment::Staging, env(&[]));
    assert_eq!(staging.bucket_prefix, "shop-staging");
    assert_eq!(staging.region, "SBG");
    assert_eq!(staging.cors, CorsPreset::SecureApi);
    assert_eq!(staging.domains, vec!["https://staging.shop.example"]);

    // Alias key `prod` resolves to production
    let production = config.environment(Environment::Production, env(&[]));
    assert!(!production.require_confirmation);
    assert_eq!(production.bucket_prefix, "myapp-prod");
}

#[test]
fn test_environment_variables_beat_file() {
    let config: Config = toml::from_str(
        r#"
[environments.development]
bucket_prefix = "from-file"
region = "RBX"
"#,
    )
    .unwrap();

    let dev = config.environment(
        Environment::Development,
        env(&[("DEV_BUCKET_PREFIX", "from-env")]),
    );

    assert_eq!(dev.bucket_prefix, "from-env");
    assert_eq!(dev.region, "RBX");
}

#[test]
fn test_missing_section_uses_builtin() {
    let config = Config::default();
    let staging = config.environment(Environment::Staging, env(&[]));
    assert_eq!(staging, crate::domain::entities::EnvironmentConfig::builtin(Environment::Staging));
}

#[test]
fn test_env_overrides_default_environment_and_workers() {
    let config = with_env_overrides(
        Config::default(),
        env(&[("DEPLOY_ENV", "production"), ("BUCKETSHIP_WORKERS", "12")]),
    );

    assert_eq!(config.default_environment().unwrap(), Environment::Production);
    assert_eq!(config.sync.workers(), 12);
}

#[test]
fn test_invalid_worker_count_is_ignored() {
    let config = with_env_overrides(Config::default(), env(&[("BUCKETSHIP_WORKERS", "0")]));
    assert_eq!(config.sync.workers, None);

    let config = with_env_overrides(Config::default(), env(&[("BUCKETSHIP_WORKERS", "many")]));
    assert_eq!(config.sync.workers, None);
}

#[test]
fn test_unknown_default_environment_is_an_error() {
    let config = Config {
        default_environment: Some("qa".to_string()),
        ..Config::default()
    };
    assert!(config.default_environment().is_err());
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bucketship.toml");
    fs::write(
        &path,
        r#"
[sync]
wrokers = 3

[environments.stagging]
region = "GRA"
"#,
    )
    .unwrap();

    let (_config, warnings) = Config::load_with_warnings(&path).unwrap();

    let workers = warnings.iter().find(|w| w.key == "wrokers").unwrap();
    assert_eq!(workers.suggestion.as_deref(), Some("workers"));
    assert_eq!(workers.line, Some(3));

    let env_warning = warnings.iter().find(|w| w.key == "stagging").unwrap();
    assert_eq!(env_warning.suggestion.as_deref(), Some("staging"));
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bucketship.toml");
    fs::write(&path, "[sync\nworkers = ").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, crate::error::BucketshipError::Config { .. }));
}

#[test]
fn test_load_or_default_reads_project_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("bucketship.toml"),
        "[environments.dev]\nbucket_prefix = \"project-dev\"\n",
    )
    .unwrap();

    let config = Config::load_or_default(Some(dir.path()));
    let dev = config.environment(Environment::Development, env(&[]));
    assert_eq!(dev.bucket_prefix, "project-dev");
}

#[test]
fn test_section_serializes_without_unset_fields() {
    let section = EnvironmentSection {
        region: Some("GRA".to_string()),
        ..Default::default()
    };
    let rendered = toml::to_string(&section).unwrap();
    assert_eq!(rendered.trim(), "region = \"GRA\"");
}
