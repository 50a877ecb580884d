//! CORS command handlers
//!
//! `test-cors` sends live preflight requests; `cors show` and
//! `cors template` only print settings.

use anyhow::Result;

use bucketship::application::{CorsPolicyEngine, CorsTestReport, MultiEnvOptions, MultiEnvironmentCoordinator};
use bucketship::domain::entities::{DeployKind, Environment, EnvironmentOverrides};
use bucketship::domain::ports::StoreConnector;
use bucketship::domain::services::{EnvironmentCorsSet, FrameworkTemplate};
use bucketship::domain::value_objects::CorsPreset;
use bucketship::infrastructure::HttpPreflightProbe;
use bucketship::presentation::{create_deploy_use_case, TargetArgs};
use bucketship::DeployOptions;

use super::{Exit, Session};
use crate::ui::json;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::cors::{
    render_cors_report, render_cors_settings, render_cors_summary, render_cors_template,
};

pub struct TestCorsRequest {
    pub environment: Option<Environment>,
    pub target: TargetArgs,
    pub origins: Vec<String>,
    pub path: String,
    pub all: bool,
}

fn target_options(session: &Session, environment: Environment, target: &TargetArgs) -> DeployOptions {
    let overrides = EnvironmentOverrides {
        bucket_prefix: target.bucket_prefix.clone(),
        region: target.region.clone(),
        ..EnvironmentOverrides::default()
    };
    let config = session.environment_config(environment, &overrides);
    let mut options = DeployOptions::new(config, ".").with_kind(target.kind.into());
    if let Some(bucket) = &target.bucket {
        options = options.with_bucket_name(bucket.as_str());
    }
    options
}

pub fn cmd_test_cors(session: &Session, request: TestCorsRequest) -> Result<Exit> {
    if request.all {
        return test_all(session, &request);
    }

    let ui = session.ui;
    let environment = session.environment(request.environment)?;
    let options = target_options(session, environment, &request.target);
    let bucket = options.bucket()?;
    let region = options.config.region_config()?;
    let origins = if request.origins.is_empty() {
        options.config.domains.clone()
    } else {
        request.origins.clone()
    };

    let connector = session.connector()?;
    let store = connector.connect(&region)?;
    let probe = HttpPreflightProbe::new()?;
    let report = CorsPolicyEngine::new(store.as_ref(), &probe, &region).test_origins(
        &bucket,
        &origins,
        &request.path,
    );

    if ui.json {
        json::emit(serde_json::json!({
            "event": "cors_test",
            "command": "test-cors",
            "environment": environment.as_str(),
            "passed": report.all_passed(),
            "report": report,
        }))?;
    } else {
        print!("{}", render_cors_report(&report, &request.path, ui.color, ui.unicode));
    }
    Ok(Exit::from_success(report.all_passed()))
}

fn test_all(session: &Session, request: &TestCorsRequest) -> Result<Exit> {
    let ui = session.ui;
    let connector = session.connector()?;
    let use_case = create_deploy_use_case(connector, session.confirmer(), &session.config)?;
    let options = MultiEnvOptions::new(".")
        .with_environments(Environment::ALL.to_vec())
        .with_kind(request.target.kind.into());
    let overrides = EnvironmentOverrides {
        region: request.target.region.clone(),
        ..EnvironmentOverrides::default()
    };

    let results = MultiEnvironmentCoordinator::new(&use_case).test_all_cors(&options, |environment| {
        Ok(session.environment_config(environment, &overrides))
    });

    let mut reports: Vec<CorsTestReport> = Vec::new();
    let mut entries = Vec::new();
    for (environment, result) in results {
        match result {
            Ok(report) => {
                if ui.json {
                    entries.push(serde_json::json!({
                        "environment": environment.as_str(),
                        "passed": report.all_passed(),
                        "report": &report,
                    }));
                } else {
                    println!("{}", environment);
                    print!(
                        "{}",
                        render_cors_report(&report, bucketship::application::DEFAULT_TEST_PATH, ui.color, ui.unicode)
                    );
                }
                reports.push(report);
            }
            Err(err) => {
                if ui.json {
                    entries.push(serde_json::json!({
                        "environment": environment.as_str(),
                        "passed": false,
                        "error": err.to_string(),
                    }));
                } else {
                    println!(
                        "{} {}: {}",
                        Icon::Error.colored(ui.color, ui.unicode),
                        environment,
                        err
                    );
                }
                reports.push(CorsTestReport {
                    bucket: environment.as_str().to_string(),
                    checks: Vec::new(),
                });
            }
        }
    }

    let passed = reports.iter().all(CorsTestReport::all_passed);
    if ui.json {
        json::emit(serde_json::json!({
            "event": "cors_test",
            "command": "test-cors",
            "passed": passed,
            "environments": entries,
        }))?;
    } else {
        print!("{}", render_cors_summary(&reports, ui.color, ui.unicode));
    }
    Ok(Exit::from_success(passed))
}

pub fn cmd_cors_show(
    session: &Session,
    environment: Option<Environment>,
    cors_type: Option<CorsPreset>,
) -> Result<Exit> {
    let ui = session.ui;
    let environment = session.environment(environment)?;
    let overrides = EnvironmentOverrides {
        cors: cors_type,
        ..EnvironmentOverrides::default()
    };
    let config = session.environment_config(environment, &overrides);
    let settings = DeployOptions::new(config.clone(), ".")
        .with_kind(DeployKind::Frontend)
        .cors_settings()?;

    if ui.json {
        json::emit(serde_json::json!({
            "event": "cors_settings",
            "command": "cors show",
            "environment": environment.as_str(),
            "preset": config.cors.as_str(),
            "settings": settings,
        }))?;
    } else {
        let title = format!("CORS for {} ({})", environment, config.cors.as_str());
        print!("{}", render_cors_settings(&title, &settings, ui.color, ui.unicode));
    }
    Ok(Exit::Success)
}

fn template_json(set: &EnvironmentCorsSet) -> serde_json::Value {
    serde_json::json!({
        "development": set.development,
        "staging": set.staging,
        "production": set.production,
    })
}

pub fn cmd_cors_template(
    session: &Session,
    framework: FrameworkTemplate,
    name: &str,
    domain: &str,
) -> Result<Exit> {
    let ui = session.ui;
    let set = framework.settings_for(domain);
    if ui.json {
        json::emit(serde_json::json!({
            "event": "cors_template",
            "command": "cors template",
            "framework": name,
            "domain": domain,
            "settings": template_json(&set),
        }))?;
    } else {
        print!("{}", render_cors_template(name, &set, ui.color, ui.unicode));
    }
    Ok(Exit::Success)
}
