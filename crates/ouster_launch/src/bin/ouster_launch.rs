//! Ouster Launch CLI
//!
//! Usage:
//!   ouster_launch
//!   ouster_launch -a ouster_ns:=robotA -a viz:=False
//!   ouster_launch --prefix /opt/ros/humble --format yaml --declarative

use ouster_launch::{compose, AmentIndex, CompositionConfig, LaunchArgs, OutputFormat};
use std::path::PathBuf;

fn main() {
    let args: LaunchArgs = argh::from_env();

    // Initialize logging
    let log_level = match args.log_level.to_lowercase().as_str() {
        "error" => "error",
        "warn" => "warn",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        _ => "info",
    };
    let env = env_logger::Env::default().default_filter_or(log_level);
    env_logger::init_from_env(env);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading composition config: {}", path);
            match CompositionConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Failed to load config: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => CompositionConfig::default(),
    };

    let index = if args.prefix.is_empty() {
        AmentIndex::from_env()
    } else {
        AmentIndex::new(args.prefix.iter().map(PathBuf::from).collect())
    };
    log::debug!("Package search prefixes: {:?}", index.prefixes());

    let plan = match compose(&config, &index) {
        Ok(plan) => plan,
        Err(e) => {
            log::error!("Composition failed: {}", e);
            std::process::exit(1);
        }
    };

    let overrides = args.arg_overrides();
    let resolved = match plan.resolve(&overrides) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::error!("Failed to evaluate launch plan: {}", e);
            std::process::exit(1);
        }
    };

    if args.validate {
        println!("Composition is valid");
        println!("  Arguments: {}", plan.arguments().len());
        println!("  Container units: {}", plan.container().units.len());
        println!("  Conditional inclusions: {}", plan.inclusions().len());
        return;
    }

    let rendered = match (args.format, args.declarative) {
        (OutputFormat::Text, false) => Ok(resolved.to_string()),
        (OutputFormat::Text, true) | (OutputFormat::Yaml, true) => {
            serde_yaml::to_string(&plan).map_err(|e| e.to_string())
        }
        (OutputFormat::Yaml, false) => serde_yaml::to_string(&resolved).map_err(|e| e.to_string()),
        (OutputFormat::Json, true) => {
            serde_json::to_string_pretty(&plan).map_err(|e| e.to_string())
        }
        (OutputFormat::Json, false) => {
            serde_json::to_string_pretty(&resolved).map_err(|e| e.to_string())
        }
    };

    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            log::error!("Failed to render launch plan: {}", e);
            std::process::exit(1);
        }
    }
}
