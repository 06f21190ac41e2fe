#![allow(non_snake_case)]

mod cli;

use std::env;

use dayPlanner::config::{AppConfig, PlannerSettings};
use dayPlanner::logging::init_logging;

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            eprintln!("Ignoring config file {}: {}", path, err);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };
    let settings = PlannerSettings::resolve(&config);

    if let Err(err) = init_logging(&settings.log_level, settings.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {}", err);
    }

    if let Err(err) = cli::cli(&settings).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
