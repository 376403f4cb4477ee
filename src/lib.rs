pub mod cli;
pub mod core;
pub mod providers;

use crate::core::RateResolver;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub use cli::quote::QuoteRequest;

pub enum AppCommand {
    Quote(QuoteRequest),
    Rate,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Japan car calculator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let resolver = Arc::new(RateResolver::from_config(&config)?);

    match command {
        AppCommand::Quote(request) => cli::quote::run(resolver, &config.defaults, &request).await,
        AppCommand::Rate => cli::rate::run(resolver).await,
    }
}
