use std::path::PathBuf;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod app;
mod config;
mod driver;
mod pointer;
mod svg;

use crate::app::run_app;
use crate::config::AppConfig;

fn main() {
    // Init logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter("info")
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Trailglow starting");
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match AppConfig::load(explicit.as_deref()) {
        Ok((config, Some(path))) => {
            info!(path = %path.display(), "config loaded");
            config
        }
        Ok((config, None)) => {
            info!("no config file found; using defaults");
            config
        }
        Err(e) => {
            eprintln!("Trailglow config error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run_app(&config) {
        eprintln!("Trailglow error: {e}");
        std::process::exit(1);
    }
}
