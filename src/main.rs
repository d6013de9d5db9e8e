//! pixort entry point: load the configuration, set up logging, run the
//! sort session inside the desktop shell.

use std::path::PathBuf;

use pixort::config::AppConfig;
use pixort::{platform, SortSession};

fn main() {
    // First argument overrides the default config path.
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("pixort.json"));

    let config = match AppConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error in {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };

    // RUST_LOG still wins over the configured level.
    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    if let Err(e) = platform::run(SortSession::new(config)) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
