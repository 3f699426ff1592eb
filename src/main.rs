mod app;
mod cli;
mod config;
mod consts;
mod error;
mod format;
mod host;
mod logging;
mod output;
mod settings;
mod stamp;
mod store;

use clap::Parser;
use tracing::{debug, warn};

use cli::Cli;
use config::Config;

fn main() {
    let config_file = Config::find();
    let config = Config::from_file(config_file.as_ref());
    let cli = Cli::parse().with_config(&config);

    logging::init(cli.debug, cli.log_color());

    if let Some(file) = &config_file {
        match &file.parsed {
            Ok(_) => debug!("Loaded config from {}", file.path.display()),
            Err(e) => warn!("Failed to parse {}: {}", file.path.display(), e),
        }
    }

    if let Err(e) = app::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
