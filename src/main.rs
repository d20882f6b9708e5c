use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use gdsearch::{Config, DriveSearch, SearchError};

/// Search Google Drive folders by file name.
#[derive(Debug, Parser)]
#[command(name = "gdsearch", version, about)]
struct Cli {
    /// Name fragment to search for; `*` lists the parent folder.
    name: String,

    /// Path to the TOML configuration file.
    #[arg(short, long, env = "GDSEARCH_CONFIG", default_value = "gdsearch.toml")]
    config: PathBuf,
}

fn load_config(path: &Path) -> gdsearch::Result<Config> {
    match Config::load_with_env(path) {
        Ok(config) => Ok(config),
        Err(SearchError::Io(e)) => {
            eprintln!("Failed to read {}: {e}", path.display());
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

async fn run(config: Config, name: &str) -> gdsearch::Result<String> {
    config.validate()?;
    let auth = config.auth.token_provider()?;
    let search = DriveSearch::new(config.drive, auth)?;
    search.list_files(name).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", cli.config.display());
            return ExitCode::from(2);
        }
    };

    if let Err(e) = gdsearch::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        gdsearch::logging::init_console_only(&config.logging.level);
    }

    info!(fragment = %cli.name, "searching Drive");

    match run(config, &cli.name).await {
        Ok(message) => {
            println!("{}", message.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.message());
            ExitCode::FAILURE
        }
    }
}
