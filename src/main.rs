use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use funcy_core::{Config, ConfigError};

mod app;

/// Look up the week's weather for a place.
#[derive(Parser, Debug)]
#[command(name = "funcy", version)]
#[command(about = "Funcy Weather: daily forecast for a typed location")]
struct Args {
    /// Config file (defaults to <config dir>/funcy/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Look up this location once and exit instead of reading stdin
    #[arg(long)]
    location: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    funcy_core::init()?;

    let (config, _validation) = match Config::load_validated(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            if let Some(message) = config_error_message(&e) {
                eprintln!("{}", message);
            }
            return Err(e);
        }
    };
    tracing::debug!("Using config dir {}", config.config_dir.display());

    let mut app = app::App::new(&config)?;

    match args.location {
        Some(location) => app.run_once(&location).await,
        None => app.run_interactive().await,
    }
}

/// Readable message for config failures the user can fix.
fn config_error_message(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<ConfigError>().map(ConfigError::user_message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_has_message() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_validated(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(config_error_message(&err).unwrap().contains("--config"));
    }

    #[test]
    fn test_malformed_config_has_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_dir = [").unwrap();

        let err = Config::load_validated(Some(&path)).unwrap_err();
        assert!(config_error_message(&err).unwrap().contains("malformed"));
    }

    #[test]
    fn test_other_errors_have_no_message() {
        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(config_error_message(&err), None);
    }
}
