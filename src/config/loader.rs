// Configuration loader
// Loads settings from a TOML file, falling back to defaults

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use super::settings::Config;
use crate::errors::config_parse_error;

/// Looked up in the working directory when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "predictor.toml";

/// Load configuration from `path`, or from `predictor.toml` if present.
///
/// An explicit path that does not exist is an error; a missing default file
/// just means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => read_config_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_config_file(default_path)?
            } else {
                tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Config::default()
            }
        }
    };

    validate(&config)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents).map_err(|e| {
        anyhow::anyhow!(config_parse_error(&path.display().to_string(), &e.to_string()))
    })?;

    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let test_size = config.trainer.test_size;
    if !(test_size > 0.0 && test_size < 1.0) {
        bail!("trainer.test_size must be between 0 and 1 (exclusive), got {}", test_size);
    }
    Ok(())
}
