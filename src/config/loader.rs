//! Configuration loading from file system

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::error::{PaletteError, Result, ResultExt};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::PaletteConfig;

/// Load configuration from ~/.step-palette/config.json
///
/// Returns `PaletteConfig::default()` if the file is missing or unreadable;
/// a broken config never keeps the palette from opening.
#[instrument(name = "load_config")]
pub fn load_config() -> PaletteConfig {
    let config_path = PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref());

    if !config_path.exists() {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        return PaletteConfig::default();
    }

    load_config_from(&config_path)
        .warn_on_err()
        .unwrap_or_default()
}

/// Load configuration from an explicit path; errors are returned, not defaulted.
pub fn load_config_from(path: &Path) -> Result<PaletteConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PaletteError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let config: PaletteConfig = serde_json::from_str(&content)
        .map_err(|e| PaletteError::Config(format!("invalid {}: {}", path.display(), e)))?;

    if config.specialized_prefix.trim().is_empty() {
        return Err(PaletteError::Config(
            "specializedPrefix must not be empty".to_string(),
        ));
    }

    info!(path = %path.display(), "Successfully loaded config");
    Ok(config)
}
