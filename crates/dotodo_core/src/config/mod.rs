use crate::error::AppError;
use crate::id::{DEFAULT_ID_LENGTH, IdStrategy};
use crate::storage::layout::StoreLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-store settings, written once by init.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub id_strategy: IdStrategy,
    #[serde(default = "default_id_length")]
    pub id_length: usize,
}

fn default_id_length() -> usize {
    DEFAULT_ID_LENGTH
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            id_length: DEFAULT_ID_LENGTH,
        }
    }
}

impl StoreConfig {
    pub fn with_strategy(id_strategy: IdStrategy) -> Self {
        Self {
            id_strategy,
            ..Self::default()
        }
    }
}

/// Stores written before the config file existed fall back to the defaults.
pub fn load_config(layout: &StoreLayout) -> Result<StoreConfig, AppError> {
    load_config_from_path(&layout.config_file())
}

pub fn save_config(layout: &StoreLayout, config: &StoreConfig) -> Result<(), AppError> {
    save_config_to_path(&layout.config_file(), config)
}

fn load_config_from_path(path: &Path) -> Result<StoreConfig, AppError> {
    if !path.exists() {
        return Ok(StoreConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

fn save_config_to_path(path: &Path, config: &StoreConfig) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))
}
