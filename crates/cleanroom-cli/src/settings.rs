use std::path::Path;

use thiserror::Error;

use cleanroom::QualityConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] cleanroom_core::Error),
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Load the quality configuration from a TOML file, or defaults without one.
pub fn load_config(path: Option<&Path>) -> SettingsResult<QualityConfig> {
    let config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<QualityConfig>(&content)?
        }
        None => QualityConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
