//! Configuration error types.
//!
//! Gameplay systems never return these: a bad value at runtime is logged and the
//! action is skipped for that tick. These errors surface only where configuration
//! is loaded or validated.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config value `{field}` = {value} is invalid: expected {expected}")]
    Invalid {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("population floor {floor} exceeds maximum {max}")]
    PopulationBounds { floor: usize, max: usize },

    #[error("projectile catalog is unusable: {0}")]
    Catalog(#[from] crate::plugins::projectiles::selector::SelectError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
