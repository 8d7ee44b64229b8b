// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Mapper configuration.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. [`OdmConfig::default()`]
//! 2. a TOML file, when one is given and exists
//! 3. environment variables prefixed `MONGO_ODM_`, with `__` between nested
//!    keys (`MONGO_ODM_CONVERTER__MAX_EMBED_DEPTH=8`)
//!
//! ```toml
//! database = "shop"
//!
//! [converter]
//! max_embed_depth = 16
//! ```

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml}
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default environment variable prefix.
pub const ENV_PREFIX: &str = "MONGO_ODM_";

/// Default bound on embedded-object recursion.
pub const DEFAULT_MAX_EMBED_DEPTH: usize = 32;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdmConfig {
    /// Database used when a model declares none.
    pub database:  String,
    /// Converter settings.
    pub converter: ConverterConfig
}

impl Default for OdmConfig {
    fn default() -> Self {
        Self {
            database:  "app".to_string(),
            converter: ConverterConfig::default()
        }
    }
}

/// Converter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Maximum depth of nested embedded objects in one conversion.
    pub max_embed_depth: usize
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_embed_depth: DEFAULT_MAX_EMBED_DEPTH
        }
    }
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to parse or extract.
    #[error("failed to load configuration: {0}")]
    Source(#[from] Box<figment::Error>),

    /// A value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String)
}

/// Layered configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path:       Option<PathBuf>,
    env_prefix: String
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader with no file and the default environment prefix.
    pub fn new() -> Self {
        Self {
            path:       None,
            env_prefix: ENV_PREFIX.to_string()
        }
    }

    /// Read a TOML file as the second layer.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use another environment variable prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Merged sources, before extraction.
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(OdmConfig::default()));
        if let Some(path) = &self.path {
            if path.exists() {
                debug!(path = %path.display(), "loading configuration file");
                figment = figment.merge(Toml::file(path));
            } else {
                debug!(path = %path.display(), "configuration file not found, skipped");
            }
        }
        figment.merge(Env::prefixed(&self.env_prefix).split("__"))
    }

    /// Load and validate.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when a source is malformed or a value is invalid.
    pub fn load(&self) -> Result<OdmConfig, ConfigError> {
        let config: OdmConfig = self.figment().extract().map_err(Box::new)?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &OdmConfig) -> Result<(), ConfigError> {
    if config.converter.max_embed_depth == 0 {
        return Err(ConfigError::Invalid(
            "converter.max_embed_depth must be at least 1".to_string()
        ));
    }
    if config.database.is_empty() {
        return Err(ConfigError::Invalid("database cannot be empty".to_string()));
    }
    Ok(())
}
