//! Configuration Module
//!
//! This module defines the predicate parameters and the CLI configuration.
//! Configuration is loaded from TOML files and parsed using serde; the
//! parameters can additionally be overridden from a single positional
//! argument.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Asset accepted when nothing overrides it
pub const DEFAULT_ASSET_ID: u64 = 1;

/// Main configuration structure
///
/// Both sections are optional in the file.
///
/// # Example TOML
/// ```toml
/// [params]
/// assetId = 1
///
/// [logging]
/// filter = "info"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Construction-time parameters of the predicate
///
/// Serialized as `{"assetId": <id>}`; `asset_id` is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Params {
    /// Identifier of the only token the predicate will release
    #[serde(rename = "assetId", alias = "asset_id", default = "default_asset_id")]
    pub asset_id: u64,
}

fn default_asset_id() -> u64 {
    DEFAULT_ASSET_ID
}

impl Default for Params {
    fn default() -> Self {
        Self {
            asset_id: DEFAULT_ASSET_ID,
        }
    }
}

/// Logging configuration
///
/// # Fields
/// - `filter`: `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Partial parameter set read from an override source
///
/// Keys left out keep the value they are applied on top of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsOverride {
    #[serde(rename = "assetId", alias = "asset_id")]
    pub asset_id: Option<u64>,
}

impl ParamsOverride {
    /// Read an override from `source`
    ///
    /// When `source` names an existing file it is parsed by extension:
    /// `.toml` as TOML, `.json` as JSON, anything else as YAML. Otherwise
    /// `source` itself is parsed as a YAML mapping, which covers both the
    /// block form (`assetId: 7`) and inline JSON (`{"assetId": 7}`).
    pub fn load(source: &str) -> anyhow::Result<Self> {
        let path = Path::new(source);
        if !path.is_file() {
            return Self::from_yaml(source).with_context(|| {
                format!("invalid parameter override {source:?}: not a file or a YAML mapping")
            });
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read parameter override {}", path.display()))?;

        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        };
        parsed.with_context(|| format!("invalid parameter override in {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl Params {
    /// Apply `overrides` on top of these parameters
    pub fn merge(self, overrides: ParamsOverride) -> Self {
        Self {
            asset_id: overrides.asset_id.unwrap_or(self.asset_id),
        }
    }

    /// Resolve the effective parameters from an optional override source
    ///
    /// # Returns
    /// * `self` unchanged when `source` is `None`
    /// * `Err` if the source can't be read or doesn't parse
    pub fn resolve(self, source: Option<&str>) -> anyhow::Result<Self> {
        match source {
            Some(source) => Ok(self.merge(ParamsOverride::load(source)?)),
            None => Ok(self),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    ///
    /// # Example
    /// ```no_run
    /// # use token_issuer::Config;
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &str) -> anyhow::Result<Self> {
        // Read the file contents as a string
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;

        Self::from_toml(&content).with_context(|| format!("invalid config file {path}"))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
