// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Configuration file loading.
//!
//! Settings live in a TOML file (`classdiff.toml`). Every key is optional; absent keys keep
//! their defaults. Command-line flags are applied on top by the binary.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::diff::{CompareOptions, DEFAULT_MIN_SIMILARITY};
use crate::error::{ClassDiffError, ConfigError};

/// File name looked up in the working directory when no explicit path is given.
pub const LOCAL_CONFIG_FILE: &str = "classdiff.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print the annotated candidate listing after the report.
    pub highlight: bool,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: OutputFormat::Text, highlight: true, color: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HintsConfig {
    pub enabled: bool,
    pub min_similarity: f64,
}

impl Default for HintsConfig {
    fn default() -> Self {
        Self { enabled: true, min_similarity: DEFAULT_MIN_SIMILARITY }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub hints: HintsConfig,
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let min = self.hints.min_similarity;
        if !(0.0..=1.0).contains(&min) {
            return Err(ConfigError::Validation(format!(
                "hints.min_similarity must be within 0.0..=1.0, got {min}"
            )));
        }
        Ok(())
    }

    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            rename_hints: self.hints.enabled,
            min_similarity: self.hints.min_similarity,
        }
    }
}

/// Find and load configuration.
///
/// Search order:
/// 1. Explicit path if provided (a missing file is an error)
/// 2. `classdiff.toml` in the working directory
/// 3. Defaults
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, ClassDiffError> {
    load_config_in(explicit_path, Path::new("."))
}

/// [`load_config`] with the local lookup rooted at `dir` instead of the working directory.
pub fn load_config_in(explicit_path: Option<&Path>, dir: &Path) -> Result<AppConfig, ClassDiffError> {
    if let Some(path) = explicit_path {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = dir.join(LOCAL_CONFIG_FILE);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(&local_config);
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, ClassDiffError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)
        .map_err(|err| ClassDiffError::io(path.display().to_string(), err))?;

    Ok(AppConfig::from_toml(&content)?)
}
