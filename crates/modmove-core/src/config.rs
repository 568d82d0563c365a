// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Configuration management for modmove
//!
//! Sources, later ones winning:
//!
//! 1. `~/.modmoverc`
//! 2. `./.modmoverc`
//! 3. `MODMOVE_CONFIG_*` environment variables
//!
//! Files hold `key=value` lines; `#` and `;` start comments. List values are
//! comma separated.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ModmoveError, Result};
use crate::fs::{DEFAULT_EXTENSIONS, DEFAULT_IGNORE_DIRS, WalkOptions};

/// Name of the rc file looked up in the home and current directories
pub const RC_FILE: &str = ".modmoverc";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "MODMOVE_CONFIG_";

/// Configuration for modmove
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory names skipped when scanning for dependents
    pub ignore_dirs: Vec<String>,

    /// Extensions of the files scanned for dependents
    pub extensions: Vec<String>,

    /// Log level used when `RUST_LOG` is not set
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            loglevel: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from default locations.
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                config.merge_from_file(&user_config_path)?;
            }
        }

        let project_config_path = PathBuf::from(RC_FILE);
        if project_config_path.exists() {
            config.merge_from_file(&project_config_path)?;
        }

        config.merge_from_env(std::env::vars());

        Ok(config)
    }

    /// Merge configuration from a file.
    pub fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| ModmoveError::Config(format!("{}: {}", path.display(), e)))?;
        self.merge_str(&content);
        Ok(())
    }

    /// Merge `key=value` lines.
    pub fn merge_str(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => self.set(key.trim(), value.trim()),
                None => warn!("Ignoring config line without '=': {}", line),
            }
        }
    }

    /// Merge `MODMOVE_CONFIG_*` variables from `vars`.
    ///
    /// `MODMOVE_CONFIG_IGNORE_DIRS` sets `ignore-dirs`, and so on.
    pub fn merge_from_env(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                let config_key = config_key.to_lowercase().replace('_', "-");
                self.set(&config_key, &value);
            }
        }
    }

    /// Set a configuration value. Unknown keys are ignored with a warning.
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "ignore-dirs" => self.ignore_dirs = split_list(value),
            "extensions" => {
                self.extensions = split_list(value)
                    .into_iter()
                    .map(|ext| ext.trim_start_matches('.').to_string())
                    .collect()
            }
            "loglevel" => self.loglevel = value.to_string(),
            _ => warn!("Unknown config key: {}", key),
        }
    }

    /// Get a configuration value.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "ignore-dirs" => Some(self.ignore_dirs.join(",")),
            "extensions" => Some(self.extensions.join(",")),
            "loglevel" => Some(self.loglevel.clone()),
            _ => None,
        }
    }

    /// Listing filters for the filesystem.
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions::new(self.ignore_dirs.iter().cloned(), &self.extensions)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Get the user config path.
fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(RC_FILE))
}
