// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Command implementations for modmove.

pub mod mv;
pub mod refs;

use anyhow::Result;
use modmove_core::{Config, DiskFs, Mover};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Common context for command execution.
pub struct CommandContext {
    pub config: Config,
    pub quiet: bool,
}

impl CommandContext {
    /// Create a new command context.
    pub fn new(cli: &Cli, config: Config) -> Self {
        let mut config = config;

        // Override config with CLI options
        if !cli.ignore_dirs.is_empty() {
            config.ignore_dirs = cli.ignore_dirs.clone();
        }
        if !cli.extensions.is_empty() {
            config.set("extensions", &cli.extensions.join(","));
        }

        Self {
            config,
            quiet: cli.quiet,
        }
    }

    /// Create a disk filesystem honouring the configured filters.
    pub fn filesystem(&self) -> DiskFs {
        DiskFs::new(self.config.walk_options())
    }

    /// Create a mover over the disk.
    pub fn mover(&self) -> Mover<DiskFs> {
        Mover::new(self.filesystem())
    }
}

/// Make `path` absolute against the current directory, without touching
/// the filesystem.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| anyhow::anyhow!("cannot resolve '{}': {}", path.display(), e))
}

/// The scan root: the given directory, or the current one.
pub fn scan_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(root) => absolute(root),
        None => std::env::current_dir()
            .map_err(|e| anyhow::anyhow!("cannot determine current directory: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "modmove", "--ignore-dir", "dist", "--ext", ".cjs", "refs", "a.js",
        ])
        .unwrap();
        let ctx = CommandContext::new(&cli, Config::default());

        assert_eq!(ctx.config.ignore_dirs, vec!["dist"]);
        assert_eq!(ctx.config.extensions, vec!["cjs"]);
        assert!(ctx.filesystem().options().accepts_dir("node_modules"));
    }

    #[test]
    fn test_absolute() {
        let path = absolute(Path::new("lib/a.js")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("lib/a.js"));
    }
}
