// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Filesystem facade
//!
//! Everything that touches storage goes through [`FileSystem`], so a move can
//! run against the real disk ([`DiskFs`]) or an in-memory tree ([`MemoryFs`]).

mod disk;
mod memory;

pub use disk::DiskFs;
pub use memory::MemoryFs;

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Directories skipped by default when listing a tree
pub const DEFAULT_IGNORE_DIRS: &[&str] = &["node_modules"];

/// File extensions listed by default
pub const DEFAULT_EXTENSIONS: &[&str] = &["js"];

/// Asynchronous file operations used by a move
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// List the files under `root`, sorted, honouring the [`WalkOptions`] of
    /// the implementation.
    async fn read_dir_recursive(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Read a file as text. Fails with `NotFound` if it does not exist.
    async fn read(&self, path: &Path) -> Result<String>;

    /// Create or overwrite a file.
    async fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Remove a file. Fails with `NotFound` if it does not exist.
    async fn remove(&self, path: &Path) -> Result<()>;
}

/// Filters applied by [`FileSystem::read_dir_recursive`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Directory names that are never descended into
    pub ignore_dirs: BTreeSet<String>,
    /// Extensions (without the dot) of the files to list
    pub extensions: BTreeSet<String>,
}

impl WalkOptions {
    /// Build options from directory names and extensions.
    ///
    /// Extensions may be given with or without a leading dot.
    pub fn new<D, E>(ignore_dirs: D, extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            ignore_dirs: ignore_dirs.into_iter().map(Into::into).collect(),
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
                .collect(),
        }
    }

    /// Whether a directory with this name should be descended into
    pub fn accepts_dir(&self, name: &str) -> bool {
        !self.ignore_dirs.contains(name)
    }

    /// Whether a file should be listed
    pub fn accepts_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(ext))
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::new(
            DEFAULT_IGNORE_DIRS.iter().copied(),
            DEFAULT_EXTENSIONS.iter().copied(),
        )
    }
}
