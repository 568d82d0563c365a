// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! In-memory `FileSystem`
//!
//! Files live in a map keyed by path; directories exist only implicitly.
//! Writes and removals can be made to fail per path, which lets callers
//! exercise the abort paths of a move without touching the disk.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Component, Path, PathBuf};

use super::{FileSystem, WalkOptions};
use crate::error::{ModmoveError, Result};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    denied_writes: BTreeSet<PathBuf>,
    denied_removes: BTreeSet<PathBuf>,
}

/// Filesystem held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryFs {
    state: Mutex<State>,
    options: WalkOptions,
}

impl MemoryFs {
    /// Create an empty in-memory filesystem with default listing filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty in-memory filesystem with the given listing filters
    pub fn with_options(options: WalkOptions) -> Self {
        Self {
            state: Mutex::default(),
            options,
        }
    }

    /// Seed a file
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.state.lock().files.insert(path.into(), contents.into());
    }

    /// Current contents of a file
    pub fn get(&self, path: &Path) -> Option<String> {
        self.state.lock().files.get(path).cloned()
    }

    /// Whether a file exists
    pub fn contains(&self, path: &Path) -> bool {
        self.state.lock().files.contains_key(path)
    }

    /// Make every write to `path` fail with a permission error
    pub fn deny_write(&self, path: impl Into<PathBuf>) {
        self.state.lock().denied_writes.insert(path.into());
    }

    /// Make every removal of `path` fail with a permission error
    pub fn deny_remove(&self, path: impl Into<PathBuf>) {
        self.state.lock().denied_removes.insert(path.into());
    }
}

fn permission_denied(path: &Path) -> ModmoveError {
    ModmoveError::Io {
        path: path.to_path_buf(),
        source: io::Error::from(io::ErrorKind::PermissionDenied),
    }
}

#[async_trait]
impl FileSystem for MemoryFs {
    async fn read_dir_recursive(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let state = self.state.lock();
        let files = state
            .files
            .keys()
            .filter(|path| {
                let Ok(relative) = path.strip_prefix(root) else {
                    return false;
                };
                let mut components = relative.components().collect::<Vec<_>>();
                components.pop();
                components.iter().all(|component| match component {
                    Component::Normal(name) => {
                        name.to_str().is_none_or(|name| self.options.accepts_dir(name))
                    }
                    _ => true,
                })
            })
            .filter(|path| self.options.accepts_file(path))
            .cloned()
            .collect();
        Ok(files)
    }

    async fn read(&self, path: &Path) -> Result<String> {
        self.get(path)
            .ok_or_else(|| ModmoveError::NotFound(path.to_path_buf()))
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.denied_writes.contains(path) {
            return Err(permission_denied(path));
        }
        state.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    async fn remove(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock();
        if state.denied_removes.contains(path) {
            return Err(permission_denied(path));
        }
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| ModmoveError::NotFound(path.to_path_buf()))
    }
}
