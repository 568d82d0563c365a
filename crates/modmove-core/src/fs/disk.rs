// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! `FileSystem` backed by the real disk

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use super::{FileSystem, WalkOptions};
use crate::error::{ModmoveError, Result};

/// Disk filesystem using `tokio::fs`
#[derive(Debug, Clone, Default)]
pub struct DiskFs {
    options: WalkOptions,
}

impl DiskFs {
    /// Create a disk filesystem with the given listing filters
    pub fn new(options: WalkOptions) -> Self {
        Self { options }
    }

    /// The listing filters in use
    pub fn options(&self) -> &WalkOptions {
        &self.options
    }
}

#[async_trait]
impl FileSystem for DiskFs {
    async fn read_dir_recursive(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let root = root.to_path_buf();
        let options = self.options.clone();

        tokio::task::spawn_blocking(move || walk(&root, &options))
            .await
            .map_err(|e| ModmoveError::Walk(e.to_string()))?
    }

    async fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .map_err(|e| ModmoveError::from_io(path, e))
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        // A missing parent directory is a write failure, not a missing file.
        fs::write(path, contents)
            .await
            .map_err(|source| ModmoveError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn remove(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
            .await
            .map_err(|e| ModmoveError::from_io(path, e))
    }
}

fn walk(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| options.accepts_dir(name))
        });

    for entry in walker {
        let entry = entry.map_err(|e| match e.io_error() {
            Some(io) if io.kind() == std::io::ErrorKind::NotFound => {
                ModmoveError::NotFound(e.path().unwrap_or(root).to_path_buf())
            }
            _ => ModmoveError::Walk(e.to_string()),
        })?;

        if entry.file_type().is_file() && options.accepts_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!("Listed {} files under {}", files.len(), root.display());
    Ok(files)
}
