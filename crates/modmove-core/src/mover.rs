// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Moving a module: read, rewrite, write, delete
//!
//! The steps run strictly in order and the first failure aborts the move:
//!
//! - a failed read leaves everything untouched;
//! - a failed write leaves the original in place;
//! - a failed delete leaves both copies behind. Nothing is rolled back.
//!
//! No locking is done. Two moves racing over the same paths are not
//! coordinated.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::error::{ModmoveError, MoveStep, Result};
use crate::fs::FileSystem;
use crate::path::SlashPath;
use crate::rewrite::{RequireChange, Rewritten, rewrite_requires};

/// Result of a completed move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Where the file was
    pub from: PathBuf,
    /// Where the file is now
    pub to: PathBuf,
    /// Require targets that were rewritten
    pub changes: Vec<RequireChange>,
}

/// Moves modules through an injected filesystem
pub struct Mover<F> {
    fs: F,
}

impl<F: FileSystem> Mover<F> {
    /// Create a mover over `fs`
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// The filesystem this mover operates on
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Move `from` to `to`, re-basing the relative requires of the file.
    #[instrument(skip(self))]
    pub async fn move_file(&self, from: &Path, to: &Path) -> Result<MoveOutcome> {
        validate(from, to)?;

        debug!("Reading {}", from.display());
        let contents = self
            .fs
            .read(from)
            .await
            .map_err(|e| e.at_step(MoveStep::Read))?;

        let rewritten = rewrite_file(from, to, &contents);
        debug!("Rewrote {} require targets", rewritten.changes.len());

        debug!("Writing {}", to.display());
        self.fs
            .write(to, &rewritten.contents)
            .await
            .map_err(|e| e.at_step(MoveStep::Write))?;

        debug!("Removing {}", from.display());
        self.fs
            .remove(from)
            .await
            .map_err(|e| e.at_step(MoveStep::Delete))?;

        info!("Moved {} -> {}", from.display(), to.display());
        Ok(MoveOutcome {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            changes: rewritten.changes,
        })
    }

    /// Read and rewrite without writing or deleting anything.
    pub async fn plan(&self, from: &Path, to: &Path) -> Result<Rewritten> {
        validate(from, to)?;

        let contents = self
            .fs
            .read(from)
            .await
            .map_err(|e| e.at_step(MoveStep::Read))?;
        Ok(rewrite_file(from, to, &contents))
    }
}

fn rewrite_file(from: &Path, to: &Path, contents: &str) -> Rewritten {
    let from = SlashPath::from_path(from).to_string();
    let to = SlashPath::from_path(to).to_string();
    rewrite_requires(&from, &to, contents)
}

fn validate(from: &Path, to: &Path) -> Result<()> {
    for path in [from, to] {
        let text = path.to_string_lossy();
        if text.is_empty() {
            return Err(ModmoveError::invalid_path("path must not be empty"));
        }
        if text.ends_with('/') || text.ends_with('\\') {
            return Err(ModmoveError::invalid_path(format!(
                "'{}' names a directory, not a file",
                text
            )));
        }
        if SlashPath::from_path(path).file_name().is_none() {
            return Err(ModmoveError::invalid_path(format!(
                "'{}' does not name a file",
                text
            )));
        }
    }

    if SlashPath::from_path(from) == SlashPath::from_path(to) {
        return Err(ModmoveError::invalid_path(format!(
            "source and destination are the same file: '{}'",
            from.display()
        )));
    }

    Ok(())
}
