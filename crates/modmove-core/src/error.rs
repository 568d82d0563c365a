// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for modmove

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for modmove operations
pub type Result<T> = std::result::Result<T, ModmoveError>;

/// The I/O step of a move at which a failure occurred.
///
/// Rewriting is a pure transform and never fails, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStep {
    /// Reading the source file
    Read,
    /// Writing the rewritten file at the destination
    Write,
    /// Removing the source file
    Delete,
}

impl fmt::Display for MoveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveStep::Read => "read",
            MoveStep::Write => "write",
            MoveStep::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while moving a module
#[derive(Debug, Error)]
pub enum ModmoveError {
    /// File does not exist
    #[error("No such file: {}", .0.display())]
    NotFound(PathBuf),

    /// Any other OS-level failure
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed path argument
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A move aborted at `step`
    #[error("Move failed during {step}: {source}")]
    MoveFailed {
        /// Step that failed
        step: MoveStep,
        /// The error reported by the filesystem
        #[source]
        source: Box<ModmoveError>,
    },

    /// Directory traversal error
    #[error("Failed to walk directory: {0}")]
    Walk(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ModmoveError {
    /// Classify an I/O error raised while operating on `path`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ModmoveError::NotFound(path.to_path_buf())
        } else {
            ModmoveError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    /// Label an error with the move step it happened in.
    pub fn at_step(self, step: MoveStep) -> Self {
        ModmoveError::MoveFailed {
            step,
            source: Box::new(self),
        }
    }

    /// The step a move failed at, if this error came from a move.
    pub fn step(&self) -> Option<MoveStep> {
        match self {
            ModmoveError::MoveFailed { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// The underlying error, looking through the step label.
    pub fn root(&self) -> &ModmoveError {
        match self {
            ModmoveError::MoveFailed { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the underlying error is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), ModmoveError::NotFound(_))
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        ModmoveError::InvalidPath(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_from_io_maps_not_found() {
        let err = ModmoveError::from_io(Path::new("/a.js"), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ModmoveError::NotFound(ref p) if p == Path::new("/a.js")));

        let err = ModmoveError::from_io(
            Path::new("/a.js"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, ModmoveError::Io { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_step_label() {
        let err = ModmoveError::NotFound(PathBuf::from("/a.js")).at_step(MoveStep::Read);
        assert_eq!(err.step(), Some(MoveStep::Read));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Move failed during read: No such file: /a.js");
    }
}
