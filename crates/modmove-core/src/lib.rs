// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # modmove-core
//!
//! Moves a CommonJS module to a new path and re-bases the relative
//! `require()` targets inside it, so they keep designating the same modules.
//!
//! - [`rewrite`]: the pure text transform
//! - [`Mover`]: read, rewrite, write, delete over an injected [`FileSystem`]
//! - [`find_dependents`]: report files that require a module
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use modmove_core::{DiskFs, Mover};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> modmove_core::Result<()> {
//!     let mover = Mover::new(DiskFs::default());
//!     let outcome = mover
//!         .move_file(Path::new("lib/parse/a.js"), Path::new("lib/a.js"))
//!         .await?;
//!     println!("{} requires rewritten", outcome.changes.len());
//!     Ok(())
//! }
//! ```
//!
//! The rewrite itself needs no I/O:
//!
//! ```
//! let out = modmove_core::rewrite(
//!     "/test/move/parse/a.js",
//!     "/test/move/b.js",
//!     r#"require("./foo"); require("../../qux");"#,
//! );
//! assert_eq!(out, r#"require("./parse/foo"); require("../qux");"#);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dependents;
pub mod error;
pub mod fs;
pub mod mover;
pub mod path;
pub mod rewrite;

// Re-exports
pub use config::Config;
pub use dependents::{Dependent, find_dependents};
pub use error::{ModmoveError, MoveStep, Result};
pub use fs::{DiskFs, FileSystem, MemoryFs, WalkOptions};
pub use mover::{MoveOutcome, Mover};
pub use rewrite::{RequireChange, Rewritten, relative_requires, rewrite, rewrite_requires};

/// Version of modmove
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
