// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Finding the files that require a given module
//!
//! Only reports. Moving a module never rewrites the files that depend on it,
//! so this is how a caller learns which ones now point at a stale location.

use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::fs::FileSystem;
use crate::path::SlashPath;
use crate::rewrite::relative_requires;

/// A file holding a relative require that designates the target module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependent {
    /// The requiring file
    pub file: PathBuf,
    /// The require target as written in that file
    pub specifier: String,
}

/// Scan the files under `root` for relative requires designating `target`.
///
/// `root` and `target` should both be absolute or both be relative to the same
/// directory. A require matches when it resolves to the target path, to the
/// target path without its extension, or (for an `index` file) to the
/// directory containing it.
#[instrument(skip(fs))]
pub async fn find_dependents<F>(fs: &F, root: &Path, target: &Path) -> Result<Vec<Dependent>>
where
    F: FileSystem + ?Sized,
{
    let target = SlashPath::from_path(target);
    let designations = designations(&target);
    let mut dependents = Vec::new();

    for file in fs.read_dir_recursive(root).await? {
        let file_path = SlashPath::from_path(&file);
        if file_path == target {
            continue;
        }

        let contents = match fs.read(&file).await {
            Ok(contents) => contents,
            Err(e) if e.is_not_found() => {
                debug!("{} vanished during scan", file.display());
                continue;
            }
            Err(e) => {
                warn!("Skipping unreadable {}: {}", file.display(), e);
                continue;
            }
        };

        let dir = file_path.parent();
        for specifier in relative_requires(&contents) {
            if designations.contains(&dir.join(specifier)) {
                dependents.push(Dependent {
                    file: file.clone(),
                    specifier: specifier.to_string(),
                });
            }
        }
    }

    debug!("Found {} dependents of {}", dependents.len(), target);
    Ok(dependents)
}

/// The locations a require may name to reach `target`.
fn designations(target: &SlashPath) -> Vec<SlashPath> {
    let mut result = vec![target.clone()];

    let Some(name) = target.file_name() else {
        return result;
    };
    if let Some((stem, _ext)) = name.rsplit_once('.').filter(|(stem, _)| !stem.is_empty()) {
        let dir = target.parent();
        result.push(dir.join(stem));
        if stem == "index" {
            result.push(dir);
        }
    }
    result
}
