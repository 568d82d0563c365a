// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Re-basing of relative `require()` targets
//!
//! When a module moves from one directory to another, every relative target
//! it requires must be recomputed so that it designates the same location
//! from the new directory. Bare (`require("lodash")`) and absolute requires
//! are left as they are, as is every byte outside the targets themselves.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::path::{SlashPath, to_specifier};

/// `require(` + quoted literal starting with `./` or `../` + `)`.
///
/// The regex crate has no backreferences, so each quote style gets its own
/// alternative: group 1 is a double-quoted target, group 2 a single-quoted one.
static REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\brequire\(\s*(?:"(\.\.?/[^"\r\n]*)"|'(\.\.?/[^'\r\n]*)')\s*\)"#)
        .expect("require pattern is valid")
});

/// A single relative target that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireChange {
    /// Target as written before the move
    pub from: String,
    /// Target as written after the move
    pub to: String,
}

/// Output of [`rewrite_requires`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// The full rewritten contents
    pub contents: String,
    /// Targets that were altered, in source order
    pub changes: Vec<RequireChange>,
}

/// Rewrite the relative require targets of a file moving from `old_path` to
/// `new_path`.
pub fn rewrite(old_path: &str, new_path: &str, contents: &str) -> String {
    rewrite_requires(old_path, new_path, contents).contents
}

/// Like [`rewrite`], but also reports which targets changed.
pub fn rewrite_requires(old_path: &str, new_path: &str, contents: &str) -> Rewritten {
    let old_dir = SlashPath::parse(old_path).parent();
    let new_dir = SlashPath::parse(new_path).parent();

    // Same directory: every target already designates the right location.
    if old_dir == new_dir {
        return Rewritten {
            contents: contents.to_string(),
            changes: Vec::new(),
        };
    }

    let mut changes = Vec::new();
    let output = REQUIRE_RE.replace_all(contents, |caps: &Captures| {
        let whole = &caps[0];
        let Some(target) = caps.get(1).or_else(|| caps.get(2)) else {
            return whole.to_string();
        };

        let rebased = rebase(target.as_str(), &old_dir, &new_dir);
        if rebased != target.as_str() {
            debug!("Rebased require '{}' -> '{}'", target.as_str(), rebased);
            changes.push(RequireChange {
                from: target.as_str().to_string(),
                to: rebased.clone(),
            });
        }

        // Splice the new target into the original statement so quoting and
        // whitespace survive untouched.
        let start = caps.get(0).map(|m| m.start()).unwrap_or_default();
        let mut statement = String::with_capacity(whole.len() + rebased.len());
        statement.push_str(&whole[..target.start() - start]);
        statement.push_str(&rebased);
        statement.push_str(&whole[target.end() - start..]);
        statement
    });

    Rewritten {
        contents: output.into_owned(),
        changes,
    }
}

/// The relative require targets in `contents`, in source order.
pub fn relative_requires(contents: &str) -> Vec<&str> {
    REQUIRE_RE
        .captures_iter(contents)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
        .collect()
}

/// Recompute one target so it designates the same location from `new_dir`.
fn rebase(target: &str, old_dir: &SlashPath, new_dir: &SlashPath) -> String {
    let resolved = old_dir.join(target);
    match resolved.relative_to(new_dir) {
        Some(segments) => to_specifier(&segments, new_dir, target.ends_with('/')),
        None => {
            warn!(
                "Cannot express '{}' relative to '{}', leaving require unchanged",
                resolved, new_dir
            );
            target.to_string()
        }
    }
}
