// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Lexical path arithmetic on slash-separated paths
//!
//! Nothing here touches the filesystem. Paths are normalized purely on their
//! text, and `..` is never clamped: a path that climbs past its first segment
//! (or past `/`) keeps the extra `..` segments so the climb can be undone later.

use std::fmt;
use std::path::{Component, Path};

/// A normalized, slash-separated path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashPath {
    absolute: bool,
    segments: Vec<String>,
}

impl SlashPath {
    /// Parse and normalize a path. Both `/` and `\` are accepted as separators.
    pub fn parse(path: &str) -> Self {
        let absolute = path.starts_with('/') || path.starts_with('\\');
        let mut result = SlashPath {
            absolute,
            segments: Vec::new(),
        };
        result.push_all(path);
        result
    }

    /// Build from a native path.
    pub fn from_path(path: &Path) -> Self {
        let mut result = SlashPath {
            absolute: path.has_root(),
            segments: Vec::new(),
        };
        for component in path.components() {
            match component {
                Component::Prefix(prefix) => {
                    result.segments.push(prefix.as_os_str().to_string_lossy().into_owned())
                }
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir => result.push_segment(".."),
                Component::Normal(name) => result.push_segment(&name.to_string_lossy()),
            }
        }
        result
    }

    /// Whether the path starts at `/`.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// The normalized segments. Leading `..` segments are possible.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, if it names something.
    pub fn file_name(&self) -> Option<&str> {
        self.segments
            .last()
            .map(String::as_str)
            .filter(|name| *name != "..")
    }

    /// The directory containing this path.
    pub fn parent(&self) -> SlashPath {
        let mut parent = self.clone();
        match parent.segments.last().map(String::as_str) {
            Some("..") | None => parent.segments.push("..".to_string()),
            Some(_) => {
                parent.segments.pop();
            }
        }
        parent
    }

    /// Resolve `relative` against this path, treating `self` as a directory.
    pub fn join(&self, relative: &str) -> SlashPath {
        if relative.starts_with('/') {
            return SlashPath::parse(relative);
        }
        let mut joined = self.clone();
        joined.push_all(relative);
        joined
    }

    /// Segments leading from directory `base` to `self`.
    ///
    /// Returns `None` when the two paths cannot be related lexically: one is
    /// absolute and the other is not, or `base` climbs out through `..`
    /// segments that `self` does not share, which would require knowing the
    /// name of a directory above the known prefix.
    pub fn relative_to(&self, base: &SlashPath) -> Option<Vec<String>> {
        if self.absolute != base.absolute {
            return None;
        }

        let common = self
            .segments
            .iter()
            .zip(&base.segments)
            .take_while(|(a, b)| a == b)
            .count();

        let climb = &base.segments[common..];
        if climb.iter().any(|segment| segment == "..") {
            return None;
        }

        let mut result: Vec<String> = climb.iter().map(|_| "..".to_string()).collect();
        result.extend(self.segments[common..].iter().cloned());
        Some(result)
    }

    fn push_all(&mut self, path: &str) {
        for segment in path.split(['/', '\\']) {
            self.push_segment(segment);
        }
    }

    fn push_segment(&mut self, segment: &str) {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(self.segments.last(), Some(last) if last != "..") {
                    self.segments.pop();
                } else {
                    self.segments.push("..".to_string());
                }
            }
            name => self.segments.push(name.to_string()),
        }
    }
}

impl fmt::Display for SlashPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.segments.join("/");
        match (self.absolute, joined.is_empty()) {
            (true, _) => write!(f, "/{}", joined),
            (false, true) => f.write_str("."),
            (false, false) => f.write_str(&joined),
        }
    }
}

/// Render relative segments, computed against directory `base`, as a require
/// target.
///
/// A target that does not climb gets a `./` prefix so it still reads as a
/// relative require. An empty result designates `base` itself; it is spelled
/// `../<name>` through the parent of `base`, or `./` when `base` has no name
/// (the root, or a path ending in `..`). Both forms stay relative requires.
pub fn to_specifier(segments: &[String], base: &SlashPath, trailing_slash: bool) -> String {
    let mut specifier = match (segments.first(), base.file_name()) {
        (None, Some(name)) => format!("../{}", name),
        (None, None) => "./".to_string(),
        (Some(first), _) if first == ".." => segments.join("/"),
        (Some(_), _) => format!("./{}", segments.join("/")),
    };
    if trailing_slash && !specifier.ends_with('/') {
        specifier.push('/');
    }
    specifier
}
