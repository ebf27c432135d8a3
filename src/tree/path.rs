//! Resolution of snapshot-relative paths against the library root.
//!
//! Snapshot nodes store paths relative to the configured library root, with
//! `"."` naming the root itself. The absolute location on disk is derived,
//! never persisted.

use std::path::{Path, PathBuf};

/// Resolve a snapshot-relative path to an absolute filesystem path.
///
/// Pure join; no validation and no filesystem access. A malformed relative
/// path surfaces later as a filesystem error at the point of use.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    if relative == "." {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}

/// Join a child entry name onto a parent's snapshot-relative path.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent == "." {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
