//! Drift scanner: re-checks a persisted snapshot against the filesystem.

use crate::tree::fingerprint;
use crate::tree::node::{File, Folder, NodeKind};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// A snapshot node whose live filesystem state disagrees with its stored
/// fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirtyNode {
    pub path: String,
    pub kind: NodeKind,
}

/// Full-traversal drift scanner.
///
/// Visits every node in the tree exactly once, in pre-order: a folder, then
/// its subfolders, then its files. A dirty parent never prunes its subtree,
/// since a folder's fingerprint only covers immediate child names, not the
/// state below them. Filesystem errors are evidence of drift, never fatal.
pub struct DriftScanner {
    pace: Duration,
}

impl DriftScanner {
    /// Create a scanner with a pacing delay inserted between node visits,
    /// bounding the I/O burst rate on large trees.
    pub fn new(pace: Duration) -> Self {
        Self { pace }
    }

    /// Scanner with no pacing delay.
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Collect all dirty nodes under `root`, in traversal order.
    ///
    /// The tree must be rehydrated before scanning. The caller decides
    /// remediation; this never mutates the snapshot.
    #[instrument(skip_all, fields(root = %root.path))]
    pub fn scan(&self, root: &Folder) -> Vec<DirtyNode> {
        let mut dirty = Vec::new();
        self.scan_folder(root, &mut dirty);
        info!(dirty = dirty.len(), "Drift scan completed");
        dirty
    }

    fn scan_folder(&self, folder: &Folder, dirty: &mut Vec<DirtyNode>) {
        if !folder_clean(folder) {
            debug!(path = %folder.path, "Folder drifted");
            dirty.push(DirtyNode {
                path: folder.path.clone(),
                kind: NodeKind::Folder,
            });
        }
        self.pause();

        for child in &folder.children {
            self.scan_folder(child, dirty);
        }
        for file in &folder.files {
            if !file_clean(file) {
                debug!(path = %file.path, "File drifted");
                dirty.push(DirtyNode {
                    path: file.path.clone(),
                    kind: NodeKind::File,
                });
            }
            self.pause();
        }
    }

    fn pause(&self) {
        if !self.pace.is_zero() {
            std::thread::sleep(self.pace);
        }
    }
}

/// A folder is clean when it still exists and its immediate child-name set
/// fingerprints to the stored value. Missing or unreadable counts as drift.
fn folder_clean(folder: &Folder) -> bool {
    match fingerprint::folder_fingerprint(&folder.resolved_path) {
        Ok(fp) => fp == folder.contents_fingerprint,
        Err(_) => false,
    }
}

/// A file is clean when it still exists and its live size matches the
/// stored size. A same-size content change is not detected.
fn file_clean(file: &File) -> bool {
    match fingerprint::file_size_signature(&file.resolved_path) {
        Ok(size) => size == file.size_bytes,
        Err(_) => false,
    }
}
