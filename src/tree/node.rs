//! Snapshot node data model: folders, files, and artist groupings.
//!
//! Ownership is strictly top-down: a `Folder` owns its child folders and
//! files, and deleting a folder drops its whole subtree. Parent and artist
//! relations are stored as plain keys (relative path, numeric id) so the
//! graph carries no cyclic references.

use crate::tree::fingerprint::Fingerprint;
use crate::tree::path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Snapshot node kinds, for traversal results and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Folder,
    File,
}

/// A directory in the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Path relative to the library root; primary key. `"."` for the root.
    pub path: String,
    /// Exactly one folder per tree has this set, and it has no parent.
    pub is_root: bool,
    /// Owning folder's `path`; `None` iff `is_root`.
    pub parent_path: Option<String>,
    /// Digest of the immediate child-name set at construction time.
    pub contents_fingerprint: Fingerprint,
    /// Owned subfolders.
    pub children: Vec<Folder>,
    /// Owned files directly inside this folder.
    pub files: Vec<File>,
    /// Absolute path on disk. Derived, never persisted; recomputed on load.
    #[serde(skip)]
    pub resolved_path: PathBuf,
}

/// An audio (or other) file in the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    /// Path relative to the library root; primary key.
    pub path: String,
    /// Owning folder's `path`. Files are never rootless.
    pub parent_path: String,
    /// Whether metadata extraction succeeded for this file's format.
    pub supported: bool,
    /// Filesystem size at construction time.
    pub size_bytes: u64,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<String>,
    /// Id of the artist this file was grouped under, if any.
    pub artist_id: Option<u64>,
    /// Absolute path on disk. Derived, never persisted; recomputed on load.
    #[serde(skip)]
    pub resolved_path: PathBuf,
}

/// An album-artist grouping. Does not own its songs; `songs` holds the
/// relative paths of the files grouped under this artist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: u64,
    /// The album-artist tag value used as the grouping key.
    pub name: String,
    pub songs: Vec<String>,
}

impl Folder {
    /// Recompute `resolved_path` for this folder and every node below it.
    ///
    /// Must run exactly once per load, before any filesystem access on the
    /// tree. Part of the store's load contract.
    pub fn rehydrate(&mut self, root: &Path) {
        self.resolved_path = path::resolve(root, &self.path);
        for file in &mut self.files {
            file.resolved_path = path::resolve(root, &file.path);
        }
        for child in &mut self.children {
            child.rehydrate(root);
        }
    }

    /// Total folder count in this subtree, including self.
    pub fn folder_count(&self) -> usize {
        1 + self.children.iter().map(Folder::folder_count).sum::<usize>()
    }

    /// Total file count in this subtree.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.children.iter().map(Folder::file_count).sum::<usize>()
    }

    /// Find a file anywhere in this subtree by its relative path.
    pub fn find_file(&self, path: &str) -> Option<&File> {
        if let Some(file) = self.files.iter().find(|f| f.path == path) {
            return Some(file);
        }
        self.children.iter().find_map(|c| c.find_file(path))
    }

    /// Find a folder in this subtree by its relative path, including self.
    pub fn find_folder(&self, path: &str) -> Option<&Folder> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_folder(path))
    }
}
