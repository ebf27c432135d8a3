//! Snapshot store
//!
//! Persistence contract for the snapshot tree and its artist groupings.
//! Trees are flattened into per-node records keyed by relative path, then
//! reassembled (and rehydrated) on load.

pub mod persistence;

pub use persistence::SledSnapshotStore;

use crate::error::{SnapshotError, StoreError};
use crate::tree::fingerprint::Fingerprint;
use crate::tree::node::{Artist, File, Folder};
use serde::{Deserialize, Serialize};

/// Snapshot persistence contract.
///
/// Always an explicit handle; nothing here reads ambient global state.
pub trait SnapshotStore {
    /// Load the single root folder of the persisted tree, fully assembled
    /// and rehydrated, or `None` when no snapshot exists yet.
    ///
    /// Fails with `SnapshotError::MultipleRoot` when more than one
    /// root-flagged folder is persisted.
    fn load_root(&self) -> Result<Option<Folder>, SnapshotError>;

    /// Persist a full tree, all-or-nothing.
    fn save(&self, root: &Folder) -> Result<(), StoreError>;

    /// All persisted artist groupings.
    fn artists(&self) -> Result<Vec<Artist>, StoreError>;

    /// Look up an artist by exact name.
    fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>, StoreError>;

    /// Persist one artist grouping immediately.
    fn save_artist(&self, artist: &Artist) -> Result<(), StoreError>;

    /// Hand out the next artist id. Ids start at 1 and never repeat.
    fn allocate_artist_id(&self) -> Result<u64, StoreError>;

    /// Destroy all persisted state. Used for a full rebuild.
    fn drop_all(&self) -> Result<(), StoreError>;
}

/// Flat persisted form of a `Folder`. Children are stored as relative-path
/// references and resolved back into owned nodes on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderRecord {
    pub path: String,
    pub is_root: bool,
    pub parent_path: Option<String>,
    pub contents_fingerprint: Fingerprint,
    pub child_folders: Vec<String>,
    pub files: Vec<String>,
}

/// Flat persisted form of a `File`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub parent_path: String,
    pub supported: bool,
    pub size_bytes: u64,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<String>,
    pub artist_id: Option<u64>,
}

impl FolderRecord {
    pub fn from_folder(folder: &Folder) -> Self {
        Self {
            path: folder.path.clone(),
            is_root: folder.is_root,
            parent_path: folder.parent_path.clone(),
            contents_fingerprint: folder.contents_fingerprint,
            child_folders: folder.children.iter().map(|c| c.path.clone()).collect(),
            files: folder.files.iter().map(|f| f.path.clone()).collect(),
        }
    }
}

impl FileRecord {
    pub fn from_file(file: &File) -> Self {
        Self {
            path: file.path.clone(),
            parent_path: file.parent_path.clone(),
            supported: file.supported,
            size_bytes: file.size_bytes,
            artist: file.artist.clone(),
            album_artist: file.album_artist.clone(),
            album: file.album.clone(),
            track: file.track.clone(),
            artist_id: file.artist_id,
        }
    }

    pub fn into_file(self) -> File {
        File {
            path: self.path,
            parent_path: self.parent_path,
            supported: self.supported,
            size_bytes: self.size_bytes,
            artist: self.artist,
            album_artist: self.album_artist,
            album: self.album,
            track: self.track,
            artist_id: self.artist_id,
            resolved_path: Default::default(),
        }
    }
}

/// Flatten a tree into per-node records for a batch write.
pub fn flatten(root: &Folder) -> (Vec<FolderRecord>, Vec<FileRecord>) {
    let mut folders = Vec::new();
    let mut files = Vec::new();
    flatten_into(root, &mut folders, &mut files);
    (folders, files)
}

fn flatten_into(folder: &Folder, folders: &mut Vec<FolderRecord>, files: &mut Vec<FileRecord>) {
    folders.push(FolderRecord::from_folder(folder));
    for file in &folder.files {
        files.push(FileRecord::from_file(file));
    }
    for child in &folder.children {
        flatten_into(child, folders, files);
    }
}
