//! Sled-backed implementation of the snapshot store.

use crate::error::{SnapshotError, StoreError};
use crate::store::{flatten, FileRecord, FolderRecord, SnapshotStore};
use crate::tree::node::{Artist, Folder};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const META_NEXT_ARTIST_ID: &[u8] = b"meta:next-artist-id";
const META_BUILT_AT: &[u8] = b"meta:built-at";

fn folder_key(path: &str) -> Vec<u8> {
    format!("folder:{}", path).into_bytes()
}

fn file_key(path: &str) -> Vec<u8> {
    format!("file:{}", path).into_bytes()
}

// Zero-padded so artist keys iterate in id order.
fn artist_key(id: u64) -> Vec<u8> {
    format!("artist:{:020}", id).into_bytes()
}

fn artist_name_key(name: &str) -> Vec<u8> {
    format!("artist-name:{}", name).into_bytes()
}

/// Sled-based snapshot store.
///
/// Records share one keyspace under `folder:`, `file:`, `artist:` and
/// `artist-name:` prefixes, with `meta:` entries for the artist id counter
/// and the build timestamp. `save` goes through a single `sled::Batch` so a
/// tree is persisted all-or-nothing.
pub struct SledSnapshotStore {
    db: sled::Db,
    library_root: PathBuf,
}

impl SledSnapshotStore {
    /// Open (or create) a store at `path` for a library rooted at
    /// `library_root`. The root is needed to rehydrate nodes on load.
    pub fn open<P: AsRef<Path>>(path: P, library_root: PathBuf) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db, library_root })
    }

    /// RFC 3339 timestamp of the last persisted build, if any.
    pub fn built_at(&self) -> Result<Option<String>, StoreError> {
        match self.db.get(META_BUILT_AT)? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    fn folder_record(&self, path: &str) -> Result<Option<FolderRecord>, StoreError> {
        match self.db.get(folder_key(path))? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    fn file_record(&self, path: &str) -> Result<Option<FileRecord>, StoreError> {
        match self.db.get(file_key(path))? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    /// Reassemble an owned folder subtree from its flat records.
    fn assemble_folder(&self, path: &str) -> Result<Folder, StoreError> {
        let record = self
            .folder_record(path)?
            .ok_or_else(|| StoreError::MissingRecord(path.to_string()))?;

        let mut files = Vec::with_capacity(record.files.len());
        for file_path in &record.files {
            let file = self
                .file_record(file_path)?
                .ok_or_else(|| StoreError::MissingRecord(file_path.clone()))?;
            files.push(file.into_file());
        }

        let mut children = Vec::with_capacity(record.child_folders.len());
        for child_path in &record.child_folders {
            children.push(self.assemble_folder(child_path)?);
        }

        Ok(Folder {
            path: record.path,
            is_root: record.is_root,
            parent_path: record.parent_path,
            contents_fingerprint: record.contents_fingerprint,
            children,
            files,
            resolved_path: Default::default(),
        })
    }
}

impl SnapshotStore for SledSnapshotStore {
    fn load_root(&self) -> Result<Option<Folder>, SnapshotError> {
        let mut root_path: Option<String> = None;
        for item in self.db.scan_prefix(b"folder:") {
            let (_, value) = item.map_err(StoreError::from)?;
            let record: FolderRecord =
                bincode::deserialize(&value).map_err(StoreError::from)?;
            if record.is_root {
                if root_path.is_some() {
                    return Err(SnapshotError::MultipleRoot);
                }
                root_path = Some(record.path);
            }
        }

        let Some(root_path) = root_path else {
            return Ok(None);
        };

        let mut root = self.assemble_folder(&root_path)?;
        // Load contract: derived absolute paths are recomputed exactly once
        // before the tree is handed out.
        root.rehydrate(&self.library_root);
        debug!(
            folders = root.folder_count(),
            files = root.file_count(),
            "Loaded persisted snapshot"
        );
        Ok(Some(root))
    }

    fn save(&self, root: &Folder) -> Result<(), StoreError> {
        let (folders, files) = flatten(root);
        let mut batch = sled::Batch::default();
        for record in &folders {
            batch.insert(folder_key(&record.path), bincode::serialize(record)?);
        }
        for record in &files {
            batch.insert(file_key(&record.path), bincode::serialize(record)?);
        }
        batch.insert(
            META_BUILT_AT,
            bincode::serialize(&chrono::Utc::now().to_rfc3339())?,
        );

        self.db.apply_batch(batch)?;
        self.db.flush()?;
        info!(
            folders = folders.len(),
            files = files.len(),
            "Snapshot persisted"
        );
        Ok(())
    }

    fn artists(&self) -> Result<Vec<Artist>, StoreError> {
        let mut artists = Vec::new();
        for item in self.db.scan_prefix(b"artist:") {
            let (_, value) = item?;
            artists.push(bincode::deserialize(&value)?);
        }
        Ok(artists)
    }

    fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>, StoreError> {
        match self.db.get(artist_name_key(name))? {
            Some(value) => {
                let id: u64 = bincode::deserialize(&value)?;
                match self.db.get(artist_key(id))? {
                    Some(record) => Ok(Some(bincode::deserialize(&record)?)),
                    None => Ok(None),
                }
            }
            None => Ok(None),
        }
    }

    fn save_artist(&self, artist: &Artist) -> Result<(), StoreError> {
        self.db
            .insert(artist_key(artist.id), bincode::serialize(artist)?)?;
        self.db
            .insert(artist_name_key(&artist.name), bincode::serialize(&artist.id)?)?;
        Ok(())
    }

    fn allocate_artist_id(&self) -> Result<u64, StoreError> {
        let next = match self.db.get(META_NEXT_ARTIST_ID)? {
            Some(value) => bincode::deserialize::<u64>(&value)?,
            None => 1,
        };
        self.db
            .insert(META_NEXT_ARTIST_ID, bincode::serialize(&(next + 1))?)?;
        Ok(next)
    }

    fn drop_all(&self) -> Result<(), StoreError> {
        self.db.clear()?;
        self.db.flush()?;
        info!("Dropped all persisted snapshot state");
        Ok(())
    }
}
