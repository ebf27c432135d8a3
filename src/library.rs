//! Library façade: ties the builder, indexer, scanner, and store together.

use crate::config::LibraryConfig;
use crate::error::SnapshotError;
use crate::index::ArtistIndexer;
use crate::metadata::TagReader;
use crate::store::SnapshotStore;
use crate::tree::builder::TreeBuilder;
use crate::tree::node::{Artist, Folder};
use crate::tree::scanner::{DirtyNode, DriftScanner};
use tracing::{info, warn};

/// A music library with a persisted snapshot.
///
/// The snapshot core performs no retries: build failures and snapshot
/// corruption surface to the caller, who decides whether to rebuild.
pub struct Library<S: SnapshotStore> {
    config: LibraryConfig,
    store: S,
    reader: Box<dyn TagReader>,
}

impl<S: SnapshotStore> Library<S> {
    pub fn new(config: LibraryConfig, store: S, reader: Box<dyn TagReader>) -> Self {
        Self {
            config,
            store,
            reader,
        }
    }

    /// Load the persisted snapshot, building one first if none exists.
    pub fn open(&self) -> Result<Folder, SnapshotError> {
        match self.store.load_root()? {
            Some(root) => {
                info!("Loaded persisted snapshot");
                Ok(root)
            }
            None => {
                info!("No persisted snapshot found, building one. This may take a while");
                self.build_and_save()
            }
        }
    }

    /// Destroy all persisted state and rebuild the snapshot from scratch.
    pub fn rebuild(&self) -> Result<Folder, SnapshotError> {
        warn!("Rebuilding snapshot from scratch");
        self.store.drop_all()?;
        self.build_and_save()
    }

    /// Destroy all persisted state without rebuilding.
    pub fn reset(&self) -> Result<(), SnapshotError> {
        self.store.drop_all()?;
        Ok(())
    }

    /// Walk the persisted snapshot and report every node that has drifted
    /// from the live filesystem, using the configured pacing.
    ///
    /// Fails with `NoRoot` when no snapshot has been built yet.
    pub fn scan(&self) -> Result<Vec<DirtyNode>, SnapshotError> {
        let root = self.store.load_root()?.ok_or(SnapshotError::NoRoot)?;
        let scanner = DriftScanner::new(self.config.scan.pace_duration());
        Ok(scanner.scan(&root))
    }

    /// All persisted artist groupings.
    pub fn artists(&self) -> Result<Vec<Artist>, SnapshotError> {
        Ok(self.store.artists()?)
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn build_and_save(&self) -> Result<Folder, SnapshotError> {
        let builder = TreeBuilder::new(self.config.root.clone(), self.reader.as_ref());
        let mut root = builder.build()?;
        ArtistIndexer::new(&self.store).index(&mut root)?;
        self.store.save(&root)?;
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LibraryConfig;
    use crate::metadata::Tags;
    use crate::store::SledSnapshotStore;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct Mp3Reader;

    impl TagReader for Mp3Reader {
        fn is_supported(&self, path: &Path) -> bool {
            path.extension().map(|e| e == "mp3").unwrap_or(false)
        }

        fn read_tags(&self, _path: &Path) -> Option<Tags> {
            Some(Tags {
                album_artist: Some("X".to_string()),
                ..Tags::default()
            })
        }
    }

    fn library(temp_dir: &TempDir) -> Library<SledSnapshotStore> {
        let root = temp_dir.path().join("music");
        fs::create_dir_all(&root).unwrap();
        let mut config = LibraryConfig::with_root(root.clone());
        config.store_path = Some(temp_dir.path().join("db"));
        config.scan.pace = 0.0;
        let store = SledSnapshotStore::open(config.resolved_store_path(), root).unwrap();
        Library::new(config, store, Box::new(Mp3Reader))
    }

    #[test]
    fn test_open_builds_then_loads() {
        let temp_dir = TempDir::new().unwrap();
        let library = library(&temp_dir);
        fs::write(library.config().root.join("a.mp3"), vec![0u8; 100]).unwrap();

        let built = library.open().unwrap();
        assert_eq!(built.file_count(), 1);

        // Second open loads the persisted tree.
        let loaded = library.open().unwrap();
        assert_eq!(loaded.file_count(), 1);
        assert_eq!(
            loaded.contents_fingerprint,
            built.contents_fingerprint
        );
    }

    #[test]
    fn test_scan_without_snapshot_is_no_root() {
        let temp_dir = TempDir::new().unwrap();
        let library = library(&temp_dir);
        assert!(matches!(library.scan(), Err(SnapshotError::NoRoot)));
    }

    #[test]
    fn test_rebuild_after_drift_scans_clean() {
        let temp_dir = TempDir::new().unwrap();
        let library = library(&temp_dir);
        fs::write(library.config().root.join("a.mp3"), vec![0u8; 100]).unwrap();
        library.open().unwrap();

        fs::write(library.config().root.join("b.mp3"), vec![0u8; 50]).unwrap();
        assert!(!library.scan().unwrap().is_empty());

        library.rebuild().unwrap();
        assert!(library.scan().unwrap().is_empty());
        assert_eq!(library.artists().unwrap().len(), 1);
    }
}
