//! Tree builder: materializes a snapshot from a live directory tree.

use crate::error::SnapshotError;
use crate::metadata::TagReader;
use crate::tree::fingerprint;
use crate::tree::node::{File, Folder};
use crate::tree::path;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument, trace};

/// Recursive snapshot builder.
///
/// Walks the library root depth-first and constructs an owned `Folder` tree,
/// fingerprinting each folder's contents and recording each file's size and
/// tags. The walk is synchronous and blocking; any filesystem error aborts
/// the whole build so a partial tree is never handed to the store.
pub struct TreeBuilder<'a> {
    root: PathBuf,
    reader: &'a dyn TagReader,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder for the given library root.
    pub fn new(root: PathBuf, reader: &'a dyn TagReader) -> Self {
        Self { root, reader }
    }

    /// Build the complete snapshot tree from the filesystem.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<Folder, SnapshotError> {
        let start = Instant::now();
        info!("Starting snapshot build");

        let root = self.build_folder(".", None)?;

        info!(
            folders = root.folder_count(),
            files = root.file_count(),
            duration_ms = start.elapsed().as_millis(),
            "Snapshot build completed"
        );
        Ok(root)
    }

    fn build_folder(&self, rel: &str, parent: Option<&str>) -> Result<Folder, SnapshotError> {
        let abs = path::resolve(&self.root, rel);
        trace!(path = %abs.display(), "Building folder");

        let mut folder = Folder {
            path: rel.to_string(),
            is_root: parent.is_none(),
            parent_path: parent.map(str::to_string),
            contents_fingerprint: [0u8; 32],
            children: Vec::new(),
            files: Vec::new(),
            resolved_path: abs.clone(),
        };

        let entries = std::fs::read_dir(&abs).map_err(|e| SnapshotError::Filesystem {
            path: abs.clone(),
            source: e,
        })?;

        let mut listed = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SnapshotError::Filesystem {
                path: abs.clone(),
                source: e,
            })?;
            listed.push(entry);
        }
        // Deterministic construction order regardless of listing order.
        listed.sort_by_key(|e| e.file_name());

        for entry in listed {
            let file_type = entry.file_type().map_err(|e| SnapshotError::Filesystem {
                path: entry.path(),
                source: e,
            })?;
            let name = entry.file_name().to_string_lossy().to_string();
            let child_rel = path::join_relative(rel, &name);

            if file_type.is_dir() {
                folder
                    .children
                    .push(self.build_folder(&child_rel, Some(rel))?);
            } else if file_type.is_file() {
                folder.files.push(self.build_file(child_rel, rel)?);
            }
            // Symlinks and special files are not part of the snapshot.
        }

        // Fingerprint reflects the child-name set at this moment.
        folder.contents_fingerprint = fingerprint::folder_fingerprint(&abs)?;

        Ok(folder)
    }

    fn build_file(&self, rel: String, parent: &str) -> Result<File, SnapshotError> {
        let abs = path::resolve(&self.root, &rel);
        let size_bytes = fingerprint::file_size_signature(&abs)?;

        let mut file = File {
            path: rel,
            parent_path: parent.to_string(),
            supported: false,
            size_bytes,
            artist: None,
            album_artist: None,
            album: None,
            track: None,
            artist_id: None,
            resolved_path: abs.clone(),
        };

        if self.reader.is_supported(&abs) {
            if let Some(tags) = self.reader.read_tags(&abs) {
                file.supported = true;
                file.artist = tags.artist;
                file.album_artist = tags.album_artist;
                file.album = tags.album;
                file.track = tags.track;
            } else {
                trace!(path = %abs.display(), "Tag extraction failed, recording as unsupported");
            }
        }

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Tags;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Treats .mp3 as supported and tags every track with a fixed artist.
    struct FixedTagReader;

    impl TagReader for FixedTagReader {
        fn is_supported(&self, path: &Path) -> bool {
            path.extension().map(|e| e == "mp3").unwrap_or(false)
        }

        fn read_tags(&self, path: &Path) -> Option<Tags> {
            Some(Tags {
                artist: Some("X".to_string()),
                album_artist: Some("X".to_string()),
                album: Some("Album".to_string()),
                track: path.file_stem().map(|s| s.to_string_lossy().to_string()),
            })
        }
    }

    /// Returns tags even though nothing is supported; the builder must
    /// ignore them.
    struct NothingSupportedReader;

    impl TagReader for NothingSupportedReader {
        fn is_supported(&self, _path: &Path) -> bool {
            false
        }

        fn read_tags(&self, _path: &Path) -> Option<Tags> {
            Some(Tags {
                artist: Some("should not appear".to_string()),
                ..Tags::default()
            })
        }
    }

    #[test]
    fn test_build_scenario_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.mp3"), vec![0u8; 100]).unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("b.mp3"), vec![0u8; 50]).unwrap();

        let reader = FixedTagReader;
        let tree = TreeBuilder::new(root.to_path_buf(), &reader)
            .build()
            .unwrap();

        assert!(tree.is_root);
        assert_eq!(tree.path, ".");
        assert!(tree.parent_path.is_none());
        assert_eq!(tree.folder_count(), 2);
        assert_eq!(tree.file_count(), 2);

        let a = tree.find_file("a.mp3").unwrap();
        assert!(a.supported);
        assert_eq!(a.size_bytes, 100);
        assert_eq!(a.album_artist.as_deref(), Some("X"));
        assert_eq!(a.parent_path, ".");

        let sub = tree.find_folder("sub").unwrap();
        assert!(!sub.is_root);
        assert_eq!(sub.parent_path.as_deref(), Some("."));

        let b = tree.find_file("sub/b.mp3").unwrap();
        assert_eq!(b.size_bytes, 50);
        assert_eq!(b.parent_path, "sub");
    }

    #[test]
    fn test_exactly_one_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("one")).unwrap();
        fs::create_dir(temp_dir.path().join("one/two")).unwrap();

        let reader = FixedTagReader;
        let tree = TreeBuilder::new(temp_dir.path().to_path_buf(), &reader)
            .build()
            .unwrap();

        fn count_roots(folder: &Folder) -> usize {
            usize::from(folder.is_root)
                + folder.children.iter().map(count_roots).sum::<usize>()
        }
        assert_eq!(count_roots(&tree), 1);
    }

    #[test]
    fn test_unsupported_file_has_no_tags() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "hello").unwrap();

        let reader = NothingSupportedReader;
        let tree = TreeBuilder::new(temp_dir.path().to_path_buf(), &reader)
            .build()
            .unwrap();

        let file = tree.find_file("notes.txt").unwrap();
        assert!(!file.supported);
        assert!(file.artist.is_none());
        assert!(file.album_artist.is_none());
        assert!(file.album.is_none());
        assert!(file.track.is_none());
    }

    #[test]
    fn test_build_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let gone = temp_dir.path().join("gone");

        let reader = FixedTagReader;
        let result = TreeBuilder::new(gone, &reader).build();
        assert!(matches!(result, Err(SnapshotError::Filesystem { .. })));
    }
}
