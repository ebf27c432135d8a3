//! Content fingerprinting using BLAKE3.
//!
//! Fingerprints are deliberately cheap: a folder is summarized by a digest
//! over its immediate child names, a file by its byte size. Neither reads
//! file contents, which trades fidelity (a same-size content edit goes
//! undetected) for scan speed over large trees.

use crate::error::SnapshotError;
use blake3::Hasher;
use std::ffi::OsString;
use std::path::Path;

/// A folder-contents digest.
pub type Fingerprint = [u8; 32];

/// Compute the fingerprint of a directory's immediate contents.
///
/// Fingerprint = hash(name_len || name, ...) over the entry names sorted
/// by name. Sorting makes the digest independent of filesystem listing
/// order; length prefixes keep the concatenation unambiguous.
///
/// Fails with a filesystem error if the directory is missing or unreadable;
/// callers scanning for drift treat that as "node missing", not as fatal.
pub fn folder_fingerprint(path: &Path) -> Result<Fingerprint, SnapshotError> {
    let entries = std::fs::read_dir(path).map_err(|e| SnapshotError::Filesystem {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut names: Vec<OsString> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SnapshotError::Filesystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        names.push(entry.file_name());
    }
    names.sort();

    let mut hasher = Hasher::new();
    for name in &names {
        let bytes = name.as_encoded_bytes();
        hasher.update(&(bytes.len() as u64).to_be_bytes());
        hasher.update(bytes);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// A file's identity signal: its byte size.
///
/// Fails with a filesystem error if the file is missing or unreadable.
pub fn file_size_signature(path: &Path) -> Result<u64, SnapshotError> {
    let metadata = std::fs::metadata(path).map_err(|e| SnapshotError::Filesystem {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_folder_fingerprint_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.mp3"), "x").unwrap();
        fs::write(temp_dir.path().join("b.mp3"), "y").unwrap();

        let fp1 = folder_fingerprint(temp_dir.path()).unwrap();
        let fp2 = folder_fingerprint(temp_dir.path()).unwrap();
        assert_eq!(fp1, fp2);
    }

    #[test]
    fn test_folder_fingerprint_changes_on_added_entry() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.mp3"), "x").unwrap();

        let before = folder_fingerprint(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("b.mp3"), "y").unwrap();
        let after = folder_fingerprint(temp_dir.path()).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn test_folder_fingerprint_changes_on_removed_entry() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.mp3"), "x").unwrap();
        fs::write(temp_dir.path().join("b.mp3"), "y").unwrap();

        let before = folder_fingerprint(temp_dir.path()).unwrap();
        fs::remove_file(temp_dir.path().join("b.mp3")).unwrap();
        let after = folder_fingerprint(temp_dir.path()).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn test_folder_fingerprint_ignores_file_contents() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.mp3"), "x").unwrap();

        let before = folder_fingerprint(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("a.mp3"), "completely different").unwrap();
        let after = folder_fingerprint(temp_dir.path()).unwrap();

        // Only names are fingerprinted, not contents.
        assert_eq!(before, after);
    }

    #[test]
    fn test_folder_fingerprint_missing_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");
        assert!(folder_fingerprint(&missing).is_err());
    }

    #[test]
    fn test_file_size_signature() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.mp3");
        fs::write(&file, vec![0u8; 100]).unwrap();

        assert_eq!(file_size_signature(&file).unwrap(), 100);
    }

    #[test]
    fn test_file_size_signature_missing_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(file_size_signature(&temp_dir.path().join("gone")).is_err());
    }
}
