//! Shared helpers for integration tests.

use std::collections::HashMap;
use std::path::Path;
use stylus::metadata::{TagReader, Tags};

/// Tag reader backed by a fixed file-name → tags map. Files with an `.mp3`
/// extension are supported; anything else is not.
pub struct StubTagReader {
    tags: HashMap<String, Tags>,
}

impl StubTagReader {
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    pub fn with_tags(mut self, file_name: &str, artist: &str, album_artist: &str) -> Self {
        self.tags.insert(
            file_name.to_string(),
            Tags {
                artist: Some(artist.to_string()),
                album_artist: Some(album_artist.to_string()),
                album: None,
                track: None,
            },
        );
        self
    }
}

impl TagReader for StubTagReader {
    fn is_supported(&self, path: &Path) -> bool {
        path.extension().map(|e| e == "mp3").unwrap_or(false)
    }

    fn read_tags(&self, path: &Path) -> Option<Tags> {
        let name = path.file_name()?.to_string_lossy().to_string();
        Some(self.tags.get(&name).cloned().unwrap_or_default())
    }
}
