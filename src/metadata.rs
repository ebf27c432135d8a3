//! Metadata extraction collaborator.
//!
//! Tag and codec parsing is outside this crate: the snapshot only needs to
//! know whether a file's format is supported and, if so, which tags it
//! carries. Implementations plug in behind the `TagReader` trait.

use std::path::Path;

/// Tags pulled from a supported audio file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<String>,
}

/// Collaborator contract for tag extraction.
pub trait TagReader {
    /// Whether this file's format can be read at all.
    fn is_supported(&self, path: &Path) -> bool;

    /// Extract tags from a file. Only called when `is_supported` returned
    /// true; `None` means extraction failed and the file is recorded as
    /// unsupported.
    fn read_tags(&self, path: &Path) -> Option<Tags>;
}

/// Extension-based reader used as the binary's default.
///
/// Recognizes common audio formats by file extension and yields empty tags;
/// real tag parsing is supplied by an external collaborator.
#[derive(Debug, Clone)]
pub struct ExtensionTagReader {
    extensions: Vec<String>,
}

impl Default for ExtensionTagReader {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "flac", "ogg", "m4a", "wav"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl TagReader for ExtensionTagReader {
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }

    fn read_tags(&self, _path: &Path) -> Option<Tags> {
        Some(Tags::default())
    }
}
