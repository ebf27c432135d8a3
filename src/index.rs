//! Artist indexer: groups supported files by album-artist tag.

use crate::error::SnapshotError;
use crate::store::SnapshotStore;
use crate::tree::node::{Artist, File, Folder};
use tracing::{debug, info, instrument};

/// Post-build pass that assigns every supported file to an `Artist` by its
/// `album_artist` tag.
///
/// Lookup is exact string equality; no case, whitespace, or unicode
/// normalization. New artists are persisted immediately so later files in
/// the same pass find them. Supported files without an album-artist tag are
/// left ungrouped.
pub struct ArtistIndexer<'a, S: SnapshotStore> {
    store: &'a S,
}

impl<'a, S: SnapshotStore> ArtistIndexer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Group all supported files under `root`, setting each file's
    /// `artist_id` back-reference. Returns the number of files grouped.
    #[instrument(skip_all)]
    pub fn index(&self, root: &mut Folder) -> Result<usize, SnapshotError> {
        let mut grouped = 0;
        self.index_folder(root, &mut grouped)?;
        info!(grouped, "Artist grouping completed");
        Ok(grouped)
    }

    fn index_folder(&self, folder: &mut Folder, grouped: &mut usize) -> Result<(), SnapshotError> {
        for file in &mut folder.files {
            if !file.supported {
                continue;
            }
            let Some(name) = file.album_artist.clone() else {
                continue;
            };
            self.assign(file, name)?;
            *grouped += 1;
        }
        for child in &mut folder.children {
            self.index_folder(child, grouped)?;
        }
        Ok(())
    }

    fn assign(&self, file: &mut File, name: String) -> Result<(), SnapshotError> {
        let mut artist = match self.store.find_artist_by_name(&name)? {
            Some(artist) => artist,
            None => {
                let artist = Artist {
                    id: self.store.allocate_artist_id()?,
                    name,
                    songs: Vec::new(),
                };
                debug!(id = artist.id, name = %artist.name, "Created artist");
                self.store.save_artist(&artist)?;
                artist
            }
        };

        artist.songs.push(file.path.clone());
        self.store.save_artist(&artist)?;
        file.artist_id = Some(artist.id);
        Ok(())
    }
}
