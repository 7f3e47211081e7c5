//! File-backed store.
//!
//! Documents live as pretty-printed JSON files in a single data directory.
//! Saves go to a hidden sibling file first and are then renamed over the
//! target, so a crash mid-write leaves the previous snapshot intact.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DocumentName, Store};
use crate::error::StoreError;

/// Store that keeps each document in `<dir>/<file_name>`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`.
    ///
    /// The directory is created lazily on the first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the full path of a document.
    #[must_use]
    pub fn path_of(&self, name: DocumentName) -> PathBuf {
        self.dir.join(name.file_name())
    }

    fn temp_path_of(&self, name: DocumentName) -> PathBuf {
        self.dir.join(format!(".{}.tmp", name.file_name()))
    }
}

impl Store for JsonFileStore {
    fn load(&self, name: DocumentName) -> Result<Option<String>, StoreError> {
        let path = self.path_of(name);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(path = %path.display(), bytes = contents.len(), "document loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                document: name,
                source,
            }),
        }
    }

    fn save(&self, name: DocumentName, contents: &str) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            document: name,
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let tmp = self.temp_path_of(name);
        let mut file = fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(contents.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        fs::rename(&tmp, self.path_of(name)).map_err(io_err)?;
        debug!(document = %name, bytes = contents.len(), "document saved");
        Ok(())
    }
}
