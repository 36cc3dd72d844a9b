//! # lf-storage-local
//! lost-found/crates/lf-plugins/lf-storage-local/src/lib.rs
//! Local filesystem implementation of `ItemStore`, plus the data-URL `ImageEncoder`.
//! The whole collection lives in one JSON file, the "store slot".

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use lf_core::memory::{decode_items, encode_items};
use lf_core::models::Item;
use lf_core::traits::ItemStore;
use tempfile::NamedTempFile;

mod encoder;

pub use encoder::DataUrlEncoder;

/// Default slot name; the file on disk is `<slot>.json`.
pub const DEFAULT_SLOT: &str = "lf_items_v1";

pub struct LocalItemStore {
    /// Slot file (e.g., "./data/lf_items_v1.json")
    path: PathBuf,
}

impl LocalItemStore {
    pub fn new(data_dir: impl Into<PathBuf>, slot: &str) -> Self {
        let mut path = data_dir.into();
        path.push(format!("{slot}.json"));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ItemStore for LocalItemStore {
    fn load(&self) -> Vec<Item> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode_items(&raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                log::warn!("could not read {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Writes the full snapshot through a temp file so readers never see a
    /// half-written slot.
    fn save(&self, items: &[Item]) -> lf_core::Result<()> {
        let encoded = encode_items(items)?;
        let dir = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(encoded.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        log::debug!("saved {} items to {}", items.len(), self.path.display());
        Ok(())
    }
}
