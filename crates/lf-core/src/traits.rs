//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ImageUpload, Item};

/// The single persisted slot holding the whole item collection.
///
/// `load` fails soft: a missing, unreadable or malformed slot yields an
/// empty collection. `save` always replaces the full snapshot.
pub trait ItemStore: Send + Sync {
    fn load(&self) -> Vec<Item>;
    fn save(&self, items: &[Item]) -> Result<()>;
}

/// Turns an uploaded image into the inline representation stored on the item.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    /// Returns a data URL (`data:<mime>;base64,...`) for the upload.
    async fn encode(&self, upload: &ImageUpload) -> anyhow::Result<String>;
}
