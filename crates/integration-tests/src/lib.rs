//! Shared fixtures for the integration tests.

use std::sync::Arc;

use lf_core::models::{ImageUpload, RawSubmission};
use lf_core::{MemoryItemStore, Portal};
use lf_storage_local::DataUrlEncoder;

/// A portal over a fresh in-memory slot, plus a handle on that slot.
pub fn memory_portal() -> (Arc<MemoryItemStore>, Portal) {
    let store = Arc::new(MemoryItemStore::new());
    let portal = Portal::new(store.clone(), Arc::new(DataUrlEncoder::new()));
    (store, portal)
}

/// A complete submission; tweak fields with struct update syntax.
pub fn submission(kind: &str, name: &str, category: &str) -> RawSubmission {
    RawSubmission {
        kind: Some(kind.to_string()),
        name: Some(name.to_string()),
        category: Some(category.to_string()),
        description: Some(format!("{name} with a sticker")),
        location: Some("North building".to_string()),
        date: Some("2024-05-20".to_string()),
        contact: Some("desk@example.com".to_string()),
    }
}

pub fn png_upload() -> ImageUpload {
    ImageUpload {
        file_name: Some("photo.png".to_string()),
        content_type: Some("image/png".to_string()),
        data: vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a],
    }
}
