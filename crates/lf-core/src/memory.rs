//! In-memory `ItemStore`.
//!
//! Keeps the serialized slot text rather than the items themselves, so it
//! decodes exactly like the file store does (and can hold garbage on purpose).

use std::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::Item;
use crate::traits::ItemStore;

#[derive(Debug, Default)]
pub struct MemoryItemStore {
    slot: Mutex<Option<String>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose slot already holds `raw`, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// The slot text as last written, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

/// Decodes slot text, falling back to an empty collection.
pub fn decode_items(raw: &str) -> Vec<Item> {
    match serde_json::from_str::<Option<Vec<Item>>>(raw) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            log::warn!("discarding unreadable item slot: {}", e);
            Vec::new()
        }
    }
}

/// Encodes a snapshot in the persisted layout.
pub fn encode_items(items: &[Item]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

impl ItemStore for MemoryItemStore {
    fn load(&self) -> Vec<Item> {
        self.raw().map(|raw| decode_items(&raw)).unwrap_or_default()
    }

    fn save(&self, items: &[Item]) -> Result<()> {
        let encoded = encode_items(items)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AppError::Internal("item slot lock poisoned".into()))?;
        *slot = Some(encoded);
        Ok(())
    }
}
