//! # Submission Handler
//!
//! Normalizes and validates form input, optionally inlines an image, and
//! appends the resulting `Item` to the repository.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{new_item_id, ImageUpload, Item, ItemKind, RawSubmission, RequiredField};
use crate::repository::ItemRepository;
use crate::traits::ImageEncoder;

/// Default cap on the size of an inlined image.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Submission fields after trimming and type coercion, known to be complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub kind: ItemKind,
    pub name: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub contact: String,
}

impl NewItem {
    /// Trims free-text fields, coerces `type`, and checks required fields
    /// in form order, reporting the first blank one.
    pub fn from_raw(raw: RawSubmission) -> Result<Self> {
        let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string()).unwrap_or_default();

        let draft = NewItem {
            kind: ItemKind::from_form(raw.kind.as_deref()),
            name: trimmed(raw.name),
            category: raw.category.unwrap_or_default(),
            description: trimmed(raw.description),
            location: trimmed(raw.location),
            date: raw.date.unwrap_or_default(),
            contact: trimmed(raw.contact),
        };

        for field in RequiredField::ORDER {
            if draft.value(field).is_empty() {
                return Err(AppError::ValidationError(field));
            }
        }
        Ok(draft)
    }

    fn value(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::Name => &self.name,
            RequiredField::Category => &self.category,
            RequiredField::Location => &self.location,
            RequiredField::Date => &self.date,
            RequiredField::Contact => &self.contact,
        }
    }

    /// Stamps a fresh id and creation time.
    pub fn into_item(self, image: Option<String>) -> Item {
        Item {
            id: new_item_id(),
            kind: self.kind,
            name: self.name,
            category: self.category,
            description: self.description,
            location: self.location,
            date: self.date,
            contact: self.contact,
            image,
            resolved: false,
            created_at: Some(Utc::now().timestamp_millis()),
        }
    }
}

#[derive(Clone)]
pub struct SubmissionHandler {
    repo: ItemRepository,
    encoder: Arc<dyn ImageEncoder>,
    max_image_bytes: usize,
}

impl SubmissionHandler {
    pub fn new(repo: ItemRepository, encoder: Arc<dyn ImageEncoder>) -> Self {
        Self {
            repo,
            encoder,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_image_bytes(mut self, max: usize) -> Self {
        self.max_image_bytes = max;
        self
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    /// Validates, encodes the image if any, and persists the new item.
    ///
    /// Validation runs before the image is read, so a rejected form leaves
    /// the collection untouched and never pays for encoding.
    pub async fn submit(&self, raw: RawSubmission, image: Option<ImageUpload>) -> Result<Item> {
        let draft = NewItem::from_raw(raw)?;

        let inline = match image {
            Some(upload) => self.inline_image(&upload).await,
            None => None,
        };

        let item = draft.into_item(inline);
        self.repo.add(item.clone())?;
        log::info!("{} item {} submitted: {}", item.kind, item.id, item.name);
        Ok(item)
    }

    /// Non-image and empty uploads are ignored; encoder failures are
    /// swallowed so the item is still created.
    async fn inline_image(&self, upload: &ImageUpload) -> Option<String> {
        if upload.data.is_empty() || !upload.is_image() {
            log::debug!(
                "ignoring non-image upload {:?} ({:?})",
                upload.file_name,
                upload.content_type
            );
            return None;
        }
        if upload.data.len() > self.max_image_bytes {
            log::warn!(
                "image {:?} is {} bytes, over the {} byte limit; submitting without it",
                upload.file_name,
                upload.data.len(),
                self.max_image_bytes
            );
            return None;
        }
        match self.encoder.encode(upload).await {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("could not encode image {:?}: {:#}", upload.file_name, e);
                None
            }
        }
    }
}
