//! # Portal
//!
//! Command handlers the presentation layer calls into. Plain data in, plain
//! data out; no knowledge of how anything is rendered.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{ImageUpload, Item, RawSubmission};
use crate::query::{view, ItemQuery};
use crate::repository::ItemRepository;
use crate::submission::SubmissionHandler;
use crate::traits::{ImageEncoder, ItemStore};

#[derive(Clone)]
pub struct Portal {
    repo: ItemRepository,
    submissions: SubmissionHandler,
}

impl Portal {
    pub fn new(store: Arc<dyn ItemStore>, encoder: Arc<dyn ImageEncoder>) -> Self {
        let repo = ItemRepository::new(store);
        let submissions = SubmissionHandler::new(repo.clone(), encoder);
        Self { repo, submissions }
    }

    pub fn with_max_image_bytes(mut self, max: usize) -> Self {
        self.submissions = self.submissions.with_max_image_bytes(max);
        self
    }

    /// Largest image, in bytes, that will be inlined.
    pub fn max_image_bytes(&self) -> usize {
        self.submissions.max_image_bytes()
    }

    pub fn repository(&self) -> &ItemRepository {
        &self.repo
    }

    pub async fn on_submit(&self, raw: RawSubmission, image: Option<ImageUpload>) -> Result<Item> {
        self.submissions.submit(raw, image).await
    }

    /// Recomputes the list view from a fresh load.
    pub fn on_filter_change(&self, query: &ItemQuery) -> Vec<Item> {
        view(&self.repo.list(), query)
    }

    pub fn on_resolve(&self, id: &str) -> Result<bool> {
        let found = self.repo.mark_resolved(id)?;
        if found {
            log::info!("item {} marked resolved", id);
        }
        Ok(found)
    }

    /// Confirmation is the caller's job; this deletes unconditionally.
    pub fn on_delete(&self, id: &str) -> Result<bool> {
        let found = self.repo.delete_by_id(id)?;
        if found {
            log::info!("item {} deleted", id);
        }
        Ok(found)
    }
}
