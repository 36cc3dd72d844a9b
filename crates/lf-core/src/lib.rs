//! lost-found/crates/lf-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the lost & found portal.

pub mod error;
pub mod memory;
pub mod models;
pub mod portal;
pub mod query;
pub mod repository;
pub mod submission;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use memory::MemoryItemStore;
pub use models::*;
pub use portal::Portal;
pub use query::{view, ItemQuery, SortKey};
pub use repository::ItemRepository;
pub use submission::{NewItem, SubmissionHandler};
pub use traits::*;
