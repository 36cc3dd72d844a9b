//! # Domain Models
//!
//! The single entity of the portal is the `Item`: one lost or found posting.
//! Field names on the wire follow the persisted layout of the store slot
//! (`type`, `createdAt`, ...), so records written by older builds load as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a posting reports something lost or something found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lost,
    Found,
}

impl ItemKind {
    /// Lenient coercion used for form input: anything that is not exactly
    /// `lost` or `found` (including a missing field) becomes `Lost`.
    pub fn from_form(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(ItemKind::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lost" => Ok(ItemKind::Lost),
            "found" => Ok(ItemKind::Found),
            other => Err(format!("unknown item type: {other}")),
        }
    }
}

/// A single lost/found posting as stored in the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque, generated at creation, never changed afterwards.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    /// Calendar date as entered (`YYYY-MM-DD` from a date input).
    pub date: String,
    pub contact: String,
    /// Inline data URL; `None` is written as `null` and rendered as a placeholder.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub resolved: bool,
    /// Milliseconds since the epoch. Legacy records may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Item {
    /// Timestamp used for ordering; a missing `createdAt` sorts as 0.
    pub fn sort_timestamp(&self) -> i64 {
        self.created_at.unwrap_or(0)
    }
}

/// Generates a fresh item id.
///
/// UUID v7 keeps ids time-ordered with a random tail; no uniqueness check is
/// made against the existing collection.
pub fn new_item_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// The fields of a submission exactly as they arrived from the form.
///
/// A missing field is treated like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub contact: Option<String>,
}

/// A file picked in the form's image input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    /// Declared media type, e.g. `image/png`.
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// True when the declared media type is `image/*`.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.parse::<mime::Mime>().ok())
            .is_some_and(|m| m.type_() == mime::IMAGE)
    }

    /// The declared media type without parameters, if it parses.
    pub fn essence(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.parse::<mime::Mime>().ok())
            .map(|m| m.essence_str().to_string())
    }
}

/// A field the submission form must carry, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Category,
    Location,
    Date,
    Contact,
}

impl RequiredField {
    pub const ORDER: [RequiredField; 5] = [
        RequiredField::Name,
        RequiredField::Category,
        RequiredField::Location,
        RequiredField::Date,
        RequiredField::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Category => "category",
            RequiredField::Location => "location",
            RequiredField::Date => "date",
            RequiredField::Contact => "contact",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
