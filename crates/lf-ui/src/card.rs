//! Card view model: what one item looks like in the grid.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use lf_core::models::{Item, ItemKind};
use once_cell::sync::Lazy;

const PLACEHOLDER_SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 400 300'>\
<defs><linearGradient id='g' x1='0' x2='1'>\
<stop offset='0' stop-color='#0a101d'/><stop offset='1' stop-color='#111827'/>\
</linearGradient></defs>\
<rect fill='url(#g)' width='400' height='300'/>\
<g fill='#94a3b8' font-family='sans-serif'>\
<text x='200' y='150' font-size='22' text-anchor='middle' dominant-baseline='middle'>No Image</text>\
</g></svg>";

static PLACEHOLDER: Lazy<String> =
    Lazy::new(|| format!("data:image/svg+xml;base64,{}", STANDARD.encode(PLACEHOLDER_SVG)));

/// Dark 4:3 "No Image" tile used for items without a picture.
pub fn placeholder_data_url() -> &'static str {
    PLACEHOLDER.as_str()
}

/// `2024-03-09` becomes `3/9/2024`; anything unparseable is shown as entered.
pub fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%-m/%-d/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    pub id: String,
    pub badge: &'static str,
    /// CSS modifier for the badge colour.
    pub badge_class: &'static str,
    pub thumb: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub date: String,
    pub contact: String,
    pub resolved: bool,
}

impl From<&Item> for ItemCard {
    fn from(item: &Item) -> Self {
        let (badge, badge_class) = match item.kind {
            ItemKind::Lost => ("LOST", "badge--lost"),
            ItemKind::Found => ("FOUND", "badge--found"),
        };
        let description = if item.description.is_empty() {
            "—".to_string()
        } else {
            item.description.clone()
        };
        Self {
            id: item.id.clone(),
            badge,
            badge_class,
            thumb: item
                .image
                .clone()
                .unwrap_or_else(|| placeholder_data_url().to_string()),
            name: item.name.clone(),
            description,
            category: item.category.clone(),
            location: item.location.clone(),
            date: format_date(&item.date),
            contact: item.contact.clone(),
            resolved: item.resolved,
        }
    }
}
