//! # lf-ui
//!
//! Askama templates for the list page and the lost/found forms.

use askama::Template;
use lf_core::models::{Item, ItemKind, RawSubmission};
use lf_core::query::{ItemQuery, SortKey};
use serde::Deserialize;

mod card;

pub use card::{format_date, placeholder_data_url, ItemCard};

/// Categories offered by the forms. The set is open: filters also list any
/// category found on stored items.
pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Books",
    "Clothing",
    "Accessories",
    "Bags",
    "Keys",
    "Documents",
    "Other",
];

/// Raw values of the four list controls, as sent by the filter form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListControls {
    pub q: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sort: String,
    /// Set by the redirect after a successful submit (`lost` or `found`).
    pub submitted: String,
}

impl ListControls {
    pub fn to_query(&self) -> ItemQuery {
        ItemQuery::from_raw(&self.q, &self.category, &self.kind, &self.sort)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: &str, label: &str, current: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: value == current,
        }
    }
}

fn category_options(all: &[Item], current: &str, any_label: Option<&str>) -> Vec<SelectOption> {
    let mut names: Vec<String> = CATEGORIES.iter().map(|c| c.to_string()).collect();
    for item in all {
        if !item.category.is_empty() && !names.contains(&item.category) {
            names.push(item.category.clone());
        }
    }

    let mut options = Vec::with_capacity(names.len() + 1);
    if let Some(label) = any_label {
        options.push(SelectOption::new("", label, current));
    }
    options.extend(names.iter().map(|n| SelectOption::new(n, n, current)));
    options
}

/// Which navbar link is highlighted.
pub const NAV_LIST: &str = "list";

fn submitted_notice(submitted: &str) -> Option<String> {
    match submitted.parse::<ItemKind>().ok()? {
        ItemKind::Lost => Some("Lost item submitted!".to_string()),
        ItemKind::Found => Some("Found item submitted!".to_string()),
    }
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub title: String,
    pub nav: &'static str,
    pub notice: Option<String>,
    pub search: String,
    pub categories: Vec<SelectOption>,
    pub types: Vec<SelectOption>,
    pub sorts: Vec<SelectOption>,
    pub cards: Vec<ItemCard>,
}

impl ListTemplate {
    /// `all` is the full collection (for the category list), `shown` the
    /// filtered and sorted view.
    pub fn new(controls: &ListControls, all: &[Item], shown: &[Item]) -> Self {
        let kind = controls.kind.as_str();
        let sort = controls.to_query().sort;
        Self {
            title: "Browse items".to_string(),
            nav: NAV_LIST,
            notice: submitted_notice(&controls.submitted),
            search: controls.q.clone(),
            categories: category_options(all, &controls.category, Some("All categories")),
            types: vec![
                SelectOption::new("", "Lost & found", kind),
                SelectOption::new("lost", "Lost", kind),
                SelectOption::new("found", "Found", kind),
            ],
            sorts: [
                (SortKey::Unspecified, "As submitted"),
                (SortKey::Newest, "Newest first"),
                (SortKey::Oldest, "Oldest first"),
                (SortKey::Az, "Name A–Z"),
                (SortKey::Za, "Name Z–A"),
            ]
            .into_iter()
            .map(|(key, label)| SelectOption::new(key.as_str(), label, sort.as_str()))
            .collect(),
            cards: shown.iter().map(ItemCard::from).collect(),
        }
    }
}

/// Values echoed back into the form after a failed submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub contact: String,
}

impl From<&RawSubmission> for FormValues {
    fn from(raw: &RawSubmission) -> Self {
        let v = |f: &Option<String>| f.clone().unwrap_or_default();
        Self {
            name: v(&raw.name),
            description: v(&raw.description),
            location: v(&raw.location),
            date: v(&raw.date),
            contact: v(&raw.contact),
        }
    }
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct ItemFormTemplate {
    pub title: String,
    pub nav: &'static str,
    pub heading: String,
    pub lost_checked: bool,
    pub categories: Vec<SelectOption>,
    pub values: FormValues,
    pub error: Option<String>,
}

impl ItemFormTemplate {
    pub fn new(kind: ItemKind) -> Self {
        let heading = match kind {
            ItemKind::Lost => "Report a lost item",
            ItemKind::Found => "Report a found item",
        };
        Self {
            title: heading.to_string(),
            nav: kind.as_str(),
            heading: heading.to_string(),
            lost_checked: kind == ItemKind::Lost,
            categories: category_options(&[], "", Some("Choose a category")),
            values: FormValues::default(),
            error: None,
        }
    }

    /// Re-renders a rejected submission with its values and the message.
    pub fn rejected(raw: &RawSubmission, message: String) -> Self {
        let kind = ItemKind::from_form(raw.kind.as_deref());
        let category = raw.category.clone().unwrap_or_default();
        Self {
            categories: category_options(&[], &category, Some("Choose a category")),
            values: FormValues::from(raw),
            error: Some(message),
            ..Self::new(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ItemKind, description: &str, image: Option<&str>) -> Item {
        Item {
            id: "id1".into(),
            kind,
            name: "Calculator".into(),
            category: "Stationery".into(),
            description: description.into(),
            location: "Lab 3".into(),
            date: "2024-03-09".into(),
            contact: "sam@example.com".into(),
            image: image.map(str::to_string),
            resolved: false,
            created_at: Some(1),
        }
    }

    #[test]
    fn card_uses_placeholder_and_dash() {
        let card = ItemCard::from(&item(ItemKind::Lost, "", None));
        assert_eq!(card.badge, "LOST");
        assert_eq!(card.description, "—");
        assert_eq!(card.thumb, placeholder_data_url());
        assert!(card.thumb.starts_with("data:image/svg+xml;base64,"));
        assert_eq!(card.date, "3/9/2024");
    }

    #[test]
    fn card_keeps_stored_image() {
        let card = ItemCard::from(&item(ItemKind::Found, "ti-84", Some("data:image/png;base64,AA")));
        assert_eq!(card.badge, "FOUND");
        assert_eq!(card.thumb, "data:image/png;base64,AA");
        assert_eq!(card.description, "ti-84");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date("last tuesday"), "last tuesday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn list_renders_cards_and_empty_state() {
        let controls = ListControls::default();
        let html = ListTemplate::new(&controls, &[], &[]).render().unwrap();
        assert!(html.contains("No items match"));

        let items = vec![item(ItemKind::Lost, "", None)];
        let html = ListTemplate::new(&controls, &items, &items).render().unwrap();
        assert!(html.contains("Calculator"));
        assert!(html.contains("/items/id1/resolve"));
        assert!(!html.contains("No items match"));
    }

    #[test]
    fn list_offers_stored_categories_and_keeps_selection() {
        let items = vec![item(ItemKind::Lost, "", None)];
        let controls = ListControls {
            category: "Stationery".into(),
            sort: "za".into(),
            ..Default::default()
        };
        let page = ListTemplate::new(&controls, &items, &items);
        let selected: Vec<_> = page.categories.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "Stationery");
        assert!(page.sorts.iter().any(|o| o.value == "za" && o.selected));
    }

    #[test]
    fn resolved_card_disables_button() {
        let mut resolved = item(ItemKind::Lost, "", None);
        resolved.resolved = true;
        let items = vec![resolved];
        let html = ListTemplate::new(&ListControls::default(), &items, &items)
            .render()
            .unwrap();
        assert!(html.contains("class=\"card is-resolved\""));
        assert!(html.contains("disabled>Resolved"));
    }

    #[test]
    fn navbar_highlights_current_page() {
        let html = ListTemplate::new(&ListControls::default(), &[], &[])
            .render()
            .unwrap();
        assert!(html.contains("<a href=\"/list\" class=\"active\">"));
        assert!(html.contains("<a href=\"/lost\">"));

        let html = ItemFormTemplate::new(ItemKind::Found).render().unwrap();
        assert!(html.contains("<a href=\"/found\" class=\"active\">"));
        assert!(html.contains("<a href=\"/list\">"));
    }

    #[test]
    fn submitted_notice_follows_redirect_kind() {
        let controls = ListControls {
            submitted: "found".into(),
            ..Default::default()
        };
        let html = ListTemplate::new(&controls, &[], &[]).render().unwrap();
        assert!(html.contains("Found item submitted!"));

        let controls = ListControls {
            submitted: "bogus".into(),
            ..Default::default()
        };
        let page = ListTemplate::new(&controls, &[], &[]);
        assert!(page.notice.is_none());
        assert!(!page.render().unwrap().contains("submitted!"));
    }

    #[test]
    fn rejected_form_shows_message_and_values() {
        let raw = RawSubmission {
            kind: Some("found".into()),
            name: Some("Mug".into()),
            ..Default::default()
        };
        let page = ItemFormTemplate::rejected(&raw, "Please provide category.".into());
        assert!(!page.lost_checked);
        let html = page.render().unwrap();
        assert!(html.contains("Please provide category."));
        assert!(html.contains("value=\"Mug\""));
    }
}
