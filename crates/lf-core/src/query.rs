//! # Query Pipeline
//!
//! Pure filter + sort over a slice of items. The input is never mutated and
//! every call returns a fresh vector. All sorts are stable, so items with
//! equal keys keep their stored relative order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Item;

/// Presentation order of the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Stored order.
    #[default]
    Unspecified,
    Newest,
    Oldest,
    Az,
    Za,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Unspecified => "",
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Az => "az",
            SortKey::Za => "za",
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unknown keys fall back to `Unspecified`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "newest" => SortKey::Newest,
            "oldest" => SortKey::Oldest,
            "az" => SortKey::Az,
            "za" => SortKey::Za,
            _ => SortKey::Unspecified,
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four list controls. `None`/empty means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Lowercased, trimmed search text.
    pub search: String,
    pub category: Option<String>,
    /// Matched exactly against the stored `type`; an unknown value matches
    /// nothing.
    pub kind: Option<String>,
    pub sort: SortKey,
}

impl ItemQuery {
    /// Builds a query from raw control values as a page would send them.
    pub fn from_raw(search: &str, category: &str, kind: &str, sort: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            search: search.trim().to_lowercase(),
            category: non_empty(category),
            kind: non_empty(kind),
            sort: sort.parse().unwrap_or_default(),
        }
    }

    /// Whether `item` passes every active filter.
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(category) = &self.category {
            if &item.category != category {
                return false;
            }
        }
        if let Some(kind) = &self.kind {
            if item.kind.as_str() != kind {
                return false;
            }
        }
        if !self.search.is_empty() {
            let haystack = format!(
                "{} {} {} {} {}",
                item.name, item.description, item.location, item.category, item.contact
            )
            .to_lowercase();
            if !haystack.contains(&self.search) {
                return false;
            }
        }
        true
    }
}

/// Filters then sorts `items` according to `query`.
pub fn view(items: &[Item], query: &ItemQuery) -> Vec<Item> {
    let mut out: Vec<Item> = items.iter().filter(|it| query.matches(it)).cloned().collect();

    match query.sort {
        SortKey::Unspecified => {}
        SortKey::Newest => out.sort_by(|a, b| b.sort_timestamp().cmp(&a.sort_timestamp())),
        SortKey::Oldest => out.sort_by_key(Item::sort_timestamp),
        SortKey::Az => out.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortKey::Za => out.sort_by(|a, b| locale_cmp(&b.name, &a.name)),
    }
    out
}

/// Human ordering of names, close to a browser's `localeCompare`:
/// accents and case are ignored first, then unaccented sorts before
/// accented, then lower case before upper case, then code points.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowered(a).cmp(lowered(b)))
        .then_with(|| {
            let case_rank = |c: char| if c.is_uppercase() { 1u8 } else { 0 };
            a.chars().map(case_rank).cmp(b.chars().map(case_rank))
        })
        .then_with(|| a.cmp(b))
}

fn lowered(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase)
}
