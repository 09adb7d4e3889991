// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data a result page is made of.
//!
//! A search runs against an external full-text index and yields a page of
//! [`ResultItem`]s. Each item carries the row identifier the index knows it by
//! ([`Rid`]), the URL it is reachable at, and a read-only snapshot of the
//! content object ([`Content`]) that renderers draw titles, dates, icons and
//! original text from.
//!
//! # Invariants
//!
//! - Every `rid` on a rendered page is a valid key into the index's per-row
//!   data. It may be absent from the ranking table; that means "no ranking",
//!   not an error.
//! - Items are immutable while a page renders.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::{escape_html, format_datetime};

/// Rendered HTML-like fragment.
pub type Markup = String;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Row identifier used to look up per-item data in the full-text index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Rid(pub u64);

impl Rid {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Rid {
    fn from(rid: u64) -> Self {
        Rid(rid)
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// FIELD VALUES
// =============================================================================

/// A value shown in a result field or stored as a search criterion.
///
/// Dispatch is structural: dates are dates because they are `Date`, not
/// because something happens to format like one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Date(NaiveDateTime),
    Reference { title: String, url: String },
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Empty text, an empty list, or a list of empty values. Renderers suppress these.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Date(_) => false,
            FieldValue::Reference { title, url } => title.is_empty() && url.is_empty(),
            FieldValue::List(values) => values.iter().all(FieldValue::is_empty),
        }
    }

    /// Plain string form, as used for criteria such as the fulltext query.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Escaped markup for this value. Dates use `date_format` (chrono syntax)
    /// and come out empty when chrono rejects it.
    pub fn to_markup(&self, date_format: &str) -> Markup {
        match self {
            FieldValue::Text(text) => escape_html(text),
            FieldValue::Date(date) => format_datetime(date, date_format)
                .map(|text| escape_html(&text))
                .unwrap_or_default(),
            FieldValue::Reference { title, url } => format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(url),
                escape_html(if title.is_empty() { url } else { title })
            ),
            FieldValue::List(values) => values
                .iter()
                .filter(|value| !value.is_empty())
                .map(|value| value.to_markup(date_format))
                .filter(|markup| !markup.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(date: NaiveDateTime) -> Self {
        FieldValue::Date(date)
    }
}

// =============================================================================
// CONTENT
// =============================================================================

/// Thumbnail image attached to image content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub name: String,
    pub url: String,
}

/// Read-only snapshot of the content object behind a hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub meta_type: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub publication_datetime: Option<NaiveDateTime>,
    #[serde(default)]
    pub modification_datetime: Option<NaiveDateTime>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    /// Trail from the site root down to (and including) this content.
    #[serde(default)]
    pub breadcrumbs: Vec<Crumb>,
    /// Plain attributes, looked up by result field name.
    #[serde(default)]
    pub attributes: BTreeMap<String, FieldValue>,
    /// Metadata values keyed `set:element`.
    #[serde(default)]
    pub metadata: BTreeMap<String, FieldValue>,
    /// Untokenized body text with punctuation and case intact. Only documents
    /// have one; files and images leave it empty.
    #[serde(default)]
    pub original_text: Option<String>,
}

impl Content {
    pub fn new(id: &str, title: &str) -> Self {
        Content {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn title_or_id(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Publication date when published, else last modification.
    pub fn display_datetime(&self) -> Option<NaiveDateTime> {
        self.publication_datetime.or(self.modification_datetime)
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// One hit on a result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub rid: Rid,
    pub url: String,
    pub content: Content,
}

impl ResultItem {
    pub fn new(rid: impl Into<Rid>, url: &str, content: Content) -> Self {
        ResultItem {
            rid: rid.into(),
            url: url.to_string(),
            content,
        }
    }
}

/// The slice of a result set shown on the current page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Offset of the first item within the whole result set.
    #[serde(default)]
    pub start: usize,
    pub items: Vec<ResultItem>,
}

impl ResultPage {
    pub fn new(start: usize, items: Vec<ResultItem>) -> Self {
        ResultPage { start, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultItem> {
        self.items.iter()
    }

    /// Ranked rows to ask the index for so the whole page is covered.
    pub fn max_rows(&self) -> usize {
        self.start + self.items.len() + 1
    }
}
