// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility functions for string processing.

use std::fmt::Write;
use std::ops::Range;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize a string for matching: lowercase, strip diacritics, and collapse whitespace.
///
/// - "Café" → "cafe"
/// - "The  Raven" → "the raven"
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks
/// 3. Lowercase
/// 4. Collapse whitespace
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lightweight normalization without the unicode-normalization dependency.
/// Just lowercases and collapses whitespace.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Push the normalized form of a single character: what [`normalize`]
/// turns `c` into, before whitespace is collapsed.
#[cfg(feature = "unicode-normalization")]
fn fold_char(c: char, out: &mut String) {
    for d in std::iter::once(c).nfd().filter(|d| !is_combining_mark(*d)) {
        out.extend(d.to_lowercase());
    }
}

#[cfg(not(feature = "unicode-normalization"))]
fn fold_char(c: char, out: &mut String) {
    out.extend(c.to_lowercase());
}

#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Word characters are what survive tokenization. Everything else separates.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Split text into the normalized word tokens a full-text index stores.
///
/// "The Raven, sat." → `["the", "raven", "sat"]`
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !is_word_char(c))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Text folded the way tokens are, with a map back to the original offsets.
///
/// Tokens lose case and diacritics, so "Café" in a document is "cafe" in the
/// index. Searching the folded text for tokens and mapping the hit back gives
/// the original span. Combining marks that fold to nothing belong to the
/// character before them.
#[derive(Debug, Clone)]
pub struct Folded {
    text: String,
    /// (folded start, original range) per original character that folds to something.
    spans: Vec<(usize, Range<usize>)>,
}

impl Folded {
    pub fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut spans: Vec<(usize, Range<usize>)> = Vec::with_capacity(original.len());
        for (offset, c) in original.char_indices() {
            let folded_start = text.len();
            fold_char(c, &mut text);
            let end = offset + c.len_utf8();
            if text.len() > folded_start {
                spans.push((folded_start, offset..end));
            } else if let Some((_, last)) = spans.last_mut() {
                last.end = end;
            }
        }
        Folded { text, spans }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Original byte range covering the folded range `start..end`.
    pub fn original_range(&self, start: usize, end: usize) -> Range<usize> {
        let first = self.spans.partition_point(|(s, _)| *s <= start).saturating_sub(1);
        let last = self
            .spans
            .partition_point(|(s, _)| *s < end.max(start + 1))
            .saturating_sub(1);
        match (self.spans.get(first), self.spans.get(last)) {
            (Some((_, a)), Some((_, b))) => a.start..b.end.max(a.start),
            _ => 0..0,
        }
    }
}

/// Format `date` with a chrono format string. `None` when chrono rejects the format.
pub fn format_datetime(date: &NaiveDateTime, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

/// Whether every specifier in a chrono format string is recognized.
pub fn is_valid_date_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Replace every run of whitespace (including non-breaking spaces) with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Truncate to at most `max_chars` characters, appending `marker` when anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize, marker: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], marker),
        None => text.to_string(),
    }
}
