// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Putting punctuation back and marking matched terms.
//!
//! Windows are chosen over tokens, which have lost case, diacritics and
//! punctuation. When the original text is around, each window is looked up
//! in its folded form with a regex that accepts any run of non-word
//! characters between tokens, and the matching original span replaces the
//! tokens. If the lookup fails the tokens stay.
//!
//! Highlighting runs one combined regex over the folded form of each
//! reconciled segment and wraps hits that sit on word boundaries. Output is
//! built in a single pass, so inserted markup is never scanned again.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::utils::{escape_html, is_word_char, Folded};

const NON_WORD: &str = r"[^\p{L}\p{N}]+";

/// Find the span of `original` that the token segment came from.
///
/// Falls back to the space-joined tokens when nothing matches.
pub fn reconcile(segment: &[String], original: &str) -> String {
    let fallback = || segment.join(" ");
    if segment.is_empty() {
        return String::new();
    }

    let body = segment
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join(NON_WORD);
    let pattern = format!(r"(?:^|[^\p{{L}}\p{{N}}])({})(?:$|[^\p{{L}}\p{{N}}])", body);

    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            debug!(error = %e, "reconciliation pattern did not compile");
            return fallback();
        }
    };

    let folded = Folded::new(original);
    match re.captures(folded.as_str()).and_then(|caps| caps.get(1)) {
        Some(m) => original[folded.original_range(m.start(), m.end())].to_string(),
        None => {
            debug!(tokens = segment.len(), "segment not found in original text");
            fallback()
        }
    }
}

/// Case-insensitive matcher for a set of literal terms.
#[derive(Debug, Clone)]
pub struct Highlighter {
    re: Option<Regex>,
    class: String,
}

impl Highlighter {
    pub fn new(terms: &[String], class: &str) -> Self {
        let mut literals: Vec<&str> = terms
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .collect();
        // Longest first so "golden" wins over "gold" in the alternation.
        literals.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        literals.dedup();

        let re = if literals.is_empty() {
            None
        } else {
            let pattern = literals
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| debug!(error = %e, "highlight pattern did not compile"))
                .ok()
        };

        Highlighter {
            re,
            class: class.to_string(),
        }
    }

    /// Escape `text` and wrap every whole-word hit in a highlight marker.
    pub fn apply(&self, text: &str) -> String {
        let Some(re) = &self.re else {
            return escape_html(text);
        };

        let folded = Folded::new(text);
        let mut out = String::with_capacity(text.len() + 64);
        let mut last = 0;
        for m in re.find_iter(folded.as_str()) {
            let hit = folded.original_range(m.start(), m.end());
            if hit.start < last || hit.is_empty() {
                continue;
            }
            let before_ok = text[..hit.start]
                .chars()
                .next_back()
                .map_or(true, |c| !is_word_char(c));
            let after_ok = text[hit.end..]
                .chars()
                .next()
                .map_or(true, |c| !is_word_char(c));
            if !(before_ok && after_ok) {
                continue;
            }
            out.push_str(&escape_html(&text[last..hit.start]));
            out.push_str(&format!(
                r#"<strong class="{}">{}</strong>"#,
                self.class,
                escape_html(&text[hit.clone()])
            ));
            last = hit.end;
        }
        out.push_str(&escape_html(&text[last..]));
        out
    }
}
