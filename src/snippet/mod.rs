// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet extraction: the excerpt under each search result.
//!
//! Input is an item's token stream (what the index matched against), its
//! original text if it has one (what the reader should see), and the raw
//! query. Output is a short markup fragment with the query terms highlighted
//! and an ellipsis wherever text was cut.
//!
//! ```text
//! query ──▶ terms::split_terms ──▶ terms::resolve_terms
//!                                        │
//! tokens ─────────────────────▶ window::select_windows
//!                                        │
//! original ───────────────────▶ highlight::reconcile ──▶ Highlighter::apply
//! ```
//!
//! Nothing here fails. Regexes that do not compile, windows that cannot be
//! found in the original, terms that never occur: each degrades to a plainer
//! snippet rather than an error.

pub mod highlight;
pub mod terms;
pub mod window;

use serde::{Deserialize, Serialize};

use crate::contracts::check_snippet_budget;
use crate::types::Markup;
use crate::utils::{collapse_whitespace, escape_html};

use highlight::{reconcile, Highlighter};
use terms::{resolve_terms, split_terms};
use window::select_windows;

/// Default snippet word budget.
pub const DEFAULT_MAX_WORDS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetOptions {
    pub max_words: usize,
    /// Inserted verbatim, so it may be an entity such as `&#8230;`.
    pub ellipsis: String,
    pub highlight_class: String,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        SnippetOptions {
            max_words: DEFAULT_MAX_WORDS,
            ellipsis: "…".to_string(),
            highlight_class: "search-result-snippet-hilite".to_string(),
        }
    }
}

/// Stateless snippet builder. Same inputs, same output.
#[derive(Debug, Clone, Default)]
pub struct SnippetExtractor {
    options: SnippetOptions,
}

impl SnippetExtractor {
    pub fn new(options: SnippetOptions) -> Self {
        SnippetExtractor { options }
    }

    pub fn options(&self) -> &SnippetOptions {
        &self.options
    }

    /// Build the snippet markup for one item.
    ///
    /// Empty `tokens` (images, files without text) yield an empty string.
    pub fn extract(&self, tokens: &[String], original: Option<&str>, query: &str) -> Markup {
        if tokens.is_empty() {
            return String::new();
        }
        let original = original
            .map(collapse_whitespace)
            .filter(|text| !text.is_empty());

        let terms = split_terms(query);
        if terms.is_empty() {
            return self.lead(tokens, original.as_deref());
        }

        let resolved = resolve_terms(&terms, tokens);
        let layout = select_windows(tokens, &resolved.match_terms, self.options.max_words);
        check_snippet_budget(&layout, self.options.max_words, resolved.match_terms.len());

        let highlighter = Highlighter::new(&resolved.highlight_terms, &self.options.highlight_class);
        let segments: Vec<String> = layout
            .windows
            .iter()
            .map(|window| {
                let segment = &tokens[window.clone()];
                let text = match original.as_deref() {
                    Some(original) => reconcile(segment, original),
                    None => segment.join(" "),
                };
                highlighter.apply(&text)
            })
            .collect();

        let (Some(first), Some(last)) = (layout.windows.first(), layout.windows.last()) else {
            return String::new();
        };

        let ellipsis = &self.options.ellipsis;
        let mut out = String::new();
        if first.start > 0 {
            out.push_str(ellipsis);
            out.push(' ');
        }
        out.push_str(&segments.join(&format!(" {} ", ellipsis)));
        if last.end < tokens.len() {
            out.push(' ');
            out.push_str(ellipsis);
        }
        out.trim().to_string()
    }

    /// No query terms: the first `max_words` words, from the original text when there is one.
    fn lead(&self, tokens: &[String], original: Option<&str>) -> Markup {
        let max_words = self.options.max_words;
        let text = match original {
            Some(original) => original
                .split(' ')
                .take(max_words)
                .collect::<Vec<_>>()
                .join(" "),
            None => tokens
                .iter()
                .take(max_words)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
        };

        let mut out = escape_html(&text);
        if tokens.len() > max_words {
            out.push(' ');
            out.push_str(&self.options.ellipsis);
        }
        out.trim().to_string()
    }
}

/// Extract a snippet with default options and the given word budget.
pub fn extract_snippet(
    tokens: &[String],
    original: Option<&str>,
    query: &str,
    max_words: usize,
) -> Markup {
    SnippetExtractor::new(SnippetOptions {
        max_words,
        ..SnippetOptions::default()
    })
    .extract(tokens, original, query)
}
