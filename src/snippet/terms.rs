// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning a user query into the terms we look for.
//!
//! Two passes, never interleaved. First every query word is normalized and
//! wildcard words are resolved against the item's tokens. Then the window
//! selector walks the resolved list once.
//!
//! Wildcards: `?` is exactly one non-space character, `*` is any run of them.
//! Everything else in a term is literal, so `c++` or `a.b` never reach the
//! regex engine unescaped.

use regex::Regex;
use tracing::debug;

use crate::utils::normalize;

/// Terms after wildcard resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTerms {
    /// One entry per query word: the literal token its window centers on.
    pub match_terms: Vec<String>,
    /// Every literal to highlight, deduplicated, in first-seen order.
    pub highlight_terms: Vec<String>,
}

impl ResolvedTerms {
    pub fn is_empty(&self) -> bool {
        self.match_terms.is_empty()
    }
}

#[inline]
pub fn has_wildcard(term: &str) -> bool {
    term.contains(['?', '*'])
}

/// Compile a wildcard term into a regex matching whole tokens.
pub fn wildcard_regex(term: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(term.len() + 8);
    pattern.push('^');
    let mut buf = [0u8; 4];
    for c in term.chars() {
        match c {
            '?' => pattern.push_str("[^ ]"),
            '*' => pattern.push_str("[^ ]*"),
            _ => pattern.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    pattern.push('$');
    Regex::new(&pattern)
}

/// Split a raw query on whitespace into normalized terms.
///
/// Phrase quotes are dropped: `"Spiritus Mundi"` yields `spiritus`, `mundi`.
pub fn split_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|word| normalize(word.trim_matches('"')))
        .filter(|term| !term.is_empty())
        .collect()
}

/// Resolve wildcard terms against `tokens`.
///
/// A wildcard term that matches stands in for its first matching token, and
/// every matching token gets highlighted. One that matches nothing keeps its
/// pattern as the match term (so it falls back to the text lead) and
/// highlights nothing.
pub fn resolve_terms(terms: &[String], tokens: &[String]) -> ResolvedTerms {
    let mut resolved = ResolvedTerms::default();

    for term in terms {
        if !has_wildcard(term) {
            push_unique(&mut resolved.highlight_terms, term);
            resolved.match_terms.push(term.clone());
            continue;
        }

        let re = match wildcard_regex(term) {
            Ok(re) => re,
            Err(e) => {
                debug!(term = %term, error = %e, "wildcard term did not compile");
                resolved.match_terms.push(term.clone());
                continue;
            }
        };

        let mut found = tokens.iter().filter(|token| re.is_match(token)).peekable();
        match found.peek() {
            Some(first) => resolved.match_terms.push((*first).clone()),
            None => resolved.match_terms.push(term.clone()),
        }
        for token in found {
            push_unique(&mut resolved.highlight_terms, token);
        }
    }

    resolved
}

fn push_unique(terms: &mut Vec<String>, term: &str) {
    if !terms.iter().any(|t| t == term) {
        terms.push(term.to_string());
    }
}
