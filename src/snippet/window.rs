// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Choosing which stretches of the token stream make up a snippet.
//!
//! Each term gets `max_words / term_count` tokens centered on its first
//! occurrence. Near the start of the text the window slides right instead of
//! shrinking. A term that never occurs (it matched the title, which is not in
//! the body) gets the text lead instead.
//!
//! When all occurrences fall within `max_words` of each other the per-term
//! windows are thrown away and replaced by one window covering the whole span,
//! padded evenly on both sides. Otherwise overlapping windows are coalesced so
//! no sentence shows up twice.
//!
//! The budget is approximate on purpose: integer division and the sliding at
//! the text start mean the output can fall a little short of `max_words`, or
//! exceed it by at most one token per term.

use std::ops::Range;

use tracing::trace;

/// Token ranges to show, in text order, non-overlapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowLayout {
    pub windows: Vec<Range<usize>>,
    /// All terms were close enough to share one window.
    pub merged: bool,
}

impl WindowLayout {
    /// Total tokens across all windows.
    pub fn token_count(&self) -> usize {
        self.windows.iter().map(|w| w.len()).sum()
    }
}

/// Select snippet windows for `terms` within `tokens`.
///
/// `terms` must be non-empty.
pub fn select_windows(tokens: &[String], terms: &[String], max_words: usize) -> WindowLayout {
    debug_assert!(!terms.is_empty(), "select_windows needs at least one term");
    let len = tokens.len();
    let words_per_term = max_words / terms.len().max(1);
    let half = words_per_term / 2;

    let mut lowest = len;
    let mut highest = 0usize;
    let mut windows = Vec::with_capacity(terms.len());

    for term in terms {
        let Some(pos) = tokens.iter().position(|token| token == term) else {
            windows.push(0..words_per_term.min(len));
            lowest = 0;
            highest = highest.max(words_per_term);
            continue;
        };

        lowest = lowest.min(pos);
        highest = highest.max(pos);

        let start = pos.saturating_sub(half);
        // Slide right by however much the start was clamped.
        let end = pos + half + 1 + (half - (pos - start));
        windows.push(start..end.min(len));
    }

    if lowest < highest && highest - lowest < max_words {
        let padding = (max_words - (highest - lowest)) / 2;
        let start = lowest.saturating_sub(padding);
        let end = highest + padding + (padding - (lowest - start));
        trace!(lowest, highest, padding, "terms close together, merging windows");
        return WindowLayout {
            windows: vec![start..end.min(len)],
            merged: true,
        };
    }

    WindowLayout {
        windows: coalesce(windows),
        merged: false,
    }
}

/// Sort ranges by start, drop empty ones, and fuse those that overlap or touch.
pub fn coalesce(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.retain(|r| !r.is_empty());
    ranges.sort_by_key(|r| (r.start, r.end));

    let mut out: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match out.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => out.push(range),
        }
    }
    out
}
