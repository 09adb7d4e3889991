// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the rendering engine.
//!
//! Debug-mode assertions for the properties the rest of the crate relies on.
//! They compile to nothing in release builds.
//!
//! | Contract Function          | Property                                          |
//! |----------------------------|---------------------------------------------------|
//! | `check_snippet_budget`     | snippet windows hold at most `max_words + terms`  |
//! | `check_windows_ordered`    | windows are sorted and disjoint                   |
//! | `check_ranking_normalized` | a normalized ranking lies in `[0, 1]`             |

use crate::snippet::window::WindowLayout;

// ============================================================================
// SNIPPET CONTRACTS
// ============================================================================

/// Check that a window layout stays within the word budget.
///
/// Per-term windows are `max_words / terms + 1` wide at most, and a merged
/// window is never wider than `max_words`, so the total can exceed the
/// budget by at most one token per term.
///
/// # Panics (debug builds only)
/// Panics if the layout holds more than `max_words + term_count` tokens, or
/// if its windows overlap.
#[inline]
pub fn check_snippet_budget(layout: &WindowLayout, max_words: usize, term_count: usize) {
    debug_assert!(
        layout.token_count() <= max_words + term_count,
        "Contract violation: snippet budget - {} tokens > max_words {} + terms {}",
        layout.token_count(),
        max_words,
        term_count
    );
    check_windows_ordered(layout);
}

/// Check that windows are non-empty, sorted, and do not touch.
#[inline]
pub fn check_windows_ordered(layout: &WindowLayout) {
    for (i, pair) in layout.windows.windows(2).enumerate() {
        debug_assert!(
            pair[0].end < pair[1].start,
            "Contract violation: windows[{}] ({:?}) overlaps windows[{}] ({:?})",
            i,
            pair[0],
            i + 1,
            pair[1]
        );
    }
    for (i, window) in layout.windows.iter().enumerate() {
        debug_assert!(
            !window.is_empty(),
            "Contract violation: windows[{}] is empty",
            i
        );
    }
}

// ============================================================================
// RANKING CONTRACTS
// ============================================================================

/// Check that a normalized ranking is a fraction of the top score.
///
/// # Panics (debug builds only)
/// Panics if `ranking` is NaN or outside `[0, 1]`.
#[inline]
pub fn check_ranking_normalized(ranking: f64) {
    debug_assert!(
        (0.0..=1.0).contains(&ranking),
        "Contract violation: ranking {} outside [0, 1]",
        ranking
    );
}
