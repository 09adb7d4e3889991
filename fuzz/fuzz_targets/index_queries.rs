// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the in-memory index query parser.
//!
//! Any byte string is a query. It either parses and returns at most
//! `max_rows` score-descending rows, or fails with a parse error.

#![no_main]

use findkit::{FullTextIndex, IndexError, MemoryIndex};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|query: &[u8]| {
    static INDEX: std::sync::OnceLock<MemoryIndex> = std::sync::OnceLock::new();
    let index = INDEX.get_or_init(|| {
        let mut index = MemoryIndex::new();
        index.insert_text(1, "so much depends upon a red wheel barrow");
        index.insert_text(2, "glazed with rain water beside the white chickens");
        index.insert_text(3, "the falcon cannot hear the falconer");
        index
    });

    let query = String::from_utf8_lossy(query);
    let query: String = query.chars().take(200).collect();

    match index.query(&query, 2) {
        Ok(rows) => {
            assert!(rows.len() <= 2);
            for pair in rows.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
        }
        Err(IndexError::Parse(_)) => {}
        Err(other) => panic!("unexpected error {:?}", other),
    }
});
