// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for snippet extraction.
//!
//! Arbitrary text, original text and query. The extractor must never panic
//! and must never let raw markup from the text through.

#![no_main]

use arbitrary::Arbitrary;
use findkit::{tokenize, SnippetExtractor, SnippetOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    original: Option<String>,
    query: String,
    max_words: u8,
}

const CLASS: &str = "hl";

fuzz_target!(|input: Input| {
    // Cap sizes to keep regex compilation fast
    let text: String = input.text.chars().take(2000).collect();
    let query: String = input.query.chars().take(200).collect();
    let max_words = usize::from(input.max_words);

    let extractor = SnippetExtractor::new(SnippetOptions {
        max_words,
        ellipsis: "…".to_string(),
        highlight_class: CLASS.to_string(),
    });
    let tokens = tokenize(&text);
    let original = input.original.as_deref().map(|o| {
        let end = o.char_indices().nth(2000).map_or(o.len(), |(i, _)| i);
        &o[..end]
    });

    // INVARIANT 1: never panics, same answer twice
    let snippet = extractor.extract(&tokens, original, &query);
    assert_eq!(snippet, extractor.extract(&tokens, original, &query));

    // INVARIANT 2: no tokens, no snippet
    if tokens.is_empty() {
        assert!(snippet.is_empty());
    }

    // INVARIANT 3: the only tags are highlight tags
    let open = format!(r#"<strong class="{}">"#, CLASS);
    let stripped = snippet.replace(&open, "").replace("</strong>", "");
    assert!(!stripped.contains('<'), "unescaped markup in {:?}", snippet);
});
