// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::index::MemoryIndex;
use crate::types::{Content, ResultItem, ResultPage};

/// Split pre-normalized text on single spaces into a token stream.
pub fn tokens(text: &str) -> Vec<String> {
    text.split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// `["w0", "w1", ..]`: filler tokens whose position is readable from the text.
pub fn numbered_tokens(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("w{}", i)).collect()
}

/// A hit at `/site/{id}` with only id and title set.
pub fn make_item(rid: u64, id: &str, title: &str) -> ResultItem {
    ResultItem::new(rid, &format!("/site/{}", id), Content::new(id, title))
}

/// A document with original text, as a catalog would hold it.
pub fn make_document(id: &str, title: &str, text: &str) -> Content {
    let mut content = Content::new(id, title);
    content.meta_type = "Document".to_string();
    content.original_text = Some(text.to_string());
    content
}

pub const RAVEN: &str = "Once upon a midnight dreary, while I pondered, weak and weary, \
Over many a quaint and curious volume of forgotten lore, \
While I nodded, nearly napping, suddenly there came a tapping, \
As of some one gently rapping, rapping at my chamber door.";

pub const SECOND_COMING: &str = "Turning and turning in the widening gyre \
The falcon cannot hear the falconer; \
Things fall apart; the centre cannot hold; \
Mere anarchy is loosed upon the world.";

pub const WHEELBARROW: &str = "so much depends upon a red wheel barrow \
glazed with rain water beside the white chickens.";

/// Three poems indexed under rids 1..=3, and the page that lists them.
pub fn poem_corpus() -> (MemoryIndex, ResultPage) {
    let poems = [
        (1u64, make_document("the_raven", "The Raven", RAVEN)),
        (2, make_document("second_coming", "The Second Coming", SECOND_COMING)),
        (3, make_document("red_wheelbarrow", "The Red Wheelbarrow", WHEELBARROW)),
    ];

    let mut index = MemoryIndex::new();
    let mut items = Vec::with_capacity(poems.len());
    for (rid, content) in poems {
        let body = content.original_text.clone().unwrap_or_default();
        index.insert_content(rid, &content, &body);
        let url = format!("/site/{}", content.id);
        items.push(ResultItem::new(rid, &url, content));
    }
    (index, ResultPage::new(0, items))
}
