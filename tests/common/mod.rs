//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use findkit::{
    FindConfig, FullTextIndex, IndexData, IndexError, RankedRow, RenderContext, ResultField,
    ResultsSchema, Rid, FieldKind,
};

// Re-export canonical test utilities from findkit::testing
pub use findkit::testing::{make_document, make_item, numbered_tokens, poem_corpus, tokens};

/// CSS class the default options put on highlights.
pub const HILITE: &str = "search-result-snippet-hilite";

/// `term` wrapped the way the default highlighter wraps it.
pub fn hl(term: &str) -> String {
    format!(r#"<strong class="{}">{}</strong>"#, HILITE, term)
}

/// Number of highlighted spans in a snippet.
pub fn highlight_count(snippet: &str) -> usize {
    snippet.matches("<strong ").count()
}

/// Words in a snippet once markup and ellipses are removed.
pub fn visible_words(snippet: &str, ellipsis: &str) -> usize {
    snippet
        .replace(&format!(r#"<strong class="{}">"#, HILITE), "")
        .replace("</strong>", "")
        .split_whitespace()
        .filter(|word| *word != ellipsis)
        .count()
}

// ============================================================================
// INDEX DOUBLES
// ============================================================================

/// Index answering every query with the same rows, recording what it was asked.
pub struct ScriptedIndex {
    rows: Result<Vec<RankedRow>, IndexError>,
    data: Vec<(Rid, Vec<String>)>,
    pub asked: Mutex<Vec<(String, usize)>>,
}

impl ScriptedIndex {
    pub fn new(rows: Result<Vec<RankedRow>, IndexError>) -> Self {
        ScriptedIndex {
            rows,
            data: Vec::new(),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn scores(scores: &[(u64, f64)]) -> Self {
        Self::new(Ok(scores
            .iter()
            .map(|&(rid, score)| RankedRow {
                rid: Rid(rid),
                score,
            })
            .collect()))
    }

    pub fn with_tokens(mut self, rid: u64, tokens: Vec<String>) -> Self {
        self.data.push((Rid(rid), tokens));
        self
    }
}

impl FullTextIndex for ScriptedIndex {
    fn query(&self, query: &str, max_rows: usize) -> Result<Vec<RankedRow>, IndexError> {
        self.asked.lock().unwrap().push((query.to_string(), max_rows));
        self.rows.clone()
    }

    fn index_data(&self, rid: Rid) -> Option<IndexData> {
        self.data
            .iter()
            .find(|(r, _)| *r == rid)
            .map(|(_, tokens)| IndexData {
                fulltext: tokens.clone(),
            })
    }
}

// ============================================================================
// RENDERING
// ============================================================================

pub fn context(index: impl FullTextIndex + 'static) -> RenderContext {
    RenderContext::new(FindConfig::default(), Arc::new(index))
}

pub fn result_field(name: &str, kind: FieldKind) -> ResultField {
    ResultField {
        name: name.to_string(),
        title: name.to_string(),
        kind,
        public: true,
    }
}

pub fn schema(fields: &[(&str, FieldKind)]) -> ResultsSchema {
    ResultsSchema::new(
        fields
            .iter()
            .map(|&(name, kind)| result_field(name, kind))
            .collect(),
    )
    .unwrap()
}
