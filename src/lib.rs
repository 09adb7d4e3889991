// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result presentation for a site search engine.
//!
//! Given a page of hits from an external full-text index, this crate turns
//! each hit into markup: a highlighted snippet, a relative ranking, and the
//! plain fields a results schema asks for.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  query.rs    │────▶│  render/     │────▶│  RenderedItem│
//! │ (Schema,     │     │ (PageRenderer│     │  (markup per │
//! │  Query)      │     │  Renderer)   │     │   field)     │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                         │         │
//!                         ▼         ▼
//!              ┌──────────────┐  ┌──────────────┐
//!              │  snippet/    │  │  scoring/    │
//!              │ (terms,      │  │ (Ranking-    │
//!              │  window,     │  │  Normalizer) │
//!              │  highlight)  │  └──────────────┘
//!              └──────────────┘         │
//!                         │             ▼
//!                         │     ┌──────────────┐
//!                         └────▶│  index.rs    │
//!                               │ (FullText-   │
//!                               │  Index)      │
//!                               └──────────────┘
//! ```
//!
//! The index is a capability handed in by the host; [`MemoryIndex`] is a
//! small in-process one for tools and tests.
//!
//! # Usage
//!
//! ```ignore
//! use findkit::{extract_snippet, testing::tokens};
//!
//! let toks = tokens("once upon a midnight dreary");
//! let snippet = extract_snippet(&toks, None, "dreary", 40);
//! ```

pub mod config;
pub mod contracts;
pub mod error;
pub mod index;
pub mod query;
pub mod render;
pub mod scoring;
pub mod snippet;
pub mod testing;
mod types;
mod utils;

pub use config::FindConfig;
pub use error::{FindError, IndexError, Result};
pub use index::{
    query_with_timeout, FullTextIndex, IndexData, MemoryIndex, RankedRow, WorkerLimit,
};
pub use query::{
    NamedField, Query, ResultField, ResultsSchema, Schema, SearchField, SearchSchema,
    FULLTEXT_FIELD,
};
pub use render::{
    FieldKind, PageRenderer, RenderContext, RenderedField, RenderedItem, Renderer,
    RendererFactory, RendererTable,
};
pub use scoring::RankingNormalizer;
pub use snippet::{extract_snippet, SnippetExtractor, SnippetOptions, DEFAULT_MAX_WORDS};
pub use types::{
    Content, Crumb, FieldValue, Markup, ResultItem, ResultPage, Rid, Thumbnail,
};
pub use utils::{collapse_whitespace, escape_html, normalize, tokenize};
