// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Two layers. `IndexError` is what a full-text index hands back; the ranking
//! normalizer absorbs it and degrades to "no rankings". `FindError` is what
//! reaches callers: configuration mistakes, unknown schema fields, I/O.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FindError>;

/// Failures signalled by a [`FullTextIndex`](crate::index::FullTextIndex).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Malformed boolean/phrase syntax in the query string.
    #[error("query parse error: {0}")]
    Parse(String),

    /// The index did not answer before the deadline.
    #[error("index query timed out after {0} ms")]
    Timeout(u64),

    /// The index is gone (worker died, backend closed).
    #[error("index unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum FindError {
    /// A criterion or result field name that the schema does not define.
    #[error("no field named '{0}' defined in search schema")]
    UnknownField(String),

    #[error("field '{0}' defined more than once in schema")]
    DuplicateField(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Index(#[from] IndexError),
}
