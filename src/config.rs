// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Everything has a default, so `{}` is a valid config file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FindError, Result};
use crate::index::DEFAULT_MAX_PENDING_QUERIES;
use crate::snippet::{SnippetOptions, DEFAULT_MAX_WORDS};
use crate::utils::is_valid_date_format;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FindConfig {
    /// Snippet word budget.
    pub max_words: usize,
    /// Truncation marker, inserted verbatim.
    pub ellipsis: String,
    /// CSS class on highlighted terms.
    pub highlight_class: String,
    /// Link titles longer than this many characters are cut.
    pub link_title_max: usize,
    /// chrono format string for dates.
    pub date_format: String,
    /// Deadline for the ranking query; `None` waits forever.
    pub query_timeout_ms: Option<u64>,
    /// Timed-out ranking queries that may still be running before new ones are refused.
    pub max_pending_queries: usize,
    /// Icon shown before the ranking percentage.
    pub ranking_icon: Option<String>,
    /// Drop the leading id and title words from stored fulltext.
    pub skip_id_and_title: bool,
}

impl Default for FindConfig {
    fn default() -> Self {
        FindConfig {
            max_words: DEFAULT_MAX_WORDS,
            ellipsis: "…".to_string(),
            highlight_class: "search-result-snippet-hilite".to_string(),
            link_title_max: 50,
            date_format: "%d %b %Y %H:%M".to_string(),
            query_timeout_ms: Some(2000),
            max_pending_queries: DEFAULT_MAX_PENDING_QUERIES,
            ranking_icon: None,
            skip_id_and_title: true,
        }
    }
}

impl FindConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FindConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    fn validate(&self) -> Result<()> {
        if self.date_format.is_empty() {
            return Err(FindError::Config("date_format must not be empty".to_string()));
        }
        if !is_valid_date_format(&self.date_format) {
            return Err(FindError::Config(format!(
                "date_format '{}' is not a valid chrono format",
                self.date_format
            )));
        }
        if self.query_timeout_ms == Some(0) {
            return Err(FindError::Config(
                "query_timeout_ms must be positive; use null to disable".to_string(),
            ));
        }
        if self.max_pending_queries == 0 {
            return Err(FindError::Config(
                "max_pending_queries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }

    pub fn snippet_options(&self) -> SnippetOptions {
        SnippetOptions {
            max_words: self.max_words,
            ellipsis: self.ellipsis.clone(),
            highlight_class: self.highlight_class.clone(),
        }
    }
}
