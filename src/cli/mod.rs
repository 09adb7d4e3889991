// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the findkit command-line interface.
//!
//! Two subcommands: `snippet` runs the snippet extractor over a text file,
//! and `render` renders a page fixture through the full renderer table
//! against an in-memory index built from the fixture itself.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use findkit::{Content, ResultsSchema, Rid, DEFAULT_MAX_WORDS};

#[derive(Parser)]
#[command(
    name = "findkit",
    about = "Search result snippets, rankings and field markup",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a highlighted snippet from a text file
    Snippet {
        /// File whose words are tokenized and searched
        #[arg(short, long)]
        text: PathBuf,

        /// Untokenized text shown in the snippet (punctuation and case intact)
        #[arg(short, long)]
        original: Option<PathBuf>,

        /// Search query
        #[arg(short, long)]
        query: String,

        /// Snippet word budget
        #[arg(short, long, default_value_t = DEFAULT_MAX_WORDS)]
        max_words: usize,
    },

    /// Render a page fixture with its results schema
    Render {
        /// JSON fixture: `{"schema": {...}, "start": 0, "items": [...]}`
        #[arg(short, long)]
        page: PathBuf,

        /// Search query
        #[arg(short, long, default_value = "")]
        query: String,

        /// JSON config file (defaults apply otherwise)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Page fixture read by `findkit render`.
#[derive(Debug, Deserialize)]
pub struct PageFixture {
    pub schema: ResultsSchema,
    #[serde(default)]
    pub start: usize,
    pub items: Vec<FixtureItem>,
}

/// One hit of a page fixture.
#[derive(Debug, Deserialize)]
pub struct FixtureItem {
    pub rid: Rid,
    pub url: String,
    pub content: Content,
    /// Indexed body; the content's original text when absent.
    #[serde(default)]
    pub body: Option<String>,
}

impl FixtureItem {
    pub fn body(&self) -> &str {
        self.body
            .as_deref()
            .or(self.content.original_text.as_deref())
            .unwrap_or("")
    }
}
