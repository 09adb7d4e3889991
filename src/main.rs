// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use findkit::{
    tokenize, FindConfig, MemoryIndex, PageRenderer, RenderContext, RendererTable, ResultItem,
    ResultPage, SnippetExtractor, SnippetOptions,
};

mod cli;
use cli::display::{self, terminal_markup, use_colors, DIM, RESET};
use cli::{Cli, Commands, PageFixture};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FINDKIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Snippet {
            text,
            original,
            query,
            max_words,
        } => run_snippet(&text, original.as_deref(), &query, max_words),
        Commands::Render {
            page,
            query,
            config,
        } => run_render(&page, &query, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run_snippet(text: &Path, original: Option<&Path>, query: &str, max_words: usize) -> Result<()> {
    let raw = fs::read_to_string(text).with_context(|| format!("reading {}", text.display()))?;
    let original = original
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        })
        .transpose()?;

    let tokens = tokenize(&raw);
    info!(tokens = tokens.len(), query, "extracting snippet");
    let extractor = SnippetExtractor::new(SnippetOptions {
        max_words,
        ..SnippetOptions::default()
    });
    let snippet = extractor.extract(&tokens, original.as_deref(), query);
    println!("{}", terminal_markup(&snippet, use_colors()));
    Ok(())
}

fn run_render(page: &Path, query: &str, config: Option<&Path>) -> Result<()> {
    let config = match config {
        Some(path) => FindConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => FindConfig::default(),
    };
    let raw = fs::read_to_string(page).with_context(|| format!("reading {}", page.display()))?;
    let fixture: PageFixture =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", page.display()))?;

    let mut index = MemoryIndex::new();
    for item in &fixture.items {
        index.insert_content(item.rid, &item.content, item.body());
    }
    info!(rows = index.len(), query, "rendering page fixture");

    let items = fixture
        .items
        .into_iter()
        .map(|item| ResultItem {
            rid: item.rid,
            url: item.url,
            content: item.content,
        })
        .collect();
    let result_page = ResultPage::new(fixture.start, items);

    let ctx = RenderContext::new(config, Arc::new(index));
    let mut renderer = PageRenderer::new(&fixture.schema, &RendererTable::default(), &ctx);
    let rendered = renderer.render_page(&result_page, query);

    let colors = use_colors();
    for (item, output) in result_page.iter().zip(&rendered) {
        if !colors {
            for field in &output.fields {
                println!("{}\t{}\t{}", output.rid, field.name, field.markup);
            }
            continue;
        }
        display::section_top(&format!("{} {}", output.rid, item.content.title_or_id()));
        for field in &output.fields {
            display::row(&format!(" {}{}{} {}", DIM, field.name, RESET, terminal_markup(&field.markup, true)));
        }
        display::section_bot();
    }
    Ok(())
}
