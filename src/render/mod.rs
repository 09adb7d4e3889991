// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result field rendering.
//!
//! A results schema lists fields by [`FieldKind`]. The [`RendererTable`] maps
//! each kind to a factory, and [`PageRenderer`] builds one [`Renderer`] per
//! public field for the duration of one page.
//!
//! Per page: `update` once (ranking and snippets read the query here), then
//! `render` per item. A renderer returning `None` or blank markup suppresses
//! the field entirely; no empty tags reach the template.

mod fields;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FindConfig;
use crate::index::{FullTextIndex, WorkerLimit};
use crate::query::{ResultField, ResultsSchema};
use crate::types::{Markup, ResultItem, ResultPage, Rid};

pub use fields::{
    BreadcrumbsRenderer, CountRenderer, DateRenderer, FieldRenderer, FullTextRenderer,
    LinkRenderer, MetadataRenderer, MetatypeRenderer, RankingRenderer, ThumbnailRenderer,
};

/// What a result field shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A plain content attribute named by the field.
    Field,
    MetatypeIcon,
    Ranking,
    ResultCount,
    TotalResultCount,
    Link,
    Date,
    Thumbnail,
    #[serde(rename = "fulltext")]
    FullText,
    Breadcrumbs,
    Metadata,
}

impl FieldKind {
    pub const ALL: [FieldKind; 11] = [
        FieldKind::Field,
        FieldKind::MetatypeIcon,
        FieldKind::Ranking,
        FieldKind::ResultCount,
        FieldKind::TotalResultCount,
        FieldKind::Link,
        FieldKind::Date,
        FieldKind::Thumbnail,
        FieldKind::FullText,
        FieldKind::Breadcrumbs,
        FieldKind::Metadata,
    ];
}

/// Renders one field of a hit.
pub trait Renderer {
    /// Called once per page before any `render`.
    fn update(&mut self, _page: &ResultPage, _query: &str) {}

    fn render(&self, item: &ResultItem) -> Option<Markup>;
}

/// Collaborators every renderer may draw on.
///
/// Keep one context per index for the life of the host: page renderers built
/// from it share its ranking worker limit.
#[derive(Clone)]
pub struct RenderContext {
    pub config: Arc<FindConfig>,
    pub index: Arc<dyn FullTextIndex>,
    pub workers: WorkerLimit,
}

impl RenderContext {
    pub fn new(config: FindConfig, index: Arc<dyn FullTextIndex>) -> Self {
        RenderContext {
            workers: WorkerLimit::new(config.max_pending_queries),
            config: Arc::new(config),
            index,
        }
    }
}

pub type RendererFactory = fn(&ResultField, &RenderContext) -> Box<dyn Renderer>;

/// Field kind → renderer factory.
#[derive(Clone)]
pub struct RendererTable {
    factories: HashMap<FieldKind, RendererFactory>,
}

impl Default for RendererTable {
    fn default() -> Self {
        let mut table = RendererTable {
            factories: HashMap::with_capacity(FieldKind::ALL.len()),
        };
        table.register(FieldKind::Field, |field, ctx| {
            Box::new(FieldRenderer::new(field, &ctx.config))
        });
        table.register(FieldKind::MetatypeIcon, |_, _| Box::new(MetatypeRenderer));
        table.register(FieldKind::Ranking, |_, ctx| Box::new(RankingRenderer::new(ctx)));
        table.register(FieldKind::ResultCount, |_, _| Box::new(CountRenderer));
        table.register(FieldKind::TotalResultCount, |_, _| Box::new(CountRenderer));
        table.register(FieldKind::Link, |_, ctx| Box::new(LinkRenderer::new(&ctx.config)));
        table.register(FieldKind::Date, |_, ctx| Box::new(DateRenderer::new(&ctx.config)));
        table.register(FieldKind::Thumbnail, |_, _| Box::new(ThumbnailRenderer));
        table.register(FieldKind::FullText, |_, ctx| Box::new(FullTextRenderer::new(ctx)));
        table.register(FieldKind::Breadcrumbs, |_, _| Box::new(BreadcrumbsRenderer));
        table.register(FieldKind::Metadata, |field, ctx| {
            Box::new(MetadataRenderer::new(field, &ctx.config))
        });
        table
    }
}

impl RendererTable {
    /// Register (or replace) the factory for `kind`.
    pub fn register(&mut self, kind: FieldKind, factory: RendererFactory) {
        self.factories.insert(kind, factory);
    }

    pub fn build(&self, field: &ResultField, ctx: &RenderContext) -> Option<Box<dyn Renderer>> {
        self.factories.get(&field.kind).map(|factory| factory(field, ctx))
    }
}

/// One rendered field of one hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedField {
    pub name: String,
    pub kind: FieldKind,
    pub markup: Markup,
}

/// All rendered fields of one hit, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedItem {
    pub rid: Rid,
    pub fields: Vec<RenderedField>,
}

/// Renders a whole page against a results schema.
pub struct PageRenderer {
    fields: Vec<(ResultField, Box<dyn Renderer>)>,
}

impl PageRenderer {
    /// One renderer per public field. Kinds missing from `table` are skipped.
    pub fn new(schema: &ResultsSchema, table: &RendererTable, ctx: &RenderContext) -> Self {
        let fields = schema
            .public_fields()
            .filter_map(|field| match table.build(field, ctx) {
                Some(renderer) => Some((field.clone(), renderer)),
                None => {
                    debug!(field = %field.name, kind = ?field.kind, "no renderer registered");
                    None
                }
            })
            .collect();
        PageRenderer { fields }
    }

    pub fn update(&mut self, page: &ResultPage, query: &str) {
        for (_, renderer) in &mut self.fields {
            renderer.update(page, query);
        }
    }

    pub fn render_item(&self, item: &ResultItem) -> RenderedItem {
        let fields = self
            .fields
            .iter()
            .filter_map(|(field, renderer)| {
                let markup = renderer.render(item)?;
                if markup.trim().is_empty() {
                    return None;
                }
                Some(RenderedField {
                    name: field.name.clone(),
                    kind: field.kind,
                    markup,
                })
            })
            .collect();
        RenderedItem {
            rid: item.rid,
            fields,
        }
    }

    /// `update` followed by `render_item` for every hit.
    pub fn render_page(&mut self, page: &ResultPage, query: &str) -> Vec<RenderedItem> {
        self.update(page, query);
        page.iter().map(|item| self.render_item(item)).collect()
    }
}
