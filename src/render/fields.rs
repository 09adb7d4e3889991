// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The built-in field renderers.

use std::sync::Arc;

use crate::config::FindConfig;
use crate::index::FullTextIndex;
use crate::query::ResultField;
use crate::scoring::RankingNormalizer;
use crate::snippet::SnippetExtractor;
use crate::types::{FieldValue, Markup, ResultItem, ResultPage};
use crate::utils::{escape_html, format_datetime, truncate_chars};

use super::{RenderContext, Renderer};

fn titled_field(css: &str, title: &str, value: &str) -> Markup {
    format!(
        r#"<span class="{}"><span class="searchresult-field-title">{}</span><span class="searchresult-field-value">{}</span></span>"#,
        css,
        escape_html(title),
        value
    )
}

/// A plain content attribute with its field title.
pub struct FieldRenderer {
    name: String,
    title: String,
    date_format: String,
}

impl FieldRenderer {
    pub fn new(field: &ResultField, config: &FindConfig) -> Self {
        FieldRenderer {
            name: field.name.clone(),
            title: field.title.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

impl Renderer for FieldRenderer {
    fn render(&self, item: &ResultItem) -> Option<Markup> {
        let value = item.content.attributes.get(&self.name)?;
        if value.is_empty() {
            return None;
        }
        let markup = value.to_markup(&self.date_format);
        if markup.is_empty() {
            return None;
        }
        Some(titled_field("searchresult-field", &self.title, &markup))
    }
}

/// Content type icon.
pub struct MetatypeRenderer;

impl Renderer for MetatypeRenderer {
    fn render(&self, item: &ResultItem) -> Option<Markup> {
        let src = item.content.icon_url.as_deref()?;
        Some(format!(
            r#"<img class="searchresult-icon" src="{}" alt="{}" />"#,
            escape_html(src),
            escape_html(&item.content.meta_type)
        ))
    }
}

/// Relative relevance as a percentage of the best hit.
pub struct RankingRenderer {
    normalizer: RankingNormalizer,
    icon: Option<String>,
}

impl RankingRenderer {
    pub fn new(ctx: &RenderContext) -> Self {
        RankingRenderer {
            normalizer: RankingNormalizer::new(Arc::clone(&ctx.index), ctx.config.query_timeout())
                .with_workers(ctx.workers.clone()),
            icon: ctx.config.ranking_icon.clone(),
        }
    }
}

impl Renderer for RankingRenderer {
    fn update(&mut self, page: &ResultPage, query: &str) {
        self.normalizer.update(query, page);
    }

    fn render(&self, item: &ResultItem) -> Option<Markup> {
        let percentage = self.normalizer.percentage_for(item.rid)?;
        let icon = self
            .icon
            .as_deref()
            .map(|src| format!(r#"<img alt="Rank" src="{}"/> "#, escape_html(src)))
            .unwrap_or_default();
        Some(format!(
            r#"<span class="searchresult-ranking">{}{:.1}%</span>"#,
            icon, percentage
        ))
    }
}

/// Result counts are computed by the page template; this field only toggles them.
pub struct CountRenderer;

impl Renderer for CountRenderer {
    fn render(&self, _item: &ResultItem) -> Option<Markup> {
        None
    }
}

/// Title linked to the item, cut to `link_title_max` characters.
pub struct LinkRenderer {
    max_chars: usize,
    ellipsis: String,
}

impl LinkRenderer {
    pub fn new(config: &FindConfig) -> Self {
        LinkRenderer {
            max_chars: config.link_title_max,
            ellipsis: config.ellipsis.clone(),
        }
    }
}

impl Renderer for LinkRenderer {
    fn render(&self, item: &ResultItem) -> Option<Markup> {
        let title = item.content.title_or_id();
        let cut = truncate_chars(title, self.max_chars, "");
        let mut text = escape_html(&cut);
        if cut.len() < title.len() {
            text.push_str(&self.ellipsis);
        }
        Some(format!(
            r#"<a href="{}" class="searchresult-link">{}</a>"#,
            escape_html(&item.url),
            text
        ))
    }
}

/// Publication date, falling back to the last modification.
pub struct DateRenderer {
    date_format: String,
}

impl DateRenderer {
    pub fn new(config: &FindConfig) -> Self {
        DateRenderer {
            date_format: config.date_format.clone(),
        }
    }
}

impl Renderer for DateRenderer {
    fn render(&self, item: &ResultItem) -> Option<Markup> {
        let date = item.content.display_datetime()?;
        let text = format_datetime(&date, &self.date_format)?.to_lowercase();
        Some(format!(
            r#"<span class="searchresult-date">{}</span>"#,
            escape_html(&text)
        ))
    }
}

/// Thumbnail of image content, linked to the item.
pub struct ThumbnailRenderer;

impl Renderer for ThumbnailRenderer {
    fn render(&self, item: &ResultItem) -> Option<Markup> {
        let thumbnail = item.content.thumbnail.as_ref()?;
        Some(format!(
            r#"<div class="searchresult-thumbnail"><a href="{}"><img src="{}" alt="{}" /></a></div>"#,
            escape_html(&item.url),
            escape_html(&thumbnail.src),
            escape_html(&thumbnail.alt)
        ))
    }
}

/// Highlighted full-text snippet.
pub struct FullTextRenderer {
    index: Arc<dyn FullTextIndex>,
    extractor: SnippetExtractor,
    skip_id_and_title: bool,
    query: String,
}

impl FullTextRenderer {
    pub fn new(ctx: &RenderContext) -> Self {
        FullTextRenderer {
            index: Arc::clone(&ctx.index),
            extractor: SnippetExtractor::new(ctx.config.snippet_options()),
            skip_id_and_title: ctx.config.skip_id_and_title,
            query: String::new(),
        }
    }
}

impl Renderer for FullTextRenderer {
    fn update(&mut self, _page: &ResultPage, query: &str) {
        self.query = query.to_string();
    }

    fn render(&self, item: &ResultItem) -> Option<Markup> {
        let data = self.index.index_data(item.rid)?;
        let mut tokens = data.fulltext.as_slice();
        if self.skip_id_and_title {
            // The catalog stores id and title words ahead of the body.
            let skip = item.content.id.split_whitespace().count()
                + item.content.title.split_whitespace().count();
            tokens = tokens.get(skip..).unwrap_or(&[]);
        }

        let snippet = self.extractor.extract(
            tokens,
            item.content.original_text.as_deref(),
            &self.query,
        );
        if snippet.is_empty() {
            return None;
        }
        Some(format!(r#"<div class="searchresult-snippet">{}</div>"#, snippet))
    }
}

/// Path to the item, without the item itself.
pub struct BreadcrumbsRenderer;

impl Renderer for BreadcrumbsRenderer {
    fn render(&self, item: &ResultItem) -> Option<Markup> {
        let crumbs = &item.content.breadcrumbs;
        let parents = crumbs.get(..crumbs.len().saturating_sub(1))?;
        if parents.is_empty() {
            return None;
        }
        let links = parents
            .iter()
            .map(|crumb| {
                format!(
                    r#"<a href="{}">{}</a>"#,
                    escape_html(&crumb.url),
                    escape_html(&crumb.name)
                )
            })
            .collect::<Vec<_>>()
            .join("<span> &#183; </span>");
        Some(format!(r#"<span class="searchresult-breadcrumb">{}</span>"#, links))
    }
}

/// A metadata element, named `set:element`.
pub struct MetadataRenderer {
    key: String,
    css: Option<String>,
    title: String,
    date_format: String,
}

impl MetadataRenderer {
    pub fn new(field: &ResultField, config: &FindConfig) -> Self {
        let css = field
            .name
            .split_once(':')
            .map(|(set, element)| format!("searchresult-field metadata-{}-{}", set, element));
        MetadataRenderer {
            key: field.name.clone(),
            css,
            title: field.title.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

impl Renderer for MetadataRenderer {
    fn render(&self, item: &ResultItem) -> Option<Markup> {
        let css = self.css.as_deref()?;
        let value: &FieldValue = item.content.metadata.get(&self.key)?;
        if value.is_empty() {
            return None;
        }
        let markup = value.to_markup(&self.date_format);
        if markup.is_empty() {
            return None;
        }
        Some(titled_field(css, &self.title, &markup))
    }
}
