//! The snippet field drawn from index data.

use crate::common::{context, hl, make_document, make_item, result_field, ScriptedIndex};
use findkit::{
    FieldKind, FindConfig, MemoryIndex, PageRenderer, RenderContext, RendererTable, ResultItem,
    ResultPage, ResultsSchema,
};
use std::sync::Arc;

fn fulltext_schema() -> ResultsSchema {
    ResultsSchema::new(vec![result_field("fulltext", FieldKind::FullText)]).unwrap()
}

fn render_one(ctx: &RenderContext, item: ResultItem, query: &str) -> Option<String> {
    let mut renderer = PageRenderer::new(&fulltext_schema(), &RendererTable::default(), ctx);
    let page = ResultPage::new(0, vec![item]);
    let mut rendered = renderer.render_page(&page, query);
    rendered.pop()?.fields.pop().map(|field| field.markup)
}

#[test]
fn title_words_do_not_leak_into_the_snippet() {
    let content = make_document("gold", "Gold Rush", "Prospectors came for gold in 1849.");
    let mut index = MemoryIndex::new();
    index.insert_content(1, &content, "Prospectors came for gold in 1849.");
    let ctx = RenderContext::new(FindConfig::default(), Arc::new(index));

    let markup = render_one(&ctx, ResultItem::new(1, "/gold", content), "gold").unwrap();
    assert_eq!(
        markup,
        format!(
            r#"<div class="searchresult-snippet">Prospectors came for {} in 1849</div>"#,
            hl("gold")
        )
    );
}

#[test]
fn id_and_title_are_kept_when_configured() {
    let content = make_document("gold", "Gold Rush", "");
    let mut index = MemoryIndex::new();
    index.insert_content(1, &content, "");
    let config = FindConfig {
        skip_id_and_title: false,
        ..FindConfig::default()
    };
    let ctx = RenderContext::new(config, Arc::new(index));

    let markup = render_one(&ctx, ResultItem::new(1, "/gold", content), "rush").unwrap();
    assert!(markup.contains(&hl("rush")), "{}", markup);
}

#[test]
fn items_without_text_have_no_snippet_field() {
    let index = ScriptedIndex::scores(&[]);
    let ctx = context(index);
    assert_eq!(render_one(&ctx, make_item(9, "image", "An Image"), "gold"), None);
}

#[test]
fn tokens_from_the_index_are_used_verbatim() {
    let index = ScriptedIndex::scores(&[]).with_tokens(
        4,
        vec!["doc".into(), "an".into(), "old".into(), "mine".into(), "shaft".into()],
    );
    let ctx = context(index);
    let markup = render_one(&ctx, make_item(4, "doc", ""), "mine").unwrap();
    assert_eq!(
        markup,
        format!(r#"<div class="searchresult-snippet">an old {} shaft</div>"#, hl("mine"))
    );
}
