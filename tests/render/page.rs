//! Whole pages through the default renderer table.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::common::{poem_corpus, result_field, schema};
use findkit::{
    Crumb, FieldKind, FieldValue, FindConfig, PageRenderer, RenderContext, RendererTable,
    ResultsSchema,
};

fn ctx() -> (RenderContext, findkit::ResultPage) {
    let (index, page) = poem_corpus();
    (RenderContext::new(FindConfig::default(), Arc::new(index)), page)
}

#[test]
fn fields_render_in_schema_order() {
    let (ctx, page) = ctx();
    let schema = schema(&[
        ("fulltext", FieldKind::FullText),
        ("link", FieldKind::Link),
        ("ranking", FieldKind::Ranking),
    ]);
    let mut renderer = PageRenderer::new(&schema, &RendererTable::default(), &ctx);
    let rendered = renderer.render_page(&page, "rain");

    let wheelbarrow = &rendered[2];
    let names: Vec<&str> = wheelbarrow.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["fulltext", "link", "ranking"]);
    assert_eq!(
        wheelbarrow.fields[1].markup,
        r#"<a href="/site/red_wheelbarrow" class="searchresult-link">The Red Wheelbarrow</a>"#
    );
    assert_eq!(
        wheelbarrow.fields[2].markup,
        r#"<span class="searchresult-ranking">100.0%</span>"#
    );
}

#[test]
fn hidden_and_empty_fields_are_left_out() {
    let (ctx, mut page) = ctx();
    page.items[0]
        .content
        .attributes
        .insert("keywords".into(), FieldValue::from("poe, raven"));

    let mut hidden = result_field("date", FieldKind::Date);
    hidden.public = false;
    let schema = ResultsSchema::new(vec![
        result_field("keywords", FieldKind::Field),
        result_field("thumbnail", FieldKind::Thumbnail),
        result_field("count", FieldKind::TotalResultCount),
        hidden,
    ])
    .unwrap();

    let mut renderer = PageRenderer::new(&schema, &RendererTable::default(), &ctx);
    let rendered = renderer.render_page(&page, "");
    assert_eq!(rendered[0].fields.len(), 1);
    assert_eq!(rendered[0].fields[0].name, "keywords");
    assert!(rendered[1].fields.is_empty());
}

#[test]
fn dates_breadcrumbs_and_metadata() {
    let (ctx, mut page) = ctx();
    let content = &mut page.items[1].content;
    content.publication_datetime = NaiveDate::from_ymd_opt(1920, 11, 6).and_then(|d| d.and_hms_opt(0, 0, 0));
    content.breadcrumbs = vec![
        Crumb { name: "Home".into(), url: "/".into() },
        Crumb { name: "Yeats".into(), url: "/yeats".into() },
        Crumb { name: "The Second Coming".into(), url: "/yeats/second_coming".into() },
    ];
    content
        .metadata
        .insert("poem:year".into(), FieldValue::from("1919"));

    let schema = schema(&[
        ("date", FieldKind::Date),
        ("breadcrumbs", FieldKind::Breadcrumbs),
        ("poem:year", FieldKind::Metadata),
    ]);
    let mut renderer = PageRenderer::new(&schema, &RendererTable::default(), &ctx);
    let rendered = renderer.render_page(&page, "");
    let fields = &rendered[1].fields;

    assert_eq!(fields[0].markup, r#"<span class="searchresult-date">06 nov 1920 00:00</span>"#);
    assert_eq!(
        fields[1].markup,
        r#"<span class="searchresult-breadcrumb"><a href="/">Home</a><span> &#183; </span><a href="/yeats">Yeats</a></span>"#
    );
    assert!(fields[2].markup.starts_with(r#"<span class="searchresult-field metadata-poem-year">"#));
    assert!(fields[2].markup.contains("1919"));
}

#[test]
fn rendered_items_serialize_for_templates() {
    let (ctx, page) = ctx();
    let schema = schema(&[("link", FieldKind::Link)]);
    let mut renderer = PageRenderer::new(&schema, &RendererTable::default(), &ctx);
    let rendered = renderer.render_page(&page, "");
    let json = serde_json::to_value(&rendered[0]).unwrap();
    assert_eq!(json["rid"], 1);
    assert_eq!(json["fields"][0]["kind"], "link");
}

#[test]
fn unusable_date_format_drops_dates_and_keeps_the_page() {
    let (index, mut page) = poem_corpus();
    let config = FindConfig {
        date_format: "%Q".to_string(),
        ..FindConfig::default()
    };
    let ctx = RenderContext::new(config, Arc::new(index));
    page.items[0].content.modification_datetime =
        NaiveDate::from_ymd_opt(1845, 1, 29).and_then(|d| d.and_hms_opt(0, 0, 0));

    let schema = schema(&[("date", FieldKind::Date), ("link", FieldKind::Link)]);
    let mut renderer = PageRenderer::new(&schema, &RendererTable::default(), &ctx);
    let rendered = renderer.render_page(&page, "raven");

    assert_eq!(rendered.len(), 3);
    let names: Vec<&str> = rendered[0].fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["link"]);
}
