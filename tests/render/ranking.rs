//! Ranking normalization against index doubles.

use std::sync::Arc;
use std::time::Duration;

use crate::common::{make_item, schema, ScriptedIndex};
use findkit::{
    FieldKind, FindConfig, FullTextIndex, IndexData, IndexError, PageRenderer, RankedRow,
    RankingNormalizer, RenderContext, RendererTable, ResultPage, Rid,
};

fn page(start: usize, n: u64) -> ResultPage {
    ResultPage::new(start, (1..=n).map(|rid| make_item(rid, "x", "X")).collect())
}

#[test]
fn rankings_are_relative_to_the_best_raw_score() {
    let index = Arc::new(ScriptedIndex::scores(&[(1, 80.0), (2, 40.0)]));
    let mut normalizer = RankingNormalizer::new(index, None);
    normalizer.update("gold", &page(0, 2));

    assert!((normalizer.highest() - 0.8).abs() < 1e-12);
    assert_eq!(normalizer.ranking_for(Rid(1)), Some(1.0));
    assert_eq!(normalizer.ranking_for(Rid(2)), Some(0.5));
}

#[test]
fn the_index_is_asked_for_one_row_past_the_page() {
    let index = Arc::new(ScriptedIndex::scores(&[(1, 1.0)]));
    let mut normalizer = RankingNormalizer::new(index.clone(), None);
    normalizer.update("gold", &page(10, 5));
    assert_eq!(*index.asked.lock().unwrap(), vec![("gold".to_string(), 16)]);
}

#[test]
fn parse_errors_leave_no_rankings() {
    let index = Arc::new(ScriptedIndex::new(Err(IndexError::Parse("dangling AND".into()))));
    let mut normalizer = RankingNormalizer::new(index, None);
    normalizer.update("gold AND", &page(0, 3));
    assert!(normalizer.is_empty());
    for rid in 1..=3 {
        assert_eq!(normalizer.ranking_for(Rid(rid)), None);
    }
}

#[test]
fn each_update_replaces_the_previous_table() {
    let index = Arc::new(ScriptedIndex::scores(&[(1, 5.0)]));
    let mut normalizer = RankingNormalizer::new(index, None);
    normalizer.update("gold", &page(0, 1));
    assert_eq!(normalizer.len(), 1);
    normalizer.update("", &page(0, 1));
    assert!(normalizer.is_empty());
}

struct Sleepy;

impl FullTextIndex for Sleepy {
    fn query(&self, _query: &str, _max_rows: usize) -> Result<Vec<RankedRow>, IndexError> {
        std::thread::sleep(Duration::from_millis(400));
        Ok(vec![RankedRow {
            rid: Rid(1),
            score: 1.0,
        }])
    }

    fn index_data(&self, _rid: Rid) -> Option<IndexData> {
        None
    }
}

#[test]
fn slow_index_times_out_into_no_rankings() {
    let mut normalizer = RankingNormalizer::new(Arc::new(Sleepy), Some(Duration::from_millis(10)));
    normalizer.update("gold", &page(0, 1));
    assert!(normalizer.is_empty());
    assert_eq!(normalizer.highest(), 1.0);
}

#[test]
fn renders_sharing_a_context_share_the_worker_limit() {
    let config = FindConfig {
        query_timeout_ms: Some(5),
        max_pending_queries: 1,
        ..FindConfig::default()
    };
    let ctx = RenderContext::new(config, Arc::new(Sleepy));
    let schema = schema(&[("ranking", FieldKind::Ranking)]);

    for _ in 0..3 {
        let mut renderer = PageRenderer::new(&schema, &RendererTable::default(), &ctx);
        let rendered = renderer.render_page(&page(0, 1), "gold");
        assert!(rendered[0].fields.is_empty());
        assert!(ctx.workers.pending() <= 1);
    }
}
