// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking normalization for one rendered page.
//!
//! On every page render the normalizer asks the index for the ranked rows of
//! the current query, enough of them to cover the page (`start + len + 1`).
//! The best raw score becomes the denominator: `ranking_for(rid)` is
//! `raw / best`, so the top hit is `1.0` and nothing exceeds it.
//!
//! The table is request-scoped. It is rebuilt by `update` and never shared.
//!
//! # Degradation
//!
//! A query the index cannot parse, or one that misses its deadline, leaves the
//! table empty. Every `ranking_for` is then `None` and renderers show nothing.
//! The page itself never fails because of ranking.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::contracts::check_ranking_normalized;
use crate::error::IndexError;
use crate::index::{query_with_timeout, FullTextIndex, RankedRow, WorkerLimit};
use crate::types::{ResultPage, Rid};

/// Denominator used when no rows came back: `highest` reads `1.0`.
const DEFAULT_TOP_SCORE: f64 = 100.0;

pub struct RankingNormalizer {
    index: Arc<dyn FullTextIndex>,
    timeout: Option<Duration>,
    workers: WorkerLimit,
    rankings: HashMap<Rid, f64>,
    top_score: f64,
}

impl RankingNormalizer {
    pub fn new(index: Arc<dyn FullTextIndex>, timeout: Option<Duration>) -> Self {
        RankingNormalizer {
            index,
            timeout,
            workers: WorkerLimit::default(),
            rankings: HashMap::new(),
            top_score: DEFAULT_TOP_SCORE,
        }
    }

    /// Share a worker limit with other normalizers over the same index.
    pub fn with_workers(mut self, workers: WorkerLimit) -> Self {
        self.workers = workers;
        self
    }

    /// Rebuild the ranking table for `query` over `page`.
    pub fn update(&mut self, query: &str, page: &ResultPage) {
        self.clear();
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let max_rows = page.max_rows();
        let rows = match query_with_timeout(&self.index, query, max_rows, self.timeout, &self.workers) {
            Ok(rows) => rows,
            Err(IndexError::Parse(reason)) => {
                debug!(query, %reason, "query did not parse, no rankings");
                return;
            }
            Err(e) => {
                warn!(query, error = %e, "ranking query failed, no rankings");
                return;
            }
        };
        self.load(&rows);
    }

    fn load(&mut self, rows: &[RankedRow]) {
        // Rows should arrive best-first; take the max anyway so a sloppy
        // index cannot push a ranking above 1.0.
        let top = rows.iter().map(|row| row.score).fold(f64::NEG_INFINITY, f64::max);
        if !(top.is_finite() && top > 0.0) {
            return;
        }
        self.top_score = top;
        self.rankings = rows.iter().map(|row| (row.rid, row.score)).collect();
        debug!(rows = rows.len(), top, "ranking table loaded");
    }

    fn clear(&mut self) {
        self.rankings.clear();
        self.top_score = DEFAULT_TOP_SCORE;
    }

    /// Best raw score divided by 100; `1.0` when the table is empty.
    pub fn highest(&self) -> f64 {
        self.top_score / 100.0
    }

    /// Relevance of `rid` relative to the best hit, in `[0, 1]`.
    ///
    /// `None` when the row is not in the table.
    pub fn ranking_for(&self, rid: Rid) -> Option<f64> {
        let raw = *self.rankings.get(&rid)?;
        let ranking = (raw / self.top_score).max(0.0);
        check_ranking_normalized(ranking);
        Some(ranking)
    }

    /// `ranking_for` as a percentage, for display.
    pub fn percentage_for(&self, rid: Rid) -> Option<f64> {
        self.ranking_for(rid).map(|ranking| ranking * 100.0)
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }
}
