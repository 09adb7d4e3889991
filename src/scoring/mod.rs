// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking: how relevant each hit is, relative to the best hit.
//!
//! Raw index scores mean nothing to a reader. The normalizer rescales them per
//! query so the top hit reads 100% and everything else is a fraction of it.

pub mod ranking;

pub use ranking::RankingNormalizer;
