//! Basket scoring and cumulative impact accounting.
//!
//! A basket save flows through four steps: the [`basket::BasketScorer`] resolves
//! barcodes against the [`catalog::ProductCatalog`], the [`basket::BasketStore`]
//! persists the scored record, the [`impact::ImpactLedger`] applies the basket to
//! the global running totals, and the [`impact::BadgeEvaluator`] awards any
//! newly crossed achievement thresholds.

pub mod basket;
pub mod catalog;
pub mod config;
pub mod error;
pub mod goals;
pub mod history;
pub mod impact;
pub mod memory;
pub mod storage;
pub mod telemetry;
