use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::ProductFacts;

/// Carbon estimate per eco-score point below 100, in kilograms.
pub const CARBON_PER_MISSING_POINT: f64 = 0.05;

/// Identifier wrapper for persisted baskets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasketId(pub String);

impl fmt::Display for BasketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One scanned product with its derived estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub barcode: String,
    pub product_name: String,
    pub carbon: f64,
    pub health_score: u8,
}

impl ScoredItem {
    pub fn from_facts(facts: ProductFacts) -> Self {
        let health_score = facts.eco_score.min(100);
        Self {
            barcode: facts.identifier,
            product_name: facts.display_name,
            carbon: carbon_estimate(health_score),
            health_score,
        }
    }
}

pub fn carbon_estimate(health_score: u8) -> f64 {
    f64::from(100 - health_score.min(100)) * CARBON_PER_MISSING_POINT
}

/// Aggregated assessment of a list of scanned products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBasket {
    pub total_items: usize,
    pub total_carbon: f64,
    pub avg_health_score: u32,
    pub items: Vec<ScoredItem>,
}

impl ScoredBasket {
    /// Totals accumulate in item order so repeated scoring is bit-for-bit stable.
    pub fn from_items(items: Vec<ScoredItem>) -> Self {
        let mut total_carbon = 0.0;
        let mut total_health: u64 = 0;
        for item in &items {
            total_carbon += item.carbon;
            total_health += u64::from(item.health_score);
        }

        let avg_health_score = if items.is_empty() {
            0
        } else {
            (total_health / items.len() as u64) as u32
        };

        Self {
            total_items: items.len(),
            total_carbon,
            avg_health_score,
            items,
        }
    }

    pub fn empty() -> Self {
        Self::from_items(Vec::new())
    }
}

/// A scored basket awaiting persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketDraft {
    pub barcodes: Vec<String>,
    pub score: ScoredBasket,
    pub created_at: DateTime<Utc>,
}

/// Persisted, immutable basket record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub id: BasketId,
    pub barcodes: Vec<String>,
    #[serde(flatten)]
    pub score: ScoredBasket,
    pub created_at: DateTime<Utc>,
}

impl Basket {
    pub fn from_draft(id: BasketId, draft: BasketDraft) -> Self {
        Self {
            id,
            barcodes: draft.barcodes,
            score: draft.score,
            created_at: draft.created_at,
        }
    }

    pub fn total_carbon(&self) -> f64 {
        self.score.total_carbon
    }

    pub fn avg_health_score(&self) -> u32 {
        self.score.avg_health_score
    }
}
