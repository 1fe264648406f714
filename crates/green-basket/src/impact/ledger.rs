use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::basket::Basket;
use crate::storage::StorageError;

/// Point-in-time copy of the global running totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub total_baskets: u64,
    pub total_carbon_saved: f64,
    pub total_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl LedgerSnapshot {
    pub fn average_score(&self) -> f64 {
        if self.total_baskets == 0 {
            0.0
        } else {
            self.total_score / self.total_baskets as f64
        }
    }
}

/// Contribution of a single basket to the running totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerIncrement {
    pub baskets: u64,
    pub carbon_saved: f64,
    pub score: f64,
}

impl LedgerIncrement {
    pub fn for_basket(basket: &Basket) -> Self {
        Self {
            baskets: 1,
            carbon_saved: basket.total_carbon(),
            score: f64::from(basket.avg_health_score()),
        }
    }
}

/// Backing store for the singleton ledger record.
///
/// `increment` must be a single atomic upsert: implementations may not read
/// the current totals and write them back in separate steps.
pub trait LedgerStore: Send + Sync {
    /// Adds the increment to the record, creating it with `created_at = now`
    /// if none exists, and returns the totals as they stand after the write.
    fn increment(
        &self,
        increment: LedgerIncrement,
        now: DateTime<Utc>,
    ) -> Result<LedgerSnapshot, StorageError>;
    fn load(&self) -> Result<Option<LedgerSnapshot>, StorageError>;
}

/// Named accessor for the one global impact record.
#[derive(Clone)]
pub struct ImpactLedger {
    store: Arc<dyn LedgerStore>,
}

impl ImpactLedger {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub fn apply_basket(
        &self,
        basket: &Basket,
        now: DateTime<Utc>,
    ) -> Result<LedgerSnapshot, StorageError> {
        self.store.increment(LedgerIncrement::for_basket(basket), now)
    }

    /// Current totals, or a zeroed ledger when nothing was ever saved.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, StorageError> {
        Ok(self.store.load()?.unwrap_or_default())
    }

    pub fn average_score(&self) -> Result<f64, StorageError> {
        Ok(self.snapshot()?.average_score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::{BasketId, ScoredBasket, ScoredItem};
    use crate::memory::InMemoryLedgerStore;

    fn basket(carbon: f64, health: u8) -> Basket {
        let item = ScoredItem {
            barcode: "111".to_string(),
            product_name: String::new(),
            carbon,
            health_score: health,
        };
        Basket {
            id: BasketId("basket-test".to_string()),
            barcodes: vec!["111".to_string()],
            score: ScoredBasket::from_items(vec![item]),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn snapshot_is_zeroed_before_first_save() {
        let ledger = ImpactLedger::new(Arc::new(InMemoryLedgerStore::default()));
        let snapshot = ledger.snapshot().expect("snapshot loads");

        assert_eq!(snapshot, LedgerSnapshot::default());
        assert_eq!(snapshot.average_score(), 0.0);
    }

    #[test]
    fn apply_basket_creates_then_accumulates() {
        let ledger = ImpactLedger::new(Arc::new(InMemoryLedgerStore::default()));
        let first_at = Utc::now();

        let after_first = ledger
            .apply_basket(&basket(1.0, 80), first_at)
            .expect("first apply");
        assert_eq!(after_first.total_baskets, 1);
        assert_eq!(after_first.created_at, Some(first_at));

        let after_second = ledger
            .apply_basket(&basket(2.5, 50), first_at + chrono::Duration::minutes(5))
            .expect("second apply");
        assert_eq!(after_second.total_baskets, 2);
        assert_eq!(after_second.total_carbon_saved, 1.0 + 2.5);
        assert_eq!(after_second.total_score, 130.0);
        assert_eq!(after_second.created_at, Some(first_at));
        assert_eq!(ledger.average_score().expect("average"), 65.0);
    }

    #[test]
    fn concurrent_applies_never_lose_increments() {
        let ledger = ImpactLedger::new(Arc::new(InMemoryLedgerStore::default()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = ledger.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        ledger
                            .apply_basket(&basket(1.0, 60), Utc::now())
                            .expect("apply succeeds");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker finished");
        }

        let snapshot = ledger.snapshot().expect("snapshot loads");
        assert_eq!(snapshot.total_baskets, 200);
        assert_eq!(snapshot.total_carbon_saved, 200.0);
        assert_eq!(snapshot.total_score, 12_000.0);
    }
}
