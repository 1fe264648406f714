//! Process-local store implementations.
//!
//! Each store keeps its records behind a single mutex, so every trait call is
//! one critical section. That is what makes the ledger increment atomic and
//! the badge uniqueness check race-free within a process.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::basket::{Basket, BasketDraft, BasketId, BasketStore};
use crate::catalog::{ProductCatalog, ProductRecord};
use crate::goals::{Goal, GoalId, GoalStore, NewGoal};
use crate::history::{HistoryStore, ScanEntry};
use crate::impact::{
    BadgeAward, BadgeStore, BadgeStoreError, LedgerIncrement, LedgerSnapshot, LedgerStore,
};
use crate::storage::StorageError;

fn lock<'a, T>(
    mutex: &'a Mutex<T>,
    collection: &'static str,
) -> Result<MutexGuard<'a, T>, StorageError> {
    mutex.lock().map_err(|_| StorageError::poisoned(collection))
}

#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    products: Arc<Mutex<HashMap<String, ProductRecord>>>,
}

impl InMemoryCatalog {
    pub fn with_products(products: impl IntoIterator<Item = ProductRecord>) -> Self {
        let products = products
            .into_iter()
            .map(|record| (record.barcode.clone(), record))
            .collect();
        Self {
            products: Arc::new(Mutex::new(products)),
        }
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn fetch(&self, barcode: &str) -> Result<Option<ProductRecord>, StorageError> {
        let guard = lock(&self.products, "products")?;
        Ok(guard.get(barcode).cloned())
    }

    fn list(&self) -> Result<Vec<ProductRecord>, StorageError> {
        let guard = lock(&self.products, "products")?;
        let mut products: Vec<_> = guard.values().cloned().collect();
        products.sort_by(|a, b| a.barcode.cmp(&b.barcode));
        Ok(products)
    }

    fn upsert(&self, record: ProductRecord) -> Result<(), StorageError> {
        let mut guard = lock(&self.products, "products")?;
        guard.insert(record.barcode.clone(), record);
        Ok(())
    }
}

#[derive(Default)]
struct BasketLog {
    next_sequence: u64,
    records: Vec<Basket>,
}

#[derive(Default, Clone)]
pub struct InMemoryBasketStore {
    log: Arc<Mutex<BasketLog>>,
}

impl BasketStore for InMemoryBasketStore {
    fn save(&self, draft: BasketDraft) -> Result<Basket, StorageError> {
        let mut guard = lock(&self.log, "baskets")?;
        guard.next_sequence += 1;
        let id = BasketId(format!("basket-{:06}", guard.next_sequence));
        let basket = Basket::from_draft(id, draft);
        guard.records.push(basket.clone());
        Ok(basket)
    }

    fn list_recent(&self) -> Result<Vec<Basket>, StorageError> {
        let guard = lock(&self.log, "baskets")?;
        // Reverse first so equal timestamps keep newest-inserted first under the stable sort.
        let mut baskets: Vec<_> = guard.records.iter().rev().cloned().collect();
        baskets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(baskets)
    }

    fn list_since(&self, since: DateTime<Utc>) -> Result<Vec<Basket>, StorageError> {
        let guard = lock(&self.log, "baskets")?;
        Ok(guard
            .records
            .iter()
            .filter(|basket| basket.created_at >= since)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryLedgerStore {
    record: Arc<Mutex<Option<LedgerSnapshot>>>,
}

impl LedgerStore for InMemoryLedgerStore {
    fn increment(
        &self,
        increment: LedgerIncrement,
        now: DateTime<Utc>,
    ) -> Result<LedgerSnapshot, StorageError> {
        let mut guard = lock(&self.record, "impact")?;
        let ledger = guard.get_or_insert_with(|| LedgerSnapshot {
            created_at: Some(now),
            ..LedgerSnapshot::default()
        });
        ledger.total_baskets += increment.baskets;
        ledger.total_carbon_saved += increment.carbon_saved;
        ledger.total_score += increment.score;
        Ok(ledger.clone())
    }

    fn load(&self) -> Result<Option<LedgerSnapshot>, StorageError> {
        let guard = lock(&self.record, "impact")?;
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryBadgeStore {
    awards: Arc<Mutex<BTreeMap<u8, BadgeAward>>>,
}

impl BadgeStore for InMemoryBadgeStore {
    fn exists(&self, badge_id: u8) -> Result<bool, StorageError> {
        let guard = lock(&self.awards, "user_badges")?;
        Ok(guard.contains_key(&badge_id))
    }

    fn insert(&self, award: BadgeAward) -> Result<(), BadgeStoreError> {
        let mut guard = lock(&self.awards, "user_badges")?;
        if guard.contains_key(&award.badge_id) {
            return Err(BadgeStoreError::AlreadyAwarded(award.badge_id));
        }
        guard.insert(award.badge_id, award);
        Ok(())
    }

    fn list(&self) -> Result<Vec<BadgeAward>, StorageError> {
        let guard = lock(&self.awards, "user_badges")?;
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default)]
struct GoalLog {
    next_sequence: u64,
    goals: Vec<Goal>,
}

#[derive(Default, Clone)]
pub struct InMemoryGoalStore {
    log: Arc<Mutex<GoalLog>>,
}

impl GoalStore for InMemoryGoalStore {
    fn create(&self, goal: NewGoal, now: DateTime<Utc>) -> Result<Goal, StorageError> {
        let mut guard = lock(&self.log, "goals")?;
        guard.next_sequence += 1;
        let goal = Goal {
            id: GoalId(format!("goal-{:06}", guard.next_sequence)),
            goal_type: goal.goal_type,
            description: goal.description,
            target_value: goal.target_value,
            progress: goal.progress,
            created_at: now,
        };
        guard.goals.push(goal.clone());
        Ok(goal)
    }

    fn list(&self) -> Result<Vec<Goal>, StorageError> {
        let guard = lock(&self.log, "goals")?;
        Ok(guard.goals.clone())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryHistoryStore {
    entries: Arc<Mutex<Vec<ScanEntry>>>,
}

impl HistoryStore for InMemoryHistoryStore {
    fn record(&self, entry: ScanEntry) -> Result<(), StorageError> {
        lock(&self.entries, "history")?.push(entry);
        Ok(())
    }

    fn list(&self) -> Result<Vec<ScanEntry>, StorageError> {
        Ok(lock(&self.entries, "history")?.clone())
    }

    fn clear(&self) -> Result<usize, StorageError> {
        let mut guard = lock(&self.entries, "history")?;
        let removed = guard.len();
        guard.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::ScoredBasket;
    use chrono::Duration;

    fn draft(created_at: DateTime<Utc>) -> BasketDraft {
        BasketDraft {
            barcodes: Vec::new(),
            score: ScoredBasket::empty(),
            created_at,
        }
    }

    #[test]
    fn basket_ids_are_sequential() {
        let store = InMemoryBasketStore::default();
        let now = Utc::now();
        let first = store.save(draft(now)).expect("save");
        let second = store.save(draft(now)).expect("save");

        assert_eq!(first.id.0, "basket-000001");
        assert_eq!(second.id.0, "basket-000002");
    }

    #[test]
    fn list_recent_orders_newest_first_with_insertion_tiebreak() {
        let store = InMemoryBasketStore::default();
        let now = Utc::now();
        let older = store.save(draft(now - Duration::hours(1))).expect("save");
        let tie_a = store.save(draft(now)).expect("save");
        let tie_b = store.save(draft(now)).expect("save");

        let ids: Vec<_> = store
            .list_recent()
            .expect("list")
            .into_iter()
            .map(|basket| basket.id)
            .collect();
        assert_eq!(ids, vec![tie_b.id, tie_a.id, older.id]);
    }

    #[test]
    fn list_since_is_inclusive() {
        let store = InMemoryBasketStore::default();
        let now = Utc::now();
        store.save(draft(now - Duration::days(8))).expect("save");
        let boundary = store.save(draft(now - Duration::days(7))).expect("save");

        let recent = store.list_since(now - Duration::days(7)).expect("list");
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, boundary.id);
    }

    #[test]
    fn badge_store_rejects_duplicates() {
        let store = InMemoryBadgeStore::default();
        let badge = crate::impact::badge_by_id(1).expect("badge exists");
        let award = BadgeAward {
            badge_id: 1,
            badge,
            earned_at: Utc::now(),
        };

        store.insert(award.clone()).expect("first insert");
        assert_eq!(store.insert(award), Err(BadgeStoreError::AlreadyAwarded(1)));
        assert_eq!(store.list().expect("list").len(), 1);
    }
}
