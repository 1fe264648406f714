use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::basket::{Basket, BasketDraft, BasketService, BasketStore};
use crate::catalog::{ProductCatalog, ProductRecord};
use crate::impact::{
    BadgeAward, BadgeEvaluator, BadgeStore, BadgeStoreError, ImpactLedger, ImpactReporter,
    LedgerIncrement, LedgerSnapshot, LedgerStore,
};
use crate::memory::{InMemoryBadgeStore, InMemoryBasketStore, InMemoryCatalog, InMemoryLedgerStore};
use crate::storage::StorageError;

pub(super) fn product(barcode: &str, name: &str, eco_score: u8) -> ProductRecord {
    ProductRecord {
        barcode: barcode.to_string(),
        name: name.to_string(),
        eco_score,
        brand: None,
        description: None,
        image_url: None,
        created_at: None,
    }
}

/// `111` scores 80 (1.0 kg), `222` scores 20 (4.0 kg), `333` scores 100 (0 kg).
pub(super) fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::with_products([
        product("111", "Oat Milk", 80),
        product("222", "Beef Mince", 20),
        product("333", "Tap Water", 100),
    ])
}

pub(super) fn barcodes(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|code| code.to_string()).collect()
}

pub(super) fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub(super) struct Harness {
    pub(super) service: BasketService,
    pub(super) baskets: Arc<InMemoryBasketStore>,
    pub(super) ledger: ImpactLedger,
    pub(super) badges: Arc<InMemoryBadgeStore>,
}

impl Harness {
    pub(super) fn reporter(&self) -> ImpactReporter {
        ImpactReporter::new(
            self.ledger.clone(),
            self.baskets.clone(),
            self.badges.clone(),
            chrono::Duration::days(7),
        )
    }

    pub(super) fn badge_ids(&self) -> Vec<u8> {
        self.badges
            .list()
            .expect("badge list")
            .into_iter()
            .map(|award| award.badge_id)
            .collect()
    }
}

pub(super) fn build_harness() -> Harness {
    let baskets = Arc::new(InMemoryBasketStore::default());
    let ledger = ImpactLedger::new(Arc::new(InMemoryLedgerStore::default()));
    let badges = Arc::new(InMemoryBadgeStore::default());
    let service = BasketService::new(
        Arc::new(catalog()),
        baskets.clone(),
        ledger.clone(),
        BadgeEvaluator::new(badges.clone()),
    );
    Harness {
        service,
        baskets,
        ledger,
        badges,
    }
}

pub(super) fn build_service_with(
    catalog: Arc<dyn ProductCatalog>,
    baskets: Arc<dyn BasketStore>,
    ledger: Arc<dyn LedgerStore>,
    badges: Arc<dyn BadgeStore>,
) -> BasketService {
    BasketService::new(
        catalog,
        baskets,
        ImpactLedger::new(ledger),
        BadgeEvaluator::new(badges),
    )
}

fn offline() -> StorageError {
    StorageError::Unavailable("database offline".to_string())
}

pub(super) struct UnavailableCatalog;

impl ProductCatalog for UnavailableCatalog {
    fn fetch(&self, _barcode: &str) -> Result<Option<ProductRecord>, StorageError> {
        Err(offline())
    }

    fn list(&self) -> Result<Vec<ProductRecord>, StorageError> {
        Err(offline())
    }

    fn upsert(&self, _record: ProductRecord) -> Result<(), StorageError> {
        Err(offline())
    }
}

pub(super) struct UnavailableBasketStore;

impl BasketStore for UnavailableBasketStore {
    fn save(&self, _draft: BasketDraft) -> Result<Basket, StorageError> {
        Err(offline())
    }

    fn list_recent(&self) -> Result<Vec<Basket>, StorageError> {
        Err(offline())
    }

    fn list_since(&self, _since: DateTime<Utc>) -> Result<Vec<Basket>, StorageError> {
        Err(offline())
    }
}

pub(super) struct UnavailableLedgerStore;

impl LedgerStore for UnavailableLedgerStore {
    fn increment(
        &self,
        _increment: LedgerIncrement,
        _now: DateTime<Utc>,
    ) -> Result<LedgerSnapshot, StorageError> {
        Err(offline())
    }

    fn load(&self) -> Result<Option<LedgerSnapshot>, StorageError> {
        Err(offline())
    }
}

pub(super) struct UnavailableBadgeStore;

impl BadgeStore for UnavailableBadgeStore {
    fn exists(&self, _badge_id: u8) -> Result<bool, StorageError> {
        Err(offline())
    }

    fn insert(&self, _award: BadgeAward) -> Result<(), BadgeStoreError> {
        Err(offline().into())
    }

    fn list(&self) -> Result<Vec<BadgeAward>, StorageError> {
        Err(offline())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
