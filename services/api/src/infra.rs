use chrono::{DateTime, Duration, Utc};
use green_basket::basket::BasketService;
use green_basket::catalog::CatalogImporter;
use green_basket::config::ImpactConfig;
use green_basket::error::AppError;
use green_basket::impact::{BadgeEvaluator, ImpactLedger, ImpactReporter};
use green_basket::memory::{
    InMemoryBadgeStore, InMemoryBasketStore, InMemoryCatalog, InMemoryGoalStore,
    InMemoryHistoryStore, InMemoryLedgerStore,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stores shared by every router.
pub(crate) struct Backend {
    pub(crate) catalog: Arc<InMemoryCatalog>,
    pub(crate) baskets: Arc<InMemoryBasketStore>,
    pub(crate) ledger: ImpactLedger,
    pub(crate) badges: Arc<InMemoryBadgeStore>,
    pub(crate) goals: Arc<InMemoryGoalStore>,
    pub(crate) history: Arc<InMemoryHistoryStore>,
    weekly_window: Duration,
}

impl Backend {
    pub(crate) fn new(impact: &ImpactConfig) -> Self {
        Self {
            catalog: Arc::new(InMemoryCatalog::default()),
            baskets: Arc::new(InMemoryBasketStore::default()),
            ledger: ImpactLedger::new(Arc::new(InMemoryLedgerStore::default())),
            badges: Arc::new(InMemoryBadgeStore::default()),
            goals: Arc::new(InMemoryGoalStore::default()),
            history: Arc::new(InMemoryHistoryStore::default()),
            weekly_window: impact.weekly_window(),
        }
    }

    pub(crate) fn seed_catalog(&self, path: &Path, now: DateTime<Utc>) -> Result<usize, AppError> {
        let records = CatalogImporter::from_path(path, now)?;
        let seeded = CatalogImporter::seed(self.catalog.as_ref(), records)?;
        info!(path = %path.display(), products = seeded, "catalog export loaded");
        Ok(seeded)
    }

    pub(crate) fn basket_service(&self) -> BasketService {
        BasketService::new(
            self.catalog.clone(),
            self.baskets.clone(),
            self.ledger.clone(),
            BadgeEvaluator::new(self.badges.clone()),
        )
    }

    pub(crate) fn impact_reporter(&self) -> ImpactReporter {
        ImpactReporter::new(
            self.ledger.clone(),
            self.baskets.clone(),
            self.badges.clone(),
            self.weekly_window,
        )
    }
}
