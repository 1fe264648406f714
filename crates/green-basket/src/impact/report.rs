use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::warn;

use super::badges::{BadgeAward, BadgeStore};
use super::ledger::ImpactLedger;
use crate::basket::BasketStore;
use crate::goals::Goal;
use crate::storage::StorageError;

/// Stats payload served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactStats {
    pub total_carbon_saved: f64,
    pub total_baskets: u64,
    pub total_score: f64,
    pub average_score: String,
    pub weekly_report: String,
    pub active_goals: Vec<Goal>,
}

pub fn weekly_report_sentence(weekly_carbon: f64) -> String {
    format!("You reduced your carbon footprint by {weekly_carbon:.1} kg this week")
}

/// Read-only aggregation over the ledger, basket history, and awards.
pub struct ImpactReporter {
    ledger: ImpactLedger,
    baskets: Arc<dyn BasketStore>,
    badges: Arc<dyn BadgeStore>,
    weekly_window: Duration,
}

impl ImpactReporter {
    pub fn new(
        ledger: ImpactLedger,
        baskets: Arc<dyn BasketStore>,
        badges: Arc<dyn BadgeStore>,
        weekly_window: Duration,
    ) -> Self {
        Self {
            ledger,
            baskets,
            badges,
            weekly_window,
        }
    }

    pub fn stats(&self, now: DateTime<Utc>) -> Result<ImpactStats, StorageError> {
        let snapshot = self.ledger.snapshot()?;
        let weekly_carbon = self.weekly_carbon(now);

        Ok(ImpactStats {
            total_carbon_saved: snapshot.total_carbon_saved,
            total_baskets: snapshot.total_baskets,
            total_score: snapshot.total_score,
            average_score: format!("{:.1}", snapshot.average_score()),
            weekly_report: weekly_report_sentence(weekly_carbon),
            active_goals: Vec::new(),
        })
    }

    pub fn badges(&self) -> Result<Vec<BadgeAward>, StorageError> {
        self.badges.list()
    }

    /// Carbon saved by baskets created inside the trailing window. A failed
    /// history read reports zero rather than failing the whole stats view.
    fn weekly_carbon(&self, now: DateTime<Utc>) -> f64 {
        let since = now
            .checked_sub_signed(self.weekly_window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        match self.baskets.list_since(since) {
            Ok(baskets) => baskets
                .iter()
                .fold(0.0, |total, basket| total + basket.total_carbon()),
            Err(err) => {
                warn!(error = %err, "weekly basket window unavailable");
                0.0
            }
        }
    }
}
