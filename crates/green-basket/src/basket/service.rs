use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::domain::{Basket, BasketDraft, ScoredBasket};
use super::repository::BasketStore;
use super::scorer::BasketScorer;
use crate::catalog::ProductCatalog;
use crate::impact::{BadgeAward, BadgeEvaluator, ImpactLedger};
use crate::storage::StorageError;

/// Service composing the scorer, basket store, ledger, and badge evaluator.
pub struct BasketService {
    scorer: BasketScorer,
    baskets: Arc<dyn BasketStore>,
    ledger: ImpactLedger,
    badges: BadgeEvaluator,
}

/// What a successful save produced.
///
/// `warnings` lists post-commit steps (ledger, badges) that did not complete;
/// the basket itself is persisted whenever an outcome is returned.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub basket: Basket,
    pub badges_awarded: Vec<BadgeAward>,
    pub warnings: Vec<String>,
}

impl BasketService {
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        baskets: Arc<dyn BasketStore>,
        ledger: ImpactLedger,
        badges: BadgeEvaluator,
    ) -> Self {
        Self {
            scorer: BasketScorer::new(catalog),
            baskets,
            ledger,
            badges,
        }
    }

    /// Score barcodes without persisting anything.
    pub fn analyze(&self, barcodes: &[String]) -> ScoredBasket {
        self.scorer.score(barcodes)
    }

    /// Score and persist a basket, then fold it into the impact ledger and
    /// award any badges the new totals unlock.
    pub fn save(
        &self,
        barcodes: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<SaveOutcome, BasketServiceError> {
        let score = self.scorer.score(&barcodes);

        let basket = self
            .baskets
            .save(BasketDraft {
                barcodes,
                score,
                created_at: now,
            })
            .map_err(|err| {
                error!(error = %err, "basket write failed");
                err
            })?;

        info!(
            basket_id = %basket.id,
            items = basket.score.total_items,
            total_carbon = basket.score.total_carbon,
            avg_health_score = basket.score.avg_health_score,
            "basket saved"
        );

        let mut warnings = Vec::new();

        if let Err(err) = self.ledger.apply_basket(&basket, now) {
            error!(basket_id = %basket.id, error = %err, "impact ledger not updated for saved basket");
            warnings.push(format!("impact totals were not updated: {err}"));
        }

        let badges_awarded = match self.ledger.snapshot() {
            Ok(snapshot) => {
                let evaluation = self.badges.evaluate_and_award(&snapshot, now);
                for (badge_id, err) in &evaluation.failures {
                    warnings.push(format!("badge {badge_id} could not be awarded: {err}"));
                }
                evaluation.awarded
            }
            Err(err) => {
                warn!(basket_id = %basket.id, error = %err, "skipping badge evaluation");
                warnings.push(format!("badges were not evaluated: {err}"));
                Vec::new()
            }
        };

        Ok(SaveOutcome {
            basket,
            badges_awarded,
            warnings,
        })
    }

    /// Saved baskets, newest first.
    pub fn list(&self) -> Result<Vec<Basket>, BasketServiceError> {
        Ok(self.baskets.list_recent()?)
    }
}

/// Input rejected before any lookup or write happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("malformed basket payload: {0}")]
    MalformedPayload(String),
}

/// Error raised by the basket service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BasketServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
