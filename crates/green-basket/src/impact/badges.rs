use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::ledger::LedgerSnapshot;
use crate::storage::StorageError;

/// Achievement definition shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
}

/// Threshold a ledger snapshot must meet for a badge to unlock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BadgeRule {
    AnySave,
    CarbonSavedAtLeast(f64),
    BasketsAtLeast(u64),
    ScoreAtLeast(f64),
}

impl BadgeRule {
    pub fn holds(self, snapshot: &LedgerSnapshot) -> bool {
        match self {
            Self::AnySave => true,
            Self::CarbonSavedAtLeast(threshold) => snapshot.total_carbon_saved >= threshold,
            Self::BasketsAtLeast(threshold) => snapshot.total_baskets >= threshold,
            Self::ScoreAtLeast(threshold) => snapshot.total_score >= threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeDefinition {
    pub badge: Badge,
    pub rule: BadgeRule,
}

/// Fixed catalog, in evaluation order.
pub const BADGE_CATALOG: [BadgeDefinition; 5] = [
    BadgeDefinition {
        badge: Badge {
            id: 1,
            name: "First Basket",
            description: "Saved your first basket",
        },
        rule: BadgeRule::AnySave,
    },
    BadgeDefinition {
        badge: Badge {
            id: 2,
            name: "Carbon Saver",
            description: "Saved 10kg CO2 or more",
        },
        rule: BadgeRule::CarbonSavedAtLeast(10.0),
    },
    BadgeDefinition {
        badge: Badge {
            id: 3,
            name: "Super Saver",
            description: "Saved 100kg CO2 or more",
        },
        rule: BadgeRule::CarbonSavedAtLeast(100.0),
    },
    BadgeDefinition {
        badge: Badge {
            id: 4,
            name: "Consistent Shopper",
            description: "Saved 10 baskets",
        },
        rule: BadgeRule::BasketsAtLeast(10),
    },
    BadgeDefinition {
        badge: Badge {
            id: 5,
            name: "Healthy Shopper",
            description: "Accumulated 500+ health score",
        },
        rule: BadgeRule::ScoreAtLeast(500.0),
    },
];

pub fn badge_by_id(id: u8) -> Option<Badge> {
    BADGE_CATALOG
        .iter()
        .find(|definition| definition.badge.id == id)
        .map(|definition| definition.badge)
}

/// Record of a badge having been earned. At most one exists per badge id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeAward {
    pub badge_id: u8,
    pub badge: Badge,
    pub earned_at: DateTime<Utc>,
}

/// Storage for awards. `insert` must reject a second award for the same id.
pub trait BadgeStore: Send + Sync {
    fn exists(&self, badge_id: u8) -> Result<bool, StorageError>;
    fn insert(&self, award: BadgeAward) -> Result<(), BadgeStoreError>;
    /// All awards ordered by badge id.
    fn list(&self) -> Result<Vec<BadgeAward>, StorageError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BadgeStoreError {
    #[error("badge {0} already awarded")]
    AlreadyAwarded(u8),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of one evaluation pass.
#[derive(Debug, Default)]
pub struct BadgeEvaluation {
    pub awarded: Vec<BadgeAward>,
    pub failures: Vec<(u8, StorageError)>,
}

/// Awards newly unlocked badges against a fresh ledger snapshot.
#[derive(Clone)]
pub struct BadgeEvaluator {
    store: Arc<dyn BadgeStore>,
}

impl BadgeEvaluator {
    pub fn new(store: Arc<dyn BadgeStore>) -> Self {
        Self { store }
    }

    /// Best effort: a failure on one badge is recorded and the pass continues.
    /// Losing an insert race to a concurrent save is not a failure.
    pub fn evaluate_and_award(
        &self,
        snapshot: &LedgerSnapshot,
        now: DateTime<Utc>,
    ) -> BadgeEvaluation {
        let mut evaluation = BadgeEvaluation::default();

        for definition in BADGE_CATALOG
            .iter()
            .filter(|definition| definition.rule.holds(snapshot))
        {
            let badge = definition.badge;
            match self.award_once(badge, now) {
                Ok(Some(award)) => {
                    info!(badge_id = badge.id, badge = badge.name, "badge awarded");
                    evaluation.awarded.push(award);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(badge_id = badge.id, error = %err, "badge award failed");
                    evaluation.failures.push((badge.id, err));
                }
            }
        }

        evaluation
    }

    pub fn awards(&self) -> Result<Vec<BadgeAward>, StorageError> {
        self.store.list()
    }

    fn award_once(
        &self,
        badge: Badge,
        now: DateTime<Utc>,
    ) -> Result<Option<BadgeAward>, StorageError> {
        if self.store.exists(badge.id)? {
            return Ok(None);
        }

        let award = BadgeAward {
            badge_id: badge.id,
            badge,
            earned_at: now,
        };
        match self.store.insert(award.clone()) {
            Ok(()) => Ok(Some(award)),
            Err(BadgeStoreError::AlreadyAwarded(id)) => {
                debug!(badge_id = id, "badge awarded concurrently");
                Ok(None)
            }
            Err(BadgeStoreError::Storage(err)) => Err(err),
        }
    }
}
