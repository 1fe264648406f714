//! Cumulative impact accounting: the global ledger, achievement badges, and
//! the read-side stats view.

pub mod badges;
pub mod ledger;
pub mod report;
pub mod router;

pub use badges::{
    badge_by_id, Badge, BadgeAward, BadgeDefinition, BadgeEvaluation, BadgeEvaluator, BadgeRule,
    BadgeStore, BadgeStoreError, BADGE_CATALOG,
};
pub use ledger::{ImpactLedger, LedgerIncrement, LedgerSnapshot, LedgerStore};
pub use report::{weekly_report_sentence, ImpactReporter, ImpactStats};
pub use router::impact_router;
