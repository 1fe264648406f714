//! Basket scoring, persistence, and the save workflow that feeds the impact ledger.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scorer;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    carbon_estimate, Basket, BasketDraft, BasketId, ScoredBasket, ScoredItem,
    CARBON_PER_MISSING_POINT,
};
pub use repository::BasketStore;
pub use router::{basket_router, BasketRequest};
pub use scorer::BasketScorer;
pub use service::{BasketService, BasketServiceError, SaveOutcome, ValidationError};
