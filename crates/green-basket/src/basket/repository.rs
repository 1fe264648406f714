use chrono::{DateTime, Utc};

use super::domain::{Basket, BasketDraft};
use crate::storage::StorageError;

/// Append-only basket persistence.
pub trait BasketStore: Send + Sync {
    /// Persists the draft under a freshly assigned id and returns the stored record.
    fn save(&self, draft: BasketDraft) -> Result<Basket, StorageError>;
    /// All baskets, most recently created first.
    fn list_recent(&self) -> Result<Vec<Basket>, StorageError>;
    /// Baskets created at or after `since`.
    fn list_since(&self, since: DateTime<Utc>) -> Result<Vec<Basket>, StorageError>;
}
