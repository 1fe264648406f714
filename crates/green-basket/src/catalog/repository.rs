use super::domain::{ProductFacts, ProductRecord};
use crate::storage::StorageError;

/// Barcode-keyed product storage owned outside the scoring core.
pub trait ProductCatalog: Send + Sync {
    fn fetch(&self, barcode: &str) -> Result<Option<ProductRecord>, StorageError>;
    fn list(&self) -> Result<Vec<ProductRecord>, StorageError>;
    /// Inserts the record or replaces the one sharing its barcode.
    fn upsert(&self, record: ProductRecord) -> Result<(), StorageError>;

    fn lookup(&self, barcode: &str) -> Result<Option<ProductFacts>, StorageError> {
        Ok(self.fetch(barcode)?.map(|record| record.facts()))
    }
}
