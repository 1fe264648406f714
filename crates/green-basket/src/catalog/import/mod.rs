pub(crate) mod normalizer;
mod parser;

use super::domain::ProductRecord;
use super::repository::ProductCatalog;
use crate::storage::StorageError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Storage(StorageError),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::Storage(err) => {
                write!(f, "could not seed product catalog: {}", err)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Storage(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<StorageError> for CatalogImportError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

/// Loads product exports into typed catalog records.
///
/// Exports in the wild mix header spellings (`ecoScore`, `EcoScore`,
/// `eco_score`) and occasionally carry blank or out-of-range scores. All of
/// that is resolved here, once, so lookups only ever see a well-formed
/// [`ProductRecord`].
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProductRecord>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, now)
    }

    /// Later rows for the same barcode replace earlier ones; output is
    /// ordered by barcode.
    pub fn from_reader<R: Read>(
        reader: R,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProductRecord>, CatalogImportError> {
        let mut by_barcode = BTreeMap::new();

        for row in parser::parse_rows(reader)? {
            let record = ProductRecord {
                barcode: row.barcode.clone(),
                name: row.name,
                eco_score: row.eco_score,
                brand: row.brand,
                description: row.description,
                image_url: None,
                created_at: Some(now),
            };
            by_barcode.insert(row.barcode, record);
        }

        Ok(by_barcode.into_values().collect())
    }

    /// Upserts every record into the catalog, returning how many were written.
    pub fn seed(
        catalog: &dyn ProductCatalog,
        records: Vec<ProductRecord>,
    ) -> Result<usize, CatalogImportError> {
        let count = records.len();
        for record in records {
            catalog.upsert(record)?;
        }
        info!(products = count, "product catalog seeded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_ECO_SCORE;
    use crate::memory::InMemoryCatalog;
    use std::io::Cursor;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-10-01T09:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc)
    }

    #[test]
    fn importer_accepts_mixed_header_spellings() {
        let csv = "Barcode,Name,EcoScore,Brand\n111,Oat  Milk,80,Oatly\n222,Crisps,12.5,\n";
        let records =
            CatalogImporter::from_reader(Cursor::new(csv), now()).expect("import succeeds");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].barcode, "111");
        assert_eq!(records[0].name, "Oat Milk");
        assert_eq!(records[0].eco_score, 80);
        assert_eq!(records[0].brand.as_deref(), Some("Oatly"));
        assert_eq!(records[1].eco_score, 12);
        assert!(records[1].brand.is_none());
    }

    #[test]
    fn importer_defaults_unreadable_scores_and_skips_blank_barcodes() {
        let csv = "barcode,name,eco_score\n333,Mystery Jar,unknown\n,Orphan,40\n";
        let records =
            CatalogImporter::from_reader(Cursor::new(csv), now()).expect("import succeeds");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].eco_score, DEFAULT_ECO_SCORE);
    }

    #[test]
    fn importer_keeps_last_row_per_barcode() {
        let csv = "barcode,name,ecoScore\n111,Old Name,10\n111,New Name,90\n";
        let records =
            CatalogImporter::from_reader(Cursor::new(csv), now()).expect("import succeeds");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "New Name");
        assert_eq!(records[0].eco_score, 90);
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = CatalogImporter::from_path("./does-not-exist.csv", now())
            .expect_err("expected io error");
        assert!(matches!(error, CatalogImportError::Io(_)));
    }

    #[test]
    fn seed_upserts_records_into_catalog() {
        let catalog = InMemoryCatalog::default();
        let records = CatalogImporter::from_reader(
            Cursor::new("barcode,name,ecoScore\n111,Oat Milk,80\n"),
            now(),
        )
        .expect("import succeeds");

        let seeded = CatalogImporter::seed(&catalog, records).expect("seed succeeds");
        assert_eq!(seeded, 1);
        let facts = catalog
            .lookup("111")
            .expect("lookup succeeds")
            .expect("product present");
        assert_eq!(facts.eco_score, 80);
        assert_eq!(facts.display_name, "Oat Milk");
    }
}
