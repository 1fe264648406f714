//! Product catalog boundary: typed records, CSV ingestion, and HTTP routes.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;

pub use domain::{
    ProductFacts, ProductRecord, ProductSubmission, ProductValidationError, DEFAULT_ECO_SCORE,
};
pub use import::{CatalogImportError, CatalogImporter};
pub use repository::ProductCatalog;
pub use router::catalog_router;
