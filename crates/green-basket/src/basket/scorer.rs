use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{ScoredBasket, ScoredItem};
use crate::catalog::{ProductCatalog, ProductFacts};

/// Stateless scorer resolving barcodes through the product catalog.
///
/// Unknown barcodes and catalog read failures both fall back to default facts,
/// so every input list produces a basket.
#[derive(Clone)]
pub struct BasketScorer {
    catalog: Arc<dyn ProductCatalog>,
}

impl BasketScorer {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }

    pub fn score(&self, barcodes: &[String]) -> ScoredBasket {
        let items = barcodes
            .iter()
            .map(|barcode| ScoredItem::from_facts(self.resolve(barcode)))
            .collect();
        ScoredBasket::from_items(items)
    }

    fn resolve(&self, barcode: &str) -> ProductFacts {
        match self.catalog.lookup(barcode) {
            Ok(Some(facts)) => ProductFacts {
                identifier: barcode.to_string(),
                ..facts
            },
            Ok(None) => {
                debug!(%barcode, "barcode not in catalog, using default facts");
                ProductFacts::unknown(barcode)
            }
            Err(err) => {
                warn!(%barcode, error = %err, "catalog lookup failed, using default facts");
                ProductFacts::unknown(barcode)
            }
        }
    }
}
