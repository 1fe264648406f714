use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::import::normalizer::{clamp_eco_score, normalize_name};

/// Eco-score applied when a product is missing or its score cannot be read.
pub const DEFAULT_ECO_SCORE: u8 = 50;

/// The slice of a catalog entry the scorer depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFacts {
    pub identifier: String,
    pub display_name: String,
    pub eco_score: u8,
}

impl ProductFacts {
    /// Facts synthesized for a barcode the catalog does not know.
    pub fn unknown(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            display_name: String::new(),
            eco_score: DEFAULT_ECO_SCORE,
        }
    }
}

/// Stored catalog entry, normalized at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub barcode: String,
    pub name: String,
    #[serde(rename = "ecoScore")]
    pub eco_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProductRecord {
    pub fn facts(&self) -> ProductFacts {
        ProductFacts {
            identifier: self.barcode.clone(),
            display_name: self.name.clone(),
            eco_score: self.eco_score,
        }
    }

    /// Normalizes a client-submitted product into a catalog record.
    pub fn from_submission(
        submission: ProductSubmission,
        now: DateTime<Utc>,
    ) -> Result<Self, ProductValidationError> {
        let barcode = submission.barcode.trim().to_string();
        if barcode.is_empty() {
            return Err(ProductValidationError::BlankBarcode);
        }

        Ok(Self {
            barcode,
            name: normalize_name(submission.name.as_deref().unwrap_or_default()),
            eco_score: submission
                .eco_score
                .map(clamp_eco_score)
                .unwrap_or(DEFAULT_ECO_SCORE),
            brand: non_blank(submission.brand),
            description: non_blank(submission.description),
            image_url: non_blank(submission.image_url),
            created_at: Some(now),
        })
    }
}

/// Upsert payload accepted by the product endpoint.
///
/// Clients have historically sent the score as `ecoScore`, `EcoScore`, or
/// `eco_score`; all three land in the same field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductSubmission {
    #[serde(alias = "Barcode")]
    pub barcode: String,
    #[serde(default, alias = "Name", alias = "product_name")]
    pub name: Option<String>,
    #[serde(default, rename = "ecoScore", alias = "EcoScore", alias = "eco_score")]
    pub eco_score: Option<f64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    #[error("product barcode must not be blank")]
    BlankBarcode,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|inner| inner.trim().to_string())
        .filter(|inner| !inner.is_empty())
}
