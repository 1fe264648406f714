use super::normalizer::{normalize_barcode, normalize_name, parse_eco_score};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct CatalogRow {
    pub(crate) barcode: String,
    pub(crate) name: String,
    pub(crate) eco_score: u8,
    pub(crate) brand: Option<String>,
    pub(crate) description: Option<String>,
}

/// Reads catalog rows, skipping any row without a usable barcode.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CatalogRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawCatalogRow>() {
        let raw = record?;
        let barcode = normalize_barcode(&raw.barcode);
        if barcode.is_empty() {
            continue;
        }

        rows.push(CatalogRow {
            barcode,
            name: raw.name.as_deref().map(normalize_name).unwrap_or_default(),
            eco_score: parse_eco_score(raw.eco_score.as_deref()),
            brand: raw.brand.as_deref().map(normalize_name),
            description: raw.description,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawCatalogRow {
    #[serde(alias = "Barcode", alias = "code")]
    barcode: String,
    #[serde(
        default,
        alias = "Name",
        alias = "product_name",
        deserialize_with = "empty_string_as_none"
    )]
    name: Option<String>,
    #[serde(
        default,
        alias = "ecoScore",
        alias = "EcoScore",
        deserialize_with = "empty_string_as_none"
    )]
    eco_score: Option<String>,
    #[serde(default, alias = "Brand", deserialize_with = "empty_string_as_none")]
    brand: Option<String>,
    #[serde(
        default,
        alias = "Description",
        deserialize_with = "empty_string_as_none"
    )]
    description: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
