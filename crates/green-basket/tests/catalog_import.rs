use chrono::{DateTime, Utc};
use green_basket::basket::BasketScorer;
use green_basket::catalog::{CatalogImportError, CatalogImporter, ProductCatalog};
use green_basket::memory::InMemoryCatalog;
use std::sync::Arc;

fn imported_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-10-01T06:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

#[test]
fn sample_catalog_imports_and_normalizes() {
    let data = include_bytes!("../sample_catalog.csv");
    let records =
        CatalogImporter::from_reader(&data[..], imported_at()).expect("sample catalog imports");

    assert_eq!(records.len(), 10);
    assert!(records.windows(2).all(|pair| pair[0].barcode < pair[1].barcode));

    let oat_drink = records
        .iter()
        .find(|record| record.barcode == "5000112637922")
        .expect("oat drink present");
    assert_eq!(oat_drink.name, "Oat Drink Barista");
    assert_eq!(oat_drink.brand.as_deref(), Some("Oatly"));

    let oats = records
        .iter()
        .find(|record| record.barcode == "5010029000016")
        .expect("oats present");
    assert_eq!(oats.eco_score, 96);

    let peas = records
        .iter()
        .find(|record| record.barcode == "20047368")
        .expect("peas present");
    assert!(peas.brand.is_none());
    assert_eq!(peas.description.as_deref(), Some("Garden peas 900g"));
}

#[test]
fn seeded_catalog_drives_basket_scoring() {
    let data = include_bytes!("../sample_catalog.csv");
    let records = CatalogImporter::from_reader(&data[..], imported_at()).expect("imports");
    let catalog = Arc::new(InMemoryCatalog::default());
    let seeded = CatalogImporter::seed(catalog.as_ref(), records).expect("seeds");
    assert_eq!(seeded, 10);
    assert_eq!(catalog.list().expect("list").len(), 10);

    let scorer = BasketScorer::new(catalog);
    let basket = scorer.score(&[
        "5010029000016".to_string(),
        "5449000000996".to_string(),
        "not-in-catalog".to_string(),
    ]);

    assert_eq!(basket.total_items, 3);
    // (96 + 18 + 50) / 3 = 54.67
    assert_eq!(basket.avg_health_score, 54);
    assert_eq!(basket.items[0].product_name, "Whole Rolled Oats");
    assert_eq!(basket.items[2].product_name, "");
    let expected_carbon = (4.0 + 82.0 + 50.0) * 0.05;
    assert!((basket.total_carbon - expected_carbon).abs() < 1e-9);
}

#[test]
fn export_without_barcode_column_is_rejected() {
    let data = "name,ecoScore\nOat Milk,80\n";
    let error = CatalogImporter::from_reader(data.as_bytes(), imported_at())
        .expect_err("barcode column is required");
    assert!(matches!(error, CatalogImportError::Csv(_)));
}
