use super::common::*;
use crate::basket::{carbon_estimate, BasketScorer, ScoredBasket, ScoredItem};
use std::sync::Arc;

#[test]
fn carbon_estimate_follows_missing_point_formula() {
    assert_eq!(carbon_estimate(100), 0.0);
    assert_eq!(carbon_estimate(80), 1.0);
    assert_eq!(carbon_estimate(50), 2.5);
    assert_eq!(carbon_estimate(0), 5.0);
    for score in 0..=100u8 {
        assert_eq!(carbon_estimate(score), f64::from(100 - score) * 0.05);
    }
}

#[test]
fn scorer_preserves_order_and_duplicates() {
    let scorer = BasketScorer::new(Arc::new(catalog()));
    let basket = scorer.score(&barcodes(&["222", "111", "222"]));

    let codes: Vec<_> = basket.items.iter().map(|item| item.barcode.as_str()).collect();
    assert_eq!(codes, vec!["222", "111", "222"]);
    assert_eq!(basket.total_items, 3);
    assert_eq!(basket.items[1].product_name, "Oat Milk");
    assert_eq!(basket.total_carbon, 4.0 + 1.0 + 4.0);
    assert_eq!(basket.avg_health_score, 40);
}

#[test]
fn unknown_barcodes_use_default_facts() {
    let scorer = BasketScorer::new(Arc::new(catalog()));
    let basket = scorer.score(&barcodes(&["does-not-exist"]));

    assert_eq!(
        basket.items,
        vec![ScoredItem {
            barcode: "does-not-exist".to_string(),
            product_name: String::new(),
            carbon: 2.5,
            health_score: 50,
        }]
    );
    assert_eq!(basket.avg_health_score, 50);
}

#[test]
fn catalog_failures_degrade_to_default_facts() {
    let scorer = BasketScorer::new(Arc::new(UnavailableCatalog));
    let basket = scorer.score(&barcodes(&["111", "222"]));

    assert_eq!(basket.total_items, 2);
    assert_eq!(basket.total_carbon, 5.0);
    assert!(basket.items.iter().all(|item| item.health_score == 50));
}

#[test]
fn empty_basket_is_valid_and_zeroed() {
    let scorer = BasketScorer::new(Arc::new(catalog()));
    let basket = scorer.score(&[]);

    assert_eq!(basket, ScoredBasket::empty());
    assert_eq!(basket.total_items, 0);
    assert_eq!(basket.total_carbon, 0.0);
    assert_eq!(basket.avg_health_score, 0);
}

#[test]
fn average_health_truncates_toward_zero() {
    let scorer = BasketScorer::new(Arc::new(catalog()));
    // (80 + 20 + 100 + 50) / 4 = 62.5
    let basket = scorer.score(&barcodes(&["111", "222", "333", "unknown"]));

    assert_eq!(basket.avg_health_score, 62);
}

#[test]
fn scoring_is_deterministic() {
    let scorer = BasketScorer::new(Arc::new(catalog()));
    let input = barcodes(&["111", "222", "unknown", "333", "111"]);

    assert_eq!(scorer.score(&input), scorer.score(&input));
}
