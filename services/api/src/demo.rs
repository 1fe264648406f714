use crate::infra::Backend;
use chrono::{Duration, Utc};
use clap::Args;
use green_basket::basket::ScoredBasket;
use green_basket::catalog::{CatalogImporter, ProductCatalog};
use green_basket::config::ImpactConfig;
use green_basket::error::AppError;
use std::path::PathBuf;

/// Products used when no catalog export is supplied.
const DEMO_CATALOG: &str = "barcode,name,ecoScore,brand\n\
5000112637922,Oat Drink Barista,82,Oatly\n\
5010029000016,Whole Rolled Oats,95,Scotts\n\
8712100849084,Tomato Passata,88,Mutti\n\
5000168001661,Baked Beans,73,Heinz\n\
3017620422003,Hazelnut Spread,31,Nutella\n\
5449000000996,Cola Classic,18,Coca-Cola\n\
5000436589457,Beef Mince 20% Fat,9,\n";

#[derive(Args, Debug)]
pub(crate) struct BasketAnalyzeArgs {
    /// Product catalog CSV used to resolve barcodes (defaults to a built-in sample)
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Barcodes in scan order
    #[arg(required = true)]
    pub(crate) barcodes: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Product catalog CSV used to resolve barcodes (defaults to a built-in sample)
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Number of baskets to save
    #[arg(long, default_value_t = 12)]
    pub(crate) baskets: usize,
}

pub(crate) fn run_basket_analyze(args: BasketAnalyzeArgs) -> Result<(), AppError> {
    let BasketAnalyzeArgs {
        catalog_csv,
        barcodes,
    } = args;

    let backend = Backend::new(&ImpactConfig::default());
    load_catalog(&backend, catalog_csv)?;

    let basket = backend.basket_service().analyze(&barcodes);
    render_basket(&basket);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog_csv,
        baskets,
    } = args;

    let backend = Backend::new(&ImpactConfig::default());
    let products = load_catalog(&backend, catalog_csv)?;
    let barcodes: Vec<String> = backend
        .catalog
        .list()?
        .into_iter()
        .map(|product| product.barcode)
        .collect();

    println!("Green basket demo ({products} products in catalog)");
    if barcodes.is_empty() {
        println!("Catalog is empty; nothing to scan");
        return Ok(());
    }

    let service = backend.basket_service();
    let now = Utc::now();
    for index in 0..baskets {
        let scanned = demo_basket(&barcodes, index);
        let saved_at = now - Duration::hours((baskets - index) as i64 * 20);
        let outcome = service.save(scanned, saved_at)?;

        println!(
            "\nBasket {} saved {}",
            outcome.basket.id,
            outcome.basket.created_at.format("%Y-%m-%d %H:%M")
        );
        render_basket(&outcome.basket.score);
        for award in &outcome.badges_awarded {
            println!("  Badge unlocked: {} ({})", award.badge.name, award.badge.description);
        }
        for warning in &outcome.warnings {
            println!("  Warning: {warning}");
        }
    }

    let reporter = backend.impact_reporter();
    let stats = reporter.stats(now)?;
    println!("\nImpact ledger");
    println!(
        "- {} baskets | {:.2} kg CO2 | total score {:.0} | average {}",
        stats.total_baskets, stats.total_carbon_saved, stats.total_score, stats.average_score
    );
    println!("- {}", stats.weekly_report);

    let awards = reporter.badges()?;
    if awards.is_empty() {
        println!("\nBadges: none yet");
    } else {
        println!("\nBadges");
        for award in awards {
            println!(
                "- {} (earned {})",
                award.badge.name,
                award.earned_at.format("%Y-%m-%d %H:%M")
            );
        }
    }

    Ok(())
}

fn load_catalog(backend: &Backend, catalog_csv: Option<PathBuf>) -> Result<usize, AppError> {
    match catalog_csv {
        Some(path) => backend.seed_catalog(&path, Utc::now()),
        None => {
            let records = CatalogImporter::from_reader(DEMO_CATALOG.as_bytes(), Utc::now())?;
            Ok(CatalogImporter::seed(backend.catalog.as_ref(), records)?)
        }
    }
}

/// Deterministic basket of one to four items drawn from the catalog.
fn demo_basket(barcodes: &[String], index: usize) -> Vec<String> {
    let size = index % 4 + 1;
    (0..size)
        .map(|offset| barcodes[(index * 3 + offset * 2) % barcodes.len()].clone())
        .collect()
}

fn render_basket(basket: &ScoredBasket) {
    println!(
        "  {} items | {:.2} kg CO2 | health {}",
        basket.total_items, basket.total_carbon, basket.avg_health_score
    );
    for item in &basket.items {
        let name = if item.product_name.is_empty() {
            "(unknown product)"
        } else {
            item.product_name.as_str()
        };
        println!(
            "  - {} {}: {:.2} kg, health {}",
            item.barcode, name, item.carbon, item.health_score
        );
    }
}
