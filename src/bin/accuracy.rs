//! Offline regression replay: runs every stored listing through the engine
//! and reports accuracy against the human-confirmed answers.

use catalog_linker::config::{self, MatcherConfig};
use catalog_linker::records::{self, RegressionRecord};
use catalog_linker::{CatalogIndex, Matcher};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "accuracy", about = "Replay the regression set and report match accuracy")]
struct Args {
    #[arg(short, long, default_value = "products.txt")]
    products: PathBuf,
    /// Regression file of confirmed (listing, product name) pairs
    #[arg(short, long, default_value = "test_data.txt")]
    regression: PathBuf,
    /// Optional matcher configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load_config(&path.to_string_lossy())?,
        None => MatcherConfig::default(),
    };

    let products = records::read_products(&args.products)?;
    let cases = records::read_regression(&args.regression)?;
    let matcher = Matcher::new(CatalogIndex::build(products), config);

    let mut correct = 0usize;
    for case in &cases {
        let answer = match matcher.match_listing(&case.listing).product_name() {
            Some(name) => name.to_string(),
            None => RegressionRecord::NO_MATCH.to_string(),
        };
        if answer == case.product_name {
            correct += 1;
        } else {
            warn!(
                "Mismatch: \"{}\" -> {} (expected {})",
                case.listing.title, answer, case.product_name
            );
        }
    }

    if cases.is_empty() {
        info!("Regression set is empty, nothing to replay");
    } else {
        info!(
            "Accuracy: {}/{} ({:.1}%)",
            correct,
            cases.len(),
            100.0 * correct as f64 / cases.len() as f64
        );
    }
    Ok(())
}
