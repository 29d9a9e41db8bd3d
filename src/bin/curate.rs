//! Interactive regression-data collection: samples a random listing, shows
//! the engine's current answer, and appends the operator-confirmed answer
//! to the regression file.

use catalog_linker::config::MatcherConfig;
use catalog_linker::records::{self, RegressionRecord};
use catalog_linker::{CatalogIndex, Matcher};
use clap::Parser;
use dialoguer::{Input, Select};
use rand::Rng;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "curate", about = "Interactively build the regression data set")]
struct Args {
    #[arg(short, long, default_value = "products.txt")]
    products: PathBuf,
    #[arg(short, long, default_value = "listings.txt")]
    listings: PathBuf,
    /// Regression file to append confirmed answers to
    #[arg(short, long, default_value = "test_data.txt")]
    regression: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let products = records::read_products(&args.products)?;
    let mut listings = records::read_listings(&args.listings)?;
    let matcher = Matcher::new(CatalogIndex::build(products), MatcherConfig::default());

    let mut rng = rand::rng();
    let mut confirmed = 0usize;

    while !listings.is_empty() {
        let listing = listings.swap_remove(rng.random_range(0..listings.len()));

        println!("\nListing:\n{}", listing.title);
        println!("Manufacturer: {}", listing.manufacturer);

        let answer = match matcher.match_listing(&listing).product_name() {
            Some(name) => name.to_string(),
            None => RegressionRecord::NO_MATCH.to_string(),
        };
        println!("Engine answer: {answer}");

        let choice = Select::new()
            .with_prompt("Is this correct?")
            .items(&["yes", "no", "quit"])
            .default(0)
            .interact()?;

        let product_name = match choice {
            0 => answer,
            1 => {
                let entered: String = Input::new()
                    .with_prompt("Correct product name (empty for no match)")
                    .allow_empty(true)
                    .interact_text()?;
                let entered = entered.trim().to_string();
                if entered.is_empty() {
                    RegressionRecord::NO_MATCH.to_string()
                } else {
                    entered
                }
            }
            _ => break,
        };

        records::append_regression(
            &args.regression,
            &RegressionRecord {
                listing,
                product_name,
            },
        )?;
        confirmed += 1;
    }

    info!(
        "Appended {} confirmed records to {}",
        confirmed,
        args.regression.display()
    );
    Ok(())
}
