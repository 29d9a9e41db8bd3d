use catalog_linker::config::{self, MatcherConfig};
use catalog_linker::model::MatchOutcome;
use catalog_linker::records;
use catalog_linker::{CatalogIndex, Matcher};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "catalog-linker", about = "Match marketplace listings to a product catalog")]
struct Args {
    /// Input product catalog (one JSON record per line)
    #[arg(short, long, default_value = "products.txt")]
    products: PathBuf,
    /// Input listings (one JSON record per line)
    #[arg(short, long, default_value = "listings.txt")]
    listings: PathBuf,
    /// Output results file
    #[arg(short, long, default_value = "results.txt")]
    results: PathBuf,
    /// Optional matcher configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match config::load_config(&path.to_string_lossy()) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Config load error: {}", e);
                std::process::exit(1);
            }
        },
        None => MatcherConfig::default(),
    };

    info!("Loading product catalog...");
    let products = match records::read_products(&args.products) {
        Ok(p) => p,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Loaded {} products", products.len());

    let index = CatalogIndex::build(products);
    info!(
        "Indexed {} products across {} manufacturers",
        index.len(),
        index.buckets().len()
    );

    info!("Loading listings...");
    let listings = match records::read_listings(&args.listings) {
        Ok(l) => l,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Loaded {} listings", listings.len());

    info!("Matching listings...");
    let matcher = Matcher::new(index, config);
    let results = matcher.match_all(&listings);

    let mut matched = 0usize;
    let mut no_candidates = 0usize;
    let mut ambiguous = 0usize;
    let mut bad_records = 0usize;
    for result in &results {
        match result.outcome {
            MatchOutcome::Matched(_) => matched += 1,
            MatchOutcome::NoCandidates => no_candidates += 1,
            MatchOutcome::Ambiguous => ambiguous += 1,
            MatchOutcome::BadRecord => bad_records += 1,
        }
    }
    info!(
        "Matched {} of {} listings ({} no candidates, {} ambiguous, {} bad records)",
        matched,
        results.len(),
        no_candidates,
        ambiguous,
        bad_records
    );

    info!("Writing results to {}...", args.results.display());
    if let Err(e) = records::write_results(&args.results, &results, &listings) {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("Done");
}
