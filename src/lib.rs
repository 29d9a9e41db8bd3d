//! Links free-text marketplace listings to a fixed product catalog.
//!
//! The engine normalizes listing titles into token sequences, finds catalog
//! products whose manufacturer and model signature appear in the title, and
//! disambiguates overlapping model names. A listing that could plausibly be
//! several products resolves to no match rather than a guess.

pub mod catalog;
pub mod config;
pub mod matcher;
pub mod model;
pub mod normalizer;
pub mod records;

pub use catalog::CatalogIndex;
pub use config::MatcherConfig;
pub use matcher::Matcher;
pub use model::{Listing, MatchOutcome, MatchResult, Product};
