// Matcher module: extraction, disambiguation and per-listing orchestration.

pub mod disambiguator;
pub mod engine;
pub mod extractor;

// Re-export the engine entry point for ease of use.
pub use engine::Matcher;
