// Core structs: Product, Listing, MatchResult
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A canonical catalog entry. The catalog is loaded once and never mutated
/// during a matching run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_name: String,
    pub manufacturer: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(
        rename = "announced-date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub announced_date: Option<DateTime<FixedOffset>>,
}

/// An externally sourced free-text record describing an item for sale.
/// Price stays a raw string so re-serialized listings are byte-identical
/// to their input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub price: String,
}

/// Outcome of matching one listing. The three non-match reasons are kept
/// distinct so precision/recall tuning can tell them apart in the logs;
/// they all collapse to "no match" in the result artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(String),
    NoCandidates,
    Ambiguous,
    BadRecord,
}

impl MatchOutcome {
    pub fn product_name(&self) -> Option<&str> {
        match self {
            MatchOutcome::Matched(name) => Some(name),
            _ => None,
        }
    }
}

/// Final per-listing result. `listing_index` pins the result to its input
/// position so parallel evaluation keeps a stable output order.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub listing_index: usize,
    pub outcome: MatchOutcome,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot encode record for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}
