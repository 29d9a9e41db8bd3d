use crate::catalog::CatalogIndex;
use crate::config::MatcherConfig;
use crate::matcher::disambiguator::resolve;
use crate::matcher::extractor::find_candidates;
use crate::model::{Listing, MatchOutcome, MatchResult};
use rayon::prelude::*;

/// The matching engine: an immutable catalog index plus tuning parameters.
/// Listings are evaluated independently against it; nothing here is ever
/// mutated after construction, so parallel evaluation needs no locking.
pub struct Matcher {
    index: CatalogIndex,
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(index: CatalogIndex, config: MatcherConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Matches a single listing. Never fails: a listing without a usable
    /// title is reported as a bad record, not an error.
    pub fn match_listing(&self, listing: &Listing) -> MatchOutcome {
        if listing.title.trim().is_empty() {
            return MatchOutcome::BadRecord;
        }
        let candidates = find_candidates(listing, &self.index, &self.config);
        if candidates.is_empty() {
            return MatchOutcome::NoCandidates;
        }
        match resolve(&candidates) {
            Some(entry) => MatchOutcome::Matched(entry.product.product_name.clone()),
            None => MatchOutcome::Ambiguous,
        }
    }

    /// Matches every listing, in parallel. Results carry their input index,
    /// so output order is stable regardless of scheduling.
    pub fn match_all(&self, listings: &[Listing]) -> Vec<MatchResult> {
        listings
            .par_iter()
            .enumerate()
            .map(|(listing_index, listing)| MatchResult {
                listing_index,
                outcome: self.match_listing(listing),
            })
            .collect()
    }
}
