//! Candidate extraction: which catalog products could this listing be
//! talking about?

use crate::catalog::{CatalogIndex, IndexedProduct, ManufacturerBucket};
use crate::config::MatcherConfig;
use crate::model::Listing;
use crate::normalizer::{is_numeric_token, normalize};

/// A provisional (listing, product) pairing, alive only until the
/// disambiguator has seen the whole set.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub entry: &'a IndexedProduct,
    /// Number of signature tokens matched. Longer signatures are more
    /// specific and dominate shorter ones during disambiguation.
    pub specificity: usize,
    /// Where in the title window the signature run starts.
    run_start: usize,
}

/// Finds every product whose manufacturer matches the listing and whose
/// full model signature appears contiguously in the title window.
pub fn find_candidates<'a>(
    listing: &Listing,
    index: &'a CatalogIndex,
    config: &MatcherConfig,
) -> Vec<Candidate<'a>> {
    let window = title_window(&listing.title, config.title_window);
    if window.is_empty() {
        return Vec::new();
    }

    let mut buckets = index.matching_buckets(&listing.manufacturer);
    if buckets.is_empty() {
        buckets = index.buckets_in_title(&window);
    }

    let mut candidates = Vec::new();
    for bucket in buckets {
        candidates.extend(bucket_candidates(bucket, &window, config));
    }
    candidates
}

/// Normalizes the leading `limit` whitespace words of a raw title. The
/// model name virtually always leads the title; everything after is
/// accessory and bundle noise. 0 disables the window.
fn title_window(title: &str, limit: usize) -> Vec<String> {
    if limit == 0 {
        return normalize(title);
    }
    let head: Vec<&str> = title.split_whitespace().take(limit).collect();
    normalize(&head.join(" "))
}

fn bucket_candidates<'a>(
    bucket: &'a ManufacturerBucket,
    window: &[String],
    config: &MatcherConfig,
) -> Vec<Candidate<'a>> {
    let mut found: Vec<Candidate<'a>> = Vec::new();
    for entry in &bucket.products {
        if is_noise_signature(&entry.signature, config) {
            continue;
        }
        if let Some(run_start) = find_run(window, &entry.signature) {
            found.push(Candidate {
                entry,
                specificity: entry.signature.len(),
                run_start,
            });
        }
    }
    apply_family_rule(found, window)
}

/// A purely numeric signature below the configured digit count matches far
/// too much of the ambient text (prices, zoom factors, megapixels) to be
/// trusted on its own.
fn is_noise_signature(signature: &[String], config: &MatcherConfig) -> bool {
    signature.iter().all(|t| is_numeric_token(t))
        && signature.iter().map(String::len).sum::<usize>() < config.min_numeric_signature_len
}

/// Position of `needle` as a contiguous run inside `haystack`.
fn find_run(haystack: &[String], needle: &[String]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// True when all of `needle` appears in order (not necessarily adjacent)
/// inside `haystack`.
fn is_subsequence(haystack: &[String], needle: &[String]) -> bool {
    let mut it = haystack.iter();
    needle.iter().all(|n| it.any(|h| h == n))
}

/// Product lines can share a model number across families. When several
/// candidates in one bucket matched on identical model tokens, a candidate
/// carrying a family is only kept if that family is named in the title
/// ahead of the model run; candidates whose signature already folded the
/// family in are exempt (the run itself proved the family).
fn apply_family_rule<'a>(candidates: Vec<Candidate<'a>>, window: &[String]) -> Vec<Candidate<'a>> {
    if candidates.len() < 2 {
        return candidates;
    }
    let contested: Vec<bool> = candidates
        .iter()
        .map(|c| {
            candidates.iter().any(|other| {
                other.entry.product.product_name != c.entry.product.product_name
                    && other.entry.model_tokens == c.entry.model_tokens
            })
        })
        .collect();

    let mut kept = Vec::new();
    for (candidate, &contested) in candidates.iter().zip(contested.iter()) {
        let exempt = !contested
            || candidate.entry.family_tokens.is_empty()
            || candidate.entry.family_in_signature();
        if exempt
            || is_subsequence(
                &window[..candidate.run_start],
                &candidate.entry.family_tokens,
            )
        {
            kept.push(candidate.clone());
        }
    }

    // If the family requirement eliminated every contender, fall back to
    // the unfiltered set and let the disambiguator declare it ambiguous.
    if kept.is_empty() { candidates } else { kept }
}
