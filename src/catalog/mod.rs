//! Read-only catalog index: manufacturer buckets with precomputed token
//! signatures, built once and shared across all listing evaluations.

use crate::model::Product;
use crate::normalizer::{is_numeric_token, normalize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// A model word shared by this many of a manufacturer's products is treated
/// as a degenerate prefix sellers routinely omit.
const SHARED_WORD_CUTOFF: usize = 5;

/// A product plus everything the extractor needs precomputed.
#[derive(Debug, Clone)]
pub struct IndexedProduct {
    pub product: Product,
    /// Token sequence that must appear in a listing title for this product
    /// to become a candidate. Derived from the model tokens with two
    /// adjustments: a purely numeric model gets its family tokens prepended
    /// (sellers write "ElectroBrand Flashmate 88", and a bare "88" would
    /// otherwise collide with focal lengths and zoom factors all over the
    /// listing text), and model words shared across most of a
    /// manufacturer's range are dropped when a unique word remains
    /// ("DMC-FZ40" is usually listed as plain "FZ40").
    pub signature: Vec<String>,
    pub model_tokens: Vec<String>,
    pub family_tokens: Vec<String>,
}

impl IndexedProduct {
    /// True when the signature already begins with the family tokens, i.e.
    /// the family was folded in at build time.
    pub fn family_in_signature(&self) -> bool {
        self.signature.len() > self.model_tokens.len()
    }
}

/// One manufacturer's products, most specific first.
#[derive(Debug, Clone)]
pub struct ManufacturerBucket {
    /// Concatenated normalized manufacturer tokens ("Hewlett-Packard" ->
    /// "hewlettpackard"), the unit of substring-containment matching.
    pub key: String,
    pub products: Vec<IndexedProduct>,
}

#[derive(Debug, Clone)]
pub struct CatalogIndex {
    buckets: Vec<ManufacturerBucket>,
}

impl CatalogIndex {
    /// Builds the index. Products with an empty manufacturer or model after
    /// normalization are malformed records: logged and skipped, never fatal.
    pub fn build(products: Vec<Product>) -> Self {
        struct Pending {
            product: Product,
            model_text: String,
            model_tokens: Vec<String>,
            family_tokens: Vec<String>,
        }

        let mut grouped: BTreeMap<String, Vec<Pending>> = BTreeMap::new();
        for product in products {
            let man_tokens = normalize(&product.manufacturer);
            let model_tokens = normalize(&product.model);
            if man_tokens.is_empty() || model_tokens.is_empty() {
                warn!(
                    "Skipping product {}: empty manufacturer or model",
                    product.product_name
                );
                continue;
            }
            let family_tokens = product
                .family
                .as_deref()
                .map(normalize)
                .unwrap_or_default();

            let model_text = if model_tokens.iter().all(|t| is_numeric_token(t))
                && !family_tokens.is_empty()
            {
                format!(
                    "{} {}",
                    product.family.as_deref().unwrap_or_default(),
                    product.model
                )
            } else {
                product.model.clone()
            };

            grouped.entry(man_tokens.concat()).or_default().push(Pending {
                product,
                model_text,
                model_tokens,
                family_tokens,
            });
        }

        let buckets = grouped
            .into_iter()
            .map(|(key, pending)| {
                // Second pass over the bucket: count model words so shared
                // range prefixes can be dropped from the signatures.
                let mut word_counts: HashMap<String, usize> = HashMap::new();
                for entry in &pending {
                    for word in model_words(&entry.model_text) {
                        *word_counts.entry(word.to_string()).or_default() += 1;
                    }
                }

                let mut products: Vec<IndexedProduct> = pending
                    .into_iter()
                    .map(|entry| {
                        let signature = normalize(&reduce_model(&entry.model_text, &word_counts));
                        IndexedProduct {
                            product: entry.product,
                            signature,
                            model_tokens: entry.model_tokens,
                            family_tokens: entry.family_tokens,
                        }
                    })
                    .collect();

                // Most-specific-first makes every downstream tie-break
                // independent of input order.
                products.sort_by(|a, b| {
                    b.signature
                        .len()
                        .cmp(&a.signature.len())
                        .then_with(|| a.product.product_name.cmp(&b.product.product_name))
                });
                ManufacturerBucket { key, products }
            })
            .collect();

        Self { buckets }
    }

    pub fn buckets(&self) -> &[ManufacturerBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.products.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets whose manufacturer matches a listing's declared manufacturer
    /// field, by substring containment in either direction. This tolerates
    /// suffixed corporate names ("Canon Canada" -> "canon") as well as
    /// merged brand spellings ("Agfaphoto" -> "agfa").
    pub fn matching_buckets(&self, declared_manufacturer: &str) -> Vec<&ManufacturerBucket> {
        let declared = normalize(declared_manufacturer).concat();
        if declared.is_empty() {
            return Vec::new();
        }
        self.buckets
            .iter()
            .filter(|b| declared.contains(&b.key) || b.key.contains(&declared))
            .collect()
    }

    /// Fallback for listings with an empty or unusable manufacturer field:
    /// any bucket whose key occurs inside the concatenated title tokens
    /// qualifies (titles often name the brand even when the field is blank).
    pub fn buckets_in_title(&self, title_tokens: &[String]) -> Vec<&ManufacturerBucket> {
        let joined = title_tokens.concat();
        if joined.is_empty() {
            return Vec::new();
        }
        self.buckets
            .iter()
            .filter(|b| joined.contains(&b.key))
            .collect()
    }
}

/// Splits a raw model string into its words: on whitespace when any is
/// present, otherwise on hyphens ("DMC-FZ40" -> ["DMC", "FZ40"]).
fn model_words(model: &str) -> Vec<&str> {
    if model.contains(' ') {
        model.split_whitespace().collect()
    } else {
        model.split('-').filter(|w| !w.is_empty()).collect()
    }
}

/// Drops model words shared by `SHARED_WORD_CUTOFF` or more of the
/// manufacturer's products, provided some unique word (longer than one
/// char, not purely numeric) remains to identify the model on its own.
/// A range-wide prefix carries no information and sellers omit it; without
/// a unique remainder the model keeps all its words.
fn reduce_model(model: &str, word_counts: &HashMap<String, usize>) -> String {
    let words = model_words(model);
    if words.len() < 2 {
        return model.to_string();
    }
    let count = |w: &str| word_counts.get(w).copied().unwrap_or(0);
    let has_unique = words.iter().any(|&w| {
        count(w) == 1 && w.len() > 1 && !w.chars().all(|c| c.is_ascii_digit())
    });
    if !has_unique {
        return model.to_string();
    }
    let kept: Vec<&str> = words
        .into_iter()
        .filter(|&w| count(w) < SHARED_WORD_CUTOFF)
        .collect();
    kept.join(" ")
}
