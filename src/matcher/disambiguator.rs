//! Winner-or-none resolution over a candidate set. A wrong match corrupts
//! downstream grouping irreversibly; a missed match is merely incomplete,
//! so ambiguity always resolves to none.

use crate::catalog::IndexedProduct;
use crate::matcher::extractor::Candidate;

/// Applies the precedence rules, in order:
/// 1. zero candidates: none;
/// 2. one candidate: that product;
/// 3. several: only maximum-specificity candidates survive, so a model that
///    extends another ("A480 IS" over "A480") always beats its prefix;
/// 4. if the survivors still name more than one distinct product, none.
///
/// The result depends only on the candidate set's contents, never on its
/// order: the maximum and the distinct-product check are order-free.
pub fn resolve<'a>(candidates: &[Candidate<'a>]) -> Option<&'a IndexedProduct> {
    match candidates {
        [] => None,
        [only] => Some(only.entry),
        _ => {
            let best = candidates.iter().map(|c| c.specificity).max()?;
            let mut survivors = candidates.iter().filter(|c| c.specificity == best);
            let first = survivors.next()?;
            if survivors.all(|c| c.entry.product.product_name == first.entry.product.product_name) {
                Some(first.entry)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogIndex;
    use crate::config::MatcherConfig;
    use crate::matcher::extractor::find_candidates;
    use crate::model::{Listing, Product};

    fn product(name: &str, manufacturer: &str, model: &str, family: Option<&str>) -> Product {
        Product {
            product_name: name.to_string(),
            manufacturer: manufacturer.to_string(),
            model: model.to_string(),
            family: family.map(str::to_string),
            announced_date: None,
        }
    }

    fn listing(title: &str, manufacturer: &str) -> Listing {
        Listing {
            title: title.to_string(),
            manufacturer: manufacturer.to_string(),
            currency: "USD".to_string(),
            price: "99.00".to_string(),
        }
    }

    fn canon_index() -> CatalogIndex {
        CatalogIndex::build(vec![
            product("Canon_A480", "Canon", "A480", Some("PowerShot")),
            product("Canon_A480_IS", "Canon", "A480 IS", Some("PowerShot")),
        ])
    }

    #[test]
    fn empty_set_resolves_to_none() {
        assert!(resolve(&[]).is_none());
    }

    #[test]
    fn more_specific_model_dominates_its_prefix() {
        let index = canon_index();
        let config = MatcherConfig::default();
        let candidates = find_candidates(
            &listing("Canon PowerShot A480 IS Digital Camera", "Canon"),
            &index,
            &config,
        );
        // both A480 and A480 IS matched the title
        assert_eq!(candidates.len(), 2);
        let winner = resolve(&candidates).unwrap();
        assert_eq!(winner.product.product_name, "Canon_A480_IS");
    }

    #[test]
    fn prefix_model_still_wins_alone() {
        let index = canon_index();
        let config = MatcherConfig::default();
        let candidates = find_candidates(
            &listing("Canon PowerShot A480 Digital Camera", "Canon"),
            &index,
            &config,
        );
        let winner = resolve(&candidates).unwrap();
        assert_eq!(winner.product.product_name, "Canon_A480");
    }

    #[test]
    fn equally_specific_distinct_products_are_ambiguous() {
        let index = CatalogIndex::build(vec![
            product("Canon_A480", "Canon", "A480", Some("PowerShot")),
            product("Canon_SX110", "Canon", "SX110", Some("PowerShot")),
        ]);
        let config = MatcherConfig::default();
        let candidates = find_candidates(
            &listing("Canon A480 SX110 battery pack", "Canon"),
            &index,
            &config,
        );
        assert_eq!(candidates.len(), 2);
        assert!(resolve(&candidates).is_none());
    }

    #[test]
    fn resolution_is_deterministic() {
        let index = canon_index();
        let config = MatcherConfig::default();
        let candidates = find_candidates(
            &listing("Canon PowerShot A480 IS Digital Camera", "Canon"),
            &index,
            &config,
        );
        let first = resolve(&candidates).map(|e| e.product.product_name.clone());
        for _ in 0..10 {
            let again = resolve(&candidates).map(|e| e.product.product_name.clone());
            assert_eq!(first, again);
        }
    }
}
