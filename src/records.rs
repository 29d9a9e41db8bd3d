//! Line-delimited JSON record files: the catalog, the listings, the result
//! artifact and the human-curated regression set all share the one-object-
//! per-line convention.

use crate::model::{Listing, MatchResult, Product, RecordError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// One human-confirmed answer: a listing and the product name an operator
/// says it should resolve to ("None" for no match).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionRecord {
    pub listing: Listing,
    pub product_name: String,
}

impl RegressionRecord {
    /// The stored sentinel for "this listing matches nothing".
    pub const NO_MATCH: &'static str = "None";

    pub fn expects_match(&self) -> bool {
        self.product_name != Self::NO_MATCH
    }
}

pub fn read_products(path: &Path) -> Result<Vec<Product>, RecordError> {
    read_records(path)
}

pub fn read_listings(path: &Path) -> Result<Vec<Listing>, RecordError> {
    read_records(path)
}

pub fn read_regression(path: &Path) -> Result<Vec<RegressionRecord>, RecordError> {
    read_records(path)
}

/// Appends one confirmed record to the regression file, creating it on
/// first use.
pub fn append_regression(path: &Path, record: &RegressionRecord) -> Result<(), RecordError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| RecordError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    let line = serde_json::to_string(record).map_err(|source| RecordError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(file, "{line}").map_err(|source| RecordError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the result artifact: one line per matched product, carrying every
/// listing assigned to it. Unmatched listings are deliberately absent; their
/// counts live in the run summary log. Product order is alphabetical so the
/// artifact is reproducible across runs.
pub fn write_results(
    path: &Path,
    results: &[MatchResult],
    listings: &[Listing],
) -> Result<(), RecordError> {
    #[derive(Serialize)]
    struct ResultLine<'a> {
        product_name: &'a str,
        listings: Vec<&'a Listing>,
    }

    let mut grouped: BTreeMap<&str, Vec<&Listing>> = BTreeMap::new();
    for result in results {
        if let Some(name) = result.outcome.product_name() {
            grouped
                .entry(name)
                .or_default()
                .push(&listings[result.listing_index]);
        }
    }

    let write_err = |source| RecordError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    for (product_name, listings) in grouped {
        let line = ResultLine {
            product_name,
            listings,
        };
        let json = serde_json::to_string(&line).map_err(|source| RecordError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        writeln!(out, "{json}").map_err(write_err)?;
    }
    out.flush().map_err(write_err)
}

/// Reads a line-delimited JSON file. A malformed line is warned about and
/// skipped; only an unreadable file is a hard error. Blank lines are
/// tolerated.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RecordError> {
    let read_err = |source| RecordError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(read_err)?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    "Skipping malformed record at {}:{}: {}",
                    path.display(),
                    number + 1,
                    e
                );
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        warn!("{}: skipped {} malformed records", path.display(), skipped);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchOutcome;
    use std::io::Read;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("catalog-linker-tests");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(format!("{}-{}", std::process::id(), name))
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let path = temp_path("products.txt");
        std::fs::write(
            &path,
            concat!(
                r#"{"product_name":"Canon_A480","manufacturer":"Canon","model":"A480","family":"PowerShot","announced-date":"2009-01-05T19:00:00.000-05:00"}"#,
                "\n",
                "not json at all\n",
                "\n",
                r#"{"product_name":"Nikon_S640","manufacturer":"Nikon","model":"S640"}"#,
                "\n",
            ),
        )
        .unwrap();

        let products = read_products(&path).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_name, "Canon_A480");
        assert!(products[0].announced_date.is_some());
        assert!(products[1].family.is_none());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_a_hard_error() {
        let err = read_products(Path::new("/nonexistent/products.txt")).unwrap_err();
        assert!(matches!(err, RecordError::Read { .. }));
    }

    #[test]
    fn results_are_grouped_by_product() {
        let path = temp_path("results.txt");
        let listings = vec![
            Listing {
                title: "Canon PowerShot A480".into(),
                manufacturer: "Canon".into(),
                currency: "USD".into(),
                price: "99.99".into(),
            },
            Listing {
                title: "Unrelated tripod".into(),
                manufacturer: "".into(),
                currency: "USD".into(),
                price: "10.00".into(),
            },
            Listing {
                title: "Canon A480 boxed".into(),
                manufacturer: "Canon".into(),
                currency: "EUR".into(),
                price: "80.00".into(),
            },
        ];
        let results = vec![
            MatchResult {
                listing_index: 0,
                outcome: MatchOutcome::Matched("Canon_A480".into()),
            },
            MatchResult {
                listing_index: 1,
                outcome: MatchOutcome::NoCandidates,
            },
            MatchResult {
                listing_index: 2,
                outcome: MatchOutcome::Matched("Canon_A480".into()),
            },
        ];

        write_results(&path, &results, &listings).unwrap();
        let mut text = String::new();
        File::open(&path).unwrap().read_to_string(&mut text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["product_name"], "Canon_A480");
        assert_eq!(parsed["listings"].as_array().unwrap().len(), 2);
        // prices survive as the original strings
        assert_eq!(parsed["listings"][0]["price"], "99.99");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn regression_records_append_and_read_back() {
        let path = temp_path("regression.txt");
        let _ = std::fs::remove_file(&path);
        let record = RegressionRecord {
            listing: Listing {
                title: "Canon PowerShot A480".into(),
                manufacturer: "Canon".into(),
                currency: "USD".into(),
                price: "99.99".into(),
            },
            product_name: "Canon_A480".into(),
        };
        append_regression(&path, &record).unwrap();
        let none = RegressionRecord {
            listing: record.listing.clone(),
            product_name: RegressionRecord::NO_MATCH.into(),
        };
        append_regression(&path, &none).unwrap();

        let read = read_regression(&path).unwrap();
        assert_eq!(read.len(), 2);
        assert!(read[0].expects_match());
        assert!(!read[1].expects_match());
        std::fs::remove_file(&path).unwrap();
    }
}
