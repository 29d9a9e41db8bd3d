use serde::Deserialize;
use std::fs;

/// Tuning parameters for the matching engine. Both knobs trade precision
/// against recall and should be validated against the regression set, not
/// adjusted blind.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// How many leading whitespace-separated words of a listing title are
    /// searched for model signatures. Model names almost always lead the
    /// title; trailing text is accessory noise. 0 means the whole title.
    pub title_window: usize,
    /// A purely numeric model signature with fewer digits than this never
    /// matches on its own (a bare "5" would hit half the catalog).
    pub min_numeric_signature_len: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            title_window: 6,
            min_numeric_signature_len: 2,
        }
    }
}

pub fn load_config(path: &str) -> Result<MatcherConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: MatcherConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let config: MatcherConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.title_window, 6);
        assert_eq!(config.min_numeric_signature_len, 2);
    }

    #[test]
    fn overrides_are_honored() {
        let config: MatcherConfig =
            serde_json::from_str(r#"{"title_window": 0, "min_numeric_signature_len": 3}"#).unwrap();
        assert_eq!(config.title_window, 0);
        assert_eq!(config.min_numeric_signature_len, 3);
    }
}
