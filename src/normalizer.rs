//! Free-text normalization: everything downstream compares token sequences
//! produced here, never raw strings.

use unicode_normalization::UnicodeNormalization;

#[derive(Clone, Copy, PartialEq)]
enum CharKind {
    Letter,
    Digit,
}

/// Tokenizes free text into lowercase alphanumeric tokens.
///
/// Any punctuation or whitespace is a token boundary, so "PowerShot-A480"
/// and "PowerShot A480" tokenize identically. Diacritics are stripped via
/// NFKD decomposition. Tokens are additionally split at letter/digit
/// transitions: "A480" becomes ["a", "480"], which makes "A-480" and
/// "A 480" equal to it while keeping "A4800" distinct (a model number must
/// match as a whole number, never as a prefix of a longer one).
///
/// Idempotent: rejoining the output with spaces and normalizing again
/// yields the same sequence.
pub fn normalize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut kind = None;

    for ch in text.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if !ch.is_alphanumeric() {
            flush(&mut tokens, &mut current);
            kind = None;
            continue;
        }
        let next_kind = if ch.is_ascii_digit() {
            CharKind::Digit
        } else {
            CharKind::Letter
        };
        if kind.is_some() && kind != Some(next_kind) {
            flush(&mut tokens, &mut current);
        }
        kind = Some(next_kind);
        current.extend(ch.to_lowercase());
    }
    flush(&mut tokens, &mut current);
    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

fn is_combining_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}

/// True when every char of the token is a decimal digit.
pub fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_punctuation() {
        assert_eq!(
            normalize("Cyber-shot DSC/W310"),
            vec!["cyber", "shot", "dsc", "w", "310"]
        );
    }

    #[test]
    fn splits_letter_digit_transitions() {
        assert_eq!(normalize("PowerShot-A480"), vec!["powershot", "a", "480"]);
        assert_eq!(normalize("PowerShot A480"), vec!["powershot", "a", "480"]);
        assert_eq!(normalize("A4800"), vec!["a", "4800"]);
        assert_eq!(normalize("150D"), vec!["150", "d"]);
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(normalize("Caméra numérique"), vec!["camera", "numerique"]);
    }

    #[test]
    fn collapses_whitespace_and_parentheses() {
        assert_eq!(normalize("  GXR  (A12) "), vec!["gxr", "a", "12"]);
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert_eq!(normalize(""), Vec::<String>::new());
        assert_eq!(normalize("--- / ---"), Vec::<String>::new());
    }

    #[test]
    fn idempotent_over_rejoined_tokens() {
        for title in [
            "Canon PowerShot A480 IS Digital Camera",
            "Olympus Stylus Tough-3000 12 MP",
            "Über-Kamera 5000x (Schwarz)",
        ] {
            let once = normalize(title);
            let twice = normalize(&once.join(" "));
            assert_eq!(once, twice);
        }
    }
}
