//! Free-text comparison helpers for movement descriptions.
//!
//! Bank and ledger descriptions rarely match verbatim: the two systems use
//! different templates, add reference numbers, and disagree on casing and
//! accents. The engine's matching phases discriminate on [`extract_numbers`]
//! (shared reference numbers); [`TokenMatcher`] offers the broader
//! word-overlap signal for presentation and filtering layers, where
//! token-set intersection after normalization is a cheap, explainable proxy
//! for "these mention the same thing".

use std::collections::HashSet;

/// Stopwords dropped before comparing description tokens. Covers the filler
/// words common in Spanish and English bank statement templates.
const DEFAULT_STOPWORDS: &[&str] = &[
    "de", "del", "la", "el", "los", "las", "un", "una", "en", "al", "por", "para", "con", "sin",
    "y", "o", "the", "of", "and", "or", "for", "to", "from",
];

/// Compares two free-text descriptions for meaningful token overlap.
///
/// Holds the stopword set so callers can tune it per run; the comparison
/// itself is pure, deterministic, and symmetric in its two arguments.
#[derive(Debug, Clone)]
pub struct TokenMatcher {
    stopwords: HashSet<String>,
}

impl TokenMatcher {
    /// Create a matcher with a custom stopword set
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the two texts share at least one meaningful token after
    /// lowercasing, diacritic stripping, and stopword removal
    pub fn has_textual_overlap(&self, text_a: &str, text_b: &str) -> bool {
        let tokens_a = self.tokens(text_a);
        if tokens_a.is_empty() {
            return false;
        }
        !tokens_a.is_disjoint(&self.tokens(text_b))
    }

    /// Normalized token set for one text: lowercase, strip diacritics,
    /// split on runs of non-alphanumerics, drop single characters and
    /// stopwords
    fn tokens(&self, text: &str) -> HashSet<String> {
        strip_diacritics(&text.to_lowercase())
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() > 1)
            .filter(|t| !self.stopwords.contains(*t))
            .map(str::to_string)
            .collect()
    }
}

impl Default for TokenMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS.iter().copied())
    }
}

/// Replace accented Latin characters with their base letter.
///
/// Input is expected to be lowercased already; covers the accent range seen
/// in bank statement exports rather than full Unicode normalization.
pub fn strip_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Extract every maximal run of ASCII digits from a text.
///
/// A narrower "shares a reference number" signal than general word overlap;
/// used by the tolerant phase to upgrade suggestions.
pub fn extract_numbers(text: &str) -> HashSet<String> {
    let mut numbers = HashSet::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            numbers.insert(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        numbers.insert(current);
    }
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_on_shared_reference() {
        let matcher = TokenMatcher::default();
        assert!(matcher.has_textual_overlap("Transferencia 1461 Ref 5678", "Pago 1461"));
    }

    #[test]
    fn test_no_overlap_on_disjoint_tokens() {
        let matcher = TokenMatcher::default();
        assert!(!matcher.has_textual_overlap("Transferencia 1461", "Deposito cliente"));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let matcher = TokenMatcher::default();
        let a = "Pago proveedor ACME 33";
        let b = "ACME factura 9921";
        assert_eq!(
            matcher.has_textual_overlap(a, b),
            matcher.has_textual_overlap(b, a)
        );
    }

    #[test]
    fn test_overlap_ignores_case_and_diacritics() {
        let matcher = TokenMatcher::default();
        assert!(matcher.has_textual_overlap("DÉBITO automático", "debito cuenta"));
    }

    #[test]
    fn test_stopwords_and_short_tokens_do_not_count() {
        let matcher = TokenMatcher::default();
        // Only shares "de", "la" and the single char "x"
        assert!(!matcher.has_textual_overlap("pago de la x", "cobro de la x"));
    }

    #[test]
    fn test_custom_stopwords() {
        let matcher = TokenMatcher::new(["transferencia"]);
        assert!(!matcher.has_textual_overlap("transferencia saliente", "transferencia entrante"));
    }

    #[test]
    fn test_empty_text_never_overlaps() {
        let matcher = TokenMatcher::default();
        assert!(!matcher.has_textual_overlap("", "Pago 1461"));
        assert!(!matcher.has_textual_overlap("", ""));
    }

    #[test]
    fn test_extract_numbers_maximal_runs() {
        let numbers = extract_numbers("Ref 5678/1461 cuota 03");
        let expected: HashSet<String> = ["5678", "1461", "03"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_extract_numbers_empty_and_plain_text() {
        assert!(extract_numbers("").is_empty());
        assert!(extract_numbers("sin referencias").is_empty());
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("crédito ñandú"), "credito nandu");
    }
}
