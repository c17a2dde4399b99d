//! Guess canonicalization for duplicate comparison

/// Comparison key for a guess: lower-cased and whitespace-trimmed
///
/// Used only for equality testing against accepted items, never displayed.
/// Total over any input string.
pub fn canonical_key(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(canonical_key("  Ford  "), "ford");
        assert_eq!(canonical_key("HARRY POTTER"), "harry potter");
    }

    #[test]
    fn test_preserves_inner_whitespace() {
        assert_eq!(canonical_key("Ford Motor Company"), "ford motor company");
    }

    #[test]
    fn test_idempotent() {
        let once = canonical_key(" Apple ");
        assert_eq!(canonical_key(&once), once);
    }

    #[test]
    fn test_non_ascii_lowercasing() {
        assert_eq!(canonical_key("Östersund"), "östersund");
        assert_eq!(canonical_key("ÅÄÖ"), "åäö");
    }

    #[test]
    fn test_total_over_degenerate_input() {
        assert_eq!(canonical_key(""), "");
        assert_eq!(canonical_key("   "), "");
    }
}
