//! Verdict fixtures used across test suites

#![allow(dead_code)] // Test utilities may not all be used currently

use engine::GuessVerdict;

/// Verdict for a guess that earns a point
pub fn accepted_verdict(canonical: &str) -> GuessVerdict {
    GuessVerdict {
        is_member: true,
        is_specific: true,
        canonical_form: canonical.to_string(),
        rejection_reason: None,
    }
}

/// Verdict for a guess that is not a member of the category
pub fn rejected_verdict(reason: &str) -> GuessVerdict {
    GuessVerdict {
        is_member: false,
        is_specific: true,
        canonical_form: String::new(),
        rejection_reason: Some(reason.to_string()),
    }
}

/// Verdict for a guess that names the category itself or a super-category
pub fn vague_verdict(canonical: &str) -> GuessVerdict {
    GuessVerdict {
        is_member: true,
        is_specific: false,
        canonical_form: canonical.to_string(),
        rejection_reason: Some("Too vague".to_string()),
    }
}
