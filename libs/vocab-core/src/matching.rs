//! Answer matching for quiz rounds.

use serde::{Deserialize, Serialize};

/// Result of comparing a typed answer to the expected meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized expected answer (for display).
    pub expected_normalized: String,
}

/// Compare a typed answer to the expected meaning.
///
/// Both sides are trimmed and lowercased, then compared for exact equality.
/// There is no partial credit.
pub fn compare_answers(typed: &str, expected: &str) -> MatchResult {
    let typed_normalized = normalize_answer(typed);
    let expected_normalized = normalize_answer(expected);
    let is_correct = !typed_normalized.is_empty() && typed_normalized == expected_normalized;

    MatchResult {
        is_correct,
        typed_normalized,
        expected_normalized,
    }
}

/// Trim and case-fold an answer.
pub fn normalize_answer(s: &str) -> String {
    s.trim().to_lowercase()
}
