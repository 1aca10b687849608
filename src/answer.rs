/// Result of comparing a submitted answer against a clue's expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Nothing left after normalization.
    Empty,
    Correct,
    Wrong,
}

/// Canonicalize an answer for comparison: trim, lowercase (full Unicode case
/// mapping) and collapse every run of whitespace into a single space.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compare `input` with `expected` after normalizing both. Exact match only.
pub fn answers_match(input: &str, expected: &str) -> Match {
    let got = normalize(input);
    if got.is_empty() {
        return Match::Empty;
    }
    if got == normalize(expected) {
        Match::Correct
    } else {
        Match::Wrong
    }
}
