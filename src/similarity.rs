//! Pronunciation similarity: index-aligned character matching.

/// Percentage (0..=100) of positions where `spoken` has the same character as
/// `target`, relative to the length of `target`.
///
/// Only the first `min(len(target), len(spoken))` positions are compared, so
/// extra trailing characters in `spoken` cost nothing while a short `spoken`
/// loses the whole unmatched suffix of `target`. There is no alignment: an
/// inserted or dropped character shifts every later position. Comparison is
/// case-sensitive; callers lowercase transcripts beforehand.
///
/// An empty `target` scores 0.
pub fn compare_words(target: &str, spoken: &str) -> u8 {
    let target_len = target.chars().count();
    if target_len == 0 {
        return 0;
    }
    let matching = target
        .chars()
        .zip(spoken.chars())
        .filter(|(t, s)| t == s)
        .count();
    // matching <= target_len, so the quotient is at most 100
    (matching * 100 / target_len) as u8
}
