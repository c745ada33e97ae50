/// Normalize a string for comparison: lowercase, alphanumeric only.
#[inline]
fn normalize(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Compute a similarity score (0-1) between two free-text attributes.
///
/// Deliberately cheap, not an edit distance:
/// 1. Identical normalized strings score 1.0.
/// 2. Substring containment either way scores 0.8 ("Jacket" vs
///    "Leather Jacket" is a strong but not perfect match).
/// 3. Otherwise, the position-wise equal-character count divided by the
///    longer length. Rewards common prefixes, punishes length mismatches.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    // Covers the case where both strings are empty
    if a == b {
        return 1.0;
    }

    if a.contains(&b) || b.contains(&a) {
        return 0.8;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());

    let matching = a_chars
        .iter()
        .zip(b_chars.iter())
        .filter(|(x, y)| x == y)
        .count();

    matching as f64 / max_len as f64
}
