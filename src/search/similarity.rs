//! Edit-distance similarity between short strings.

/// Levenshtein edit distance with unit cost for insertion, deletion and
/// substitution, computed over Unicode scalar values.
///
/// Uses the full `(len(b) + 1) × (len(a) + 1)` table, which is fine for
/// product names and tags but quadratic in memory for long inputs.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; a_len + 1]; b_len + 1];

    for (i, cell) in matrix[0].iter_mut().enumerate() {
        *cell = i;
    }
    for (j, row) in matrix.iter_mut().enumerate() {
        row[0] = j;
    }

    for j in 1..=b_len {
        for i in 1..=a_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[j][i] = (matrix[j][i - 1] + 1)
                .min(matrix[j - 1][i] + 1)
                .min(matrix[j - 1][i - 1] + cost);
        }
    }

    matrix[b_len][a_len]
}

/// Case-insensitive similarity in `[0, 1]`: one minus the edit distance
/// normalised by the longer string's length.
///
/// Two empty strings are identical and score 1.
pub fn similarity(a: &str, b: &str) -> f32 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    let max_len = a_lower.chars().count().max(b_lower.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(&a_lower, &b_lower);
    1.0 - (distance as f32 / max_len as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_similarity_identity() {
        for s in ["a", "iphone", "Samsung Galaxy", "café"] {
            assert_eq!(similarity(s, s), 1.0);
        }
    }

    #[test]
    fn test_similarity_empty_inputs() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("", "abc"), 0.0);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let pairs = [
            ("iphone", "iphnoe"),
            ("kitten", "sitting"),
            ("laptop", "lap"),
            ("Nike", "bike"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn test_similarity_ignores_case() {
        assert_eq!(similarity("IPHONE", "iphone"), 1.0);
    }

    #[test]
    fn test_similarity_values() {
        // one substitution over six characters
        assert!((similarity("iphone", "iphane") - (1.0 - 1.0 / 6.0)).abs() < 1e-6);
        // nothing in common
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_similarity_counts_characters_not_bytes() {
        // "é" is two bytes but one edit
        assert!((similarity("cafe", "café") - 0.75).abs() < 1e-6);
    }
}
