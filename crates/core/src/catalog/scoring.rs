//! Name relevance scoring.
//!
//! Three tiers: exact match, substring containment, then normalized
//! Levenshtein similarity with a hard floor. Containment always outranks any
//! edit-distance score.

/// Score for a name that contains the query but is not equal to it.
pub const SUBSTRING_SCORE: f64 = 0.9;

/// Similarities at or below this are discarded as noise.
pub const SIMILARITY_FLOOR: f64 = 0.4;

/// Score how well `name` matches `query`, in `[0.0, 1.0]`.
///
/// Both inputs are trimmed and lower-cased first. `0.0` means no match.
pub fn score(query: &str, name: &str) -> f64 {
    let query = query.trim().to_lowercase();
    let name = name.trim().to_lowercase();
    score_normalized(&query, &name)
}

/// Same as [`score`] for inputs that are already trimmed and lower-cased.
pub(crate) fn score_normalized(query: &str, name: &str) -> f64 {
    if name == query {
        // Two empty strings land here too; an empty query never reaches
        // scoring from a search, and comparing nothing is not a match.
        return if query.is_empty() { 0.0 } else { 1.0 };
    }

    if name.contains(query) {
        return if query.is_empty() { 0.0 } else { SUBSTRING_SCORE };
    }

    let max_len = query.chars().count().max(name.chars().count());
    if max_len == 0 {
        return 0.0;
    }

    let distance = levenshtein_distance(query, name);
    let similarity = 1.0 - (distance as f64 / max_len as f64);

    if similarity > SIMILARITY_FLOOR {
        similarity
    } else {
        0.0
    }
}

/// Levenshtein edit distance between two strings, counted in chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rolling rows instead of the full matrix; the catalog is scanned per query.
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("same", "same"), 0);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
        assert_eq!(levenshtein_distance("ポータル", "ポータル2"), 1);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert_eq!(score("Counter-Strike", "counter-strike"), 1.0);
        assert_eq!(score("  portal ", "Portal"), 1.0);
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(score("counter", "Counter-Strike: Source"), SUBSTRING_SCORE);
    }

    #[test]
    fn test_substring_outranks_closer_edit_distance() {
        // "portak" is a single edit away, yet the long containing name still wins.
        let substring = score("portal", "Portal Stories: Mel");
        let near_miss = score("portal", "portak");
        assert_eq!(substring, SUBSTRING_SCORE);
        assert!(near_miss > SIMILARITY_FLOOR);
        assert!(near_miss < substring);
    }

    #[test]
    fn test_fuzzy_match_above_floor() {
        // distance 1 over 14 chars
        let s = score("counter strike", "Counter-Strike");
        let expected = 1.0 - 1.0 / 14.0;
        assert!((s - expected).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_at_floor_is_discarded() {
        // distance 3 over 5 chars -> 0.4 exactly, which is not above the floor
        assert_eq!(score("abcde", "abxyz"), 0.0);
        // distance 2 over 5 chars -> 0.6
        assert!((score("abcde", "abcyz") - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_names_score_zero() {
        assert_eq!(score("half-life", "Stardew Valley"), 0.0);
    }

    #[test]
    fn test_query_longer_than_name() {
        // Normalized by the longer string: distance 4 over 10 chars -> 0.6
        let s = score("portal two", "portal");
        assert!(s <= SUBSTRING_SCORE);
        assert!((s - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_two_empty_strings_are_no_match() {
        assert_eq!(score("", ""), 0.0);
        assert_eq!(score("   ", ""), 0.0);
    }

    #[test]
    fn test_empty_query_never_matches() {
        assert_eq!(score("", "Portal"), 0.0);
    }
}
