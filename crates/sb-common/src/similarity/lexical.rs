use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9\s]").expect("static pattern compiles")
});

fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ALNUM.replace_all(&lowered, "").trim().to_string()
}

fn tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().filter(|w| w.len() > 2).collect()
}

/// Token-overlap similarity between two free-text strings, in [0, 1].
///
/// Identical normalized strings score 1.0, substring containment 0.9;
/// otherwise the maximum of the word-overlap ratio and Jaccard similarity
/// over tokens longer than two characters. Symmetric, never errors, and
/// guards every denominator.
pub fn similarity(text1: &str, text2: &str) -> f64 {
    let t1 = normalize(text1);
    let t2 = normalize(text2);

    if t1 == t2 {
        return 1.0;
    }
    if t1.contains(&t2) || t2.contains(&t1) {
        return 0.9;
    }

    let words1 = tokens(&t1);
    let words2 = tokens(&t2);

    let set1: HashSet<&str> = words1.iter().copied().collect();
    let set2: HashSet<&str> = words2.iter().copied().collect();

    let common = words1.iter().filter(|w| set2.contains(*w)).count();
    let word_overlap = common as f64 / words1.len().max(words2.len()).max(1) as f64;

    let intersection = set1.intersection(&set2).count();
    let union = set1.union(&set2).count();
    let jaccard = if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    };

    word_overlap.max(jaccard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("React", "react"), 1.0);
        assert_eq!(similarity("Node.js", "nodejs"), 1.0);
    }

    #[test]
    fn substring_containment_scores_point_nine() {
        assert_eq!(similarity("machine learning", "machine learning engineer"), 0.9);
    }

    #[test]
    fn similarity_is_symmetric() {
        let pairs = [
            ("python data analysis", "data analysis with pandas"),
            ("web design", "graphic design"),
            ("", "cooking"),
            ("react developer", "vue developer"),
        ];

        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a), "asymmetric for {a:?} / {b:?}");
        }
    }

    #[test]
    fn partial_token_overlap_is_bounded() {
        let score = similarity("python data analysis", "data analysis expert");
        assert!(score > 0.0 && score < 1.0, "got {score}");
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity("gardening", "quantum computing"), 0.0);
    }

    #[test]
    fn short_tokens_are_ignored() {
        // "ui" and "ux" are dropped by the length filter, leaving no tokens,
        // so both ratios fall back to their guarded zero.
        assert_eq!(similarity("ui ux", "ux kit"), 0.0);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        for (a, b) in [("", ""), ("a", "b"), ("react react react", "react")] {
            let score = similarity(a, b);
            assert!((0.0..=1.0).contains(&score), "{a:?}/{b:?} gave {score}");
        }
    }
}
