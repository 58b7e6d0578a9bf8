use async_trait::async_trait;

use super::SimilarityStrategy;
use crate::embedding::{cosine_similarity, EmbeddingGenerator, FeedForwardNetwork};

/// Local neural similarity: 0.6 × feed-forward score over the embedding
/// difference + 0.4 × cosine similarity, clamped to [0, 1]. Entirely
/// in-process and deterministic.
#[derive(Clone, Copy)]
pub struct NeuralSimilarity {
    generator: EmbeddingGenerator,
    network: &'static FeedForwardNetwork,
}

impl Default for NeuralSimilarity {
    fn default() -> Self {
        Self::new()
    }
}

impl NeuralSimilarity {
    pub fn new() -> Self {
        Self {
            generator: EmbeddingGenerator::new(),
            network: FeedForwardNetwork::fixed(),
        }
    }

    pub fn embed(&self, text: &str) -> Vec<f32> {
        self.generator.embed(text)
    }

    pub fn generator(&self) -> &EmbeddingGenerator {
        &self.generator
    }

    /// Synchronous scoring path; the trait impl delegates here.
    pub fn score_sync(&self, text1: &str, text2: &str) -> f64 {
        let e1 = self.generator.embed(text1);
        let e2 = self.generator.embed(text2);

        let nn_score = self.network.forward(&e1, &e2) as f64;
        let cosine_score = cosine_similarity(&e1, &e2) as f64;

        (0.6 * nn_score + 0.4 * cosine_score).clamp(0.0, 1.0)
    }

    /// Mean pairwise similarity across two skill-name sets; 0 when either
    /// side is empty.
    pub fn user_similarity(&self, skills1: &[String], skills2: &[String]) -> f64 {
        if skills1.is_empty() || skills2.is_empty() {
            return 0.0;
        }

        let mut total = 0.0;
        let mut comparisons = 0usize;
        for a in skills1 {
            for b in skills2 {
                total += self.score_sync(a, b);
                comparisons += 1;
            }
        }

        if comparisons == 0 {
            0.0
        } else {
            total / comparisons as f64
        }
    }
}

#[async_trait]
impl SimilarityStrategy for NeuralSimilarity {
    fn name(&self) -> &'static str {
        "local-neural"
    }

    async fn score(&self, text1: &str, text2: &str) -> f64 {
        self.score_sync(text1, text2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_stay_in_unit_interval() {
        let neural = NeuralSimilarity::new();

        for (a, b) in [
            ("javascript", "typescript"),
            ("", ""),
            ("", "react"),
            ("a very long unrelated sentence about gardening", "rust"),
        ] {
            let score = neural.score_sync(a, b);
            assert!((0.0..=1.0).contains(&score), "{a:?}/{b:?} gave {score}");
        }
    }

    #[test]
    fn identical_skills_outscore_unrelated_ones() {
        let neural = NeuralSimilarity::new();

        let same = neural.score_sync("javascript", "javascript");
        let related = neural.score_sync("javascript", "typescript");
        let unrelated = neural.score_sync("javascript", "cooking");

        assert!(same > unrelated, "{same} vs {unrelated}");
        assert!(related > unrelated, "{related} vs {unrelated}");
    }

    #[test]
    fn unrelated_skills_score_below_threshold() {
        let neural = NeuralSimilarity::new();
        let score = neural.score_sync("JavaScript", "Cooking");

        assert!(score < 0.4, "unrelated skills scored {score}");
    }

    #[test]
    fn scoring_is_deterministic() {
        let a = NeuralSimilarity::new();
        let b = NeuralSimilarity::new();

        assert_eq!(a.score_sync("react", "vue"), b.score_sync("react", "vue"));
    }

    #[test]
    fn user_similarity_guards_empty_sides() {
        let neural = NeuralSimilarity::new();
        let skills = vec!["react".to_string()];

        assert_eq!(neural.user_similarity(&[], &skills), 0.0);
        assert_eq!(neural.user_similarity(&skills, &[]), 0.0);
    }

    #[test]
    fn user_similarity_averages_pairs() {
        let neural = NeuralSimilarity::new();
        let a = vec!["react".to_string(), "vue".to_string()];
        let b = vec!["react".to_string()];

        let mean = neural.user_similarity(&a, &b);
        let expected =
            (neural.score_sync("react", "react") + neural.score_sync("vue", "react")) / 2.0;
        assert!((mean - expected).abs() < 1e-12);
    }
}
