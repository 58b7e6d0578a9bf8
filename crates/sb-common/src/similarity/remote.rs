use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{lexical, SimilarityStrategy};
use crate::oracle::{GenerationOptions, TextOracle};

/// Remote-oracle similarity with lexical fallback.
///
/// Makes exactly one best-effort oracle attempt per comparison; any failure,
/// rate limit, or non-numeric reply degrades to [`lexical::similarity`].
/// The oracle's own rate-limit latch is shared across callers, so once the
/// remote side pushes back every subsequent comparison goes straight to the
/// local path.
pub struct OracleSimilarity {
    oracle: Arc<dyn TextOracle>,
}

impl OracleSimilarity {
    pub fn new(oracle: Arc<dyn TextOracle>) -> Self {
        Self { oracle }
    }

    fn prompt(text1: &str, text2: &str) -> String {
        format!(
            "Rate the similarity between these two skill descriptions on a scale of 0 to 1 \
             (0 = completely different, 1 = identical). Only respond with a number.\n\n\
             Skill 1: {text1}\nSkill 2: {text2}\nSimilarity score (0-1):"
        )
    }
}

#[async_trait]
impl SimilarityStrategy for OracleSimilarity {
    fn name(&self) -> &'static str {
        "oracle-with-lexical-fallback"
    }

    async fn score(&self, text1: &str, text2: &str) -> f64 {
        if !self.oracle.available() {
            return lexical::similarity(text1, text2);
        }

        let options = GenerationOptions {
            temperature: 0.1,
            max_output_tokens: 10,
        };

        let Some(response) = self
            .oracle
            .generate(&Self::prompt(text1, text2), &options)
            .await
        else {
            return lexical::similarity(text1, text2);
        };

        match response.trim().parse::<f64>() {
            Ok(score) if score.is_finite() => score.clamp(0.0, 1.0),
            _ => {
                debug!(response = %response.trim(), "non-numeric oracle reply; using lexical fallback");
                lexical::similarity(text1, text2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::NullOracle;

    struct CannedOracle(&'static str);

    #[async_trait]
    impl TextOracle for CannedOracle {
        async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn unavailable_oracle_falls_back_to_lexical() {
        let strategy = OracleSimilarity::new(Arc::new(NullOracle));

        let score = strategy.score("react", "react").await;
        assert_eq!(score, lexical::similarity("react", "react"));
    }

    #[tokio::test]
    async fn numeric_oracle_reply_is_clamped() {
        let strategy = OracleSimilarity::new(Arc::new(CannedOracle(" 1.7 ")));
        assert_eq!(strategy.score("a", "b").await, 1.0);

        let strategy = OracleSimilarity::new(Arc::new(CannedOracle("0.65")));
        assert_eq!(strategy.score("a", "b").await, 0.65);
    }

    #[tokio::test]
    async fn non_numeric_reply_degrades_to_lexical() {
        let strategy = OracleSimilarity::new(Arc::new(CannedOracle("very similar")));

        let score = strategy.score("python basics", "python basics").await;
        assert_eq!(score, 1.0);
    }
}
