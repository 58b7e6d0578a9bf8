pub mod lexical;
pub mod neural;
pub mod remote;

pub use neural::NeuralSimilarity;
pub use remote::OracleSimilarity;

use async_trait::async_trait;

/// One skill-to-skill similarity capability with two selectable strategies:
///
/// - [`OracleSimilarity`]: remote oracle with lexical fallback; used by
///   profile matching and teacher search.
/// - [`NeuralSimilarity`]: local embedding + feed-forward scorer; used by
///   the "custom" similarity endpoints and learning-path gap analysis.
///
/// Scores are always finite and in [0, 1].
#[async_trait]
pub trait SimilarityStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn score(&self, text1: &str, text2: &str) -> f64;
}
