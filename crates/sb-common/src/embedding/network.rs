use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::EMBEDDING_DIM;

pub const HIDDEN_DIM: usize = 20;

/// Fixed seed for the weight tables. The network is never trained; the seed
/// pins the weights so scores are identical across runs and processes.
/// Changing it changes every similarity score; bump `version()` with it.
const WEIGHT_SEED: u64 = 0x5b17_ba47_e52a_90c3;

static FIXED: LazyLock<FeedForwardNetwork> =
    LazyLock::new(|| FeedForwardNetwork::seeded(WEIGHT_SEED));

/// Two-layer feed-forward network over the elementwise absolute difference
/// of two embeddings: 50 → 20 (ReLU) → 1 (sigmoid).
///
/// Weights are drawn uniformly from (-0.05, 0.05) and frozen, so this is a
/// deterministic nonlinear transform of embedding distance, not a learned
/// model.
#[derive(Debug, Clone)]
pub struct FeedForwardNetwork {
    // w1[j] is the input row feeding hidden unit j.
    w1: Vec<Vec<f32>>,
    b1: Vec<f32>,
    w2: Vec<f32>,
    b2: f32,
}

impl FeedForwardNetwork {
    /// The process-wide instance with the pinned seed.
    pub fn fixed() -> &'static FeedForwardNetwork {
        &FIXED
    }

    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sample = move || (rng.random::<f32>() - 0.5) * 0.1;

        let w1 = (0..HIDDEN_DIM)
            .map(|_| (0..EMBEDDING_DIM).map(|_| sample()).collect())
            .collect();
        let b1 = (0..HIDDEN_DIM).map(|_| sample()).collect();
        let w2 = (0..HIDDEN_DIM).map(|_| sample()).collect();
        let b2 = sample();

        Self { w1, b1, w2, b2 }
    }

    /// Weight-table generation marker; bump when the seed or layout changes.
    pub fn version(&self) -> &'static str {
        "seeded-v1"
    }

    /// Forward pass over the absolute-difference vector of two embeddings.
    /// Always in (0, 1) thanks to the sigmoid output.
    pub fn forward(&self, e1: &[f32], e2: &[f32]) -> f32 {
        let diff: Vec<f32> = e1
            .iter()
            .zip(e2.iter())
            .map(|(a, b)| (a - b).abs())
            .collect();

        let mut output = self.b2;
        for (j, row) in self.w1.iter().enumerate() {
            let pre: f32 = row.iter().zip(diff.iter()).map(|(w, x)| w * x).sum::<f32>()
                + self.b1[j];
            let hidden = pre.max(0.0); // ReLU
            output += self.w2[j] * hidden;
        }

        sigmoid(output)
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_is_deterministic_across_instances() {
        let a = FeedForwardNetwork::seeded(WEIGHT_SEED);
        let b = FeedForwardNetwork::seeded(WEIGHT_SEED);

        let e1 = vec![0.5; EMBEDDING_DIM];
        let e2 = vec![0.1; EMBEDDING_DIM];

        assert_eq!(a.forward(&e1, &e2), b.forward(&e1, &e2));
    }

    #[test]
    fn forward_output_stays_in_open_unit_interval() {
        let net = FeedForwardNetwork::fixed();

        let zero = vec![0.0; EMBEDDING_DIM];
        let ones = vec![1.0; EMBEDDING_DIM];
        for (e1, e2) in [(&zero, &zero), (&zero, &ones), (&ones, &zero)] {
            let score = net.forward(e1, e2);
            assert!(score > 0.0 && score < 1.0, "score out of range: {score}");
        }
    }

    #[test]
    fn identical_embeddings_score_near_half() {
        // With a zero difference vector only the biases contribute, and they
        // are all within (-0.05, 0.05).
        let net = FeedForwardNetwork::fixed();
        let emb = vec![0.3; EMBEDDING_DIM];

        let score = net.forward(&emb, &emb);
        assert!((score - 0.5).abs() < 0.05, "score drifted: {score}");
    }
}
