pub mod network;
pub mod similarity;
pub mod taxonomy;

pub use network::FeedForwardNetwork;
pub use similarity::cosine_similarity;
pub use taxonomy::{SkillTaxonomy, CATEGORY_COUNT};

use std::collections::HashMap;

/// Embedding dimension: 6 category slots + 44 vocabulary-frequency slots.
pub const EMBEDDING_DIM: usize = 50;

const VOCABULARY_SLOTS: usize = EMBEDDING_DIM - CATEGORY_COUNT;

/// Converts free-text skill descriptions into fixed-length feature vectors.
///
/// Pure function of the taxonomy tables: the first 6 slots hold per-category
/// keyword-hit ratios, the remaining 44 hold term frequencies for the first
/// 44 vocabulary terms. The result is L2-normalized; input with no signal
/// (or the empty string) yields the zero vector.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddingGenerator {
    taxonomy: &'static SkillTaxonomy,
}

impl Default for EmbeddingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingGenerator {
    pub fn new() -> Self {
        Self::with_taxonomy(SkillTaxonomy::standard())
    }

    pub fn with_taxonomy(taxonomy: &'static SkillTaxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &'static SkillTaxonomy {
        self.taxonomy
    }

    pub fn embed(&self, text: &str) -> Vec<f32> {
        let text = text.to_lowercase();
        let words: Vec<&str> = text.split_whitespace().collect();

        let mut vector = vec![0.0f32; EMBEDDING_DIM];

        for (slot, category) in self.taxonomy.categories().iter().enumerate() {
            let hits = category
                .keywords
                .iter()
                .filter(|keyword| text.contains(*keyword))
                .count();
            vector[slot] = hits as f32 / category.keywords.len() as f32;
        }

        let mut word_freq: HashMap<&str, usize> = HashMap::new();
        for word in &words {
            *word_freq.entry(word).or_insert(0) += 1;
        }

        let total = words.len().max(1) as f32;
        for (offset, term) in self
            .taxonomy
            .vocabulary()
            .iter()
            .take(VOCABULARY_SLOTS)
            .enumerate()
        {
            let freq = word_freq.get(term.as_str()).copied().unwrap_or(0);
            vector[CATEGORY_COUNT + offset] = freq as f32 / total;
        }

        normalize(vector)
    }
}

/// L2-normalize in place; the zero vector passes through unchanged.
fn normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}

/// Elementwise mean of a set of equal-length vectors; zero vector when empty.
pub fn mean_embedding(vectors: &[Vec<f32>]) -> Vec<f32> {
    if vectors.is_empty() {
        return vec![0.0; EMBEDDING_DIM];
    }

    let mut sum = vec![0.0f32; vectors[0].len()];
    for vector in vectors {
        for (acc, value) in sum.iter_mut().zip(vector.iter()) {
            *acc += value;
        }
    }

    let count = vectors.len() as f32;
    for value in &mut sum {
        *value /= count;
    }
    sum
}
