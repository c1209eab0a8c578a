//! Embedding capability
//!
//! Text-to-vector encoding consumed as a black box by the semantic
//! similarity unit. The default backend is any OpenAI-compatible
//! `/embeddings` endpoint.

pub mod openai;

use crate::error::NavResult;
use async_trait::async_trait;

pub use openai::OpenAiEmbedder;

/// Converts text into unit-normalized dense vectors.
///
/// Implementations must be safe for concurrent use.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Return one unit vector per input text, in input order.
    async fn embed_batch(&self, texts: &[&str]) -> NavResult<Vec<Vec<f32>>>;

    /// Dimensionality of the output vectors.
    fn dimension(&self) -> usize;
}

/// Scale a vector to unit length in place. Zero vectors are left as-is.
pub fn normalize_vector(v: &mut [f32]) {
    let norm: f64 = v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x = (*x as f64 / norm) as f32;
        }
    }
}

/// Dot product of two equal-length vectors.
///
/// Equals cosine similarity when both sides are unit-normalized.
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| x as f64 * y as f64)
        .sum()
}
