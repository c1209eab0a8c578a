//! Hybrid similarity matching
//!
//! Two scoring dimensions (meaning and sound) behind one trait, fused by
//! the engine into a single ranked confidence list.

pub mod engine;
pub mod phonetic;
pub mod semantic;

use crate::core::Chunk;
use crate::error::NavResult;
use async_trait::async_trait;

pub use engine::SimilarityEngine;
pub use phonetic::PhoneticUnit;
pub use semantic::SemanticUnit;

/// One scored candidate, produced per matching tick and discarded after
/// the navigation controller consumes the ranked list
#[derive(Debug, Clone)]
pub struct SimilarityResult {
    pub chunk: Chunk,
    pub score: f64,
}

/// One dimension of similarity scoring.
///
/// The engine depends only on this trait, so units can be swapped or
/// mocked in tests.
#[async_trait]
pub trait SimilarityUnit: Send + Sync {
    fn name(&self) -> &'static str;

    /// Raw closeness of `input_text` to each candidate, in candidate order.
    /// Raw ranges differ per unit; the engine normalizes before fusing.
    async fn score(&self, input_text: &str, candidates: &[&str]) -> NavResult<Vec<f64>>;
}
