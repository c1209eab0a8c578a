//! Semantic similarity unit
//!
//! Meaning-based closeness via vector embeddings. Input and candidates go
//! out in a single batched encoding call; scores are dot products, which
//! equal cosine similarity because the embedder returns unit vectors.

use super::SimilarityUnit;
use crate::embed::{dot, Embedder};
use crate::error::NavResult;
use async_trait::async_trait;
use std::sync::Arc;

pub struct SemanticUnit {
    embedder: Arc<dyn Embedder>,
}

impl SemanticUnit {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

#[async_trait]
impl SimilarityUnit for SemanticUnit {
    fn name(&self) -> &'static str {
        "semantic"
    }

    async fn score(&self, input_text: &str, candidates: &[&str]) -> NavResult<Vec<f64>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        // One batch: input first, candidates after
        let mut texts = Vec::with_capacity(candidates.len() + 1);
        texts.push(input_text);
        texts.extend_from_slice(candidates);

        let vectors = self.embedder.embed_batch(&texts).await?;
        let (input_vec, candidate_vecs) = vectors
            .split_first()
            .ok_or_else(|| crate::error::NavError::Embed("empty embedding batch".into()))?;

        Ok(candidate_vecs.iter().map(|v| dot(input_vec, v)).collect())
    }
}
