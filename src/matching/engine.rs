//! Similarity engine
//!
//! Runs both scoring dimensions over the candidate set, normalizes each
//! dimension independently, and fuses them into one ranked confidence
//! list.

use super::{SimilarityResult, SimilarityUnit};
use crate::core::Chunk;
use crate::error::NavResult;

pub struct SimilarityEngine {
    semantic: Box<dyn SimilarityUnit>,
    phonetic: Box<dyn SimilarityUnit>,
    semantic_weight: f64,
    phonetic_weight: f64,
    score_floor: f64,
}

impl SimilarityEngine {
    pub fn new(
        semantic: Box<dyn SimilarityUnit>,
        phonetic: Box<dyn SimilarityUnit>,
        semantic_weight: f64,
        phonetic_weight: f64,
        score_floor: f64,
    ) -> Self {
        Self {
            semantic,
            phonetic,
            semantic_weight,
            phonetic_weight,
            score_floor,
        }
    }

    /// Score `input_text` against every candidate and return the fused
    /// results, best first. Ties keep candidate order (stable sort), so
    /// output is deterministic.
    pub async fn compare(
        &self,
        input_text: &str,
        candidates: &[&Chunk],
    ) -> NavResult<Vec<SimilarityResult>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = candidates
            .iter()
            .map(|c| c.partial_content.as_str())
            .collect();

        let semantic_raw = self.semantic.score(input_text, &texts).await?;
        let phonetic_raw = self.phonetic.score(input_text, &texts).await?;
        debug_assert_eq!(semantic_raw.len(), candidates.len());
        debug_assert_eq!(phonetic_raw.len(), candidates.len());

        let semantic_norm = normalize_scores(&semantic_raw, self.score_floor);
        let phonetic_norm = normalize_scores(&phonetic_raw, self.score_floor);

        let mut results: Vec<SimilarityResult> = candidates
            .iter()
            .zip(semantic_norm.iter().zip(phonetic_norm.iter()))
            .map(|(chunk, (&sem, &pho))| SimilarityResult {
                chunk: (*chunk).clone(),
                score: self.semantic_weight * sem + self.phonetic_weight * pho,
            })
            .collect();

        // sort_by is stable: equal scores keep candidate order
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(results)
    }
}

/// Floored min-max scaling within one dimension's result set.
///
/// Scores below the floor are non-matches and pin to 0.0. Survivors
/// rescale so the best maps to 1.0 and the worst survivor to 0.0, which
/// makes the two dimensions comparable and keeps a uniformly mediocre
/// candidate set from inflating confidence.
fn normalize_scores(raw: &[f64], floor: f64) -> Vec<f64> {
    let survivors: Vec<f64> = raw.iter().copied().filter(|&s| s >= floor).collect();
    if survivors.is_empty() {
        return vec![0.0; raw.len()];
    }

    let max = survivors.iter().cloned().fold(f64::MIN, f64::max);
    let min = survivors.iter().cloned().fold(f64::MAX, f64::min);
    let range = max - min;

    raw.iter()
        .map(|&s| {
            if s < floor {
                0.0
            } else if range == 0.0 {
                1.0
            } else {
                (s - min) / range
            }
        })
        .collect()
}
