//! Shared test doubles: deterministic similarity units and a recording
//! deck driver, so navigation behavior is testable without audio,
//! models, or network.

use async_trait::async_trait;
use slidekick::error::NavResult;
use slidekick::matching::SimilarityUnit;
use slidekick::navigator::driver::DeckDriver;
use std::sync::{Arc, Mutex};

/// Scores candidates by word overlap with the input, in [0, 1].
///
/// Stands in for the embedding-based unit: shared vocabulary scores high,
/// disjoint vocabulary scores zero, no network involved.
pub struct WordOverlapUnit;

#[async_trait]
impl SimilarityUnit for WordOverlapUnit {
    fn name(&self) -> &'static str {
        "word-overlap"
    }

    async fn score(&self, input_text: &str, candidates: &[&str]) -> NavResult<Vec<f64>> {
        let input_words: Vec<&str> = input_text.split_whitespace().collect();
        Ok(candidates
            .iter()
            .map(|c| {
                let cand_words: Vec<&str> = c.split_whitespace().collect();
                if input_words.is_empty() || cand_words.is_empty() {
                    return 0.0;
                }
                let shared = cand_words
                    .iter()
                    .filter(|w| input_words.contains(w))
                    .count();
                shared as f64 / input_words.len().max(cand_words.len()) as f64
            })
            .collect())
    }
}

/// Unit that always fails, for capability-failure policy tests
pub struct FailingUnit;

#[async_trait]
impl SimilarityUnit for FailingUnit {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn score(&self, _input: &str, _candidates: &[&str]) -> NavResult<Vec<f64>> {
        Err(slidekick::error::NavError::Embed(
            "simulated capability outage".into(),
        ))
    }
}

/// Deck driver that records every target it was asked to reach
#[derive(Clone, Default)]
pub struct RecorderDriver {
    pub visited: Arc<Mutex<Vec<usize>>>,
}

impl DeckDriver for RecorderDriver {
    fn go_to(&mut self, section_index: usize) -> NavResult<()> {
        self.visited.lock().unwrap().push(section_index);
        Ok(())
    }
}

/// Deck driver whose key simulation always fails
#[derive(Clone, Default)]
pub struct BrokenDriver;

impl DeckDriver for BrokenDriver {
    fn go_to(&mut self, _section_index: usize) -> NavResult<()> {
        Err(slidekick::error::NavError::Input(
            "virtual keyboard unavailable".into(),
        ))
    }
}
