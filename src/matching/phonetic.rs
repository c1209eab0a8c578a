//! Phonetic similarity unit
//!
//! Sound-based closeness: Double Metaphone codes compared with a
//! normalized Levenshtein ratio, so spelling variants and homophones the
//! recognizer produces ("write"/"right") still match the script.

use super::SimilarityUnit;
use crate::error::NavResult;
use async_trait::async_trait;
use rphonetic::DoubleMetaphone;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;
use strsim::normalized_levenshtein;

/// Default bound for the code memo cache
pub const DEFAULT_CACHE_SIZE: usize = 512;

/// Bounded memo of phrase -> phonetic code.
///
/// Recent speech windows overlap heavily tick to tick, so most lookups
/// hit. Eviction is plain LRU; the map stays small enough that the
/// recency scan is noise.
struct CodeCache {
    capacity: usize,
    map: HashMap<String, String>,
    recency: VecDeque<String>,
}

impl CodeCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::with_capacity(capacity),
            recency: VecDeque::with_capacity(capacity),
        }
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let value = self.map.get(key).cloned()?;
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            self.recency.remove(pos);
            self.recency.push_back(key.to_string());
        }
        Some(value)
    }

    fn insert(&mut self, key: String, value: String) {
        if self.map.len() >= self.capacity {
            if let Some(oldest) = self.recency.pop_front() {
                self.map.remove(&oldest);
            }
        }
        self.recency.push_back(key.clone());
        self.map.insert(key, value);
    }
}

pub struct PhoneticUnit {
    encoder: DoubleMetaphone,
    cache: Mutex<CodeCache>,
}

impl PhoneticUnit {
    pub fn new(cache_size: usize) -> Self {
        Self {
            encoder: DoubleMetaphone::default(),
            cache: Mutex::new(CodeCache::new(cache_size)),
        }
    }

    /// Phonetic code for a whole phrase: per-word primary Double Metaphone
    /// codes, space joined. Memoized per distinct phrase.
    fn encode_phrase(&self, phrase: &str) -> NavResult<String> {
        let mut cache = self.cache.lock()?;
        if let Some(code) = cache.get(phrase) {
            return Ok(code);
        }

        let code = phrase
            .split_whitespace()
            .map(|word| {
                let result = self.encoder.double_metaphone(word);
                result.primary().to_string()
            })
            .collect::<Vec<_>>()
            .join(" ");

        cache.insert(phrase.to_string(), code.clone());
        Ok(code)
    }
}

impl Default for PhoneticUnit {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

#[async_trait]
impl SimilarityUnit for PhoneticUnit {
    fn name(&self) -> &'static str {
        "phonetic"
    }

    async fn score(&self, input_text: &str, candidates: &[&str]) -> NavResult<Vec<f64>> {
        let input_code = self.encode_phrase(input_text)?;

        candidates
            .iter()
            .map(|candidate| {
                let code = self.encode_phrase(candidate)?;
                Ok(normalized_levenshtein(&input_code, &code))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_homophones_match() {
        let unit = PhoneticUnit::default();
        let scores = unit
            .score("write it down", &["right it down", "nothing similar here"])
            .await
            .expect("score");

        assert!((scores[0] - 1.0).abs() < 1e-9, "homophones should share a code");
        assert!(scores[0] > scores[1]);
    }

    #[tokio::test]
    async fn test_identical_text_scores_one() {
        let unit = PhoneticUnit::default();
        let scores = unit
            .score("the ability to say no", &["the ability to say no"])
            .await
            .expect("score");
        assert_eq!(scores, vec![1.0]);
    }

    #[tokio::test]
    async fn test_scores_in_unit_range() {
        let unit = PhoneticUnit::default();
        let scores = unit
            .score("have you ever struggled", &["completely different words", "have you ever strugled"])
            .await
            .expect("score");
        for s in scores {
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_cache_eviction_bound() {
        let unit = PhoneticUnit::new(2);
        unit.encode_phrase("one").unwrap();
        unit.encode_phrase("two").unwrap();
        unit.encode_phrase("three").unwrap();

        let cache = unit.cache.lock().unwrap();
        assert_eq!(cache.map.len(), 2);
        assert!(!cache.map.contains_key("one"), "oldest entry should be evicted");
    }

    #[test]
    fn test_cache_hit_refreshes_recency() {
        let unit = PhoneticUnit::new(2);
        unit.encode_phrase("one").unwrap();
        unit.encode_phrase("two").unwrap();
        // Touch "one" so "two" becomes the eviction victim
        unit.encode_phrase("one").unwrap();
        unit.encode_phrase("three").unwrap();

        let cache = unit.cache.lock().unwrap();
        assert!(cache.map.contains_key("one"));
        assert!(!cache.map.contains_key("two"));
    }
}
