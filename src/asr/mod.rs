//! ASR (Automatic Speech Recognition) Module
//!
//! The recognizer is a black-box push source of recognized text; this
//! core applies its own normalization to whatever comes back. Default
//! backend is Vosk (local, offline).

pub mod vosk;

use anyhow::Result;

pub use vosk::VoskAsr;

/// Result from ASR with confidence score
#[derive(Debug, Clone)]
pub struct AsrResult {
    pub text: String,
    pub confidence: f32,
}

/// Trait for ASR engines
pub trait AsrEngine: Send {
    /// Process audio samples and return recognized text with confidence
    /// once an utterance finalizes. Low-confidence results are filtered
    /// out internally.
    fn process(&mut self, samples: &[i16]) -> Result<Option<AsrResult>>;
}
