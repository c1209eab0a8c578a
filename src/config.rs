use crate::error::{NavError, NavResult};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Matching
    pub window_size: usize,
    pub semantic_weight: f64,
    pub phonetic_weight: f64,
    pub score_floor: f64,
    pub nav_threshold: f64,
    pub tick_interval_ms: u64,
    pub phonetic_cache_size: usize,

    // Embedding
    pub embed_base_url: String,
    pub embed_model: String,
    pub embed_dimension: usize,
    pub embed_api_key_env: String,

    // Speech
    pub vosk_model_path: String,
    pub min_asr_confidence: f32,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: 12,
            semantic_weight: 0.6,
            phonetic_weight: 0.4,
            score_floor: 0.5,
            nav_threshold: 0.72,
            tick_interval_ms: 700,
            phonetic_cache_size: 512,
            embed_base_url: "https://api.openai.com/v1".to_string(),
            embed_model: "text-embedding-3-small".to_string(),
            embed_dimension: 1536,
            embed_api_key_env: "OPENAI_API_KEY".to_string(),
            vosk_model_path: dirs::data_dir()
                .unwrap_or_default()
                .join("slidekick/models/vosk-model-small-en-us")
                .to_string_lossy()
                .to_string(),
            min_asr_confidence: 0.5,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load() -> Result<Self> {
        let config_path = config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(&config_path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Validate tuning parameters before any worker starts.
    ///
    /// Invalid settings are fatal at startup only; nothing here is
    /// checked again mid-session.
    pub fn validate(&self) -> NavResult<()> {
        if self.window_size == 0 {
            return Err(NavError::Config("window_size must be > 0".into()));
        }
        if self.semantic_weight < 0.0 || self.phonetic_weight < 0.0 {
            return Err(NavError::Config("weights must be non-negative".into()));
        }
        if self.semantic_weight + self.phonetic_weight <= 0.0 {
            return Err(NavError::Config(
                "at least one similarity weight must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.score_floor) {
            return Err(NavError::Config("score_floor must be in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.nav_threshold) {
            return Err(NavError::Config("nav_threshold must be in [0, 1]".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(NavError::Config("tick_interval_ms must be > 0".into()));
        }
        if self.phonetic_cache_size == 0 {
            return Err(NavError::Config("phonetic_cache_size must be > 0".into()));
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slidekick")
        .join("config.json")
}
