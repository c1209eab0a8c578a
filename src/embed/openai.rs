//! OpenAI-compatible embedding backend
//!
//! Works with api.openai.com and any provider speaking the same
//! `/embeddings` request shape; base URL, model, and dimension come from
//! config.

use crate::config::Config;
use crate::error::{NavError, NavResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const MAX_BATCH: usize = 2048;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
    dimensions: usize,
    encoding_format: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    dim: usize,
}

impl OpenAiEmbedder {
    /// Build from config, reading the API key from the configured env var.
    pub fn from_config(config: &Config) -> NavResult<Self> {
        let api_key = std::env::var(&config.embed_api_key_env).map_err(|_| {
            NavError::Config(format!(
                "embedding API key not set (expected env var {})",
                config.embed_api_key_env
            ))
        })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: config.embed_base_url.clone(),
            model: config.embed_model.clone(),
            dim: config.embed_dimension,
        })
    }

    async fn call_api(&self, texts: &[&str]) -> NavResult<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.base_url);
        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dim,
            encoding_format: "float",
        };

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| NavError::Embed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NavError::Embed(format!("HTTP {status}: {body}")));
        }

        let data: EmbeddingResponse = resp
            .json()
            .await
            .map_err(|e| NavError::Embed(e.to_string()))?;

        // Fill results by index; the API may return items out of order
        let mut vecs: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        for item in data.data {
            if item.index >= texts.len() {
                return Err(NavError::Embed(format!(
                    "unexpected embedding index {} for batch of {}",
                    item.index,
                    texts.len()
                )));
            }
            let mut v = item.embedding;
            super::normalize_vector(&mut v);
            vecs[item.index] = Some(v);
        }

        vecs.into_iter()
            .enumerate()
            .map(|(i, v)| v.ok_or_else(|| NavError::Embed(format!("missing embedding for index {i}"))))
            .collect()
    }
}

#[async_trait]
impl super::Embedder for OpenAiEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> NavResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut result = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(MAX_BATCH) {
            result.extend(self.call_api(chunk).await?);
        }
        Ok(result)
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}
