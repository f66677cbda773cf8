// SYNOID Sign - Word Embedders
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Turns a word into the vector the sign store is indexed with. The store
// and the query side must use the same model.

use anyhow::{Context, Result};
use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use hf_hub::api::sync::Api;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::sign::error::{SignError, SignResult};

pub const DEFAULT_CANDLE_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_OLLAMA_MODEL: &str = "all-minilm";

/// Text-to-vector encoder. Deterministic for a given model.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn encode(&self, word: &str) -> SignResult<Vec<f32>>;
}

struct BertEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl BertEncoder {
    /// Mean-pooled, L2-normalized sentence embedding (sentence-transformers layout).
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(anyhow::Error::msg)?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        let mask = attention_mask.to_dtype(DTYPE)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?;
        let norm = pooled.sqr()?.sum_keepdim(1)?.sqrt()?;
        let normalized = pooled.broadcast_div(&norm)?;

        Ok(normalized.squeeze(0)?.to_vec1::<f32>()?)
    }
}

/// Local BERT sentence embedder running on CPU through Candle.
pub struct CandleEmbedder {
    inner: Arc<BertEncoder>,
}

impl CandleEmbedder {
    /// Download (or reuse the cached) model from HuggingFace and load it.
    /// Blocking; call from `spawn_blocking` inside the runtime.
    pub fn load(model_id: &str) -> Result<Self> {
        info!("[EMBED] Loading sentence model: {}", model_id);
        let device = Device::Cpu;

        let api = Api::new()?;
        let repo = api.model(model_id.to_string());
        let config_path = repo.get("config.json")?;
        let tokenizer_path = repo.get("tokenizer.json")?;
        let weights_path = repo.get("model.safetensors")?;

        let config: Config = serde_json::from_str(
            &std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {:?}", config_path))?,
        )?;
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(anyhow::Error::msg)?;
        let weights = std::fs::read(&weights_path)
            .with_context(|| format!("reading {:?}", weights_path))?;
        let vb = VarBuilder::from_buffered_safetensors(weights, DTYPE, &device)?;
        let model = BertModel::load(vb, &config)?;

        info!("[EMBED] Model ready (Device: {:?})", device);
        Ok(Self {
            inner: Arc::new(BertEncoder {
                model,
                tokenizer,
                device,
            }),
        })
    }
}

#[async_trait]
impl Embedder for CandleEmbedder {
    async fn encode(&self, word: &str) -> SignResult<Vec<f32>> {
        let encoder = self.inner.clone();
        let text = word.to_string();
        let result = tokio::task::spawn_blocking(move || encoder.embed(&text))
            .await
            .map_err(|e| SignError::embedding(word, e))?;
        result.map_err(|e| SignError::embedding(word, e))
    }
}

/// Embeddings served by an Ollama instance (`/api/embeddings`).
pub struct OllamaEmbedder {
    client: Client,
    api_url: String,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(api_url: &str, model: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_url: api_url.to_string(),
            model: model.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        // Native API, not the OpenAI-compatible /v1 prefix
        let base = self.api_url.trim_end_matches('/').trim_end_matches("/v1");
        format!("{}/api/embeddings", base)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn encode(&self, word: &str) -> SignResult<Vec<f32>> {
        let payload = json!({
            "model": self.model,
            "prompt": word,
        });

        let resp = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| SignError::embedding(word, e))?;

        if !resp.status().is_success() {
            return Err(SignError::embedding(
                word,
                format!("API Error: {}", resp.status()),
            ));
        }

        let body: serde_json::Value = resp.json().await.map_err(|e| SignError::embedding(word, e))?;
        let vector = parse_embedding(word, &body)?;
        debug!("[EMBED] '{}' -> {} dims", word, vector.len());
        Ok(vector)
    }
}

/// Pull the `embedding` array out of an Ollama response. Every component
/// must be numeric and the vector must be non-empty.
fn parse_embedding(word: &str, body: &serde_json::Value) -> SignResult<Vec<f32>> {
    let vector = body["embedding"]
        .as_array()
        .ok_or_else(|| SignError::embedding(word, "response has no 'embedding' array"))?
        .iter()
        .map(|v| v.as_f64().map(|v| v as f32))
        .collect::<Option<Vec<f32>>>()
        .ok_or_else(|| SignError::embedding(word, "non-numeric component"))?;

    if vector.is_empty() {
        return Err(SignError::embedding(word, "empty embedding"));
    }
    Ok(vector)
}
