// SYNOID Sign - Gloss Rephraser
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Optional LLM pass that rewrites English into ASL gloss word order before
// signing. Best-effort: callers keep the original text on any failure.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::info;

use crate::sign::error::{SignError, SignResult};

pub const DEFAULT_REPHRASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_REPHRASE_MODEL: &str = "gemini-2.5-flash";

const GLOSS_PROMPT: &str = "Convert the following English phrase into ASL Gloss grammar. \
Do not change meaning or move periods. Follow ASL grammar order: object, then subject, then verb. \
Remove forms like IS/ARE not present in ASL. Replace I with ME. Do not add classifiers. \
Output only the rephrased phrase with no extra text.";

#[async_trait]
pub trait Rephraser: Send + Sync {
    async fn rephrase(&self, text: &str) -> SignResult<String>;
}

/// Rephraser backed by any OpenAI-compatible chat completions endpoint
/// (Gemini's compatibility layer by default, or a local Ollama).
pub struct ChatRephraser {
    client: Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatRephraser {
    pub fn new(api_url: &str, model: &str, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_url: api_url.to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Rephraser for ChatRephraser {
    async fn rephrase(&self, text: &str) -> SignResult<String> {
        info!("[REPHRASE] Glossing with {}: {}", self.model, text);

        let payload = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": format!("{}\n\nPhrase: {}", GLOSS_PROMPT, text)
                }
            ]
        });

        let mut request = self.client.post(self.endpoint()).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SignError::Rephrase(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(SignError::Rephrase(format!("API Error: {}", resp.status())));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| SignError::Rephrase(e.to_string()))?;
        // choices[0].message.content
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(SignError::Rephrase("empty response".to_string()));
        }
        Ok(content.to_string())
    }
}
