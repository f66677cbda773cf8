// SYNOID Sign Configuration
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Read once at startup (after dotenv) and handed to the bootstrap. Nothing
// in the pipeline reads the environment on its own.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::sign::embedder::{DEFAULT_CANDLE_MODEL, DEFAULT_OLLAMA_MODEL};
use crate::sign::interpolator::DEFAULT_TRANSITION_FRAMES;
use crate::sign::matcher::DEFAULT_MATCH_THRESHOLD;
use crate::sign::rephraser::{DEFAULT_REPHRASE_MODEL, DEFAULT_REPHRASE_URL};

#[derive(Debug, Clone, PartialEq)]
pub enum EmbedderKind {
    /// Local BERT model through Candle
    Candle { model_id: String },
    /// Remote Ollama `/api/embeddings`
    Ollama { api_url: String, model: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RephraseConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignConfig {
    pub sign_store: PathBuf,
    pub alphabet_dir: PathBuf,
    pub match_threshold: f32,
    pub transition_frames: usize,
    pub embedder: EmbedderKind,
    /// `None` disables rephrasing.
    pub rephrase: Option<RephraseConfig>,
}

impl SignConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("SYNOID_API_URL").unwrap_or("http://localhost:11434/v1".to_string());

        let embedder = match get("SYNOID_EMBEDDER")
            .unwrap_or_else(|| "candle".to_string())
            .to_lowercase()
            .as_str()
        {
            "candle" => EmbedderKind::Candle {
                model_id: get("SYNOID_EMBED_MODEL").unwrap_or(DEFAULT_CANDLE_MODEL.to_string()),
            },
            "ollama" => EmbedderKind::Ollama {
                api_url: api_url.clone(),
                model: get("SYNOID_EMBED_MODEL").unwrap_or(DEFAULT_OLLAMA_MODEL.to_string()),
            },
            other => bail!("Unknown SYNOID_EMBEDDER '{}' (expected candle or ollama)", other),
        };

        let rephrase = match get("GEMINI_API_KEY") {
            Some(api_key) => Some(RephraseConfig {
                api_url: get("SYNOID_REPHRASE_URL").unwrap_or(DEFAULT_REPHRASE_URL.to_string()),
                model: get("SYNOID_REPHRASE_MODEL").unwrap_or(DEFAULT_REPHRASE_MODEL.to_string()),
                api_key,
                timeout: Duration::from_secs(parse_or(
                    get("SYNOID_REPHRASE_TIMEOUT_SECS"),
                    "SYNOID_REPHRASE_TIMEOUT_SECS",
                    15u64,
                )?),
            }),
            None => None,
        };

        let match_threshold = parse_or(
            get("SYNOID_MATCH_THRESHOLD"),
            "SYNOID_MATCH_THRESHOLD",
            DEFAULT_MATCH_THRESHOLD,
        )?;
        if !(-1.0..=1.0).contains(&match_threshold) {
            bail!("SYNOID_MATCH_THRESHOLD must be within [-1, 1], got {}", match_threshold);
        }

        Ok(Self {
            sign_store: get("SYNOID_SIGN_STORE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/signs.json")),
            alphabet_dir: get("SYNOID_ALPHABET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/alphabets")),
            match_threshold,
            transition_frames: parse_or(
                get("SYNOID_TRANSITION_FRAMES"),
                "SYNOID_TRANSITION_FRAMES",
                DEFAULT_TRANSITION_FRAMES,
            )?,
            embedder,
            rephrase,
        })
    }
}

/// Log filter used when `RUST_LOG` is unset: quiet the tokenizer and hub crates.
pub const DEFAULT_LOG_FILTER: &str = "info,tokenizers=error,hf_hub=warn";

/// Tracing filter from a `RUST_LOG`-style directive string, falling back to
/// `DEFAULT_LOG_FILTER` when unset or unparsable.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: '{}'", key, value)),
        None => Ok(default),
    }
}
