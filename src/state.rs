// SYNOID Sign Kernel State
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{EmbedderKind, SignConfig};
use crate::sign::{
    CandleEmbedder, ChatRephraser, Embedder, FingerspellEncoder, FingerspellingTable,
    FrameSequenceAssembler, InMemorySignRepository, OllamaEmbedder, Rephraser, SignMatcher,
    SignPipeline, SignRepository, TransitionInterpolator,
};

/// Read-only collaborators shared by every request.
pub struct SignState {
    pub pipeline: SignPipeline,
    pub sign_count: usize,
    pub letter_count: usize,
}

impl SignState {
    pub fn new(pipeline: SignPipeline, sign_count: usize, letter_count: usize) -> Self {
        Self {
            pipeline,
            sign_count,
            letter_count,
        }
    }

    /// Wire the pipeline from explicit collaborators.
    pub fn from_parts(
        embedder: Arc<dyn Embedder>,
        repository: Arc<dyn SignRepository>,
        table: Arc<FingerspellingTable>,
        rephraser: Option<Arc<dyn Rephraser>>,
        match_threshold: f32,
        transition_frames: usize,
    ) -> Self {
        let sign_count = repository.len();
        let letter_count = table.len();
        let matcher = SignMatcher::new(embedder, repository, FingerspellEncoder::new(table))
            .with_threshold(match_threshold);
        let assembler =
            FrameSequenceAssembler::new(matcher, TransitionInterpolator::new(transition_frames));
        Self::new(
            SignPipeline::new(assembler, rephraser),
            sign_count,
            letter_count,
        )
    }

    /// Load the sign store, alphabet and models named by `config`.
    pub async fn load(config: &SignConfig) -> Result<Self> {
        let repository = InMemorySignRepository::load(&config.sign_store)
            .with_context(|| format!("loading sign store {:?}", config.sign_store))?;
        if repository.is_empty() {
            warn!("[KERNEL] ⚠️ Sign store is empty; every request will fail until it is indexed");
        }

        let table = FingerspellingTable::load(&config.alphabet_dir)
            .with_context(|| format!("loading alphabet from {:?}", config.alphabet_dir))?;

        let embedder = build_embedder(&config.embedder).await?;

        let rephraser: Option<Arc<dyn Rephraser>> = match &config.rephrase {
            Some(cfg) => {
                info!("[KERNEL] Using gloss model: {}", cfg.model);
                Some(Arc::new(ChatRephraser::new(
                    &cfg.api_url,
                    &cfg.model,
                    Some(cfg.api_key.clone()),
                    cfg.timeout,
                )))
            }
            None => {
                warn!("[KERNEL] GEMINI_API_KEY not set; skipping ASL conversion");
                None
            }
        };

        Ok(Self::from_parts(
            embedder,
            Arc::new(repository),
            Arc::new(table),
            rephraser,
            config.match_threshold,
            config.transition_frames,
        ))
    }

    pub fn status(&self) -> SignStatus {
        let assembler = self.pipeline.assembler();
        SignStatus {
            signs: self.sign_count,
            letters: self.letter_count,
            match_threshold: assembler.matcher().threshold(),
            transition_frames: assembler.interpolator().steps(),
            rephrasing: self.pipeline.rephrasing_enabled(),
        }
    }
}

pub async fn build_embedder(kind: &EmbedderKind) -> Result<Arc<dyn Embedder>> {
    Ok(match kind {
        EmbedderKind::Candle { model_id } => {
            let model_id = model_id.clone();
            let embedder = tokio::task::spawn_blocking(move || CandleEmbedder::load(&model_id))
                .await??;
            Arc::new(embedder)
        }
        EmbedderKind::Ollama { api_url, model } => {
            info!("[KERNEL] Using Ollama embeddings: {} @ {}", model, api_url);
            Arc::new(OllamaEmbedder::new(api_url, model))
        }
    })
}

#[derive(Debug, Serialize)]
pub struct SignStatus {
    pub signs: usize,
    pub letters: usize,
    pub match_threshold: f32,
    pub transition_frames: usize,
    pub rephrasing: bool,
}
