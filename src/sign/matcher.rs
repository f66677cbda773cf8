// SYNOID Sign - Sign Matcher
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use std::sync::Arc;
use tracing::{debug, info};

use crate::sign::embedder::Embedder;
use crate::sign::error::{SignError, SignResult};
use crate::sign::fingerspell::FingerspellEncoder;
use crate::sign::frame::AnimationSegment;
use crate::sign::repository::SignRepository;

pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.75;

/// Chooses, per word, between the closest recorded sign and fingerspelling.
#[derive(Clone)]
pub struct SignMatcher {
    embedder: Arc<dyn Embedder>,
    repository: Arc<dyn SignRepository>,
    encoder: FingerspellEncoder,
    threshold: f32,
}

impl SignMatcher {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        repository: Arc<dyn SignRepository>,
        encoder: FingerspellEncoder,
    ) -> Self {
        Self {
            embedder,
            repository,
            encoder,
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Segment for `word`. A similarity exactly at the threshold counts as a match.
    pub async fn match_word(&self, word: &str) -> SignResult<AnimationSegment> {
        let embedding = self.embedder.encode(word).await?;
        let best = self
            .repository
            .nearest(&embedding)
            .await?
            .ok_or(SignError::NoMatchAvailable)?;

        if best.similarity < self.threshold {
            debug!(
                "[MATCHER] '{}' best='{}' sim={:.3} < {:.2}, fingerspelling",
                word, best.record.word, best.similarity, self.threshold
            );
            return Ok(self.encoder.spell(word));
        }

        info!(
            "[MATCHER] ✅ '{}' -> sign '{}' (sim={:.3})",
            word, best.record.word, best.similarity
        );
        Ok(AnimationSegment::new(
            best.record.word.clone(),
            best.record.keyframes.clone(),
        ))
    }
}
