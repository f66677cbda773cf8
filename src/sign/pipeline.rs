// SYNOID Sign - Phrase Pipeline
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use std::sync::Arc;
use tracing::{info, warn};

use crate::sign::assembler::FrameSequenceAssembler;
use crate::sign::error::SignResult;
use crate::sign::frame::Frame;
use crate::sign::rephraser::Rephraser;

/// Phrases that are already valid gloss and skip the rephraser.
const REPHRASE_BYPASS: &str = "hello";

/// Spoken filler dropped before signing.
const FILLER_WORDS: &[&str] = &["uh"];

/// Phrase in, frames out: gloss rewrite, tokenization, then assembly.
#[derive(Clone)]
pub struct SignPipeline {
    rephraser: Option<Arc<dyn Rephraser>>,
    assembler: FrameSequenceAssembler,
}

impl SignPipeline {
    pub fn new(assembler: FrameSequenceAssembler, rephraser: Option<Arc<dyn Rephraser>>) -> Self {
        Self {
            rephraser,
            assembler,
        }
    }

    pub fn assembler(&self) -> &FrameSequenceAssembler {
        &self.assembler
    }

    pub fn rephrasing_enabled(&self) -> bool {
        self.rephraser.is_some()
    }

    /// Normalize, optionally rephrase, and tokenize a phrase.
    /// Rephraser failures are logged and the original text is kept.
    pub async fn prepare(&self, phrase: &str) -> Vec<String> {
        let mut text = phrase.trim().to_lowercase();

        if text != REPHRASE_BYPASS {
            match &self.rephraser {
                Some(rephraser) => match rephraser.rephrase(&text).await {
                    Ok(glossed) => {
                        info!("[REPHRASE] '{}' -> '{}'", text, glossed);
                        text = glossed.trim().to_string();
                    }
                    Err(e) => warn!("[REPHRASE] Rephrase failed, using original text: {}", e),
                },
                None => warn!("[REPHRASE] No rephraser configured; skipping ASL conversion"),
            }
        }

        tokenize(&text)
    }

    pub async fn translate(&self, phrase: &str) -> SignResult<Vec<Frame>> {
        let tokens = self.prepare(phrase).await;
        info!("[PIPELINE] Signing {} words: {:?}", tokens.len(), tokens);
        self.assembler.assemble(&tokens).await
    }
}

/// Whitespace split with filler words removed. Punctuation attached to a
/// filler survives as its own token, so `"uh, hello"` gives `[",", "hello"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|token| {
            let core = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if !FILLER_WORDS.iter().any(|f| core.eq_ignore_ascii_case(f)) {
                return Some(token.to_string());
            }
            let rest = token.replacen(core, "", 1);
            (!rest.is_empty()).then_some(rest)
        })
        .collect()
}
