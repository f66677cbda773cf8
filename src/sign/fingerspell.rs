// SYNOID Sign - Fingerspelling
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::sign::error::SignResult;
use crate::sign::frame::{load_animation, AnimationSegment, Keyframe};

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Canonical letter animations, loaded once at startup and never mutated.
#[derive(Debug, Default)]
pub struct FingerspellingTable {
    letters: HashMap<char, Vec<Keyframe>>,
}

impl FingerspellingTable {
    pub fn from_letters(letters: HashMap<char, Vec<Keyframe>>) -> Self {
        let letters = letters
            .into_iter()
            .map(|(letter, frames)| (letter.to_ascii_uppercase(), frames))
            .collect();
        Self { letters }
    }

    /// Load `A.json` .. `Z.json` from `dir`. A missing letter is logged and
    /// spells as nothing; an unreadable or malformed file is an error.
    pub fn load(dir: &Path) -> SignResult<Self> {
        let mut letters = HashMap::new();
        for letter in ALPHABET.chars() {
            let path = dir.join(format!("{}.json", letter));
            if !path.exists() {
                warn!("[FINGERSPELL] No animation for letter '{}' at {:?}", letter, path);
                continue;
            }
            letters.insert(letter, load_animation(&path)?);
        }
        info!("[FINGERSPELL] Loaded {} letters from {:?}", letters.len(), dir);
        Ok(Self { letters })
    }

    /// Canonical frames for `letter` (case-insensitive); empty when unknown.
    pub fn lookup(&self, letter: char) -> &[Keyframe] {
        self.letters
            .get(&letter.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

/// Label used for every frame of a fingerspelled word.
pub fn fallback_label(word: &str) -> String {
    format!("fs-{}", word.to_uppercase())
}

/// Expands a word into its letter-by-letter animation.
#[derive(Clone)]
pub struct FingerspellEncoder {
    table: Arc<FingerspellingTable>,
}

impl FingerspellEncoder {
    pub fn new(table: Arc<FingerspellingTable>) -> Self {
        Self { table }
    }

    pub fn spell(&self, word: &str) -> AnimationSegment {
        let upper = word.to_uppercase();
        let mut frames = Vec::new();
        for letter in upper.chars() {
            let canonical = self.table.lookup(letter);
            if canonical.is_empty() {
                debug!("[FINGERSPELL] No handshape for '{}', skipping", letter);
            }
            // Private copies: the label goes onto these, never onto the table
            frames.extend(canonical.iter().cloned());
        }
        AnimationSegment::new(fallback_label(word), frames)
    }
}
