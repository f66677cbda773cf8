#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use synoid_sign::sign::{
    Embedder, FingerspellEncoder, FingerspellingTable, FrameSequenceAssembler, Keyframe, Landmark,
    LandmarkSet, Rephraser, SignError, SignMatch, SignMatcher, SignPipeline, SignRecord,
    SignRepository, SignResult, TransitionInterpolator,
};

/// Embeds each known word as a one-slot vector holding its id.
pub struct FakeEmbedder {
    ids: HashMap<String, usize>,
    pub calls: AtomicUsize,
}

impl FakeEmbedder {
    pub fn new(words: &[&str]) -> Self {
        Self {
            ids: words
                .iter()
                .enumerate()
                .map(|(i, w)| (w.to_string(), i))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn encode(&self, word: &str) -> SignResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ids
            .get(word)
            .map(|id| vec![*id as f32])
            .ok_or_else(|| SignError::embedding(word, "model offline"))
    }
}

/// Returns a fixed best match (record, similarity) per embedded word id.
#[derive(Default)]
pub struct ScriptedRepository {
    hits: HashMap<usize, (Arc<SignRecord>, f32)>,
}

impl ScriptedRepository {
    pub fn with_hit(mut self, id: usize, record: SignRecord, similarity: f32) -> Self {
        self.hits.insert(id, (Arc::new(record), similarity));
        self
    }
}

#[async_trait]
impl SignRepository for ScriptedRepository {
    async fn nearest(&self, embedding: &[f32]) -> SignResult<Option<SignMatch>> {
        if self.hits.is_empty() {
            return Ok(None);
        }
        let id = embedding[0] as usize;
        // Words without a scripted hit land on an unrelated sign
        let (record, similarity) = self
            .hits
            .get(&id)
            .cloned()
            .unwrap_or_else(|| (Arc::new(sign("unrelated", 2, 50.0)), 0.1));
        Ok(Some(SignMatch { record, similarity }))
    }

    fn len(&self) -> usize {
        self.hits.len()
    }
}

pub struct FakeRephraser {
    pub reply: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeRephraser {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Rephraser for FakeRephraser {
    async fn rephrase(&self, _text: &str) -> SignResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| SignError::Rephrase("429 Too Many Requests".to_string()))
    }
}

/// Frame whose pose holds one landmark at `(x, x, x)` and a full face group.
pub fn keyframe(x: f64) -> Keyframe {
    Keyframe::new(LandmarkSet {
        pose_landmarks: Some(vec![Some(Landmark::new(x, x, x, 0.5)), None]),
        left_hand_landmarks: None,
        right_hand_landmarks: Some(vec![Some(Landmark::new(x, 0.0, 0.0, 1.0))]),
        face_landmarks: Some(vec![Some(Landmark::new(0.0, x, 0.0, 1.0))]),
    })
}

pub fn sign(word: &str, frames: usize, base: f64) -> SignRecord {
    SignRecord {
        word: word.to_string(),
        embedding: vec![0.0],
        keyframes: (0..frames).map(|i| keyframe(base + i as f64)).collect(),
    }
}

/// Alphabet where letter `L` has `frames_for(L)` frames whose x marks the letter.
pub fn alphabet(letters: &[(char, usize)]) -> Arc<FingerspellingTable> {
    let map = letters
        .iter()
        .map(|(letter, count)| {
            let marker = 100.0 + (*letter as u32 as f64);
            (*letter, (0..*count).map(|_| keyframe(marker)).collect())
        })
        .collect();
    Arc::new(FingerspellingTable::from_letters(map))
}

pub fn assembler(
    embedder: Arc<dyn Embedder>,
    repository: Arc<dyn SignRepository>,
    table: Arc<FingerspellingTable>,
) -> FrameSequenceAssembler {
    let matcher = SignMatcher::new(embedder, repository, FingerspellEncoder::new(table));
    FrameSequenceAssembler::new(matcher, TransitionInterpolator::default())
}

pub fn pipeline(assembler: FrameSequenceAssembler, rephraser: Option<Arc<dyn Rephraser>>) -> SignPipeline {
    SignPipeline::new(assembler, rephraser)
}
