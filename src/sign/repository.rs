// SYNOID Sign - Sign Repository
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Nearest-neighbour lookup over the recorded sign vocabulary. Records are
// shared read-only across requests; callers copy keyframes before editing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::sign::embedder::Embedder;
use crate::sign::error::{SignError, SignResult};
use crate::sign::frame::{load_animation, Keyframe};

/// A recorded sign and the embedding of its gloss word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignRecord {
    pub word: String,
    pub embedding: Vec<f32>,
    #[serde(alias = "poses")]
    pub keyframes: Vec<Keyframe>,
}

/// Best match for a query vector.
#[derive(Debug, Clone)]
pub struct SignMatch {
    pub record: Arc<SignRecord>,
    /// `1 - cosine_distance`
    pub similarity: f32,
}

#[async_trait]
pub trait SignRepository: Send + Sync {
    /// Closest record by cosine similarity, or `None` when the store is empty.
    async fn nearest(&self, embedding: &[f32]) -> SignResult<Option<SignMatch>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cosine similarity. A zero-length vector is dissimilar to everything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Brute-force vector store held in memory.
#[derive(Debug, Default)]
pub struct InMemorySignRepository {
    records: Vec<Arc<SignRecord>>,
}

impl InMemorySignRepository {
    pub fn from_records(records: Vec<SignRecord>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    /// Load a sign store written by `save` (or exported from the vector DB).
    pub fn load(path: &Path) -> SignResult<Self> {
        let data = fs::read_to_string(path).map_err(|source| SignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<SignRecord> =
            serde_json::from_str(&data).map_err(|source| SignError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!("[SIGNS] 📂 Loaded {} signs from {:?}", records.len(), path);
        Ok(Self::from_records(records))
    }

    pub fn save(&self, path: &Path) -> SignResult<()> {
        let records: Vec<&SignRecord> = self.records.iter().map(|r| r.as_ref()).collect();
        let json = serde_json::to_string(&records).map_err(|source| SignError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SignError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| SignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("[SIGNS] 💾 Saved {} signs to {:?}", self.records.len(), path);
        Ok(())
    }

    /// Build a store from a directory of `<word>.json` recorded animations,
    /// embedding each file stem as the sign's word.
    pub async fn index_directory(dir: &Path, embedder: &dyn Embedder) -> SignResult<Self> {
        let entries = fs::read_dir(dir).map_err(|source| SignError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .collect();
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(word) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            let keyframes = load_animation(&path)?;
            if keyframes.is_empty() {
                warn!("[SIGNS] Skipping '{}': animation has no frames", word);
                continue;
            }
            let embedding = embedder.encode(&word).await?;
            info!("[SIGNS] Indexed '{}' ({} frames)", word, keyframes.len());
            records.push(SignRecord {
                word,
                embedding,
                keyframes,
            });
        }

        Ok(Self::from_records(records))
    }
}

#[async_trait]
impl SignRepository for InMemorySignRepository {
    async fn nearest(&self, embedding: &[f32]) -> SignResult<Option<SignMatch>> {
        let mut best: Option<SignMatch> = None;

        for record in &self.records {
            if record.embedding.len() != embedding.len() {
                return Err(SignError::DimensionMismatch {
                    expected: record.embedding.len(),
                    actual: embedding.len(),
                });
            }
            let similarity = cosine_similarity(&record.embedding, embedding);

            // Equal similarity resolves to the lexicographically smallest word
            let better = match &best {
                None => true,
                Some(current) => match similarity.total_cmp(&current.similarity) {
                    Ordering::Greater => true,
                    Ordering::Equal => record.word < current.record.word,
                    Ordering::Less => false,
                },
            };
            if better {
                best = Some(SignMatch {
                    record: record.clone(),
                    similarity,
                });
            }
        }

        Ok(best)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
