// SYNOID Sign - Error Types
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the sign pipeline and its collaborators.
#[derive(Error, Debug)]
pub enum SignError {
    // Collaborator errors
    #[error("Embedding failed for '{word}': {reason}")]
    Embedding { word: String, reason: String },

    #[error("No sign available: the sign repository is empty")]
    NoMatchAvailable,

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Rephrase failed: {0}")]
    Rephrase(String),

    // Load errors
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SignError {
    pub fn embedding(word: &str, reason: impl std::fmt::Display) -> Self {
        SignError::Embedding {
            word: word.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for sign pipeline operations
pub type SignResult<T> = Result<T, SignError>;
