// SYNOID Sign Modules
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Phrase -> sign animation pipeline. Each word is matched against the
// recorded sign store (or fingerspelled), then stitched to its neighbour
// with blended transition frames.

pub mod assembler;
pub mod embedder;
pub mod error;
pub mod fingerspell;
pub mod frame;
pub mod interpolator;
pub mod matcher;
pub mod pipeline;
pub mod rephraser;
pub mod repository;

pub use assembler::FrameSequenceAssembler;
pub use embedder::{CandleEmbedder, Embedder, OllamaEmbedder};
pub use error::{SignError, SignResult};
pub use fingerspell::{FingerspellEncoder, FingerspellingTable};
pub use frame::{AnimationSegment, Frame, Keyframe, Landmark, LandmarkGroup, LandmarkSet};
pub use interpolator::TransitionInterpolator;
pub use matcher::SignMatcher;
pub use pipeline::SignPipeline;
pub use rephraser::{ChatRephraser, Rephraser};
pub use repository::{InMemorySignRepository, SignMatch, SignRecord, SignRepository};
