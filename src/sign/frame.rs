// SYNOID Sign - Frame Data Model
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Landmark slot `i` names the same anatomical point in every frame of every
// animation. Interpolation relies on that correspondence.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::sign::error::{SignError, SignResult};

/// A single tracked body, hand or face point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Detection confidence. Hand trackers often omit it.
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }

    /// Linear blend of the position towards `other`.
    /// Visibility is carried from `self`; the end visibility is discarded.
    pub fn lerp(&self, other: &Landmark, ratio: f64) -> Landmark {
        Landmark {
            x: self.x + (other.x - self.x) * ratio,
            y: self.y + (other.y - self.y) * ratio,
            z: self.z + (other.z - self.z) * ratio,
            visibility: self.visibility,
        }
    }
}

/// Fixed-length landmark slots. `None` means "not detected", which is not
/// the same thing as a landmark at the origin.
pub type LandmarkGroup = Vec<Option<Landmark>>;

/// The four landmark groups tracked per frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet {
    #[serde(default)]
    pub pose_landmarks: Option<LandmarkGroup>,
    #[serde(default)]
    pub left_hand_landmarks: Option<LandmarkGroup>,
    #[serde(default)]
    pub right_hand_landmarks: Option<LandmarkGroup>,
    #[serde(default)]
    pub face_landmarks: Option<LandmarkGroup>,
}

/// A recorded (or synthesized) frame before it receives its output index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(flatten)]
    pub landmarks: LandmarkSet,
}

impl Keyframe {
    pub fn new(landmarks: LandmarkSet) -> Self {
        Self {
            word: None,
            landmarks,
        }
    }

    pub fn labeled(word: &str, landmarks: LandmarkSet) -> Self {
        Self {
            word: Some(word.to_string()),
            landmarks,
        }
    }
}

/// Output frame with its position in the assembled sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "frame")]
    pub frame_index: usize,
    pub word: String,
    #[serde(flatten)]
    pub landmarks: LandmarkSet,
}

/// Per-word animation owned by a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSegment {
    pub label: String,
    pub frames: Vec<Keyframe>,
}

impl AnimationSegment {
    /// Takes ownership of already-copied frames and stamps `label` on them.
    pub fn new(label: impl Into<String>, mut frames: Vec<Keyframe>) -> Self {
        let label = label.into();
        for frame in frames.iter_mut() {
            frame.word = Some(label.clone());
        }
        Self { label, frames }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

/// Load a recorded animation (a JSON array of frames) from disk.
pub fn load_animation(path: &Path) -> SignResult<Vec<Keyframe>> {
    let data = fs::read_to_string(path).map_err(|source| SignError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| SignError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
