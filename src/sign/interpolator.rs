// SYNOID Sign - Transition Interpolator
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Bridges the last frame of one word to the first frame of the next with
// linearly blended in-betweens. The end frame itself is never emitted here;
// it follows as the next segment's own first frame.

use crate::sign::frame::{Frame, Keyframe, LandmarkGroup, LandmarkSet};

pub const DEFAULT_TRANSITION_FRAMES: usize = 5;

/// Blend two landmark groups slot by slot. An absent group on either side
/// gives an absent group; an absent slot on either side gives an absent slot.
pub fn interpolate_group(
    start: Option<&LandmarkGroup>,
    end: Option<&LandmarkGroup>,
    ratio: f64,
) -> Option<LandmarkGroup> {
    let (start, end) = (start?, end?);
    Some(
        start
            .iter()
            .enumerate()
            .map(|(i, from)| match (from, end.get(i).copied().flatten()) {
                (Some(from), Some(to)) => Some(from.lerp(&to, ratio)),
                _ => None,
            })
            .collect(),
    )
}

pub fn interpolate_landmarks(start: &LandmarkSet, end: &LandmarkSet, ratio: f64) -> LandmarkSet {
    LandmarkSet {
        pose_landmarks: interpolate_group(
            start.pose_landmarks.as_ref(),
            end.pose_landmarks.as_ref(),
            ratio,
        ),
        left_hand_landmarks: interpolate_group(
            start.left_hand_landmarks.as_ref(),
            end.left_hand_landmarks.as_ref(),
            ratio,
        ),
        right_hand_landmarks: interpolate_group(
            start.right_hand_landmarks.as_ref(),
            end.right_hand_landmarks.as_ref(),
            ratio,
        ),
        face_landmarks: interpolate_group(
            start.face_landmarks.as_ref(),
            end.face_landmarks.as_ref(),
            ratio,
        ),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TransitionInterpolator {
    steps: usize,
}

impl Default for TransitionInterpolator {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_FRAMES)
    }
}

impl TransitionInterpolator {
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// In-between frames for ratios `0, 1/n, .., (n-1)/n`, labeled with the
    /// previous frame's word. Empty for the first word of a phrase or when
    /// the upcoming segment has no frames.
    pub fn bridge(&self, previous: Option<&Frame>, next: Option<&Keyframe>) -> Vec<Keyframe> {
        let (Some(previous), Some(next)) = (previous, next) else {
            return Vec::new();
        };

        (0..self.steps)
            .map(|i| {
                let ratio = i as f64 / self.steps as f64;
                Keyframe::labeled(
                    &previous.word,
                    interpolate_landmarks(&previous.landmarks, &next.landmarks, ratio),
                )
            })
            .collect()
    }
}
