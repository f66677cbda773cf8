// SYNOID Sign - Frame Sequence Assembler
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Walks the phrase in order. Each word's transition depends on the last
// frame already emitted, so words are processed strictly one after another.
// The running index and previous-frame pointer live on the stack of each
// `assemble` call, so concurrent calls never share them.

use tracing::info;

use crate::sign::error::SignResult;
use crate::sign::frame::Frame;
use crate::sign::interpolator::TransitionInterpolator;
use crate::sign::matcher::SignMatcher;

#[derive(Clone)]
pub struct FrameSequenceAssembler {
    matcher: SignMatcher,
    interpolator: TransitionInterpolator,
}

impl FrameSequenceAssembler {
    pub fn new(matcher: SignMatcher, interpolator: TransitionInterpolator) -> Self {
        Self {
            matcher,
            interpolator,
        }
    }

    pub fn matcher(&self) -> &SignMatcher {
        &self.matcher
    }

    pub fn interpolator(&self) -> &TransitionInterpolator {
        &self.interpolator
    }

    /// Frames for `tokens`, indexed `0..N` without gaps. Any collaborator
    /// failure aborts the whole sequence.
    pub async fn assemble<S: AsRef<str>>(&self, tokens: &[S]) -> SignResult<Vec<Frame>> {
        let mut frames: Vec<Frame> = Vec::new();
        let mut next_index = 0usize;

        for token in tokens {
            let segment = self.matcher.match_word(token.as_ref()).await?;

            let transition = self
                .interpolator
                .bridge(frames.last(), segment.frames.first());

            let transition_count = transition.len();
            for keyframe in transition.into_iter().chain(segment.frames.into_iter()) {
                frames.push(Frame {
                    frame_index: next_index,
                    word: keyframe.word.unwrap_or_else(|| segment.label.clone()),
                    landmarks: keyframe.landmarks,
                });
                next_index += 1;
            }

            info!(
                "[ASSEMBLER] '{}' as '{}': {} transition frames, {} total",
                token.as_ref(),
                segment.label,
                transition_count,
                next_index
            );
        }

        Ok(frames)
    }
}
