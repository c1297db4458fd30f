//! Cross-fade scheduling: a single in-flight fade from an outgoing clip (or
//! blend snapshot) to an incoming node, eased in-out quadratically.

use serde::{Deserialize, Serialize};

use crate::accumulate::WeightAccumulator;
use crate::blend::dominant_index;
use crate::ids::{ClipId, NodeId};

/// Quadratic ease-in-out on [0,1]. Point-symmetric about (0.5, 0.5).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// What is being faded out.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum FadeSource {
    /// A Single node's clip, fading from full weight.
    Clip(ClipId),
    /// A Blend node's members, each fading from the weight it had when the fade began.
    Blend { clips: Vec<(ClipId, f32)> },
}

impl FadeSource {
    /// Clip carrying the most weight at fade start.
    pub fn dominant(&self) -> Option<&ClipId> {
        match self {
            FadeSource::Clip(c) => Some(c),
            FadeSource::Blend { clips } => {
                let weights: Vec<f32> = clips.iter().map(|(_, w)| *w).collect();
                dominant_index(&weights).map(|i| &clips[i].0)
            }
        }
    }

    /// Add the outgoing contributions scaled by `factor` (1 − eased progress).
    pub fn accumulate(&self, acc: &mut WeightAccumulator, factor: f32) {
        match self {
            FadeSource::Clip(c) => acc.add(c, factor),
            FadeSource::Blend { clips } => {
                for (c, w) in clips {
                    acc.add(c, w * factor);
                }
            }
        }
    }
}

/// Result of advancing a fade by one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FadeStep {
    Running,
    Finished,
}

/// The active cross-fade. Created only for durations > 0.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CrossFade {
    source: FadeSource,
    target: NodeId,
    progress: f32,
    duration: f32,
}

impl CrossFade {
    pub fn new(source: FadeSource, target: NodeId, duration: f32) -> Self {
        Self {
            source,
            target,
            progress: 0.0,
            duration,
        }
    }

    /// `progress += dt / duration`, saturating at 1.
    pub fn advance(&mut self, dt: f32) -> FadeStep {
        if dt.is_finite() && dt > 0.0 {
            self.progress = (self.progress + dt / self.duration).min(1.0);
        }
        log::trace!(
            "cross-fade -> {}: progress {:.3}",
            self.target,
            self.progress
        );
        if self.progress >= 1.0 {
            FadeStep::Finished
        } else {
            FadeStep::Running
        }
    }

    /// Weight multiplier for the incoming node.
    #[inline]
    pub fn incoming_factor(&self) -> f32 {
        ease_in_out(self.progress)
    }

    /// Weight multiplier for the outgoing clip(s).
    #[inline]
    pub fn outgoing_factor(&self) -> f32 {
        1.0 - ease_in_out(self.progress)
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    #[inline]
    pub fn source(&self) -> &FadeSource {
        &self.source
    }

    pub fn outgoing_dominant(&self) -> Option<&ClipId> {
        self.source.dominant()
    }
}
