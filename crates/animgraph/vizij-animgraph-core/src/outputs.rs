//! Output contracts from the controller.
//!
//! Each tick produces the weights applied to the provider, the clip
//! notifications republished under their semantic clip ids, and node-level
//! events (transitions, entries, cross-fade start/finish). Hosts read these
//! after `tick` and before the next one.

use serde::{Deserialize, Serialize};

use crate::ids::{ClipId, NodeId};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClipEventKind {
    Started,
    Ended,
    Looped,
}

/// Provider notification tagged with the semantic clip id (e.g. footstep cues).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClipEvent {
    pub clip: ClipId,
    pub kind: ClipEventKind,
}

/// Weight applied to one clip this tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClipWeight {
    pub clip: ClipId,
    pub weight: f32,
}

/// Discrete state-machine signals.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum NodeEvent {
    TransitionFired {
        /// Declaration index in the graph's transition list.
        index: usize,
        from: NodeId,
        to: NodeId,
    },
    NodeEntered {
        node: NodeId,
        from: Option<NodeId>,
        duration: f32,
    },
    CrossFadeStarted {
        to: NodeId,
        duration: f32,
    },
    CrossFadeFinished {
        to: NodeId,
    },
}

/// Outputs returned by `AnimController::tick()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub weights: Vec<ClipWeight>,
    #[serde(default)]
    pub clip_events: Vec<ClipEvent>,
    #[serde(default)]
    pub node_events: Vec<NodeEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.weights.clear();
        self.clip_events.clear();
        self.node_events.clear();
    }

    /// Weight applied to `clip` this tick, if it was touched.
    pub fn weight(&self, clip: &str) -> Option<f32> {
        self.weights
            .iter()
            .find(|w| w.clip.as_str() == clip)
            .map(|w| w.weight)
    }

    /// Record the weight written for `clip`. A later write in the same tick
    /// replaces the earlier one; first-write order is kept.
    pub(crate) fn record_weight(&mut self, clip: &ClipId, weight: f32) {
        match self.weights.iter_mut().find(|w| &w.clip == clip) {
            Some(entry) => entry.weight = weight,
            None => self.weights.push(ClipWeight {
                clip: clip.clone(),
                weight,
            }),
        }
    }
}
