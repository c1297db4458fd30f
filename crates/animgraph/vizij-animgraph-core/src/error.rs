//! Error types for graph construction and controller overrides.

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

/// Structural failures of an animation graph, plus the runtime misuse of [`play_node`].
///
/// Everything here indicates malformed data or a programmer error; no variant is
/// transient and nothing is retried.
///
/// [`play_node`]: crate::controller::AnimController::play_node
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimGraphError {
    /// Two nodes share an id
    #[error("Duplicate node id: {id}")]
    DuplicateNode { id: NodeId },

    /// A transition endpoint does not name a node
    #[error("Transition #{index} references unknown node: {id}")]
    UnknownTransitionNode { index: usize, id: NodeId },

    /// The designated initial node does not exist
    #[error("Initial node not found: {id}")]
    UnknownInitialNode { id: NodeId },

    /// Runtime override targeted a node that does not exist
    #[error("Node not found: {id}")]
    UnknownNode { id: NodeId },

    /// Blend node declared without samples
    #[error("Blend node has no samples: {id}")]
    EmptyBlend { id: NodeId },

    /// Cross-fade duration was negative or not finite
    #[error("Invalid cross-fade duration: {duration}")]
    InvalidDuration { duration: f32 },

    /// A node parameter (speed, sample position) is not usable
    #[error("Invalid parameter on node {id}: {reason}")]
    InvalidNode { id: NodeId, reason: String },

    /// JSON definition could not be parsed
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl AnimGraphError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateNode { .. }
            | Self::UnknownTransitionNode { .. }
            | Self::UnknownInitialNode { .. }
            | Self::EmptyBlend { .. }
            | Self::InvalidNode { .. } => "graph",
            Self::UnknownNode { .. } | Self::InvalidDuration { .. } => "override",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnimGraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
