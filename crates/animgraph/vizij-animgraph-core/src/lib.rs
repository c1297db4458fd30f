//! Vizij AnimGraph Core (engine-agnostic)
//!
//! Blend-tree and transition state machine for character animation. A validated
//! [`AnimGraph`] of Single and Blend nodes is driven by an [`AnimController`],
//! which cross-fades between nodes when guarded transitions fire and pushes
//! per-clip weights into a host-implemented [`ClipProvider`].

pub mod accumulate;
pub mod binding;
pub mod blend;
pub mod config;
pub mod controller;
pub mod crossfade;
pub mod data;
pub mod error;
pub mod graph;
pub mod ids;
pub mod outputs;
pub mod stored_graph;
pub mod transition;
pub mod value;
pub mod variables;

// Re-exports for consumers (adapters)
pub use binding::{ClipBindings, ClipProvider, ProviderEvent};
pub use blend::{compute_blend_weights, BLEND_EPSILON};
pub use config::Config;
pub use controller::AnimController;
pub use crossfade::{ease_in_out, CrossFade, FadeSource};
pub use data::{BlendSample, Comparator, Condition, GraphDefinition, Node, NodeDef, Transition};
pub use error::AnimGraphError;
pub use graph::AnimGraph;
pub use ids::{ClipId, NodeId};
pub use outputs::{ClipEvent, ClipEventKind, ClipWeight, NodeEvent, Outputs};
pub use stored_graph::{parse_graph_definition, parse_graph_json};
pub use value::{VarKind, VarValue};
pub use variables::VariableStore;
