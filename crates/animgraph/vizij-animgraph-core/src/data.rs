//! Canonical animation-graph data model: nodes, blend samples, transitions, guards.
//! Values are defined in value.rs; validation lives in graph.rs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{ClipId, NodeId};
use crate::value::VarValue;

fn default_speed() -> f32 {
    1.0
}

fn default_looping() -> bool {
    true
}

/// One clip positioned on the 2D (x = lateral, z = forward/back) blend plane.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlendSample {
    pub clip: ClipId,
    pub position: [f32; 2],
}

/// An animation state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Exactly one clip at a fixed playback speed.
    Single {
        clip: ClipId,
        #[serde(default = "default_speed")]
        speed: f32,
        #[serde(default = "default_looping")]
        looping: bool,
    },
    /// Several clips weighted by distance to the current 2D sample.
    Blend { samples: Vec<BlendSample> },
}

impl Node {
    pub fn single(clip: impl Into<ClipId>, speed: f32, looping: bool) -> Self {
        Node::Single {
            clip: clip.into(),
            speed,
            looping,
        }
    }

    pub fn blend<C: Into<ClipId>>(samples: impl IntoIterator<Item = (C, [f32; 2])>) -> Self {
        Node::Blend {
            samples: samples
                .into_iter()
                .map(|(clip, position)| BlendSample {
                    clip: clip.into(),
                    position,
                })
                .collect(),
        }
    }

    /// Clips referenced by this node, in declaration order.
    pub fn clips(&self) -> Vec<&ClipId> {
        match self {
            Node::Single { clip, .. } => vec![clip],
            Node::Blend { samples } => samples.iter().map(|s| &s.clip).collect(),
        }
    }

    #[inline]
    pub fn is_blend(&self) -> bool {
        matches!(self, Node::Blend { .. })
    }
}

/// A node together with its id, as declared in a graph definition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: NodeId,
    #[serde(flatten)]
    pub node: Node,
}

impl NodeDef {
    pub fn new(id: impl Into<NodeId>, node: Node) -> Self {
        Self {
            id: id.into(),
            node,
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Comparator {
    #[serde(rename = "==", alias = "eq")]
    Eq,
    #[serde(rename = "!=", alias = "ne")]
    Ne,
    #[serde(rename = ">", alias = "gt")]
    Gt,
    #[serde(rename = "<", alias = "lt")]
    Lt,
    #[serde(rename = ">=", alias = "ge")]
    Ge,
    #[serde(rename = "<=", alias = "le")]
    Le,
}

impl Comparator {
    #[inline]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }
}

/// Guard comparing one variable against a literal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub variable: String,
    #[serde(alias = "op")]
    pub comparator: Comparator,
    pub value: VarValue,
}

impl Condition {
    pub fn new(
        variable: impl Into<String>,
        comparator: Comparator,
        value: impl Into<VarValue>,
    ) -> Self {
        Self {
            variable: variable.into(),
            comparator,
            value: value.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.variable, self.comparator.symbol(), self.value)
    }
}

/// Directed guarded edge. Conditions are ANDed; an empty list means "fire when
/// the source clip completes" (see transition.rs).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transition {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Cross-fade duration in seconds; 0 is a hard cut.
    #[serde(default)]
    pub duration: f32,
}

impl Transition {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            conditions: Vec::new(),
            duration: 0.0,
        }
    }

    /// Add a guard (ANDed with any existing ones).
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if self.conditions.is_empty() {
            return f.write_str(" on completion");
        }
        for (i, c) in self.conditions.iter().enumerate() {
            f.write_str(if i == 0 { " when " } else { " && " })?;
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Unvalidated graph as authored (JSON or code).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphDefinition {
    pub initial: NodeId,
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}
