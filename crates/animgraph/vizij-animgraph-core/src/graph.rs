//! Validated, immutable animation graph.
//!
//! All structural checks run once in [`AnimGraph::new`]; a graph that exists is
//! well-formed, so the per-tick path never re-validates.

use hashbrown::HashMap;
use serde::Serialize;

use crate::data::{GraphDefinition, Node, NodeDef, Transition};
use crate::error::AnimGraphError;
use crate::ids::{ClipId, NodeId};

#[derive(Clone, Debug, Serialize)]
pub struct AnimGraph {
    nodes: Vec<NodeDef>,
    transitions: Vec<Transition>,
    initial: NodeId,
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

fn check_duration(duration: f32) -> Result<(), AnimGraphError> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(AnimGraphError::InvalidDuration { duration });
    }
    Ok(())
}

fn check_node(def: &NodeDef) -> Result<(), AnimGraphError> {
    match &def.node {
        Node::Single { speed, .. } => {
            if !speed.is_finite() || *speed < 0.0 {
                return Err(AnimGraphError::InvalidNode {
                    id: def.id.clone(),
                    reason: format!("speed must be finite and >= 0, got {speed}"),
                });
            }
        }
        Node::Blend { samples } => {
            if samples.is_empty() {
                return Err(AnimGraphError::EmptyBlend { id: def.id.clone() });
            }
            for s in samples {
                if !s.position[0].is_finite() || !s.position[1].is_finite() {
                    return Err(AnimGraphError::InvalidNode {
                        id: def.id.clone(),
                        reason: format!("sample '{}' has a non-finite position", s.clip),
                    });
                }
            }
        }
    }
    Ok(())
}

impl AnimGraph {
    /// Validate and freeze a graph.
    pub fn new(
        nodes: Vec<NodeDef>,
        transitions: Vec<Transition>,
        initial: impl Into<NodeId>,
    ) -> Result<Self, AnimGraphError> {
        let initial = initial.into();

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, def) in nodes.iter().enumerate() {
            check_node(def)?;
            if index.insert(def.id.clone(), i).is_some() {
                return Err(AnimGraphError::DuplicateNode { id: def.id.clone() });
            }
        }

        for (i, t) in transitions.iter().enumerate() {
            for end in [&t.from, &t.to] {
                if !index.contains_key(end) {
                    return Err(AnimGraphError::UnknownTransitionNode {
                        index: i,
                        id: end.clone(),
                    });
                }
            }
            check_duration(t.duration)?;
            if t.conditions.is_empty() && nodes[index[&t.from]].node.is_blend() {
                // Completion has no meaning for a blend; such an edge never fires.
                log::warn!(
                    "transition #{i} {} -> {} has no conditions but its source is a blend node; it will never fire",
                    t.from,
                    t.to
                );
            }
        }

        if !index.contains_key(&initial) {
            return Err(AnimGraphError::UnknownInitialNode { id: initial });
        }

        Ok(Self {
            nodes,
            transitions,
            initial,
            index,
        })
    }

    pub fn from_definition(def: GraphDefinition) -> Result<Self, AnimGraphError> {
        Self::new(def.nodes, def.transitions, def.initial)
    }

    #[inline]
    pub fn initial(&self) -> &NodeId {
        &self.initial
    }

    #[inline]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i].node)
    }

    #[inline]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeDef> {
        self.nodes.iter()
    }

    /// Transitions in declaration order.
    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Transitions leaving `from`, in declaration order.
    pub fn transitions_from<'a>(
        &'a self,
        from: &'a NodeId,
    ) -> impl Iterator<Item = &'a Transition> {
        self.transitions.iter().filter(move |t| &t.from == from)
    }

    /// Every distinct clip referenced by any node, first-seen order.
    pub fn referenced_clips(&self) -> Vec<&ClipId> {
        let mut out: Vec<&ClipId> = Vec::new();
        for def in &self.nodes {
            for clip in def.node.clips() {
                if !out.contains(&clip) {
                    out.push(clip);
                }
            }
        }
        out
    }
}
