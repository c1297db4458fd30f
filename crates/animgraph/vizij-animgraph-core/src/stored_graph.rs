//! JSON graph definitions.
//!
//! Shape (see fixtures/graphs/*.json):
//! ```json
//! {
//!   "initial": "movement",
//!   "nodes": [
//!     { "id": "movement", "type": "blend",
//!       "samples": [ { "clip": "idle", "position": [0, 0] } ] },
//!     { "id": "JumpUp", "type": "single", "clip": "jumpUp", "looping": false }
//!   ],
//!   "transitions": [
//!     { "from": "movement", "to": "JumpUp",
//!       "conditions": [ { "variable": "isJumping", "comparator": "==", "value": true } ] }
//!   ]
//! }
//! ```
//! `speed` defaults to 1, `looping` to true, `duration` to 0 and `conditions` to `[]`.

use crate::data::GraphDefinition;
use crate::error::AnimGraphError;
use crate::graph::AnimGraph;

/// Parse a JSON document into an unvalidated [`GraphDefinition`].
pub fn parse_graph_definition(s: &str) -> Result<GraphDefinition, AnimGraphError> {
    Ok(serde_json::from_str(s)?)
}

/// Parse and validate a JSON graph in one step.
pub fn parse_graph_json(s: &str) -> Result<AnimGraph, AnimGraphError> {
    AnimGraph::from_definition(parse_graph_definition(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Comparator, Node};
    use crate::ids::NodeId;
    use crate::value::VarValue;

    #[test]
    fn parses_defaults_and_aliases() {
        let g = parse_graph_json(
            r#"{
                "initial": "Idle",
                "nodes": [
                    { "id": "Idle", "type": "single", "clip": "idle" },
                    { "id": "Run", "type": "single", "clip": "run", "speed": 1.5 }
                ],
                "transitions": [
                    { "from": "Idle", "to": "Run", "duration": 0.2,
                      "conditions": [ { "variable": "speed", "op": "gt", "value": 2 } ] }
                ]
            }"#,
        )
        .unwrap();

        match g.node(&NodeId::from("Idle")).unwrap() {
            Node::Single { speed, looping, .. } => {
                assert_eq!(*speed, 1.0);
                assert!(*looping);
            }
            other => panic!("unexpected node {other:?}"),
        }
        let t = &g.transitions()[0];
        assert_eq!(t.duration, 0.2);
        assert_eq!(t.conditions[0].comparator, Comparator::Gt);
        assert_eq!(t.conditions[0].value, VarValue::Number(2.0));
    }

    #[test]
    fn structural_errors_surface_from_json() {
        let err = parse_graph_json(
            r#"{ "initial": "Missing", "nodes": [ { "id": "A", "type": "single", "clip": "a" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnimGraphError::UnknownInitialNode { .. }));

        let err = parse_graph_json("{ not json").unwrap_err();
        assert_eq!(err.category(), "serialization");
    }
}
