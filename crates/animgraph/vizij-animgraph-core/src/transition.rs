//! Transition evaluation: first satisfied edge out of the current node wins.

use crate::data::{Comparator, Condition, Transition};
use crate::graph::AnimGraph;
use crate::ids::NodeId;
use crate::value::VarValue;
use crate::variables::VariableStore;

fn compare(lhs: VarValue, cmp: Comparator, rhs: VarValue) -> bool {
    match (lhs, rhs) {
        (VarValue::Number(a), VarValue::Number(b)) => match cmp {
            Comparator::Eq => a == b,
            Comparator::Ne => a != b,
            Comparator::Gt => a > b,
            Comparator::Lt => a < b,
            Comparator::Ge => a >= b,
            Comparator::Le => a <= b,
        },
        (VarValue::Bool(a), VarValue::Bool(b)) => match cmp {
            Comparator::Eq => a == b,
            Comparator::Ne => a != b,
            // Booleans are unordered.
            _ => false,
        },
        // Type mismatch never satisfies a guard, not even `!=`.
        _ => false,
    }
}

impl Condition {
    /// An unset variable makes the condition false.
    pub fn evaluate(&self, vars: &VariableStore) -> bool {
        match vars.get(&self.variable) {
            Some(v) => compare(v, self.comparator, self.value),
            None => false,
        }
    }
}

impl Transition {
    /// `source_completed` is true only when the current node is a non-looping
    /// Single whose clip has stopped; it is ignored for guarded transitions.
    pub fn is_satisfied(&self, vars: &VariableStore, source_completed: bool) -> bool {
        if self.conditions.is_empty() {
            source_completed
        } else {
            self.conditions.iter().all(|c| c.evaluate(vars))
        }
    }
}

/// Scan transitions out of `current` in declaration order and return the first
/// satisfied one with its declaration index.
pub fn select_transition<'a>(
    graph: &'a AnimGraph,
    current: &NodeId,
    vars: &VariableStore,
    source_completed: bool,
) -> Option<(usize, &'a Transition)> {
    graph
        .transitions()
        .iter()
        .enumerate()
        .filter(|(_, t)| &t.from == current)
        .find(|(_, t)| t.is_satisfied(vars, source_completed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Node, NodeDef};

    fn graph(transitions: Vec<Transition>) -> AnimGraph {
        AnimGraph::new(
            vec![
                NodeDef::new("movement", Node::blend([("idle", [0.0, 0.0])])),
                NodeDef::new("JumpUp", Node::single("jumpUp", 1.0, false)),
                NodeDef::new("JumpFalling", Node::single("jumpFalling", 1.0, true)),
            ],
            transitions,
            "movement",
        )
        .unwrap()
    }

    #[test]
    fn comparators_on_numbers_and_bools() {
        let mut vars = VariableStore::new();
        vars.set("speed", 2.0);
        vars.set("grounded", true);

        let c = |var: &str, cmp, v: VarValue| Condition::new(var, cmp, v).evaluate(&vars);
        assert!(c("speed", Comparator::Eq, 2.0.into()));
        assert!(c("speed", Comparator::Ne, 3.0.into()));
        assert!(c("speed", Comparator::Gt, 1.0.into()));
        assert!(!c("speed", Comparator::Lt, 2.0.into()));
        assert!(c("speed", Comparator::Ge, 2.0.into()));
        assert!(c("speed", Comparator::Le, 2.5.into()));
        assert!(c("grounded", Comparator::Eq, true.into()));
        assert!(c("grounded", Comparator::Ne, false.into()));
        assert!(!c("grounded", Comparator::Gt, false.into()));
        assert!(!c("speed", Comparator::Ne, true.into()));
        assert!(!c("missing", Comparator::Ne, true.into()));
    }

    #[test]
    fn conditions_are_anded() {
        let t = Transition::new("movement", "JumpUp")
            .when(Condition::new("isJumping", Comparator::Eq, true))
            .when(Condition::new("stamina", Comparator::Gt, 0.0));
        let mut vars = VariableStore::new();
        vars.set("isJumping", true);
        assert!(!t.is_satisfied(&vars, false));
        vars.set("stamina", 1.0);
        assert!(t.is_satisfied(&vars, false));
    }

    #[test]
    fn empty_conditions_follow_completion() {
        let t = Transition::new("JumpUp", "JumpFalling");
        let vars = VariableStore::new();
        assert!(!t.is_satisfied(&vars, false));
        assert!(t.is_satisfied(&vars, true));
    }

    #[test]
    fn first_declared_match_wins() {
        let g = graph(vec![
            Transition::new("JumpUp", "movement"),
            Transition::new("movement", "JumpFalling")
                .when(Condition::new("a", Comparator::Eq, true)),
            Transition::new("movement", "JumpUp").when(Condition::new("a", Comparator::Eq, true)),
        ]);
        let mut vars = VariableStore::new();
        vars.set("a", true);
        let (idx, t) = select_transition(&g, &NodeId::from("movement"), &vars, false).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(t.to.as_str(), "JumpFalling");
    }

    #[test]
    fn nothing_fires_without_a_match() {
        let g = graph(vec![Transition::new("movement", "JumpUp")
            .when(Condition::new("isJumping", Comparator::Eq, true))]);
        let vars = VariableStore::new();
        assert!(select_transition(&g, &NodeId::from("movement"), &vars, false).is_none());
    }
}
