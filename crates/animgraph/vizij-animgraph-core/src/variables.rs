//! Host-owned variable store read by guards and blend sampling.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::value::VarValue;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VariableStore {
    inner: HashMap<String, VarValue>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Set (or overwrite) a variable. Returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VarValue>) -> Option<VarValue> {
        self.inner.insert(name.into(), value.into())
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<VarValue> {
        self.inner.get(name).copied()
    }

    /// Numeric read for blend sampling: missing, boolean or non-finite reads as 0.0.
    pub fn number_or_zero(&self, name: &str) -> f32 {
        match self.get(name).and_then(|v| v.as_number()) {
            Some(n) if n.is_finite() => n,
            _ => 0.0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_and_numeric_reads() {
        let mut vars = VariableStore::new();
        assert!(vars.is_empty());
        assert_eq!(vars.set("moveZ", 0.5), None);
        assert_eq!(vars.set("moveZ", 0.75), Some(VarValue::Number(0.5)));
        vars.set("isJumping", true);

        assert_eq!(vars.get("isJumping"), Some(VarValue::Bool(true)));
        assert_eq!(vars.number_or_zero("moveZ"), 0.75);
        assert_eq!(vars.number_or_zero("isJumping"), 0.0);
        assert_eq!(vars.number_or_zero("missing"), 0.0);
        assert_eq!(vars.len(), 2);
    }
}
