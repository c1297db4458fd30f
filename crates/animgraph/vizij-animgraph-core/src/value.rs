//! Variable values consulted by transition guards and blend sampling.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum VarKind {
    Number,
    Bool,
}

/// A number-or-boolean variable. Serialized untagged: `1.5` or `true`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum VarValue {
    Bool(bool),
    Number(f32),
}

impl VarValue {
    #[inline]
    pub fn kind(&self) -> VarKind {
        match self {
            VarValue::Number(_) => VarKind::Number,
            VarValue::Bool(_) => VarKind::Bool,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f32> {
        match self {
            VarValue::Number(n) => Some(*n),
            VarValue::Bool(_) => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VarValue::Bool(b) => Some(*b),
            VarValue::Number(_) => None,
        }
    }
}

impl From<f32> for VarValue {
    fn from(v: f32) -> Self {
        VarValue::Number(v)
    }
}

// Unsuffixed float literals fall back to f64.
impl From<f64> for VarValue {
    fn from(v: f64) -> Self {
        VarValue::Number(v as f32)
    }
}

impl From<i32> for VarValue {
    fn from(v: i32) -> Self {
        VarValue::Number(v as f32)
    }
}

impl From<bool> for VarValue {
    fn from(v: bool) -> Self {
        VarValue::Bool(v)
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Number(n) => write!(f, "{n}"),
            VarValue::Bool(b) => write!(f, "{b}"),
        }
    }
}
