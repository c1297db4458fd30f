//! Semantic identifiers for clips and graph nodes.
//!
//! Both are thin string newtypes: the host names clips and nodes, the core
//! never allocates them. Serialized transparently so JSON definitions stay flat.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic clip name, bound to at most one provider handle.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub String);

/// Node name, unique within an [`AnimGraph`](crate::graph::AnimGraph).
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            #[inline]
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ClipId);
string_id!(NodeId);
