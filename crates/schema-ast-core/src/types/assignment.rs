use serde::{Deserialize, Serialize};

use super::comment::Comment;
use super::value::Value;

/// A `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub key: String,
    pub value: Value,
}

impl Assignment {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// One entry in a datasource or generator block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[non_exhaustive]
pub enum AssignmentEntry {
    Assignment(Assignment),
    Comment(Comment),
    Break,
}

impl AssignmentEntry {
    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Assignment(a) => Some(a),
            _ => None,
        }
    }
}
