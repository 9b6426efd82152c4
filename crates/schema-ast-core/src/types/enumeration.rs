use serde::{Deserialize, Serialize};

use super::comment::Comment;

/// A single enum member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enumerator {
    pub name: String,
}

impl Enumerator {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One entry in an enum block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[non_exhaustive]
pub enum EnumEntry {
    Enumerator(Enumerator),
    Comment(Comment),
    Break,
}

/// An `enum` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub enumerators: Vec<EnumEntry>,
}

impl Enum {
    pub fn new(name: impl Into<String>, enumerators: Vec<EnumEntry>) -> Self {
        Self {
            name: name.into(),
            group: None,
            enumerators,
        }
    }

    /// Iterates over member names in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.enumerators.iter().filter_map(|e| match e {
            EnumEntry::Enumerator(en) => Some(en.name.as_str()),
            _ => None,
        })
    }
}
