use serde::{Deserialize, Serialize};

use super::assignment::Assignment;
use super::attribute::Attribute;
use super::comment::Comment;
use super::field::Field;

/// One entry in a model block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[non_exhaustive]
pub enum Property {
    Field(Field),
    /// A model-level attribute such as `@@id([a, b])`.
    Attribute(Attribute),
    /// A `key = value` line inside a model.
    Assignment(Assignment),
    Comment(Comment),
    Break,
}

/// A `model` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub properties: Vec<Property>,
}

impl Model {
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            group: None,
            properties,
        }
    }

    /// Iterates over the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.properties.iter().filter_map(|p| match p {
            Property::Field(f) => Some(f),
            _ => None,
        })
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|f| f.name == name)
    }

    /// Iterates over the model-level (`@@`) attributes.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.properties.iter().filter_map(|p| match p {
            Property::Attribute(a) => Some(a),
            _ => None,
        })
    }

    /// Looks up a model-level attribute by its qualified name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().find(|a| a.qualified_name() == name)
    }
}
