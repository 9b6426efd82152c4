use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::value::Value;

/// The type column of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[non_exhaustive]
pub enum FieldType {
    /// A scalar, enum or model name such as `Int` or `User`.
    Identifier(String),
    /// A native type mapping such as `Unsupported("circle")`.
    Function { name: String, args: Vec<Value> },
}

impl FieldType {
    /// Returns the base type name without arguments.
    pub fn name(&self) -> &str {
        match self {
            Self::Identifier(name) | Self::Function { name, .. } => name.as_str(),
        }
    }
}

/// A field declaration inside a model block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub array: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

impl Field {
    /// Creates a required scalar field with no attributes.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Identifier(field_type.into()),
            array: false,
            optional: false,
            attributes: Vec::new(),
        }
    }

    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Looks up a field attribute by its qualified name (`id`, `db.VarChar`).
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.qualified_name() == name)
    }
}
