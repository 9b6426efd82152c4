use serde::{Deserialize, Serialize};

use super::value::Value;

/// Whether an attribute decorates a single field (`@`) or a whole model (`@@`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    Field,
    Model,
}

impl AttributeKind {
    /// The marker written before the attribute name.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Field => "@",
            Self::Model => "@@",
        }
    }
}

/// One argument inside an attribute's parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[non_exhaustive]
pub enum AttributeArgument {
    /// A positional argument, e.g. the `[email]` in `@@unique([email])`.
    Value(Value),
    /// A named argument, e.g. `references: [id]`.
    KeyValue { key: String, value: Value },
}

impl AttributeArgument {
    /// Returns the argument's value regardless of whether it is named.
    pub fn value(&self) -> &Value {
        match self {
            Self::Value(v) | Self::KeyValue { value: v, .. } => v,
        }
    }

    /// Returns the key of a named argument.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::KeyValue { key, .. } => Some(key.as_str()),
        }
    }
}

/// A field or model attribute such as `@id`, `@db.VarChar(255)` or
/// `@@index([email], map: "idx")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub kind: AttributeKind,
    /// The `db` in `@db.VarChar`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<AttributeArgument>,
}

impl Attribute {
    /// Creates an attribute with no group and no arguments.
    pub fn new(kind: AttributeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            group: None,
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Shorthand for a field attribute (`@name`).
    pub fn field(name: impl Into<String>) -> Self {
        Self::new(AttributeKind::Field, name)
    }

    /// Shorthand for a model attribute (`@@name`).
    pub fn model(name: impl Into<String>) -> Self {
        Self::new(AttributeKind::Model, name)
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_args(mut self, args: Vec<AttributeArgument>) -> Self {
        self.args = args;
        self
    }

    /// Returns the name including its group qualifier, e.g. `db.VarChar`.
    pub fn qualified_name(&self) -> String {
        match &self.group {
            Some(group) => format!("{group}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Looks up a named argument.
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.iter().find_map(|a| match a {
            AttributeArgument::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers() {
        assert_eq!(AttributeKind::Field.marker(), "@");
        assert_eq!(AttributeKind::Model.marker(), "@@");
    }

    #[test]
    fn qualified_name_with_group() {
        let attr = Attribute::field("VarChar").with_group("db");
        assert_eq!(attr.qualified_name(), "db.VarChar");
        assert_eq!(Attribute::field("id").qualified_name(), "id");
    }

    #[test]
    fn named_argument_lookup() {
        let attr = Attribute::field("relation").with_args(vec![
            AttributeArgument::KeyValue {
                key: "fields".into(),
                value: Value::Array(vec![Value::ident("authorId")]),
            },
            AttributeArgument::KeyValue {
                key: "references".into(),
                value: Value::Array(vec![Value::ident("id")]),
            },
        ]);
        assert_eq!(
            attr.arg("references"),
            Some(&Value::Array(vec![Value::ident("id")]))
        );
        assert!(attr.arg("onDelete").is_none());
    }

    #[test]
    fn argument_accessors() {
        let positional = AttributeArgument::Value(Value::string("x"));
        assert_eq!(positional.key(), None);
        assert_eq!(positional.value(), &Value::string("x"));
    }
}
