use serde::{Deserialize, Serialize};

/// A literal or compound value appearing on the right of an assignment,
/// as a field type, or as an attribute argument.
///
/// Numbers keep their source text so `1.50` prints back as `1.50`.
/// String values hold the text between the quotes, so they cannot
/// contain `"` or a line break and still be printed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[non_exhaustive]
pub enum Value {
    String(String),
    Number(String),
    Boolean(bool),
    Null,
    Identifier(String),
    Array(Vec<Value>),
    /// A call such as `env("DATABASE_URL")` or `now()`.
    ///
    /// An empty `args` vector is a call with empty parentheses; it is
    /// never collapsed into a bare identifier.
    Function {
        name: String,
        args: Vec<Value>,
    },
    /// `key: value`. Only has a textual form as a direct attribute
    /// argument.
    KeyValue {
        key: String,
        value: Box<Value>,
    },
}

impl Value {
    /// Creates a string value from unquoted text.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Creates a bare identifier value.
    pub fn ident(s: impl Into<String>) -> Self {
        Self::Identifier(s.into())
    }

    /// Creates a function-call value.
    pub fn function(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }

    /// Creates a `key: value` pair.
    pub fn key_value(key: impl Into<String>, value: Value) -> Self {
        Self::KeyValue {
            key: key.into(),
            value: Box::new(value),
        }
    }

    /// Returns the text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the name of an identifier value.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the elements of an array value.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(Value::string("x"), Value::String("x".into()));
        assert_eq!(Value::ident("cuid"), Value::Identifier("cuid".into()));
        assert_eq!(
            Value::function("now", vec![]),
            Value::Function {
                name: "now".into(),
                args: vec![],
            }
        );
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::string("postgresql").as_str(), Some("postgresql"));
        assert_eq!(Value::ident("id").as_str(), None);
        assert_eq!(Value::ident("id").as_identifier(), Some("id"));
        let arr = Value::Array(vec![Value::ident("a"), Value::ident("b")]);
        assert_eq!(arr.as_array().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn empty_call_differs_from_identifier() {
        assert_ne!(Value::function("now", vec![]), Value::ident("now"));
    }

    #[test]
    fn serde_roundtrip_nested() {
        let v = Value::key_value(
            "fields",
            Value::Array(vec![Value::ident("authorId"), Value::Number("-1.5".into())]),
        );
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }

    #[test]
    fn serde_shape_is_tagged() {
        let json = serde_json::to_value(Value::Boolean(true)).unwrap();
        assert_eq!(json["type"], "Boolean");
        assert_eq!(json["data"], true);
    }
}
