use serde::{Deserialize, Serialize};

/// A line comment, kept verbatim including its `//` marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns true for `///` documentation comments.
    pub fn is_doc(&self) -> bool {
        self.text.starts_with("///")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_comment_detection() {
        assert!(Comment::new("/// the user").is_doc());
        assert!(!Comment::new("// plain").is_doc());
    }
}
