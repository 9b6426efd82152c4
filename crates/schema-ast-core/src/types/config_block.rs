use serde::{Deserialize, Serialize};

use super::assignment::{Assignment, AssignmentEntry};
use super::value::Value;

/// Returns the first assignment with the given key.
fn find_assignment<'a>(entries: &'a [AssignmentEntry], key: &str) -> Option<&'a Value> {
    entries
        .iter()
        .filter_map(AssignmentEntry::as_assignment)
        .find(|a| a.key == key)
        .map(|a| &a.value)
}

fn assignments_of(entries: &[AssignmentEntry]) -> impl Iterator<Item = &Assignment> {
    entries.iter().filter_map(AssignmentEntry::as_assignment)
}

/// A `datasource` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Datasource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub assignments: Vec<AssignmentEntry>,
}

impl Datasource {
    pub fn new(name: impl Into<String>, assignments: Vec<AssignmentEntry>) -> Self {
        Self {
            name: name.into(),
            group: None,
            assignments,
        }
    }

    /// Looks up the value assigned to `key`, e.g. `provider`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        find_assignment(&self.assignments, key)
    }

    /// Iterates over the assignments, skipping comments and blank lines.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        assignments_of(&self.assignments)
    }
}

/// A `generator` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Generator {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub assignments: Vec<AssignmentEntry>,
}

impl Generator {
    pub fn new(name: impl Into<String>, assignments: Vec<AssignmentEntry>) -> Self {
        Self {
            name: name.into(),
            group: None,
            assignments,
        }
    }

    /// Looks up the value assigned to `key`, e.g. `provider`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        find_assignment(&self.assignments, key)
    }

    /// Iterates over the assignments, skipping comments and blank lines.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        assignments_of(&self.assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::comment::Comment;

    #[test]
    fn lookup_skips_comments() {
        let ds = Datasource::new(
            "db",
            vec![
                AssignmentEntry::Comment(Comment::new("// primary")),
                AssignmentEntry::Assignment(Assignment::new(
                    "provider",
                    Value::string("postgresql"),
                )),
                AssignmentEntry::Break,
                AssignmentEntry::Assignment(Assignment::new(
                    "url",
                    Value::function("env", vec![Value::string("DATABASE_URL")]),
                )),
            ],
        );
        assert_eq!(ds.get("provider"), Some(&Value::string("postgresql")));
        assert_eq!(ds.assignments().count(), 2);
        assert!(ds.get("shadowDatabaseUrl").is_none());
    }

    #[test]
    fn first_assignment_wins() {
        let generator = Generator::new(
            "client",
            vec![
                AssignmentEntry::Assignment(Assignment::new("output", Value::string("a"))),
                AssignmentEntry::Assignment(Assignment::new("output", Value::string("b"))),
            ],
        );
        assert_eq!(generator.get("output"), Some(&Value::string("a")));
    }
}
