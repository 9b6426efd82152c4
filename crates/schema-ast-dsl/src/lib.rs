//! # schema-ast-dsl
//!
//! Parser and printer for the schema definition language.
//!
//! This crate provides:
//! - A lexer that tokenizes schema source, keeping comments and blank
//!   lines as tokens
//! - A recursive descent parser that produces a concrete syntax tree
//! - A builder that lowers the CST into a `schema_ast_core::types::Schema`
//! - A printer that renders a `Schema` as canonical, column-aligned text
//! - Round-trip fidelity: `parse(print(schema))` equals `schema`
//!
//! # Example
//!
//! ```
//! use schema_ast_dsl::{parse, print};
//!
//! let source = "model User {\n  id Int @id\n  name String\n}\n";
//!
//! let schema = parse(source).expect("parse failed");
//! let user = schema.model("User").unwrap();
//! assert_eq!(user.fields().count(), 2);
//!
//! let text = print(&schema).expect("print failed");
//! assert_eq!(text, "model User {\n  id   Int    @id\n  name String\n}\n");
//! ```

pub mod builder;
pub mod config;
pub mod cst;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use config::{LineEnding, PrintConfig};
pub use error::{DslError, ParseError, PrintError, Span};
pub use parser::parse;
pub use printer::{print, print_with};

/// Parses `source` and prints it back in canonical layout.
///
/// # Errors
///
/// Returns `DslError::Parse` if `source` is not a valid schema.
pub fn format(source: &str) -> Result<String, DslError> {
    let schema = parse(source)?;
    Ok(print(&schema)?)
}
