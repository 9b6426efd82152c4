//! # schema-ast-core
//!
//! Typed tree for the schema definition language: datasources,
//! generators, models and enums, with comments and blank lines kept as
//! first-class siblings so that a printed tree reproduces its source
//! layout.
//!
//! The tree is produced by `schema-ast-dsl` but can equally be built by
//! hand:
//!
//! ```
//! use schema_ast_core::types::{Attribute, Block, Field, Model, Property, Schema};
//!
//! let schema = Schema::new(vec![Block::Model(Model::new(
//!     "User",
//!     vec![
//!         Property::Field(Field::new("id", "Int").with_attribute(Attribute::field("id"))),
//!         Property::Field(Field::new("name", "String").optional()),
//!     ],
//! ))]);
//!
//! let user = schema.model("User").unwrap();
//! assert!(user.field("name").unwrap().optional);
//! ```

pub mod types;
