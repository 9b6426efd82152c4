pub mod assignment;
pub mod attribute;
pub mod comment;
pub mod config_block;
pub mod enumeration;
pub mod field;
pub mod model;
pub mod schema;
pub mod value;

pub use assignment::{Assignment, AssignmentEntry};
pub use attribute::{Attribute, AttributeArgument, AttributeKind};
pub use comment::Comment;
pub use config_block::{Datasource, Generator};
pub use enumeration::{Enum, EnumEntry, Enumerator};
pub use field::{Field, FieldType};
pub use model::{Model, Property};
pub use schema::{Block, Schema};
pub use value::Value;
