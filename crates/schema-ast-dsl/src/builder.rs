//! Lowers the concrete syntax tree into `schema_ast_core` types.
//!
//! This is a structural remap with no checks of its own: anything the
//! grammar accepted has exactly one tree form. Blank-line tokens become
//! `Break` entries and lone line breaks disappear.

use schema_ast_core::types::{
    Assignment, AssignmentEntry, Attribute, AttributeArgument, AttributeKind, Block, Comment,
    Datasource, Enum, EnumEntry, Enumerator, Field, FieldType, Generator, Model, Property, Schema,
    Value,
};

use crate::cst::{
    ComponentKind, CstAssignment, CstAttribute, CstAttributeArg, CstComponent, CstEntry, CstField,
    CstFieldType, CstItem, CstSchema, CstValue,
};
use crate::lexer::SpannedToken;
use crate::token::Token;

/// Builds a [`Schema`] from a parsed CST.
///
/// Blank lines before the first comment or component produce nothing, and
/// so does a blank line between two components: the printer always
/// separates adjacent components with one.
pub fn build_schema(cst: CstSchema) -> Schema {
    let mut list = Vec::with_capacity(cst.items.len());
    let mut items = cst
        .items
        .into_iter()
        .filter(|item| !matches!(item, CstItem::LineBreak(_)))
        .peekable();

    while let Some(item) = items.next() {
        match item {
            CstItem::Comment(tok) => list.push(Block::Comment(comment(tok))),
            CstItem::Component(component) => list.push(build_component(component)),
            CstItem::BlankLine(_) => {
                let after_component = matches!(list.last(), Some(block) if is_component(block));
                let before_component = matches!(items.peek(), Some(CstItem::Component(_)));
                if !list.is_empty() && !(after_component && before_component) {
                    list.push(Block::Break);
                }
            }
            CstItem::LineBreak(_) => {}
        }
    }
    Schema::new(list)
}

fn is_component(block: &Block) -> bool {
    !matches!(block, Block::Comment(_) | Block::Break)
}

fn build_component(component: CstComponent) -> Block {
    let CstComponent { kind, name, block, .. } = component;
    let group = name.group.map(|t| t.text);
    let name = name.name.text;

    match kind {
        ComponentKind::Model => Block::Model(Model {
            name,
            group,
            properties: block.entries.into_iter().filter_map(build_property).collect(),
        }),
        ComponentKind::Enum => Block::Enum(Enum {
            name,
            group,
            enumerators: block
                .entries
                .into_iter()
                .filter_map(build_enum_entry)
                .collect(),
        }),
        ComponentKind::Generator => Block::Generator(Generator {
            name,
            group,
            assignments: build_assignments(block.entries),
        }),
        ComponentKind::Datasource => Block::Datasource(Datasource {
            name,
            group,
            assignments: build_assignments(block.entries),
        }),
    }
}

fn build_assignments(entries: Vec<CstEntry>) -> Vec<AssignmentEntry> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            CstEntry::Assignment(a) | CstEntry::Property(a) => {
                Some(AssignmentEntry::Assignment(assignment(a)))
            }
            CstEntry::Comment(tok) => Some(AssignmentEntry::Comment(comment(tok))),
            CstEntry::BlankLine(_) => Some(AssignmentEntry::Break),
            _ => None,
        })
        .collect()
}

fn build_property(entry: CstEntry) -> Option<Property> {
    match entry {
        CstEntry::Field(f) => Some(Property::Field(field(f))),
        CstEntry::Attribute(a) => Some(Property::Attribute(attribute(a))),
        CstEntry::Property(a) | CstEntry::Assignment(a) => {
            Some(Property::Assignment(assignment(a)))
        }
        CstEntry::Comment(tok) => Some(Property::Comment(comment(tok))),
        CstEntry::BlankLine(_) => Some(Property::Break),
        CstEntry::LineBreak(_) | CstEntry::Enumerator(_) => None,
    }
}

fn build_enum_entry(entry: CstEntry) -> Option<EnumEntry> {
    match entry {
        CstEntry::Enumerator(tok) => Some(EnumEntry::Enumerator(Enumerator::new(tok.text))),
        CstEntry::Comment(tok) => Some(EnumEntry::Comment(comment(tok))),
        CstEntry::BlankLine(_) => Some(EnumEntry::Break),
        _ => None,
    }
}

fn comment(tok: SpannedToken) -> Comment {
    Comment::new(tok.text)
}

fn assignment(a: CstAssignment) -> Assignment {
    Assignment::new(a.key.text, value(a.value))
}

fn field(f: CstField) -> Field {
    let field_type = match f.field_type {
        CstFieldType::Identifier(tok) => FieldType::Identifier(tok.text),
        CstFieldType::Function { name, args, .. } => FieldType::Function {
            name: name.text,
            args: args.into_iter().map(value).collect(),
        },
    };
    let modifier = f.modifier.map(|t| t.token);

    Field {
        name: f.name.text,
        field_type,
        array: modifier == Some(Token::ArraySuffix),
        optional: modifier == Some(Token::Question),
        attributes: f.attributes.into_iter().map(attribute).collect(),
    }
}

fn attribute(a: CstAttribute) -> Attribute {
    let kind = match a.marker.token {
        Token::AtAt => AttributeKind::Model,
        _ => AttributeKind::Field,
    };

    Attribute {
        kind,
        group: a.name.group.map(|t| t.text),
        name: a.name.name.text,
        args: a
            .args
            .unwrap_or_default()
            .into_iter()
            .map(|arg| match arg {
                CstAttributeArg::Keyed { key, value: v } => AttributeArgument::KeyValue {
                    key: key.text,
                    value: value(v),
                },
                CstAttributeArg::Value(v) => AttributeArgument::Value(value(v)),
            })
            .collect(),
    }
}

fn value(v: CstValue) -> Value {
    match v {
        CstValue::String(tok) => Value::String(unquote(&tok.text)),
        CstValue::Number(tok) => Value::Number(tok.text),
        CstValue::True(_) => Value::Boolean(true),
        CstValue::False(_) => Value::Boolean(false),
        CstValue::Null(_) => Value::Null,
        CstValue::Identifier(tok) => Value::Identifier(tok.text),
        CstValue::Array { items, .. } => Value::Array(items.into_iter().map(value).collect()),
        CstValue::Function { name, args, .. } => Value::Function {
            name: name.text,
            args: args.into_iter().map(value).collect(),
        },
    }
}

/// Strips the surrounding quotes from a string literal.
fn unquote(s: &str) -> String {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
        .to_string()
}
