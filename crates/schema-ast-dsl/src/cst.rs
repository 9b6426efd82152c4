//! Concrete syntax tree.
//!
//! Each node mirrors one grammar production and keeps the tokens it was
//! built from, so spans stay available until the tree builder lowers the
//! CST into `schema_ast_core` types.

use crate::error::Span;
use crate::lexer::SpannedToken;

/// Which entries a block admits, decided by the keyword that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockContext {
    /// `model`: comments, properties, model attributes and fields.
    Model,
    /// `enum`: comments and bare enumerators.
    Enum,
    /// `datasource` and `generator`: comments and assignments.
    Config,
}

/// schema = (comment | component | blank_line | line_break)*
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstSchema {
    pub items: Vec<CstItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CstItem {
    Comment(SpannedToken),
    Component(CstComponent),
    BlankLine(SpannedToken),
    LineBreak(SpannedToken),
}

/// The keyword that opened a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Datasource,
    Generator,
    Model,
    Enum,
}

impl ComponentKind {
    /// The block context this keyword selects.
    pub fn context(self) -> BlockContext {
        match self {
            Self::Model => BlockContext::Model,
            Self::Enum => BlockContext::Enum,
            Self::Datasource | Self::Generator => BlockContext::Config,
        }
    }
}

/// component = KEYWORD qualified_name block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstComponent {
    pub kind: ComponentKind,
    pub keyword: SpannedToken,
    pub name: CstQualifiedName,
    pub block: CstBlock,
}

/// qualified_name = IDENT "." IDENT | IDENT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstQualifiedName {
    pub group: Option<SpannedToken>,
    pub name: SpannedToken,
}

/// block = "{" break entry* "}"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstBlock {
    pub context: BlockContext,
    pub open: SpannedToken,
    pub opening_break: SpannedToken,
    pub entries: Vec<CstEntry>,
    pub close: SpannedToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CstEntry {
    Comment(SpannedToken),
    /// `key = value` inside a model.
    Property(CstAssignment),
    /// `key = value` inside a datasource or generator.
    Assignment(CstAssignment),
    Attribute(CstAttribute),
    Field(CstField),
    Enumerator(SpannedToken),
    BlankLine(SpannedToken),
    LineBreak(SpannedToken),
}

/// assignment = IDENT "=" value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstAssignment {
    pub key: SpannedToken,
    pub equals: SpannedToken,
    pub value: CstValue,
}

/// field = IDENT value ("[]" | "?")? attribute*
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstField {
    pub name: SpannedToken,
    pub field_type: CstFieldType,
    pub modifier: Option<SpannedToken>,
    pub attributes: Vec<CstAttribute>,
}

/// The value in type position, narrowed to the two forms a type may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CstFieldType {
    Identifier(SpannedToken),
    Function {
        name: SpannedToken,
        args: Vec<CstValue>,
        close: SpannedToken,
    },
}

/// attribute = ("@" | "@@") qualified_name ("(" arg_list ")")?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstAttribute {
    pub marker: SpannedToken,
    pub name: CstQualifiedName,
    pub args: Option<Vec<CstAttributeArg>>,
}

/// arg = IDENT ":" value | value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CstAttributeArg {
    Keyed { key: SpannedToken, value: CstValue },
    Value(CstValue),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CstValue {
    String(SpannedToken),
    Number(SpannedToken),
    True(SpannedToken),
    False(SpannedToken),
    Null(SpannedToken),
    Identifier(SpannedToken),
    /// array = "[" (value ("," value)*)? "]" | "[]"
    Array { items: Vec<CstValue>, span: Span },
    /// func = IDENT "(" (value ("," value)*)? ")"
    Function {
        name: SpannedToken,
        args: Vec<CstValue>,
        close: SpannedToken,
    },
}

impl CstValue {
    /// The source range covered by this value.
    pub fn span(&self) -> Span {
        match self {
            Self::String(t)
            | Self::Number(t)
            | Self::True(t)
            | Self::False(t)
            | Self::Null(t)
            | Self::Identifier(t) => t.span.clone(),
            Self::Array { span, .. } => span.clone(),
            Self::Function { name, close, .. } => Span::new(name.span.start, close.span.end),
        }
    }
}
