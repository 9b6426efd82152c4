use std::fmt;

/// A byte-offset span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the 1-based line and column of the span start in `source`.
    ///
    /// Columns count characters, not bytes.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let upto = &source[..self.start.min(source.len())];
        let line = upto.matches('\n').count() + 1;
        let line_start = upto.rfind('\n').map_or(0, |i| i + 1);
        let col = upto[line_start..].chars().count() + 1;
        (line, col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors raised while turning source text into a schema tree.
///
/// Parsing is all-or-nothing: the first error ends the parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// No token rule matches the input at this offset.
    #[error("unrecognized character {character:?} at {span}")]
    Lex { character: char, span: Span },

    /// A token is present but not valid at this grammar position.
    #[error("unexpected {found} at {span}: expected {expected}")]
    Grammar {
        expected: String,
        found: String,
        span: Span,
    },
}

impl ParseError {
    /// The source location of the failure.
    pub fn span(&self) -> &Span {
        match self {
            Self::Lex { span, .. } | Self::Grammar { span, .. } => span,
        }
    }

    /// Byte offset of the failure.
    pub fn offset(&self) -> usize {
        self.span().start
    }
}

/// Raised by the printer when a tree contains a node kind it does not
/// know how to render.
///
/// Trees produced by [`crate::parse`] never trigger this; it signals a
/// tree built elsewhere against a newer set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PrintError {
    #[error("unrecognized {kind} in schema tree")]
    Unrecognized { kind: &'static str },

    /// A node the grammar has no text for, such as a string holding a
    /// quote or a key-value pair outside an attribute's argument list.
    #[error("{what} cannot be written as schema text")]
    Unrepresentable { what: &'static str },
}

/// Any error from the parse-then-print pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DslError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Print(#[from] PrintError),
}
