use schema_ast_core::types::Schema;

use crate::cst::{
    BlockContext, ComponentKind, CstAssignment, CstAttribute, CstAttributeArg, CstBlock,
    CstComponent, CstEntry, CstField, CstFieldType, CstItem, CstQualifiedName, CstSchema, CstValue,
};
use crate::error::{ParseError, Span};
use crate::lexer::SpannedToken;
use crate::token::Token;

/// Recursive descent parser for the schema grammar.
///
/// Consumes the flat token list produced by the lexer and produces a
/// concrete syntax tree. Every choice is made on the next one or two
/// tokens, except which entries a block admits: that is decided by the
/// [`BlockContext`] the enclosing keyword selects.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    /// Arrays and calls currently open around the cursor.
    depth: usize,
}

/// Deepest nesting of arrays and function calls a value may have.
pub const MAX_NESTING: usize = 256;

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // -- Cursor helpers --

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|st| st.token)
    }

    fn peek_nth_token(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.pos + n).map(|st| st.token)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let tok = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(tok)
    }

    fn current_span(&self) -> Span {
        self.peek().map(|st| st.span.clone()).unwrap_or_else(|| {
            // Point to end of last token, or 0..0 if empty
            self.tokens
                .last()
                .map(|st| Span::new(st.span.end, st.span.end))
                .unwrap_or(Span::new(0, 0))
        })
    }

    /// Builds a grammar error against the token under the cursor.
    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::Grammar {
            expected: expected.to_string(),
            found: self
                .peek()
                .map(SpannedToken::describe)
                .unwrap_or_else(|| "end of input".to_string()),
            span: self.current_span(),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<SpannedToken, ParseError> {
        if self.peek_token() == Some(expected) {
            return self.bump(expected.description());
        }
        Err(self.unexpected(expected.description()))
    }

    /// Consumes the current token, failing only at end of input.
    fn bump(&mut self, expected: &str) -> Result<SpannedToken, ParseError> {
        match self.advance() {
            Some(st) => Ok(st),
            None => Err(self.unexpected(expected)),
        }
    }

    fn expect_ident(&mut self, context: &str) -> Result<SpannedToken, ParseError> {
        match self.peek_token() {
            Some(t) if t.is_ident_like() => self.bump(context),
            _ => Err(self.unexpected(context)),
        }
    }

    /// Skips line breaks inside bracketed lists.
    fn skip_breaks(&mut self) {
        while matches!(
            self.peek_token(),
            Some(Token::LineBreak | Token::BlankLine)
        ) {
            self.pos += 1;
        }
    }

    // -- Grammar productions --

    /// schema = (comment | component | blank_line | line_break)*
    fn parse_schema(&mut self) -> Result<CstSchema, ParseError> {
        let mut items = Vec::new();

        while let Some(token) = self.peek_token() {
            let item = match token {
                Token::Comment => CstItem::Comment(self.bump("comment")?),
                Token::BlankLine => CstItem::BlankLine(self.bump("blank line")?),
                Token::LineBreak => CstItem::LineBreak(self.bump("line break")?),
                t if t.is_block_keyword() => CstItem::Component(self.parse_component()?),
                _ => {
                    return Err(self.unexpected(
                        "comment or block declaration ('datasource', 'generator', 'model' or 'enum')",
                    ))
                }
            };
            items.push(item);
        }

        Ok(CstSchema { items })
    }

    /// component = KEYWORD qualified_name block
    fn parse_component(&mut self) -> Result<CstComponent, ParseError> {
        let keyword = self.bump("block keyword")?;
        let kind = match keyword.token {
            Token::Datasource => ComponentKind::Datasource,
            Token::Generator => ComponentKind::Generator,
            Token::Model => ComponentKind::Model,
            Token::Enum => ComponentKind::Enum,
            _ => {
                return Err(ParseError::Grammar {
                    expected: "block keyword".to_string(),
                    found: keyword.describe(),
                    span: keyword.span,
                })
            }
        };

        let name = self.parse_qualified_name("block name")?;
        tracing::trace!(keyword = %keyword.text, name = %name.name.text, "parsing block");

        let block = self.parse_block(kind.context())?;
        Ok(CstComponent {
            kind,
            keyword,
            name,
            block,
        })
    }

    /// qualified_name = IDENT "." IDENT | IDENT
    fn parse_qualified_name(&mut self, context: &str) -> Result<CstQualifiedName, ParseError> {
        let first = self.expect_ident(context)?;
        if self.peek_token() == Some(Token::Dot) {
            self.bump("'.'")?;
            let name = self.expect_ident(context)?;
            Ok(CstQualifiedName {
                group: Some(first),
                name,
            })
        } else {
            Ok(CstQualifiedName {
                group: None,
                name: first,
            })
        }
    }

    /// block = "{" break entry* "}"
    fn parse_block(&mut self, context: BlockContext) -> Result<CstBlock, ParseError> {
        let open = self.expect(Token::LBrace)?;

        let opening_break = match self.peek_token() {
            Some(Token::LineBreak | Token::BlankLine) => self.bump("line break")?,
            _ => return Err(self.unexpected("line break after '{'")),
        };

        let mut entries = Vec::new();
        loop {
            match self.peek_token() {
                Some(Token::RBrace) => break,
                Some(_) => entries.push(self.parse_entry(context)?),
                None => return Err(self.unexpected("'}'")),
            }
        }

        let close = self.expect(Token::RBrace)?;
        Ok(CstBlock {
            context,
            open,
            opening_break,
            entries,
            close,
        })
    }

    /// entry = comment | blank_line | line_break | <context-specific entry>
    fn parse_entry(&mut self, context: BlockContext) -> Result<CstEntry, ParseError> {
        match self.peek_token() {
            Some(Token::Comment) => return Ok(CstEntry::Comment(self.bump("comment")?)),
            Some(Token::BlankLine) => return Ok(CstEntry::BlankLine(self.bump("blank line")?)),
            Some(Token::LineBreak) => return Ok(CstEntry::LineBreak(self.bump("line break")?)),
            _ => {}
        }

        match context {
            BlockContext::Model => self.parse_model_entry(),
            BlockContext::Enum => Ok(CstEntry::Enumerator(self.expect_ident("enumerator")?)),
            BlockContext::Config => Ok(CstEntry::Assignment(self.parse_assignment()?)),
        }
    }

    /// model_entry = property | attribute | field
    fn parse_model_entry(&mut self) -> Result<CstEntry, ParseError> {
        match self.peek_token() {
            Some(Token::At | Token::AtAt) => Ok(CstEntry::Attribute(self.parse_attribute()?)),
            Some(t) if t.is_ident_like() => {
                if self.peek_nth_token(1) == Some(Token::Equals) {
                    Ok(CstEntry::Property(self.parse_assignment()?))
                } else {
                    Ok(CstEntry::Field(self.parse_field()?))
                }
            }
            _ => Err(self.unexpected("field, model attribute or property")),
        }
    }

    /// assignment = IDENT "=" value
    fn parse_assignment(&mut self) -> Result<CstAssignment, ParseError> {
        let key = self.expect_ident("assignment key")?;
        let equals = self.expect(Token::Equals)?;
        let value = self.parse_value("value")?;
        Ok(CstAssignment { key, equals, value })
    }

    /// field = IDENT value ("[]" | "?")? attribute*
    fn parse_field(&mut self) -> Result<CstField, ParseError> {
        let name = self.expect_ident("field name")?;

        let field_type = match self.parse_value("field type")? {
            CstValue::Identifier(tok) => CstFieldType::Identifier(tok),
            CstValue::Function { name, args, close } => CstFieldType::Function { name, args, close },
            other => {
                return Err(ParseError::Grammar {
                    expected: "field type (type name or native type call)".to_string(),
                    found: "literal value".to_string(),
                    span: other.span(),
                })
            }
        };

        let modifier = match self.peek_token() {
            Some(Token::ArraySuffix | Token::Question) => Some(self.bump("type modifier")?),
            _ => None,
        };

        let mut attributes = Vec::new();
        while matches!(self.peek_token(), Some(Token::At | Token::AtAt)) {
            attributes.push(self.parse_attribute()?);
        }

        Ok(CstField {
            name,
            field_type,
            modifier,
            attributes,
        })
    }

    /// attribute = ("@" | "@@") qualified_name ("(" (arg ("," arg)*)? ")")?
    fn parse_attribute(&mut self) -> Result<CstAttribute, ParseError> {
        let marker = match self.peek_token() {
            Some(Token::At | Token::AtAt) => self.bump("attribute marker")?,
            _ => return Err(self.unexpected("'@' or '@@'")),
        };
        let name = self.parse_qualified_name("attribute name")?;

        let args = if self.peek_token() == Some(Token::LParen) {
            self.bump("'('")?;
            let (args, _) = self.parse_list(Token::RParen, Self::parse_attribute_arg)?;
            Some(args)
        } else {
            None
        };

        Ok(CstAttribute { marker, name, args })
    }

    /// arg = IDENT ":" value | value
    fn parse_attribute_arg(&mut self) -> Result<CstAttributeArg, ParseError> {
        let keyed = self.peek_token().is_some_and(|t| t.is_ident_like())
            && self.peek_nth_token(1) == Some(Token::Colon);
        if keyed {
            let key = self.expect_ident("argument name")?;
            self.expect(Token::Colon)?;
            let value = self.parse_value("argument value")?;
            Ok(CstAttributeArg::Keyed { key, value })
        } else {
            Ok(CstAttributeArg::Value(self.parse_value("argument")?))
        }
    }

    /// value = STRING | NUMBER | array | func | "true" | "false" | "null" | IDENT
    fn parse_value(&mut self, context: &str) -> Result<CstValue, ParseError> {
        let Some(token) = self.peek_token() else {
            return Err(self.unexpected(context));
        };

        match token {
            Token::StringLiteral => Ok(CstValue::String(self.bump(context)?)),
            Token::NumberLiteral => Ok(CstValue::Number(self.bump(context)?)),
            Token::True => Ok(CstValue::True(self.bump(context)?)),
            Token::False => Ok(CstValue::False(self.bump(context)?)),
            Token::Null => Ok(CstValue::Null(self.bump(context)?)),
            Token::ArraySuffix => {
                let tok = self.bump(context)?;
                Ok(CstValue::Array {
                    items: Vec::new(),
                    span: tok.span,
                })
            }
            Token::LBracket => {
                let open = self.bump(context)?;
                let (items, close) = self.nested(|p| {
                    p.parse_list(Token::RBracket, |p| p.parse_value("value"))
                })?;
                Ok(CstValue::Array {
                    items,
                    span: Span::new(open.span.start, close.span.end),
                })
            }
            t if t.is_ident_like() => {
                let name = self.bump(context)?;
                if self.peek_token() == Some(Token::LParen) {
                    self.bump("'('")?;
                    let (args, close) = self.nested(|p| {
                        p.parse_list(Token::RParen, |p| p.parse_value("argument"))
                    })?;
                    Ok(CstValue::Function { name, args, close })
                } else {
                    Ok(CstValue::Identifier(name))
                }
            }
            _ => Err(self.unexpected(context)),
        }
    }

    /// Runs `f` one nesting level deeper, failing past [`MAX_NESTING`].
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.unexpected("value nested at most 256 levels deep"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Parses `(item ("," item)*)? close` after the opening bracket has been
    /// consumed. Line breaks between items are ignored.
    fn parse_list<T>(
        &mut self,
        close: Token,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<(Vec<T>, SpannedToken), ParseError> {
        let mut items = Vec::new();

        self.skip_breaks();
        if self.peek_token() == Some(close) {
            let close_tok = self.bump(close.description())?;
            return Ok((items, close_tok));
        }

        loop {
            self.skip_breaks();
            items.push(item(self)?);
            self.skip_breaks();
            if self.peek_token() == Some(Token::Comma) {
                self.bump("','")?;
            } else {
                break;
            }
        }

        let close_tok = self.expect(close)?;
        Ok((items, close_tok))
    }
}

/// Parses a token stream into a concrete syntax tree.
///
/// # Errors
///
/// Returns `ParseError::Grammar` naming the expected construct and the
/// token found at the first position where the grammar does not match.
pub fn parse_tokens(tokens: Vec<SpannedToken>) -> Result<CstSchema, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse_schema()
}

/// Parse schema source text into a [`Schema`].
///
/// # Errors
///
/// Returns `ParseError::Lex` for an unrecognized character and
/// `ParseError::Grammar` for a token that is not valid where it appears.
/// No partial tree is ever returned.
pub fn parse(source: &str) -> Result<Schema, ParseError> {
    let tokens = crate::lexer::tokenize(source)?;
    let token_count = tokens.len();
    let cst = parse_tokens(tokens)?;
    let schema = crate::builder::build_schema(cst);
    tracing::debug!(
        tokens = token_count,
        blocks = schema.list.len(),
        "parsed schema"
    );
    Ok(schema)
}
