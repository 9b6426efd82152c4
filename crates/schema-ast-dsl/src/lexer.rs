use logos::Logos;

use crate::error::{ParseError, Span};
use crate::token::Token;

/// A token paired with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub text: String,
}

impl SpannedToken {
    /// Describes the token for error messages, e.g. `identifier ('id')`.
    pub(crate) fn describe(&self) -> String {
        match self.token {
            Token::LineBreak | Token::BlankLine => self.token.description().to_string(),
            _ => format!("{} ('{}')", self.token.description(), self.text),
        }
    }
}

/// Tokenizes schema source text into a sequence of spanned tokens.
///
/// A run of two or more line breaks, with only spaces, tabs or `\r`
/// between them, becomes a single `BlankLine` token spanning the run.
///
/// # Errors
///
/// Returns `ParseError::Lex` for the first character no token rule
/// matches.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut tokens: Vec<SpannedToken> = Vec::new();

    let lexer = Token::lexer(source);
    for (result, range) in lexer.spanned() {
        let span = Span::new(range.start, range.end);
        match result {
            Ok(Token::LineBreak) => {
                // Only skipped whitespace can sit between two adjacent breaks.
                let previous = tokens
                    .last_mut()
                    .filter(|t| matches!(t.token, Token::LineBreak | Token::BlankLine));
                if let Some(prev) = previous {
                    prev.token = Token::BlankLine;
                    prev.span.end = span.end;
                    prev.text = source[prev.span.start..span.end].to_string();
                    continue;
                }
                tokens.push(SpannedToken {
                    token: Token::LineBreak,
                    span,
                    text: source[range].to_string(),
                });
            }
            Ok(token) => {
                tokens.push(SpannedToken {
                    token,
                    span,
                    text: source[range].to_string(),
                });
            }
            Err(()) => {
                let character = source[range.start..].chars().next().unwrap_or('\0');
                return Err(ParseError::Lex { character, span });
            }
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized schema source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|st| st.token)
            .collect()
    }

    #[test]
    fn tokenize_model_header() {
        let tokens = tokenize("model User {\n}").unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].token, Token::Model);
        assert_eq!(tokens[0].text, "model");
        assert_eq!(tokens[1].token, Token::Ident);
        assert_eq!(tokens[1].text, "User");
        assert_eq!(tokens[2].token, Token::LBrace);
        assert_eq!(tokens[3].token, Token::LineBreak);
        assert_eq!(tokens[4].token, Token::RBrace);
    }

    #[test]
    fn tokenize_preserves_spans() {
        let tokens = tokenize("model User").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 5));
        assert_eq!(tokens[1].span, Span::new(6, 10));
    }

    #[test]
    fn tokenize_field_line() {
        assert_eq!(
            kinds("createdAt DateTime @default(now()) @db.Timestamp"),
            vec![
                Token::Ident,
                Token::Ident,
                Token::At,
                Token::Ident,
                Token::LParen,
                Token::Ident,
                Token::LParen,
                Token::RParen,
                Token::RParen,
                Token::At,
                Token::Ident,
                Token::Dot,
                Token::Ident,
            ]
        );
    }

    #[test]
    fn comment_text_is_verbatim() {
        let tokens = tokenize("/// The user   \r\nmodel").unwrap();
        assert_eq!(tokens[0].token, Token::Comment);
        assert_eq!(tokens[0].text, "/// The user   ");
        assert_eq!(tokens[1].token, Token::LineBreak);
    }

    #[test]
    fn tokenize_invalid_character() {
        let err = tokenize("model # User").unwrap_err();
        assert_eq!(
            err,
            ParseError::Lex {
                character: '#',
                span: Span::new(6, 7),
            }
        );
    }

    #[test]
    fn unterminated_string_is_a_lex_error() {
        let err = tokenize("url = \"postgres://").unwrap_err();
        assert!(matches!(err, ParseError::Lex { character: '"', .. }));
    }

    #[test]
    fn tokenize_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn whitespace_without_breaks_is_skipped() {
        assert!(tokenize("  \t  ").unwrap().is_empty());
    }

    #[test]
    fn single_and_double_breaks() {
        assert_eq!(kinds("a\nb"), vec![Token::Ident, Token::LineBreak, Token::Ident]);
        assert_eq!(kinds("a\n\nb"), vec![Token::Ident, Token::BlankLine, Token::Ident]);
    }

    #[test]
    fn indented_lines_after_breaks() {
        assert_eq!(kinds("a\n  b"), vec![Token::Ident, Token::LineBreak, Token::Ident]);
        assert_eq!(kinds("a\n\n  b"), vec![Token::Ident, Token::BlankLine, Token::Ident]);
        assert_eq!(
            kinds("model User {\n  id Int\n}"),
            vec![
                Token::Model,
                Token::Ident,
                Token::LBrace,
                Token::LineBreak,
                Token::Ident,
                Token::Ident,
                Token::LineBreak,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn blank_line_absorbs_whitespace_and_extra_breaks() {
        let tokens = tokenize("a\n  \t\n\n\n  b").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].token, Token::BlankLine);
        assert_eq!(tokens[1].span, Span::new(1, 8));
        assert_eq!(tokens[1].text, "\n  \t\n\n\n");
        assert_eq!(tokens[2].span, Span::new(10, 11));
    }

    #[test]
    fn crlf_breaks() {
        assert_eq!(kinds("a\r\nb"), vec![Token::Ident, Token::LineBreak, Token::Ident]);
        assert_eq!(
            kinds("a\r\n\r\n  b"),
            vec![Token::Ident, Token::BlankLine, Token::Ident]
        );
    }

    #[test]
    fn comment_separates_breaks() {
        assert_eq!(
            kinds("a\n// c\nb"),
            vec![
                Token::Ident,
                Token::LineBreak,
                Token::Comment,
                Token::LineBreak,
                Token::Ident,
            ]
        );
    }

    #[test]
    fn describe_includes_text() {
        let tokens = tokenize("id\n").unwrap();
        assert_eq!(tokens[0].describe(), "identifier ('id')");
        assert_eq!(tokens[1].describe(), "line break");
    }
}
