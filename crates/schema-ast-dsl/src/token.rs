use logos::Logos;

/// Tokens produced by the schema lexer.
///
/// Spaces, tabs and carriage returns are skipped. Every `\n` is a
/// [`Token::LineBreak`]; [`crate::lexer::tokenize`] folds runs of two or
/// more into one [`Token::BlankLine`]. Comments are kept as tokens so that
/// they survive into the tree.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // -- Keywords --
    #[token("datasource")]
    Datasource,

    #[token("generator")]
    Generator,

    #[token("model")]
    Model,

    #[token("enum")]
    Enum,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // -- Punctuation --
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token("?")]
    Question,

    /// The list suffix on a field type, e.g. `Post[]`.
    #[token("[]")]
    ArraySuffix,

    #[token("@")]
    At,

    #[token("@@")]
    AtAt,

    // -- Trivia kept for the tree --
    /// A line comment, from `//` to the end of the line.
    #[regex(r"//[^\r\n]*")]
    Comment,

    #[token("\n")]
    LineBreak,

    /// Two or more line breaks with only horizontal whitespace between.
    /// Produced by the lexer's folding pass, never by logos itself.
    BlankLine,

    // -- Literals --
    /// A double-quoted string literal. There is no escape syntax.
    #[regex(r#""[^"\r\n]*""#)]
    StringLiteral,

    /// An integer or decimal literal, optionally negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    NumberLiteral,

    // -- Identifiers --
    /// Letters, digits and underscores, not starting with a digit.
    /// Keywords win over this rule when the text matches exactly.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

impl Token {
    /// Returns a human-readable description of this token kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Datasource => "'datasource'",
            Self::Generator => "'generator'",
            Self::Model => "'model'",
            Self::Enum => "'enum'",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Null => "'null'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Dot => "'.'",
            Self::Colon => "':'",
            Self::Equals => "'='",
            Self::Question => "'?'",
            Self::ArraySuffix => "'[]'",
            Self::At => "'@'",
            Self::AtAt => "'@@'",
            Self::Comment => "comment",
            Self::LineBreak => "line break",
            Self::BlankLine => "blank line",
            Self::StringLiteral => "string literal",
            Self::NumberLiteral => "number literal",
            Self::Ident => "identifier",
        }
    }

    /// Returns true for the keywords that open a top-level block.
    pub fn is_block_keyword(&self) -> bool {
        matches!(
            self,
            Self::Datasource | Self::Generator | Self::Model | Self::Enum
        )
    }

    /// Returns true for tokens accepted where a name is expected.
    ///
    /// Block keywords double as identifiers inside blocks, so a field may
    /// be called `model` and an enum member `enum`.
    pub fn is_ident_like(&self) -> bool {
        *self == Self::Ident || self.is_block_keyword()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        Token::lexer(input).map(|r| r.expect("lex error")).collect()
    }

    #[test]
    fn keywords() {
        let tokens = lex("datasource generator model enum true false null");
        assert_eq!(
            tokens,
            vec![
                Token::Datasource,
                Token::Generator,
                Token::Model,
                Token::Enum,
                Token::True,
                Token::False,
                Token::Null,
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_identifier() {
        assert_eq!(lex("models enumerated nullable"), vec![Token::Ident; 3]);
    }

    #[test]
    fn punctuation() {
        let tokens = lex("{ } ( ) [ ] , . : = ? [] @ @@");
        assert_eq!(
            tokens,
            vec![
                Token::LBrace,
                Token::RBrace,
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::Comma,
                Token::Dot,
                Token::Colon,
                Token::Equals,
                Token::Question,
                Token::ArraySuffix,
                Token::At,
                Token::AtAt,
            ]
        );
    }

    #[test]
    fn spaced_brackets_are_not_a_suffix() {
        assert_eq!(lex("[ ]"), vec![Token::LBracket, Token::RBracket]);
    }

    #[test]
    fn array_suffix_after_type() {
        assert_eq!(lex("Post[]"), vec![Token::Ident, Token::ArraySuffix]);
    }

    #[test]
    fn string_literal() {
        let tokens = lex(r#""postgresql" "" "with spaces""#);
        assert_eq!(tokens, vec![Token::StringLiteral; 3]);
    }

    #[test]
    fn number_literals() {
        let tokens = lex("0 42 -1 3.14");
        assert_eq!(tokens, vec![Token::NumberLiteral; 4]);
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let tokens = lex("// a comment { }\nmodel");
        assert_eq!(tokens, vec![Token::Comment, Token::LineBreak, Token::Model]);
    }

    #[test]
    fn every_newline_is_a_line_break() {
        assert_eq!(
            lex("a\n  \n\tb"),
            vec![Token::Ident, Token::LineBreak, Token::LineBreak, Token::Ident]
        );
        assert_eq!(lex("a\r\nb"), vec![Token::Ident, Token::LineBreak, Token::Ident]);
    }

    #[test]
    fn identifier_like_tokens() {
        assert!(Token::Ident.is_ident_like());
        assert!(Token::Model.is_ident_like());
        assert!(!Token::True.is_ident_like());
        assert!(!Token::StringLiteral.is_ident_like());
    }
}
