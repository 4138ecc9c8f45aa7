//! Token types shared by both dialects

use crate::ast::Scalar;
use crate::error::Span;

/// Token types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Trivia
    Whitespace,
    Newline,

    // Values
    Identifier,
    Number,
    String,

    // Keyword literals
    Null,
    True,
    False,

    // Structural
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    LeftParen,    // (
    RightParen,   // )
    Colon,        // :
    Comma,        // ,

    // Operators
    Equals,       // =
    EqEq,         // ==
    NotEq,        // !=
    Less,         // <
    LessEq,       // <=
    Greater,      // >
    GreaterEq,    // >=
    Shl,          // <<
    Shr,          // >>
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /
    Percent,      // %
    Caret,        // ^
    Amp,          // &
    Pipe,         // |

    // Special
    Eof,
}

impl TokenKind {
    /// Get token name for error messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::String => "string",
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Colon => "':'",
            Self::Comma => "','",
            Self::Equals => "'='",
            Self::EqEq => "'=='",
            Self::NotEq => "'!='",
            Self::Less => "'<'",
            Self::LessEq => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEq => "'>='",
            Self::Shl => "'<<'",
            Self::Shr => "'>>'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Caret => "'^'",
            Self::Amp => "'&'",
            Self::Pipe => "'|'",
            Self::Eof => "end of input",
        }
    }

    /// Whitespace and newlines, which parsers never see
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline)
    }
}

/// Token with source location and optional scalar payload
///
/// Numbers carry `Scalar::Number`, strings and identifiers `Scalar::String`,
/// keyword literals their own value. Everything else has no payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub payload: Option<Scalar>,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            payload: None,
        }
    }

    pub const fn with_payload(kind: TokenKind, span: Span, payload: Scalar) -> Self {
        Self {
            kind,
            span,
            payload: Some(payload),
        }
    }

    pub const fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, span)
    }

    /// Text payload of a string or identifier token
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Some(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Numeric payload of a number token
    pub fn number(&self) -> Option<f64> {
        match self.payload {
            Some(Scalar::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
