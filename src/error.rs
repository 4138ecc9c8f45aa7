//! Error types for descent

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    /// Byte offset from the start of the source
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }

    /// Position of the first character of any source
    pub const fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

/// Half-open range `[start, end)` in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`
    pub const fn at(pos: Pos) -> Self {
        Self::new(pos, pos)
    }

    pub const fn empty() -> Self {
        Self::at(Pos::new(0, 0, 0))
    }

    /// Length in bytes
    pub const fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(self, other: Self) -> Self {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Self { start, end }
    }

    /// Returns true if `other` lies entirely within this span
    pub const fn contains(&self, other: &Self) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }

    /// The text this span covers, if it is a valid range of `source`
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start.offset..self.end.offset)
    }
}

/// Broad class of a reported problem
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Problems found while scanning characters
    Lexical,
    /// Problems found while matching grammar rules
    Syntax,
    /// Configured size or depth limits
    Limit,
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnrecognizedCharacter(char),
    UnterminatedString,
    UnterminatedComment,
    ControlCharacter,
    InvalidEscapeSequence,
    InvalidUnicodeEscape,
    InvalidNumber,
    IdentifierNotPermitted,
    Expected { expected: String, found: String },
    TrailingComma,
    TrailingInput,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
}

impl ErrorKind {
    pub const fn category(&self) -> Category {
        match self {
            Self::UnrecognizedCharacter(_)
            | Self::UnterminatedString
            | Self::UnterminatedComment
            | Self::ControlCharacter
            | Self::InvalidEscapeSequence
            | Self::InvalidUnicodeEscape
            | Self::InvalidNumber
            | Self::IdentifierNotPermitted => Category::Lexical,
            Self::Expected { .. } | Self::TrailingComma | Self::TrailingInput => Category::Syntax,
            Self::MaxDepthExceeded { .. } | Self::MaxSizeExceeded { .. } => Category::Limit,
        }
    }

    pub(crate) fn expected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Expected {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedCharacter(c) => write!(f, "unrecognized character {c:?}"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::UnterminatedComment => write!(f, "unterminated block comment"),
            Self::ControlCharacter => write!(f, "control character in string"),
            Self::InvalidEscapeSequence => write!(f, "invalid escape sequence"),
            Self::InvalidUnicodeEscape => write!(f, "invalid unicode escape"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::IdentifierNotPermitted => write!(f, "identifiers are not permitted here"),
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::TrailingComma => write!(f, "trailing comma"),
            Self::TrailingInput => write!(f, "expected end of input"),
            Self::MaxDepthExceeded { max } => {
                write!(f, "max depth exceeded: {max}")
            }
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
        }
    }
}

/// A single reported problem
#[derive(Error, Clone, Debug, PartialEq)]
#[error("error at {}: {}", .span.start, .message)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::at(pos))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Where the problem was detected
    pub fn position(&self) -> Pos {
        self.span.start
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

/// Result type alias for descent
pub type Result<T> = std::result::Result<T, Error>;
