//! Recovering recursive-descent JSON parser
//!
//! Every rule returns a value even on malformed input. Problems go to the
//! tokenizer's sink and the rule resumes at the next delimiter (`,`, `}` or
//! `]`) of its own nesting level, so siblings are still parsed and checked.

use tracing::debug;

use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, ErrorKind, Pos, Span};
use crate::lexer::{LexerConfig, Token, TokenKind, Tokenizer};
use crate::value::{Array, Object, Value};

/// Configuration for the JSON parser
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip `//` and `/* */` comments
    pub allow_comments: bool,
    /// Report anything but whitespace after the top-level value
    pub require_full_consumption: bool,
    /// Maximum nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_comments: false,
            require_full_consumption: true,
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
        }
    }
}

impl ParseOptions {
    /// Create options with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            allow_comments: false,
            require_full_consumption: true,
            max_depth,
            max_size,
        }
    }

    /// Create options with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self::new(0, 0)
    }

    pub const fn with_comments(mut self, allow_comments: bool) -> Self {
        self.allow_comments = allow_comments;
        self
    }

    pub const fn with_full_consumption(mut self, require: bool) -> Self {
        self.require_full_consumption = require;
        self
    }

    pub const fn lexer_config(&self) -> LexerConfig {
        LexerConfig::json().with_comments(self.allow_comments)
    }
}

/// JSON parser over a [`Tokenizer`] with one token of lookahead
#[derive(Debug)]
pub struct Parser<'a, 's> {
    lexer: Tokenizer<'a, 's>,
    current: Token,
    options: ParseOptions,
    depth: u16,
    oversized: bool,
    /// Offset of the last syntax error, to avoid repeating it
    last_error: Option<usize>,
}

impl<'a, 's> Parser<'a, 's> {
    pub fn new(input: &'a str, options: ParseOptions, sink: &'s mut dyn DiagnosticSink) -> Self {
        let oversized = options.max_size > 0 && input.len() > options.max_size;
        let mut lexer = Tokenizer::new(input, options.lexer_config(), sink);
        let current = if oversized {
            Token::eof(Span::at(Pos::start()))
        } else {
            lexer.next_token()
        };
        Self {
            lexer,
            current,
            options,
            depth: 0,
            oversized,
            last_error: None,
        }
    }

    /// Parse one complete document
    pub fn parse(&mut self) -> Value {
        if self.oversized {
            self.lexer.report(Error::at(
                ErrorKind::MaxSizeExceeded {
                    max: self.options.max_size,
                },
                Pos::start(),
            ));
            return Value::Null;
        }

        let value = self.parse_value();

        if self.options.require_full_consumption && !self.current.is_eof() {
            let span = self.current.span;
            self.lexer.report(Error::new(ErrorKind::TrailingInput, span));
        }

        value
    }

    /// Value -> Object | Array | Number | String | true | false | null
    pub fn parse_value(&mut self) -> Value {
        match self.current.kind {
            TokenKind::LeftBrace => self.parse_object(),
            TokenKind::LeftBracket => self.parse_array(),
            TokenKind::Number
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => self.advance().payload.map(Value::from).unwrap_or_default(),
            TokenKind::Identifier => {
                // The tokenizer already reported it
                self.advance();
                Value::Null
            }
            _ => {
                self.expected("a value");
                self.recover(None);
                Value::Null
            }
        }
    }

    /// Object -> `{` [ Pair (`,` Pair)* ] `}`
    fn parse_object(&mut self) -> Value {
        let open = self.advance();
        if !self.enter(open.span) {
            return Value::Null;
        }

        let mut object = Object::new();
        if self.current.kind == TokenKind::RightBrace {
            self.advance();
        } else {
            loop {
                self.parse_pair(&mut object);
                if !self.separator(TokenKind::RightBrace, "',' or '}'") {
                    break;
                }
            }
        }

        self.leave();
        Value::Object(object)
    }

    /// Pair -> String `:` Value
    ///
    /// A missing key becomes `""`. A pair whose key is not followed by `:` is
    /// dropped and the parser resumes at the next delimiter.
    fn parse_pair(&mut self, object: &mut Object) {
        let key = match self.current.kind {
            TokenKind::String => self.advance().text().map(str::to_owned),
            TokenKind::Identifier => {
                self.advance();
                None
            }
            _ => {
                self.expected("a string key");
                self.recover(Some(TokenKind::Colon));
                None
            }
        };

        if self.current.kind != TokenKind::Colon {
            if key.is_some() {
                self.expected("':'");
            }
            self.recover(None);
            return;
        }
        self.advance();

        let value = self.parse_value();
        object.insert(key.unwrap_or_default(), value);
    }

    /// Array -> `[` [ Value (`,` Value)* ] `]`
    fn parse_array(&mut self) -> Value {
        let open = self.advance();
        if !self.enter(open.span) {
            return Value::Null;
        }

        let mut array = Array::new();
        if self.current.kind == TokenKind::RightBracket {
            self.advance();
        } else {
            loop {
                array.push(self.parse_value());
                if !self.separator(TokenKind::RightBracket, "',' or ']'") {
                    break;
                }
            }
        }

        self.leave();
        Value::Array(array)
    }

    /// After an element: true if `,` introduces another one, false once the
    /// container is closed or cannot continue
    fn separator(&mut self, close: TokenKind, expected: &str) -> bool {
        loop {
            match self.current.kind {
                TokenKind::Comma => {
                    let comma = self.advance();
                    if self.current.kind == close {
                        self.lexer.report(Error::new(ErrorKind::TrailingComma, comma.span));
                        self.advance();
                        return false;
                    }
                    return true;
                }
                kind if kind == close => {
                    self.advance();
                    return false;
                }
                // Mismatched closers belong to an enclosing container
                TokenKind::Eof | TokenKind::RightBrace | TokenKind::RightBracket => {
                    self.expected(expected);
                    return false;
                }
                _ => {
                    self.expected(expected);
                    self.recover(None);
                }
            }
        }
    }

    /// Skip tokens up to the next `,`, `}` or `]` (or `stop`) at the current
    /// nesting level, leaving it unconsumed
    fn recover(&mut self, stop: Option<TokenKind>) {
        let from = self.current.span.start;
        let mut nesting = 0usize;
        loop {
            let kind = self.current.kind;
            match kind {
                TokenKind::Eof => break,
                _ if nesting == 0 && Some(kind) == stop => break,
                TokenKind::LeftBrace | TokenKind::LeftBracket => nesting += 1,
                TokenKind::RightBrace | TokenKind::RightBracket if nesting > 0 => nesting -= 1,
                TokenKind::Comma | TokenKind::RightBrace | TokenKind::RightBracket
                    if nesting == 0 =>
                {
                    break
                }
                _ => {}
            }
            self.advance();
        }
        if self.current.span.start != from {
            debug!(from = %from, to = %self.current.span.start, "skipped to delimiter");
        }
    }

    /// Skip a container whose opener was just consumed, through its closer
    fn skip_container(&mut self) {
        let mut nesting = 1usize;
        while nesting > 0 && !self.current.is_eof() {
            match self.current.kind {
                TokenKind::LeftBrace | TokenKind::LeftBracket => nesting += 1,
                TokenKind::RightBrace | TokenKind::RightBracket => nesting -= 1,
                _ => {}
            }
            self.advance();
        }
    }

    fn enter(&mut self, open: Span) -> bool {
        let max = self.options.max_depth;
        if max > 0 && self.depth >= max {
            self.lexer.report(Error::new(ErrorKind::MaxDepthExceeded { max }, open));
            self.skip_container();
            return false;
        }
        self.depth = self.depth.saturating_add(1);
        true
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Consume the current token and return it
    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn expected(&mut self, expected: &str) {
        let span = self.current.span;
        if self.last_error == Some(span.start.offset) {
            return;
        }
        self.last_error = Some(span.start.offset);
        let kind = ErrorKind::expected(expected, self.current.kind.name());
        self.lexer.report(Error::new(kind, span));
    }
}
