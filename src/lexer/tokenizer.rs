//! Table-driven tokenizer shared by both dialects

use tracing::trace;

use crate::ast::Scalar;
use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, ErrorKind, Pos, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::operator::{longest_match, Operator, EXPRESSION_OPERATORS, JSON_PUNCTUATION};
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::{number, string};

/// Tokenizer settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LexerConfig {
    /// Punctuation recognized by longest match, longest spellings first
    pub operators: &'static [Operator],
    /// Skip `//` line comments and `/* */` block comments
    pub allow_comments: bool,
    /// `-` directly followed by a digit starts a number
    pub signed_numbers: bool,
    /// `true`, `false` and `null` are literals rather than identifiers
    pub keywords: bool,
    /// Words that are not keywords are accepted without a diagnostic
    pub identifiers_allowed: bool,
    /// Yield whitespace and newline tokens instead of skipping them
    pub keep_trivia: bool,
    /// Any Unicode space separates tokens, not just space, tab, LF and CR
    pub unicode_whitespace: bool,
}

impl LexerConfig {
    pub const fn json() -> Self {
        Self {
            operators: JSON_PUNCTUATION,
            allow_comments: false,
            signed_numbers: true,
            keywords: true,
            identifiers_allowed: false,
            keep_trivia: false,
            unicode_whitespace: false,
        }
    }

    pub const fn expression() -> Self {
        Self {
            operators: EXPRESSION_OPERATORS,
            allow_comments: false,
            signed_numbers: false,
            keywords: false,
            identifiers_allowed: true,
            keep_trivia: true,
            unicode_whitespace: true,
        }
    }

    pub const fn with_comments(mut self, allow_comments: bool) -> Self {
        self.allow_comments = allow_comments;
        self
    }

    pub const fn with_trivia(mut self, keep_trivia: bool) -> Self {
        self.keep_trivia = keep_trivia;
        self
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self::json()
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_json_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Produces one token per call, reporting lexical problems to a sink
pub struct Tokenizer<'a, 's> {
    cursor: Cursor<'a>,
    config: LexerConfig,
    sink: &'s mut dyn DiagnosticSink,
    finished: bool,
}

impl<'a, 's> Tokenizer<'a, 's> {
    pub fn new(input: &'a str, config: LexerConfig, sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
            sink,
            finished: false,
        }
    }

    /// Forward a problem to the sink this tokenizer reports to
    pub fn report(&mut self, error: Error) {
        self.sink.report(error);
    }

    /// Get the next token from the input
    ///
    /// Never fails: unrecognized characters are reported and skipped one code
    /// point at a time, and end of input yields `Eof` forever.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.config.keep_trivia {
                if let Some(token) = self.lex_trivia() {
                    return token;
                }
            } else {
                self.skip_ignorable();
            }

            let start = self.cursor.position();
            let Some(c) = self.cursor.current() else {
                return Token::eof(Span::at(start));
            };

            let token = match c {
                '0'..='9' => number::read_number(&mut self.cursor, &mut *self.sink),
                '-' if self.config.signed_numbers
                    && matches!(self.cursor.peek(1), Some('0'..='9')) =>
                {
                    number::read_number(&mut self.cursor, &mut *self.sink)
                }
                '"' => string::read_string(&mut self.cursor, &mut *self.sink),
                c if is_word_start(c) => self.lex_word(start),
                c => match longest_match(self.config.operators, self.cursor.remaining()) {
                    Some(op) => {
                        self.cursor.advance_by(op.text.chars().count());
                        Token::new(op.kind, self.span_from(start))
                    }
                    None => {
                        let end = self.cursor.advance();
                        self.report(Error::new(
                            ErrorKind::UnrecognizedCharacter(c),
                            Span::new(start, end),
                        ));
                        continue;
                    }
                },
            };

            trace!(kind = ?token.kind, at = %token.span.start, "token");
            return token;
        }
    }

    /// Tokenize the rest of the input, ending with the `Eof` token
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn span_from(&self, start: Pos) -> Span {
        Span::new(start, self.cursor.position())
    }

    fn lex_word(&mut self, start: Pos) -> Token {
        while self.cursor.current().is_some_and(is_word_char) {
            self.cursor.advance();
        }
        let word = self.cursor.slice_from(start.offset);
        let span = self.span_from(start);

        if self.config.keywords {
            match word {
                "true" => return Token::with_payload(TokenKind::True, span, Scalar::Bool(true)),
                "false" => return Token::with_payload(TokenKind::False, span, Scalar::Bool(false)),
                "null" => return Token::with_payload(TokenKind::Null, span, Scalar::Null),
                _ => {}
            }
        }
        if !self.config.identifiers_allowed {
            self.report(Error::new(ErrorKind::IdentifierNotPermitted, span));
        }
        Token::with_payload(TokenKind::Identifier, span, Scalar::String(word.to_owned()))
    }

    /// One trivia token, or `None` when the cursor is on something else
    fn lex_trivia(&mut self) -> Option<Token> {
        let start = self.cursor.position();
        if self.cursor.consume('\n') {
            return Some(Token::new(TokenKind::Newline, self.span_from(start)));
        }
        loop {
            match self.cursor.current() {
                Some(c) if c != '\n' && self.is_space(c) => {
                    self.cursor.advance();
                }
                Some('/') if self.skip_comment() => {}
                _ => break,
            }
        }
        let span = self.span_from(start);
        (!span.is_empty()).then(|| Token::new(TokenKind::Whitespace, span))
    }

    fn is_space(&self, c: char) -> bool {
        if self.config.unicode_whitespace {
            c.is_whitespace()
        } else {
            is_json_space(c)
        }
    }

    fn skip_ignorable(&mut self) {
        loop {
            match self.cursor.current() {
                Some(c) if self.is_space(c) => {
                    self.cursor.advance();
                }
                Some('/') if self.skip_comment() => {}
                _ => break,
            }
        }
    }

    /// Skip one comment at the cursor if comments are enabled
    ///
    /// Line comments stop before the newline. An unterminated block comment
    /// runs to end of input and is reported.
    fn skip_comment(&mut self) -> bool {
        if !self.config.allow_comments {
            return false;
        }
        let start = self.cursor.position();
        if self.cursor.starts_with("//") {
            self.cursor.advance_by(2);
            while self.cursor.current().is_some_and(|c| c != '\n') {
                self.cursor.advance();
            }
            true
        } else if self.cursor.starts_with("/*") {
            self.cursor.advance_by(2);
            while !self.cursor.is_eof() {
                if self.cursor.starts_with("*/") {
                    self.cursor.advance_by(2);
                    return true;
                }
                self.cursor.advance();
            }
            self.report(Error::new(ErrorKind::UnterminatedComment, self.span_from(start)));
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for Tokenizer<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl Iterator for Tokenizer<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
            None
        } else {
            Some(token)
        }
    }
}
