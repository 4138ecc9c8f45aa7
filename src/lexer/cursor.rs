//! Code point cursor for source navigation

use crate::error::Pos;

/// Cursor over source text with lookahead and line/column tracking
///
/// Offsets are byte offsets, so any position can slice the source directly.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Code point at the cursor, `None` at end of input
    pub fn current(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Code point `ahead` positions past the cursor without consuming
    pub fn peek(&self, ahead: usize) -> Option<char> {
        self.remaining().chars().nth(ahead)
    }

    /// Consume one code point and return the new position
    pub fn advance(&mut self) -> Pos {
        if let Some(c) = self.current() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.position()
    }

    /// Consume `n` code points
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Consume code point if it matches
    pub fn consume(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns true if the unconsumed input begins with `text`
    pub fn starts_with(&self, text: &str) -> bool {
        self.remaining().starts_with(text)
    }

    pub const fn position(&self) -> Pos {
        Pos::new(self.pos, self.line, self.col)
    }

    /// Current byte offset
    pub const fn pos(&self) -> usize {
        self.pos
    }

    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Unconsumed input
    pub fn remaining(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Source text from byte offset `start` to the cursor
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.input.get(start..self.pos).unwrap_or_default()
    }

    pub const fn source(&self) -> &'a str {
        self.input
    }
}
