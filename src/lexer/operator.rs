//! Operator tables
//!
//! Punctuation is matched by scanning a dialect's table in order and taking
//! the first entry whose spelling starts the remaining input. Longer
//! spellings therefore come before their prefixes (`<=` before `<`).

use crate::ast::Symbol;
use crate::lexer::token::TokenKind;

/// Binding strength of a binary operator, loosest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Assignment,
    Bitwise,
    Comparison,
    Additive,
    Multiplicative,
}

impl Precedence {
    pub const fn level(self) -> u8 {
        match self {
            Self::Assignment => 10,
            Self::Bitwise => 20,
            Self::Comparison => 30,
            Self::Additive => 40,
            Self::Multiplicative => 50,
        }
    }
}

/// One operator table entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operator {
    pub text: &'static str,
    pub kind: TokenKind,
    pub symbol: Option<Symbol>,
    /// Set for operators usable in binary position
    pub precedence: Option<Precedence>,
}

impl Operator {
    const fn punct(text: &'static str, kind: TokenKind) -> Self {
        Self {
            text,
            kind,
            symbol: None,
            precedence: None,
        }
    }

    const fn binary(
        text: &'static str,
        kind: TokenKind,
        symbol: Symbol,
        precedence: Precedence,
    ) -> Self {
        Self {
            text,
            kind,
            symbol: Some(symbol),
            precedence: Some(precedence),
        }
    }

    const fn special(text: &'static str, kind: TokenKind, symbol: Symbol) -> Self {
        Self {
            text,
            kind,
            symbol: Some(symbol),
            precedence: None,
        }
    }
}

/// Structural characters of JSON
pub static JSON_PUNCTUATION: &[Operator] = &[
    Operator::punct("{", TokenKind::LeftBrace),
    Operator::punct("}", TokenKind::RightBrace),
    Operator::punct("[", TokenKind::LeftBracket),
    Operator::punct("]", TokenKind::RightBracket),
    Operator::punct(":", TokenKind::Colon),
    Operator::punct(",", TokenKind::Comma),
];

/// Calculator operators and grouping
pub static EXPRESSION_OPERATORS: &[Operator] = &[
    Operator::binary("==", TokenKind::EqEq, Symbol::Eq, Precedence::Comparison),
    Operator::binary("!=", TokenKind::NotEq, Symbol::NotEq, Precedence::Comparison),
    Operator::binary("<=", TokenKind::LessEq, Symbol::LessEq, Precedence::Comparison),
    Operator::binary(">=", TokenKind::GreaterEq, Symbol::GreaterEq, Precedence::Comparison),
    Operator::binary("<<", TokenKind::Shl, Symbol::Shl, Precedence::Multiplicative),
    Operator::binary(">>", TokenKind::Shr, Symbol::Shr, Precedence::Multiplicative),
    Operator::binary("=", TokenKind::Equals, Symbol::Assign, Precedence::Assignment),
    Operator::binary("<", TokenKind::Less, Symbol::Less, Precedence::Comparison),
    Operator::binary(">", TokenKind::Greater, Symbol::Greater, Precedence::Comparison),
    Operator::binary("&", TokenKind::Amp, Symbol::BitAnd, Precedence::Bitwise),
    Operator::binary("|", TokenKind::Pipe, Symbol::BitOr, Precedence::Bitwise),
    Operator::binary("+", TokenKind::Plus, Symbol::Add, Precedence::Additive),
    Operator::binary("-", TokenKind::Minus, Symbol::Sub, Precedence::Additive),
    Operator::binary("*", TokenKind::Star, Symbol::Mul, Precedence::Multiplicative),
    Operator::binary("/", TokenKind::Slash, Symbol::Div, Precedence::Multiplicative),
    Operator::binary("%", TokenKind::Percent, Symbol::Rem, Precedence::Multiplicative),
    Operator::special("^", TokenKind::Caret, Symbol::Pow),
    Operator::punct("(", TokenKind::LeftParen),
    Operator::punct(")", TokenKind::RightParen),
];

/// First entry of `table` whose spelling starts `input`
pub fn longest_match<'t>(table: &'t [Operator], input: &str) -> Option<&'t Operator> {
    table.iter().find(|op| input.starts_with(op.text))
}

/// Entry of `table` producing tokens of `kind`
pub fn lookup(table: &[Operator], kind: TokenKind) -> Option<&Operator> {
    table.iter().find(|op| op.kind == kind)
}
