//! Lexer module for tokenization

pub mod cursor;
mod number;
pub mod operator;
mod string;
pub mod token;
pub mod tokenizer;

pub use cursor::Cursor;
pub use operator::{Operator, Precedence, EXPRESSION_OPERATORS, JSON_PUNCTUATION};
pub use token::{Token, TokenKind};
pub use tokenizer::{LexerConfig, Tokenizer};
