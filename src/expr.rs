//! Calculator expression parser module

pub mod parser;

pub use parser::{ExpressionConfig, Parser};
