//! JSON value parser module

pub mod parser;

pub use parser::{ParseOptions, Parser};
