//! The lang module takes ASMP source text through three
//! sequential stages and runs it.
//!
//! The lexer produces a flat token list, the parser turns that into a
//! list of statements (reporting and skipping malformed ones), and the
//! interpreter executes the statements directly, with no intermediate
//! representation in between.

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
