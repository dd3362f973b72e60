//! Statement front-end for Meridian.
//!
//! This module contains the lexer (tokenizer), abstract syntax tree (AST)
//! definitions, and a recursive-descent parser that transforms raw statement
//! text into a structured AST.

pub mod lexer;
pub mod ast;
pub mod parser;

pub use ast::*;
pub use lexer::{Lexer, TokenKind, Value};
pub use parser::Parser;
