//! # Meridian
//!
//! A hand-written lexical scanner and recursive-descent parser for a small
//! SQL-like query language.
//!
//! The crate recognizes a single statement kind — `SELECT` with a
//! projection list, a table list, and optional `WHERE` conditions — and
//! turns it into a [`Statement`] AST. There is no planning, execution, or
//! semantic validation: the parser checks surface grammar only, and the
//! first violation aborts the parse with a bare [`MeridianError::SyntaxError`].
//!
//! ```
//! use meridian::{Parser, Statement};
//!
//! let mut parser = Parser::new("SELECT name, age FROM users WHERE age > 18;");
//! match parser.parse() {
//!     Ok(Statement::Select(select)) => {
//!         assert_eq!(select.tables, vec!["users".to_string()]);
//!         assert_eq!(select.projection.len(), 2);
//!     }
//!     other => panic!("unexpected parse result: {:?}", other),
//! }
//! ```

pub mod error;
pub mod sql;

pub use error::{MeridianError, Result};
pub use sql::ast::{AttrRef, Comparator, Condition, Operand, SelectStatement, Statement};
pub use sql::lexer::{Lexer, TokenKind, Value};
pub use sql::parser::Parser;

/// Parse a single statement.
///
/// Convenience for one-shot callers; equivalent to [`Parser::new`] followed
/// by [`Parser::parse`].
pub fn parse(text: &str) -> Result<Statement> {
    Parser::new(text).parse()
}
