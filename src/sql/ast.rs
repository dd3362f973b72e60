//! Abstract syntax tree definitions for Meridian statements.
//!
//! Every statement recognized by the [`super::parser::Parser`] is
//! represented by the types defined here. A node starts out empty and is
//! built up field-by-field while its grammar rules match; callers only ever
//! see it complete, since a failed parse returns no partial result.

use std::fmt;

use crate::sql::lexer::Value;

/// A top-level statement.
///
/// Only `Select` is produced today. The other kinds have keywords in the
/// scanner and reserved variants here so the grammar can grow without
/// reshaping the public surface, but no rules recognize them yet.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    CreateTable,
    Insert,
    Update,
}

/// A `SELECT` statement: projection list, table list, and `WHERE`
/// conditions, each in textual order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// Projected attributes. Duplicates are allowed; `*` appears as an
    /// [`AttrRef`] named `"*"` with no table qualifier.
    pub projection: Vec<AttrRef>,
    pub tables: Vec<String>,
    /// The `WHERE` comparisons. The list is implicitly conjunctive; the
    /// grammar has no boolean connectives.
    pub conditions: Vec<Condition>,
}

/// A reference to an attribute, optionally qualified by a table name:
/// `attr` or `table.attr`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrRef {
    pub table: Option<String>,
    pub name: String,
}

impl AttrRef {
    /// The `*` projection: every attribute, no table qualifier.
    pub fn star() -> Self {
        AttrRef {
            table: None,
            name: "*".into(),
        }
    }
}

impl fmt::Display for AttrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The comparator of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Greater,
    Smaller,
    Equal,
    NotEqual,
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Comparator::Greater => ">",
            Comparator::Smaller => "<",
            Comparator::Equal => "=",
            Comparator::NotEqual => "<>",
        };
        write!(f, "{}", symbol)
    }
}

/// One side of a [`Condition`]: an attribute reference or a literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Attr(AttrRef),
    Literal(Value),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Attr(attr) => write!(f, "{}", attr),
            Operand::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// A single `WHERE` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub cmp: Comparator,
    pub left: Operand,
    pub right: Operand,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.cmp, self.right)
    }
}
