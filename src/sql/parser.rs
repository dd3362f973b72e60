//! Recursive-descent parser for Meridian statements.
//!
//! The entry point is [`Parser::parse`], which recognizes a single `SELECT`
//! statement:
//!
//! ```text
//! Statement ::= SELECT ProjList FROM TableList (WHERE CondList)? ';'
//! ProjList  ::= '*' | Proj (',' Proj)*
//! Proj      ::= IDENTIFIER ('.' IDENTIFIER)?
//! TableList ::= IDENTIFIER (',' IDENTIFIER)*
//! CondList  ::= Cond (',' Cond)*
//! Cond      ::= Operand CmpOp Operand
//! Operand   ::= (IDENTIFIER ('.' IDENTIFIER)?) | INTEGER | FLOAT | STRING
//! CmpOp     ::= '=' | '<>' | '>' | '<'
//! ```
//!
//! The parser drives the [`Lexer`] as a one-token lookahead. There is no
//! separate match-and-advance primitive: each grammar rule advances the
//! slot itself and documents the position it expects on entry and
//! guarantees on exit. The first token that fits no expected position
//! aborts the whole parse — no backtracking, no resynchronization, no
//! partial result.

use crate::error::{MeridianError, Result};
use crate::sql::ast::*;
use crate::sql::lexer::{Lexer, TokenKind, Value};

/// A recursive-descent parser for one statement at a time.
///
/// The parser borrows the statement text and owns the lexer's cursor and
/// lookahead state for the duration of a parse call. Concurrent parses need
/// separate instances; a single instance is reusable for new text via
/// [`Parser::initialize`], after which nothing of the previous parse
/// survives.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser bound to the given statement text.
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
        }
    }

    /// Bind new statement text, discarding all cursor and lookahead state.
    ///
    /// Equivalent to constructing a fresh parser.
    pub fn initialize(&mut self, input: &'a str) {
        self.lexer = Lexer::new(input);
    }

    /// Parse one statement.
    ///
    /// On success the statement kind tag wraps the completed AST. On
    /// failure only [`MeridianError::SyntaxError`] comes back — no
    /// position, token, or message — and whatever was built so far is
    /// discarded.
    pub fn parse(&mut self) -> Result<Statement> {
        match self.lexer.advance() {
            TokenKind::Select => Ok(Statement::Select(self.parse_select()?)),
            // INSERT, UPDATE, and CREATE TABLE have reserved AST variants
            // but no grammar rules yet; they fail like any other
            // unexpected token.
            _ => Err(MeridianError::SyntaxError),
        }
    }

    /// Expose the lookahead slot: the current token's payload and kind.
    ///
    /// Introspection hook for tests and the token-dump command; normal
    /// parsing never calls it.
    pub fn peek_current_token(&self) -> (Option<&Value>, TokenKind) {
        (self.lexer.value(), self.lexer.peek())
    }

    // =======================================================================
    // Grammar rules
    // =======================================================================

    /// `SELECT ProjList FROM TableList (WHERE CondList)? ';'`
    ///
    /// Slot on entry: `SELECT`. Slot on exit: the terminating `;`.
    fn parse_select(&mut self) -> Result<SelectStatement> {
        let mut select = SelectStatement::default();
        self.parse_projection_list(&mut select.projection)?;
        self.parse_table_list(&mut select.tables)?;
        if self.lexer.peek() == TokenKind::Where {
            self.parse_condition_list(&mut select.conditions)?;
        }
        // Both list rules stop on the terminating ';', so the statement is
        // complete here.
        Ok(select)
    }

    /// `ProjList ::= '*' | Proj (',' Proj)*` followed by `FROM`.
    ///
    /// A bare `*` must be the entire list. `FROM` before any item, or a
    /// comma with no item after it, is a syntax error.
    ///
    /// Slot on entry: `SELECT`. Slot on exit: `FROM`.
    fn parse_projection_list(&mut self, items: &mut Vec<AttrRef>) -> Result<()> {
        if self.lexer.advance() == TokenKind::Star {
            items.push(AttrRef::star());
            return match self.lexer.advance() {
                TokenKind::From => Ok(()),
                _ => Err(MeridianError::SyntaxError),
            };
        }
        loop {
            // Slot: first token of a projection item.
            items.push(self.parse_attr_ref()?);
            match self.lexer.peek() {
                TokenKind::Comma => {
                    self.lexer.advance();
                }
                TokenKind::From => return Ok(()),
                _ => return Err(MeridianError::SyntaxError),
            }
        }
    }

    /// `TableList ::= IDENTIFIER (',' IDENTIFIER)*` up to `WHERE` or `;`.
    ///
    /// A table name must follow `FROM` and every comma.
    ///
    /// Slot on entry: `FROM`. Slot on exit: `WHERE` or `;`.
    fn parse_table_list(&mut self, tables: &mut Vec<String>) -> Result<()> {
        loop {
            if self.lexer.advance() != TokenKind::Identifier {
                return Err(MeridianError::SyntaxError);
            }
            tables.push(self.take_name()?);
            match self.lexer.advance() {
                TokenKind::Comma => {}
                TokenKind::Where | TokenKind::Semicolon => return Ok(()),
                _ => return Err(MeridianError::SyntaxError),
            }
        }
    }

    /// `CondList ::= Cond (',' Cond)*` terminated by `;`.
    ///
    /// A condition must follow `WHERE` and every comma.
    ///
    /// Slot on entry: `WHERE`. Slot on exit: `;`.
    fn parse_condition_list(&mut self, conditions: &mut Vec<Condition>) -> Result<()> {
        loop {
            self.lexer.advance();
            conditions.push(self.parse_condition()?);
            match self.lexer.peek() {
                TokenKind::Comma => {}
                TokenKind::Semicolon => return Ok(()),
                _ => return Err(MeridianError::SyntaxError),
            }
        }
    }

    /// `Cond ::= Operand CmpOp Operand`.
    ///
    /// Slot on entry: first token of the left operand. Slot on exit: first
    /// token after the right operand.
    fn parse_condition(&mut self) -> Result<Condition> {
        let left = self.parse_operand()?;
        let cmp = match self.lexer.peek() {
            TokenKind::Assign => Comparator::Equal,
            TokenKind::NotEqual => Comparator::NotEqual,
            TokenKind::Greater => Comparator::Greater,
            TokenKind::Smaller => Comparator::Smaller,
            _ => return Err(MeridianError::SyntaxError),
        };
        self.lexer.advance();
        let right = self.parse_operand()?;
        Ok(Condition { cmp, left, right })
    }

    /// `Operand ::= (IDENTIFIER ('.' IDENTIFIER)?) | INTEGER | FLOAT | STRING`
    ///
    /// The same qualification rule serves both operand positions. A `-`
    /// here is a syntax error: the sign fold on numeric literals happens
    /// inside the lexer, and the grammar has no unary minus.
    ///
    /// Slot on entry: first token of the operand. Slot on exit: first token
    /// after it.
    fn parse_operand(&mut self) -> Result<Operand> {
        match self.lexer.peek() {
            TokenKind::Identifier => Ok(Operand::Attr(self.parse_attr_ref()?)),
            TokenKind::Integer | TokenKind::Float | TokenKind::String => {
                let value = self.take_literal()?;
                self.lexer.advance();
                Ok(Operand::Literal(value))
            }
            _ => Err(MeridianError::SyntaxError),
        }
    }

    /// `IDENTIFIER ('.' IDENTIFIER)?` — an attribute, bare or
    /// table-qualified. Shared by projection items and both operand sides.
    ///
    /// Slot on entry: `IDENTIFIER`. Slot on exit: first token after the
    /// reference.
    fn parse_attr_ref(&mut self) -> Result<AttrRef> {
        if self.lexer.peek() != TokenKind::Identifier {
            return Err(MeridianError::SyntaxError);
        }
        let first = self.take_name()?;
        if self.lexer.advance() != TokenKind::Dot {
            return Ok(AttrRef {
                table: None,
                name: first,
            });
        }
        if self.lexer.advance() != TokenKind::Identifier {
            return Err(MeridianError::SyntaxError);
        }
        let name = self.take_name()?;
        self.lexer.advance();
        Ok(AttrRef {
            table: Some(first),
            name,
        })
    }

    // -- payload helpers ----------------------------------------------------

    /// Move the current IDENTIFIER's text out of the lookahead slot.
    fn take_name(&mut self) -> Result<String> {
        match self.lexer.take_value() {
            Some(Value::String(name)) => Ok(name),
            _ => Err(MeridianError::SyntaxError),
        }
    }

    /// Move the current literal token's payload out of the lookahead slot.
    fn take_literal(&mut self) -> Result<Value> {
        self.lexer.take_value().ok_or(MeridianError::SyntaxError)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_select(text: &str) -> SelectStatement {
        match Parser::new(text).parse() {
            Ok(Statement::Select(select)) => select,
            other => panic!("expected Select, got {:?}", other),
        }
    }

    fn attr(name: &str) -> AttrRef {
        AttrRef {
            table: None,
            name: name.into(),
        }
    }

    fn qualified(table: &str, name: &str) -> AttrRef {
        AttrRef {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    // -- projection tests ---------------------------------------------------

    #[test]
    fn parse_star_select() {
        let select = parse_select("SELECT * FROM t;");
        assert_eq!(select.projection, vec![AttrRef::star()]);
        assert_eq!(select.tables, vec!["t".to_string()]);
        assert!(select.conditions.is_empty());
    }

    #[test]
    fn parse_qualified_projection() {
        let select = parse_select("SELECT a.x, b.y FROM a, b;");
        assert_eq!(select.projection, vec![qualified("a", "x"), qualified("b", "y")]);
        assert_eq!(select.tables, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn parse_mixed_projection() {
        let select = parse_select("SELECT x, t.y, z FROM t;");
        assert_eq!(
            select.projection,
            vec![attr("x"), qualified("t", "y"), attr("z")]
        );
    }

    #[test]
    fn projection_duplicates_are_kept_in_order() {
        let select = parse_select("SELECT a, a FROM t;");
        assert_eq!(select.projection, vec![attr("a"), attr("a")]);
    }

    // -- table list tests ---------------------------------------------------

    #[test]
    fn parse_multiple_tables_in_order() {
        let select = parse_select("SELECT a FROM t1, t2, t3;");
        assert_eq!(
            select.tables,
            vec!["t1".to_string(), "t2".to_string(), "t3".to_string()]
        );
    }

    // -- condition tests ----------------------------------------------------

    #[test]
    fn parse_single_condition() {
        let select = parse_select("SELECT a FROM t WHERE a > 10;");
        assert_eq!(
            select.conditions,
            vec![Condition {
                cmp: Comparator::Greater,
                left: Operand::Attr(attr("a")),
                right: Operand::Literal(Value::Integer(10)),
            }]
        );
    }

    #[test]
    fn parse_condition_forms() {
        let select = parse_select("SELECT a.x, b.y FROM a, b WHERE a.id=1, 2<>b.id;");
        assert_eq!(select.projection, vec![qualified("a", "x"), qualified("b", "y")]);
        assert_eq!(select.tables, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            select.conditions,
            vec![
                Condition {
                    cmp: Comparator::Equal,
                    left: Operand::Attr(qualified("a", "id")),
                    right: Operand::Literal(Value::Integer(1)),
                },
                Condition {
                    cmp: Comparator::NotEqual,
                    left: Operand::Literal(Value::Integer(2)),
                    right: Operand::Attr(qualified("b", "id")),
                },
            ]
        );
    }

    #[test]
    fn parse_all_comparators() {
        let select = parse_select("SELECT a FROM t WHERE a=1, b<>2, c>3, d<4;");
        let cmps: Vec<Comparator> = select.conditions.iter().map(|c| c.cmp).collect();
        assert_eq!(
            cmps,
            vec![
                Comparator::Equal,
                Comparator::NotEqual,
                Comparator::Greater,
                Comparator::Smaller,
            ]
        );
    }

    #[test]
    fn parse_float_operand() {
        let select = parse_select("SELECT name FROM items WHERE price < 9.99;");
        assert_eq!(
            select.conditions[0].right,
            Operand::Literal(Value::Float(9.99))
        );
    }

    #[test]
    fn parse_attr_to_attr_condition() {
        let select = parse_select("SELECT a FROM t1, t2 WHERE t1.id = t2.ref_id;");
        assert_eq!(
            select.conditions,
            vec![Condition {
                cmp: Comparator::Equal,
                left: Operand::Attr(qualified("t1", "id")),
                right: Operand::Attr(qualified("t2", "ref_id")),
            }]
        );
    }

    #[test]
    fn qualification_is_symmetric_between_operand_sides() {
        // Qualified on the right only, then on the left only.
        let select = parse_select("SELECT a FROM t WHERE 4 = t.id, t.id = 4;");
        assert_eq!(
            select.conditions[0].right,
            Operand::Attr(qualified("t", "id"))
        );
        assert_eq!(
            select.conditions[1].left,
            Operand::Attr(qualified("t", "id"))
        );
    }

    // -- whole statement tests ----------------------------------------------

    #[test]
    fn keywords_are_case_insensitive() {
        let select = parse_select(
            "Select table1.name1 , table2.name2 , name3 from table1 , table2, table3 \
             where table1.id=3, table2.id=4, 4=table3.id;",
        );
        assert_eq!(
            select.projection,
            vec![
                qualified("table1", "name1"),
                qualified("table2", "name2"),
                attr("name3"),
            ]
        );
        assert_eq!(
            select.tables,
            vec![
                "table1".to_string(),
                "table2".to_string(),
                "table3".to_string(),
            ]
        );
        assert_eq!(select.conditions.len(), 3);
        assert_eq!(
            select.conditions[2],
            Condition {
                cmp: Comparator::Equal,
                left: Operand::Literal(Value::Integer(4)),
                right: Operand::Attr(qualified("table3", "id")),
            }
        );
    }

    #[test]
    fn text_after_the_semicolon_is_ignored() {
        let select = parse_select("SELECT a FROM t; trailing junk");
        assert_eq!(select.tables, vec!["t".to_string()]);
    }

    // -- error tests --------------------------------------------------------

    #[test]
    fn rejects_malformed_statements() {
        let cases = [
            "",
            "SELECT FROM t;",                   // empty projection
            "SELECT a, FROM t;",                // comma with no item after it
            "SELECT *, a FROM t;",              // * must be the entire list
            "SELECT a b FROM t;",               // missing comma
            "SELECT a. FROM t;",                // dot with no attribute
            "SELECT a.* FROM t;",               // no table.* projection
            "SELECT a FROM;",                   // empty table list
            "SELECT a FROM ,t;",                // comma directly after FROM
            "SELECT a FROM t,;",                // trailing comma in table list
            "SELECT a FROM t u;",               // missing comma between tables
            "SELECT a FROM t",                  // missing terminator
            "SELECT a FROM t WHERE;",           // WHERE with no condition
            "SELECT a FROM t WHERE a;",         // no comparator
            "SELECT a FROM t WHERE a = ;",      // no right operand
            "SELECT a FROM t WHERE a == 1;",    // doubled comparator
            "SELECT a FROM t WHERE = 1;",       // no left operand
            "SELECT a FROM t WHERE a = 1 b = 2;", // conditions need commas
            "SELECT a FROM t WHERE a = 1,;",    // trailing comma in WHERE
            "SELECT a FROM t WHERE a = -5;",    // no unary minus in operands
            "SELECT a FROM t WHERE a = 12.;",   // malformed float literal
            "SELECT @ FROM t;",                 // unrecognized character
            "INSERT INTO t VALUES;",            // reserved, no grammar yet
            "UPDATE t;",
            "CREATE TABLE t;",
            "DELETE FROM t;",
        ];
        for text in cases {
            assert!(
                Parser::new(text).parse().is_err(),
                "accepted malformed statement: {:?}",
                text
            );
        }
    }

    #[test]
    fn failure_reports_only_a_syntax_error() {
        let err = Parser::new("SELECT FROM t;").parse().unwrap_err();
        assert_eq!(err, MeridianError::SyntaxError);
    }

    // -- reuse and introspection tests --------------------------------------

    #[test]
    fn parser_is_reusable_after_initialize() {
        let mut parser = Parser::new("SELECT a FROM t;");
        assert!(parser.parse().is_ok());

        parser.initialize("SELECT * FROM u WHERE u.id > 7;");
        let select = match parser.parse() {
            Ok(Statement::Select(select)) => select,
            other => panic!("expected Select, got {:?}", other),
        };
        assert_eq!(select.tables, vec!["u".to_string()]);
        assert_eq!(select.conditions.len(), 1);
    }

    #[test]
    fn initialize_discards_previous_lookahead_state() {
        let mut parser = Parser::new("-");
        assert!(parser.parse().is_err());
        assert_eq!(parser.peek_current_token().1, TokenKind::Minus);

        parser.initialize("4");
        assert!(parser.parse().is_err());
        // The stale Minus must not fold into the fresh literal.
        let (value, kind) = parser.peek_current_token();
        assert_eq!(kind, TokenKind::Integer);
        assert_eq!(value, Some(&Value::Integer(4)));
    }

    #[test]
    fn slot_rests_on_the_terminator_after_success() {
        let mut parser = Parser::new("SELECT a FROM t;");
        assert_eq!(parser.peek_current_token().1, TokenKind::Invalid);
        parser.parse().unwrap();
        let (value, kind) = parser.peek_current_token();
        assert_eq!(kind, TokenKind::Semicolon);
        assert!(value.is_none());
    }
}
