//! Hand-written tokenizer for the Meridian query language.
//!
//! The [`Lexer`] scans statement text one token at a time and doubles as the
//! parser's single-token lookahead: [`Lexer::advance`] scans the next token
//! into the slot, [`Lexer::peek`] and [`Lexer::value`] read it. Exactly one
//! token is current at any time; advancing overwrites it, and no token is
//! ever pushed back. Keywords are matched case-insensitively.

use std::fmt;

/// The classification of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // -----------------------------------------------------------------------
    // Keywords
    // -----------------------------------------------------------------------
    Select,
    Insert,
    Update,
    Create,
    Delete,
    From,
    Where,
    Into,
    Table,
    Values,

    // -----------------------------------------------------------------------
    // Identifiers & literals
    // -----------------------------------------------------------------------
    /// A bare name. Carries the original-case text as [`Value::String`].
    Identifier,
    /// A decimal integer literal. Carries [`Value::Integer`].
    Integer,
    /// A decimal floating-point literal. Carries [`Value::Float`].
    Float,
    /// A quoted string literal. The scanner has no branch that produces
    /// this yet; quote characters lex as [`TokenKind::Invalid`].
    String,

    // -----------------------------------------------------------------------
    // Operators & punctuation
    // -----------------------------------------------------------------------
    Plus,
    Minus,
    Dot,
    Comma,
    Star,
    Assign,
    NotEqual,
    Greater,
    Smaller,
    Semicolon,
    /// Reserved for the `INSERT ... VALUES (...)` grammar; never produced
    /// by the scanner.
    LeftParen,
    /// Reserved for the `INSERT ... VALUES (...)` grammar; never produced
    /// by the scanner.
    RightParen,

    // -----------------------------------------------------------------------
    // Special
    // -----------------------------------------------------------------------
    /// Malformed input or end of input. The parser treats this as an
    /// unexpected token wherever it appears; there is no separate
    /// lexical-error channel.
    Invalid,
}

/// The literal payload carried by [`TokenKind::Identifier`],
/// [`TokenKind::Integer`], [`TokenKind::Float`], and [`TokenKind::String`]
/// tokens. Every other kind carries no payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Value {
    /// Formats a value for human-readable CLI output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => {
                // Whole numbers get one decimal place to distinguish them
                // from integers.
                if v.fract() == 0.0 && v.is_finite() {
                    write!(f, "{:.1}", v)
                } else {
                    write!(f, "{}", v)
                }
            }
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

// ---------------------------------------------------------------------------
// Keyword lookup
// ---------------------------------------------------------------------------

fn keyword_token(word: &str) -> Option<TokenKind> {
    // The input `word` is already uppercased by the caller.
    match word {
        "SELECT" => Some(TokenKind::Select),
        "INSERT" => Some(TokenKind::Insert),
        "UPDATE" => Some(TokenKind::Update),
        "CREATE" => Some(TokenKind::Create),
        "DELETE" => Some(TokenKind::Delete),
        "FROM" => Some(TokenKind::From),
        "WHERE" => Some(TokenKind::Where),
        "INTO" => Some(TokenKind::Into),
        "TABLE" => Some(TokenKind::Table),
        "VALUES" => Some(TokenKind::Values),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// A hand-written tokenizer that doubles as the parser's lookahead slot.
///
/// Create one with [`Lexer::new`], then call [`Lexer::advance`] repeatedly
/// to step through the token stream. The input buffer is borrowed for the
/// lexer's lifetime; text is copied only into identifier and literal
/// payloads.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    /// The most recently scanned token. [`TokenKind::Invalid`] before the
    /// first call to [`Lexer::advance`].
    current: TokenKind,
    /// Literal payload of the current token, if it carries one.
    value: Option<Value>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over the given statement text.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.as_bytes(),
            pos: 0,
            current: TokenKind::Invalid,
            value: None,
        }
    }

    /// Scan the next token into the slot and return its kind.
    ///
    /// Blank characters (space, carriage return, line feed) before the token
    /// are skipped. At end of input, or on a character no branch recognizes,
    /// the slot turns [`TokenKind::Invalid`] and the cursor stays put —
    /// callers must treat `Invalid` as terminal rather than retry.
    pub fn advance(&mut self) -> TokenKind {
        self.skip_blank();
        let ch = match self.peek_char() {
            Some(c) => c,
            None => return self.set(TokenKind::Invalid, None),
        };
        match ch {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_word(),
            b'0'..=b'9' => self.scan_number(),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'.' => self.single(TokenKind::Dot),
            b',' => self.single(TokenKind::Comma),
            b'*' => self.single(TokenKind::Star),
            b'=' => self.single(TokenKind::Assign),
            b';' => self.single(TokenKind::Semicolon),
            b'>' => self.single(TokenKind::Greater),
            b'<' => {
                if self.peek_char_at(1) == Some(b'>') {
                    self.pos += 2;
                    self.set(TokenKind::NotEqual, None)
                } else {
                    self.single(TokenKind::Smaller)
                }
            }
            _ => self.set(TokenKind::Invalid, None),
        }
    }

    /// The kind of the current token.
    pub fn peek(&self) -> TokenKind {
        self.current
    }

    /// Borrow the current token's literal payload, if it carries one.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Move the current token's literal payload out of the slot.
    pub fn take_value(&mut self) -> Option<Value> {
        self.value.take()
    }

    // -- helpers ------------------------------------------------------------

    fn peek_char(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_char_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn skip_blank(&mut self) {
        // Tabs are not blank; they lex as Invalid.
        while matches!(self.peek_char(), Some(b' ' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn set(&mut self, kind: TokenKind, value: Option<Value>) -> TokenKind {
        self.current = kind;
        self.value = value;
        kind
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        self.set(kind, None)
    }

    // -- scanners -----------------------------------------------------------

    fn scan_word(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.pos += 1;
        }
        let word = std::str::from_utf8(&self.input[start..self.pos]).unwrap();
        if let Some(kw) = keyword_token(&word.to_ascii_uppercase()) {
            self.set(kw, None)
        } else {
            self.set(
                TokenKind::Identifier,
                Some(Value::String(word.to_string())),
            )
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        // A dangling Minus in the slot folds its sign into this literal.
        // The Minus token itself was already handed out on the previous
        // advance; the lookback is exactly one token deep.
        let negate = self.current == TokenKind::Minus;
        let start = self.pos;
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.pos += 1;
        }

        if self.peek_char() == Some(b'.') {
            if !self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()) {
                // "123." with no digit after the dot: malformed literal.
                // The cursor still moves past it.
                self.pos += 1;
                return self.set(TokenKind::Invalid, None);
            }
            self.pos += 1;
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap();
            return match text.parse::<f64>() {
                Ok(v) => self.set(
                    TokenKind::Float,
                    Some(Value::Float(if negate { -v } else { v })),
                ),
                Err(_) => self.set(TokenKind::Invalid, None),
            };
        }

        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap();
        match text.parse::<i64>() {
            Ok(n) => self.set(
                TokenKind::Integer,
                Some(Value::Integer(if negate { -n } else { n })),
            ),
            // A digit run that overflows i64 is malformed, not saturated.
            Err(_) => self.set(TokenKind::Invalid, None),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
