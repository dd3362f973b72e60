//! Unified error handling for Meridian.
//!
//! This module defines [`MeridianError`], the single error type propagated
//! throughout the crate, together with the convenience [`Result<T>`] alias
//! so that callers can write `Result<T>` instead of
//! `std::result::Result<T, MeridianError>`.

use std::fmt;

/// The canonical error type for all Meridian operations.
///
/// Parsing communicates failure as a bare result code: the variants carry no
/// position, offending token, or message. Callers that need diagnostics must
/// re-prompt or abort; richer reporting would be a new variant here, not a
/// silent upgrade of an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeridianError {
    /// The statement text violated the grammar. Lexically malformed input
    /// (an unrecognized character, a numeric literal with a trailing dot)
    /// surfaces the same way, at whatever grammar position the bad token
    /// appeared.
    SyntaxError,
}

impl fmt::Display for MeridianError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeridianError::SyntaxError => write!(f, "syntax error"),
        }
    }
}

impl std::error::Error for MeridianError {}

/// A specialised [`Result`] type for Meridian operations.
///
/// This is defined as a convenience so that every fallible function in the
/// codebase can simply return `Result<T>` rather than spelling out the full
/// `std::result::Result<T, MeridianError>`.
pub type Result<T> = std::result::Result<T, MeridianError>;
