//! Error types for identity string rendering and parsing.
//!
//! Rendering errors name the offending name or key. Parsing errors carry the
//! byte offset into the input where the problem was detected.
//!
//! ## Error Categories
//!
//! - **Rendering**: [`Error::InvalidName`], [`Error::UnsupportedValueKind`],
//!   [`Error::DepthExceeded`], [`Error::KeyCollision`]
//! - **Parsing**: [`Error::UnexpectedEndOfInput`], [`Error::UnexpectedToken`],
//!   [`Error::InvalidEscape`], [`Error::InvalidNumber`], [`Error::DuplicateKey`],
//!   [`Error::DepthExceeded`]
//! - **Nicknames**: [`Error::NicknameTaken`], [`Error::IdTaken`]
//!
//! ## Examples
//!
//! ```rust
//! use whatid::{parse, Error};
//!
//! let err = parse("Foo(bar=)").unwrap_err();
//! assert!(matches!(err, Error::UnexpectedToken { offset: 8, .. }));
//! assert_eq!(err.offset(), Some(8));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while rendering or parsing identity strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A node name or parameter key is not a valid identifier
    #[error("Invalid name {name:?}: names must match [_A-Za-z][_A-Za-z0-9]*")]
    InvalidName { name: String },

    /// A value cannot be represented in the identity string model
    #[error("Unsupported value kind: {0}")]
    UnsupportedValueKind(String),

    /// Nesting goes deeper than the configured limit
    #[error("Nesting depth exceeds the limit of {limit}{}", fmt_offset(.offset))]
    DepthExceeded { limit: usize, offset: Option<usize> },

    /// Input ended in the middle of a construct
    #[error("Unexpected end of input at offset {offset}: expected {expected}")]
    UnexpectedEndOfInput { offset: usize, expected: String },

    /// A delimiter or token does not fit the grammar at this position
    #[error("Unexpected token at offset {offset}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        offset: usize,
        expected: String,
        found: String,
    },

    /// Malformed escape sequence inside quoted text
    #[error("Invalid escape sequence {sequence:?} at offset {offset}")]
    InvalidEscape { offset: usize, sequence: String },

    /// Numeric literal that does not parse
    #[error("Invalid number {literal:?} at offset {offset}")]
    InvalidNumber { offset: usize, literal: String },

    /// A node lists the same parameter twice
    #[error("Duplicate parameter {key:?} at offset {offset}")]
    DuplicateKey { offset: usize, key: String },

    /// Two top-level parameters end up under the same key once synonyms apply
    #[error("Parameters {first:?} and {second:?} both render as key {key:?}")]
    KeyCollision {
        key: String,
        first: String,
        second: String,
    },

    /// A registry nickname is already bound to another id
    #[error("Nickname {nickname:?} is already bound to id {id:?}, remove it first")]
    NicknameTaken { nickname: String, id: String },

    /// A registry id is already bound to another nickname
    #[error("Id {id:?} is already bound to nickname {nickname:?}, remove it first")]
    IdTaken { id: String, nickname: String },

    /// Custom error raised through serde
    #[error("Error: {0}")]
    Custom(String),
}

fn fmt_offset(offset: &Option<usize>) -> String {
    offset
        .map(|o| format!(" at offset {}", o))
        .unwrap_or_default()
}

impl Error {
    /// Creates an invalid name error for a node name or parameter key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use whatid::Error;
    ///
    /// let err = Error::invalid_name("1st");
    /// assert!(err.to_string().contains("\"1st\""));
    /// ```
    pub fn invalid_name(name: &str) -> Self {
        Error::InvalidName {
            name: name.to_string(),
        }
    }

    /// Creates an unsupported value kind error.
    pub fn unsupported(msg: &str) -> Self {
        Error::UnsupportedValueKind(msg.to_string())
    }

    /// Depth limit hit while rendering (no input offset).
    pub fn depth_exceeded(limit: usize) -> Self {
        Error::DepthExceeded {
            limit,
            offset: None,
        }
    }

    /// Depth limit hit while parsing at `offset`.
    pub fn depth_exceeded_at(limit: usize, offset: usize) -> Self {
        Error::DepthExceeded {
            limit,
            offset: Some(offset),
        }
    }

    pub fn unexpected_eof(offset: usize, expected: &str) -> Self {
        Error::UnexpectedEndOfInput {
            offset,
            expected: expected.to_string(),
        }
    }

    /// Creates an unexpected token error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use whatid::Error;
    ///
    /// let err = Error::unexpected_token(4, "'='", ")");
    /// assert!(err.to_string().contains("expected '='"));
    /// ```
    pub fn unexpected_token(offset: usize, expected: &str, found: &str) -> Self {
        Error::UnexpectedToken {
            offset,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn invalid_escape(offset: usize, sequence: &str) -> Self {
        Error::InvalidEscape {
            offset,
            sequence: sequence.to_string(),
        }
    }

    pub fn invalid_number(offset: usize, literal: &str) -> Self {
        Error::InvalidNumber {
            offset,
            literal: literal.to_string(),
        }
    }

    pub fn duplicate_key(offset: usize, key: &str) -> Self {
        Error::DuplicateKey {
            offset,
            key: key.to_string(),
        }
    }

    pub fn key_collision(key: &str, first: &str, second: &str) -> Self {
        Error::KeyCollision {
            key: key.to_string(),
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    pub fn nickname_taken(nickname: &str, id: &str) -> Self {
        Error::NicknameTaken {
            nickname: nickname.to_string(),
            id: id.to_string(),
        }
    }

    pub fn id_taken(id: &str, nickname: &str) -> Self {
        Error::IdTaken {
            id: id.to_string(),
            nickname: nickname.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Byte offset into the parsed input, for errors raised by the parser.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::UnexpectedEndOfInput { offset, .. }
            | Error::UnexpectedToken { offset, .. }
            | Error::InvalidEscape { offset, .. }
            | Error::InvalidNumber { offset, .. }
            | Error::DuplicateKey { offset, .. } => Some(*offset),
            Error::DepthExceeded { offset, .. } => *offset,
            Error::InvalidName { .. }
            | Error::UnsupportedValueKind(_)
            | Error::KeyCollision { .. }
            | Error::NicknameTaken { .. }
            | Error::IdTaken { .. }
            | Error::Custom(_) => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_message_with_and_without_offset() {
        let render = Error::depth_exceeded(64);
        assert_eq!(render.to_string(), "Nesting depth exceeds the limit of 64");
        assert_eq!(render.offset(), None);

        let parse = Error::depth_exceeded_at(64, 64);
        assert_eq!(
            parse.to_string(),
            "Nesting depth exceeds the limit of 64 at offset 64"
        );
        assert_eq!(parse.offset(), Some(64));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Error::unexpected_eof(3, "')'").offset(), Some(3));
        assert_eq!(Error::invalid_escape(7, "\\q").offset(), Some(7));
        assert_eq!(Error::invalid_number(1, "-").offset(), Some(1));
        assert_eq!(Error::duplicate_key(9, "a").offset(), Some(9));
        assert_eq!(Error::invalid_name("").offset(), None);
        assert_eq!(Error::key_collision("k", "a", "b").offset(), None);
    }
}
