//! Error types for structured field parsing, construction, and serialization.
//!
//! Every failure in this crate is reported through [`Error`], one variant per
//! failure class. Parse failures carry the byte offset into the input at
//! which the violation was detected, so callers can point at the offending
//! octet in their own diagnostics.
//!
//! There is no recovery and no partial result: the first violation wins.
//!
//! ## Examples
//!
//! ```rust
//! use structured_fields::{parse_item, Error};
//!
//! let err = parse_item("1.12345").unwrap_err();
//! assert!(matches!(err, Error::Syntax { .. }));
//! ```

use thiserror::Error;

/// All failures reported by this crate.
///
/// Messages are stable enough to test against but are not a compatibility
/// surface; match on the variant instead.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Grammar violation while parsing a field value. `offset` is the byte
    /// position in the input at which parsing stopped; it equals the input
    /// length when the input ended prematurely.
    #[error("syntax error at byte {offset}: {reason}")]
    Syntax { offset: usize, reason: String },

    /// A constructor received text outside the type's character set.
    #[error("invalid character in {context}")]
    InvalidCharacter { context: &'static str },

    /// A numeric value outside the RFC 8941 range for its type.
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: String },

    /// A parameter or dictionary key violating the key grammar
    /// `[a-z*][a-z0-9.*_-]*`.
    #[error("invalid key `{key}`")]
    InvalidKey { key: String },

    /// API misuse, such as inserting a parameterized item where only bare
    /// items are allowed.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// A container index outside the valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// A keyed lookup for an absent key.
    #[error("key `{key}` not found")]
    NotFound { key: String },

    /// An in-place mutation attempted through a read-only adapter. The core
    /// never constructs this; it exists for container-protocol adapters
    /// built on top of the crate.
    #[error("forbidden operation on an immutable value")]
    ForbiddenOperation,

    /// A value tree that violates the data-model invariants was handed to
    /// the serializer. Only reachable by constructing enum variants
    /// directly with invalid payloads.
    #[error("cannot serialize: {reason}")]
    Serialization { reason: &'static str },
}

impl Error {
    pub(crate) fn syntax(offset: usize, reason: impl Into<String>) -> Self {
        Error::Syntax {
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(what: &'static str, value: impl std::fmt::Display) -> Self {
        Error::OutOfRange {
            what,
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_key(key: impl Into<String>) -> Self {
        Error::InvalidKey { key: key.into() }
    }

    pub(crate) fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }
}

/// Alias for `std::result::Result` with this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
