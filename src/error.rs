//! Error type returned by construction and parsing.

use thiserror::Error;

/// Errors returned when a value cannot form a valid UUIDv7.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
pub enum Error {
    /// The input holds the wrong number of bytes (construction) or hex digits (parsing).
    #[error("invalid length: expected {expected}, found {found}")]
    InvalidLength { expected: usize, found: usize },

    /// The version nibble is not `7`.
    #[error("invalid version {found}: expected 7")]
    InvalidVersion { found: u8 },

    /// The two variant bits are not `0b10`.
    #[error("invalid variant bits {found:#04b}: expected 0b10")]
    InvalidVariant { found: u8 },

    /// The timestamp does not fit in the 48-bit millisecond field.
    #[error("timestamp out of the 48-bit Unix millisecond range")]
    InvalidTimestamp,

    /// The string representation is empty or blank.
    #[error("empty string representation")]
    EmptyInput,

    /// The string representation contains a character other than a hex digit, space or hyphen.
    #[error("invalid hex digit {found:?} at digit position {index}")]
    InvalidHexDigit { found: char, index: usize },
}
