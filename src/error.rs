//! Error types for encoding and decoding.

use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A negative value was given to encode, or decode input held no symbols.
    InvalidArgument,
    /// The destination buffer cannot hold the longest possible encoding.
    BufferTooSmall,
    /// A character is not part of the data or check alphabet.
    SymbolOutOfRange,
    /// The check symbol does not match the decoded value.
    ChecksumMismatch,
    /// The decoded value does not fit the requested integer type.
    Overflow,
}

/// The error type for all codec operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("value must be greater than or equal to 0, got {0}")]
    NegativeValue(i64),

    #[error("the provided value is empty and cannot be decoded")]
    EmptyInput,

    #[error("the provided value '{input}' contains no symbols and cannot be decoded")]
    NoDataSymbols { input: String },

    #[error("the receiving buffer must have a length of at least {required}, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    #[error(
        "the provided value '{input}' cannot be decoded, the character at {position} is {} ({context})",
        symbol_role(.check_symbol)
    )]
    SymbolOutOfRange {
        symbol: char,
        /// 1-based character position within `input`.
        position: usize,
        input: String,
        context: String,
        check_symbol: bool,
    },

    #[error("the provided value '{input}' has a check symbol value of {supplied}, {computed} was expected")]
    ChecksumMismatch {
        input: String,
        supplied: u8,
        computed: u8,
    },

    #[error("the provided value '{input}' is too large to be decoded")]
    Overflow { input: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NegativeValue(_) | Error::EmptyInput | Error::NoDataSymbols { .. } => {
                ErrorKind::InvalidArgument
            }
            Error::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            Error::SymbolOutOfRange { .. } => ErrorKind::SymbolOutOfRange,
            Error::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            Error::Overflow { .. } => ErrorKind::Overflow,
        }
    }

    pub(crate) fn symbol_out_of_range(input: &str, index: usize, symbol: char, check_symbol: bool) -> Self {
        let before: String = input.chars().take(index).collect();
        let after: String = input.chars().skip(index + 1).collect();
        Error::SymbolOutOfRange {
            symbol,
            position: index + 1,
            input: input.to_owned(),
            context: format!("{before} » {symbol} « {after}"),
            check_symbol,
        }
    }
}

fn symbol_role(check_symbol: &bool) -> &'static str {
    if *check_symbol {
        "an invalid check symbol"
    } else {
        "invalid"
    }
}

/// A convenience `Result` type alias using the crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;
