//! Crockford Base32 encoding of 64-bit integers.
//!
//! Values are written most-significant symbol first, five bits per symbol,
//! without leading zero symbols. An optional trailing check symbol holds
//! `value % 37`. Decoding ignores hyphens and folds the ambiguous letters
//! `O`, `I` and `L` onto `0` and `1`.
//!
//! ```
//! use crockford_base32::{decode, encode};
//!
//! let encoded = encode(255u64, true).unwrap();
//! assert_eq!(encoded, "7Z~");
//! assert_eq!(decode("7z-~", true).unwrap(), 255);
//! ```

pub(crate) const CROCKFORD_CHARS: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
/// Check symbols for the values 32 through 36.
pub(crate) const CHECK_CHARS: &[u8; 5] = b"*~$=U";

pub(crate) const DECODE_BASE: u64 = 32;
pub(crate) const CHECK_SYMBOL_BASE: u64 = 37;
pub(crate) const BITS_PER_SYMBOL: u32 = 5;
pub(crate) const SYMBOL_MASK: u64 = 0b11111;
pub(crate) const HYPHEN: char = '-';

/// Number of data symbols needed for `u64::MAX`.
pub const MAX_DATA_SYMBOLS: usize = 13;
/// Longest possible encoding: every data symbol plus the check symbol.
pub const MAX_ENCODED_LEN: usize = MAX_DATA_SYMBOLS + 1;

mod enc;
mod dec;
mod error;

pub use crate::enc::{encode, encode_into, try_encode, Encodable, Encoded, ToCrockford};
pub use crate::dec::{decode, decode_i64, try_decode, ParseCrockford};
pub use crate::error::{Error, ErrorKind, Result};
