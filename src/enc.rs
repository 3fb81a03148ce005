use std::fmt;
use std::ops::Deref;

use crate::error::{Error, Result};
use crate::{
    BITS_PER_SYMBOL, CHECK_CHARS, CHECK_SYMBOL_BASE, CROCKFORD_CHARS, MAX_DATA_SYMBOLS, MAX_ENCODED_LEN,
    SYMBOL_MASK,
};

const fn generate_check_lut(alphabet: &[u8; 32], check: &[u8; 5]) -> [u8; 37] {
    let mut lut = [0u8; 37];
    let mut i = 0;
    while i < 32 {
        lut[i] = alphabet[i];
        i += 1;
    }
    while i < 37 {
        lut[i] = check[i - 32];
        i += 1;
    }
    lut
}

static CHECK_LUT: [u8; 37] = generate_check_lut(CROCKFORD_CHARS, CHECK_CHARS);

#[inline(always)]
fn to_char(value: u64) -> u8 {
    CROCKFORD_CHARS[(value & SYMBOL_MASK) as usize]
}

#[inline(always)]
fn to_check_char(value: u64) -> u8 {
    CHECK_LUT[(value % CHECK_SYMBOL_BASE) as usize]
}

/// Writes the symbols for `value` into the tail of `dst` and returns the
/// offset of the first symbol. `dst` must hold at least `MAX_ENCODED_LEN`
/// bytes.
fn write_symbols(mut value: u64, check_symbol: bool, dst: &mut [u8]) -> usize {
    debug_assert!(dst.len() >= MAX_ENCODED_LEN);

    let mut cur = dst.len();
    if check_symbol {
        cur -= 1;
        dst[cur] = to_check_char(value);
    }

    // at least one symbol, so zero encodes as "0"
    loop {
        cur -= 1;
        dst[cur] = to_char(value);
        value >>= BITS_PER_SYMBOL;
        if value == 0 {
            break;
        }
    }
    cur
}

/// An encoded value held on the stack.
///
/// Dereferences to `str`; convert to `String` or `Vec<u8>` when an owned
/// copy is needed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoded {
    symbols: [u8; MAX_ENCODED_LEN],
    start: u8,
}

impl Encoded {
    pub fn new(value: u64, check_symbol: bool) -> Self {
        let mut symbols = [0u8; MAX_ENCODED_LEN];
        let start = write_symbols(value, check_symbol, &mut symbols);
        Encoded { symbols, start: start as u8 }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols[self.start as usize..]
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        debug_assert!(self.as_bytes().is_ascii());
        // SAFETY: every byte written by `write_symbols` comes from an ASCII table
        unsafe { std::str::from_utf8_unchecked(self.as_bytes()) }
    }
}

impl Deref for Encoded {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Encoded {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Encoded").field(&self.as_str()).finish()
    }
}

impl PartialEq<str> for Encoded {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Encoded {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl From<Encoded> for String {
    fn from(encoded: Encoded) -> Self {
        encoded.as_str().to_owned()
    }
}

impl From<Encoded> for Vec<u8> {
    fn from(encoded: Encoded) -> Self {
        encoded.as_bytes().to_vec()
    }
}

/// Integer types that can be encoded.
///
/// Unsigned types always convert; signed types fail with
/// [`Error::NegativeValue`] below zero.
pub trait Encodable: Copy {
    fn to_u64(self) -> Result<u64>;
}

macro_rules! impl_encodable_unsigned {
    ($($t:ty),*) => {$(
        impl Encodable for $t {
            #[inline]
            fn to_u64(self) -> Result<u64> {
                Ok(self as u64)
            }
        }
    )*};
}

macro_rules! impl_encodable_signed {
    ($($t:ty),*) => {$(
        impl Encodable for $t {
            #[inline]
            fn to_u64(self) -> Result<u64> {
                u64::try_from(self).map_err(|_| Error::NegativeValue(self as i64))
            }
        }
    )*};
}

impl_encodable_unsigned!(u8, u16, u32, u64, usize);
impl_encodable_signed!(i8, i16, i32, i64, isize);

/// Encodes `value`, appending a check symbol if `check_symbol` is set.
pub fn encode<V: Encodable>(value: V, check_symbol: bool) -> Result<Encoded> {
    Ok(Encoded::new(value.to_u64()?, check_symbol))
}

/// Like [`encode`], but reports failure as `None`.
pub fn try_encode<V: Encodable>(value: V, check_symbol: bool) -> Option<Encoded> {
    encode(value, check_symbol)
        .inspect_err(|err| tracing::trace!(%err, "encode failed"))
        .ok()
}

/// Encodes `value` into the tail of `dst` and returns the offset where the
/// symbols start, so `&dst[offset..]` is the encoded value.
///
/// `dst` must be at least [`MAX_ENCODED_LEN`] long regardless of the value, so
/// a pooled buffer can be reused for any input.
pub fn encode_into<V: Encodable>(value: V, check_symbol: bool, dst: &mut [u8]) -> Result<usize> {
    let value = value.to_u64()?;
    if dst.len() < MAX_ENCODED_LEN {
        return Err(Error::BufferTooSmall {
            required: MAX_ENCODED_LEN,
            actual: dst.len(),
        });
    }
    Ok(write_symbols(value, check_symbol, dst))
}

/// Extension methods for encoding integers in place.
pub trait ToCrockford: Encodable {
    fn to_crockford(self, check_symbol: bool) -> Result<Encoded> {
        encode(self, check_symbol)
    }

    fn to_crockford_string(self, check_symbol: bool) -> Result<String> {
        self.to_crockford(check_symbol).map(String::from)
    }
}

impl<T: Encodable> ToCrockford for T {}

const _: () = assert!(MAX_DATA_SYMBOLS * BITS_PER_SYMBOL as usize >= u64::BITS as usize);
