use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::{BITS_PER_SYMBOL, CHECK_CHARS, CHECK_SYMBOL_BASE, CROCKFORD_CHARS, DECODE_BASE, HYPHEN};

const INVALID: u8 = u8::MAX;

const fn generate_decode_lut(alphabet: &[u8; 32]) -> [u8; 256] {
    let mut lut = [INVALID; 256];
    let mut i = 0u8;
    while i < 32 {
        let char_code = alphabet[i as usize];
        lut[char_code.to_ascii_lowercase() as usize] = i;
        lut[char_code.to_ascii_uppercase() as usize] = i;
        i += 1;
    }
    // letters that are easily misread as digits
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
}

const fn generate_check_decode_lut(data: &[u8; 256], check: &[u8; 5]) -> [u8; 256] {
    let mut lut = *data;
    let mut i = 0u8;
    while i < 5 {
        let char_code = check[i as usize];
        lut[char_code.to_ascii_lowercase() as usize] = 32 + i;
        lut[char_code.to_ascii_uppercase() as usize] = 32 + i;
        i += 1;
    }
    lut
}

const CROCKFORD_LUT: [u8; 256] = generate_decode_lut(CROCKFORD_CHARS);
const CHECK_LUT: [u8; 256] = generate_check_decode_lut(&CROCKFORD_LUT, CHECK_CHARS);

#[inline(always)]
fn lookup(lut: &[u8; 256], value: char) -> Option<u8> {
    if !value.is_ascii() {
        return None;
    }
    match lut[value as usize] {
        INVALID => None,
        v => Some(v),
    }
}

#[inline(always)]
fn from_char(value: char) -> Option<u8> {
    lookup(&CROCKFORD_LUT, value)
}

#[inline(always)]
fn from_check_char(value: char) -> Option<u8> {
    lookup(&CHECK_LUT, value)
}

fn decode_str(input: &str, check_symbol: bool) -> Result<u64> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }

    let overflow = || Error::Overflow { input: input.to_owned() };
    let len = input.chars().count();

    let mut result = 0u64;
    let mut shift = 0u32;
    let mut data_symbols = 0usize;
    let mut supplied: Option<u8> = None;

    for (index, current) in input.chars().rev().enumerate().map(|(i, c)| (len - 1 - i, c)) {
        if current == HYPHEN {
            continue;
        }

        if check_symbol && supplied.is_none() {
            let value = from_check_char(current)
                .ok_or_else(|| Error::symbol_out_of_range(input, index, current, true))?;
            supplied = Some(value);
            continue;
        }

        let value = from_char(current).ok_or_else(|| Error::symbol_out_of_range(input, index, current, false))?;
        data_symbols += 1;

        // leading zero symbols are allowed past 64 bits, anything else overflows
        if value != 0 {
            if shift >= u64::BITS {
                return Err(overflow());
            }
            let part = u64::try_from((value as u128) << shift).map_err(|_| overflow())?;
            result = result.checked_add(part).ok_or_else(overflow)?;
        }
        shift = shift.saturating_add(BITS_PER_SYMBOL);
    }

    if data_symbols == 0 {
        return Err(Error::NoDataSymbols { input: input.to_owned() });
    }

    if let Some(supplied) = supplied {
        let computed = (result % CHECK_SYMBOL_BASE) as u8;
        if supplied != computed {
            return Err(Error::ChecksumMismatch {
                input: input.to_owned(),
                supplied,
                computed,
            });
        }
    }

    Ok(result)
}

/// Decodes a Crockford Base32 value.
///
/// Byte input is read as UTF-8; invalid sequences are reported as symbols out
/// of range. Hyphens are ignored anywhere in the input. When `check_symbol` is
/// set the last non-hyphen character is the check symbol.
pub fn decode<S: AsRef<[u8]>>(input: S, check_symbol: bool) -> Result<u64> {
    let input: Cow<'_, str> = String::from_utf8_lossy(input.as_ref());
    decode_str(&input, check_symbol)
}

/// Like [`decode`], for callers that store values as `i64`.
pub fn decode_i64<S: AsRef<[u8]>>(input: S, check_symbol: bool) -> Result<i64> {
    let input = input.as_ref();
    let value = decode(input, check_symbol)?;
    i64::try_from(value).map_err(|_| Error::Overflow {
        input: String::from_utf8_lossy(input).into_owned(),
    })
}

/// Like [`decode`], but reports failure as `None`.
pub fn try_decode<S: AsRef<[u8]>>(input: S, check_symbol: bool) -> Option<u64> {
    decode(input, check_symbol)
        .inspect_err(|err| tracing::trace!(%err, "decode failed"))
        .ok()
}

/// A trait for parsing Crockford Base32 encoded values.
pub trait ParseCrockford {
    fn parse_crockford(&self, check_symbol: bool) -> Result<u64>;
}

impl ParseCrockford for str {
    fn parse_crockford(&self, check_symbol: bool) -> Result<u64> {
        decode_str(self, check_symbol)
    }
}

impl ParseCrockford for [u8] {
    fn parse_crockford(&self, check_symbol: bool) -> Result<u64> {
        decode(self, check_symbol)
    }
}

const _: () = assert!(DECODE_BASE == 1 << BITS_PER_SYMBOL);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn expected_from_char(src: u8) -> u8 {
        match src.to_ascii_uppercase() {
            b'O' => return 0,
            b'I' | b'L' => return 1,
            _ => {}
        }
        for (i, chr) in CROCKFORD_CHARS.iter().enumerate() {
            if src.to_ascii_uppercase() == *chr {
                return i as u8;
            }
        }
        INVALID
    }

    #[test]
    fn test_from_char_lut() {
        for value in 0..=255u8 {
            let expected = expected_from_char(value);
            assert_eq!(CROCKFORD_LUT[value as usize], expected, "mismatch for value {} ({})", value, value as char);
        }
    }

    #[test]
    fn test_check_lut() {
        for value in 0..=255u8 {
            let expected = match CHECK_CHARS.iter().position(|c| *c == value.to_ascii_uppercase()) {
                Some(i) => 32 + i as u8,
                None => expected_from_char(value),
            };
            assert_eq!(CHECK_LUT[value as usize], expected, "mismatch for value {} ({})", value, value as char);
        }
    }

    #[test]
    fn test_u_is_only_a_check_symbol() {
        assert_eq!(from_char('U'), None);
        assert_eq!(from_char('u'), None);
        assert_eq!(from_check_char('U'), Some(36));
        assert_eq!(from_check_char('u'), Some(36));
    }

    #[test]
    fn test_non_ascii_rejected() {
        // would alias 'O' (0x4F) if the table were indexed by the low byte
        assert_eq!(from_char('\u{014F}'), None);
        assert_eq!(from_check_char('\u{FFFD}'), None);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("0", false), Ok(0));
        assert_eq!(decode("7Z", false), Ok(255));
        assert_eq!(decode("7ZZZZZZZZZZZZ", false), Ok(i64::MAX as u64));
        assert_eq!(decode("FZZZZZZZZZZZZ", false), Ok(u64::MAX));
        assert_eq!(decode("fzzzzzzzzzzzz", false), Ok(u64::MAX));
    }

    #[test]
    fn test_decode_with_check_symbol() {
        assert_eq!(decode("00", true), Ok(0));
        assert_eq!(decode("7Z~", true), Ok(255));
        assert_eq!(decode("7ZZZZZZZZZZZZ5", true), Ok(i64::MAX as u64));
        assert_eq!(decode("14u", true), Ok(36));
    }

    #[test]
    fn test_decode_hyphens() {
        assert_eq!(decode("7-ZZZ-ZZZZZ-ZZZ-Z", false), Ok(i64::MAX as u64));
        assert_eq!(decode("7-Z-~-", true), Ok(255));
        assert_eq!(decode("-7Z", false), Ok(255));
    }

    #[test]
    fn test_decode_leading_zero_symbols() {
        assert_eq!(decode("0007Z", false), Ok(255));
        assert_eq!(decode("0000000000000000000001", false), Ok(1));
    }

    #[test]
    fn test_decode_overflow() {
        let err = decode("G000000000000", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        let err = decode("10000000000000", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode("", false), Err(Error::EmptyInput));
        assert_eq!(decode("", true), Err(Error::EmptyInput));
    }

    #[test]
    fn test_decode_only_hyphens() {
        assert_eq!(decode("---", false), Err(Error::NoDataSymbols { input: "---".into() }));
        assert_eq!(decode("-", true), Err(Error::NoDataSymbols { input: "-".into() }));
    }

    #[test]
    fn test_decode_only_check_symbol() {
        assert_eq!(decode("0-", true), Err(Error::NoDataSymbols { input: "0-".into() }));
    }

    #[test]
    fn test_decode_invalid_symbol() {
        let err = decode("7U", false).unwrap_err();
        assert_eq!(
            err,
            Error::SymbolOutOfRange {
                symbol: 'U',
                position: 2,
                input: "7U".into(),
                context: "7 » U « ".into(),
                check_symbol: false,
            }
        );
    }

    #[test]
    fn test_decode_invalid_check_symbol() {
        let err = decode("7Z#", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SymbolOutOfRange);
        assert!(matches!(err, Error::SymbolOutOfRange { symbol: '#', position: 3, check_symbol: true, .. }));
    }

    #[test]
    fn test_decode_position_counts_characters() {
        let err = decode("é7#", false).unwrap_err();
        assert!(matches!(err, Error::SymbolOutOfRange { symbol: '#', position: 3, .. }));
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        assert_eq!(
            decode("7Z0", true),
            Err(Error::ChecksumMismatch { input: "7Z0".into(), supplied: 0, computed: 33 })
        );
        assert_eq!(decode("7ZU", true).unwrap_err().kind(), ErrorKind::ChecksumMismatch);
    }

    #[test]
    fn test_decode_bytes() {
        assert_eq!(decode(b"7Z~", true), Ok(255));
        assert_eq!(decode(vec![b'1', b'0', b'0'], false), Ok(1024));
        let err = decode([b'7', 0xFF], false).unwrap_err();
        assert!(matches!(err, Error::SymbolOutOfRange { symbol: '\u{FFFD}', position: 2, .. }));
    }

    #[test]
    fn test_decode_i64() {
        assert_eq!(decode_i64("7ZZZZZZZZZZZZ", false), Ok(i64::MAX));
        assert_eq!(
            decode_i64("80000000000000", false).unwrap_err().kind(),
            ErrorKind::Overflow
        );
        assert_eq!(decode_i64("8000000000000", false).unwrap_err().kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_try_decode() {
        assert_eq!(try_decode("7Z~", true), Some(255));
        assert_eq!(try_decode("", false), None);
        assert_eq!(try_decode("7Z0", true), None);
    }

    #[test]
    fn test_parse_crockford() {
        assert_eq!("7z".parse_crockford(false), Ok(255));
        assert_eq!(b"7Z~"[..].parse_crockford(true), Ok(255));
    }
}
