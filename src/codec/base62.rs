//! Numeral-base transcoder
//!
//! Reinterprets a bitstring as an unbounded big-endian integer and writes
//! it in base 62. Leading zero bits do not survive the trip: callers pad the
//! decoded bits back to their field width.

use num_bigint::BigUint;
use num_traits::Zero;

use super::bits::BitString;
use super::error::{CodecError, Result};

/// Digit alphabet; position defines the digit value
pub const BASE62_ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Token for the integer zero
pub const ZERO_TOKEN: &str = "0";

const BASE: u32 = 62;

fn digit_value(ch: char) -> Option<u8> {
    match ch {
        '0'..='9' => Some(ch as u8 - b'0'),
        'A'..='Z' => Some(ch as u8 - b'A' + 10),
        'a'..='z' => Some(ch as u8 - b'a' + 36),
        _ => None,
    }
}

/// Encode bits as a base-62 token, most significant digit first
pub fn encode(bits: &BitString) -> String {
    let significant = bits.without_leading_zeros();
    if significant.is_empty() {
        return ZERO_TOKEN.to_string();
    }

    let binary_digits: Vec<u8> = significant.iter().map(|&bit| bit as u8).collect();
    let value = BigUint::from_radix_be(&binary_digits, 2).unwrap_or_else(BigUint::zero);

    value
        .to_radix_be(BASE)
        .into_iter()
        .map(|digit| BASE62_ALPHABET[digit as usize] as char)
        .collect()
}

/// Decode a base-62 token into bits with no fixed width
///
/// Surrounding whitespace is ignored and an empty token reads as zero.
pub fn decode(token: &str) -> Result<BitString> {
    let clean = token.trim();
    if clean.is_empty() {
        return Ok(BitString::zero());
    }

    let digits = clean
        .chars()
        .enumerate()
        .map(|(position, ch)| digit_value(ch).ok_or(CodecError::InvalidDigit { ch, position }))
        .collect::<Result<Vec<u8>>>()?;

    let value = BigUint::from_radix_be(&digits, BASE).unwrap_or_else(BigUint::zero);
    if value.is_zero() {
        return Ok(BitString::zero());
    }

    Ok(value.to_radix_be(2).into_iter().map(|digit| digit == 1).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_encode_small_values() {
        assert_eq!(encode(&bits("1")), "1");
        assert_eq!(encode(&bits("1010")), "A");
        assert_eq!(encode(&bits("111101")), "z");
        // 62 rolls over to two digits
        assert_eq!(encode(&bits("111110")), "10");
    }

    #[test]
    fn test_zero_collapses() {
        assert_eq!(encode(&bits("0000")), "0");
        assert_eq!(encode(&BitString::new()), "0");
        assert_eq!(decode("0").unwrap().to_string(), "0");
        assert_eq!(decode("000").unwrap().to_string(), "0");
    }

    #[test]
    fn test_leading_zeros_are_dropped() {
        let decoded = decode(&encode(&bits("0001011"))).unwrap();
        assert_eq!(decoded.to_string(), "1011");
    }

    #[test]
    fn test_wide_values_round_trip() {
        // 256 bits, well past native integer width
        let source: BitString = (0..256).map(|i| i % 3 == 0 || i % 7 == 0).collect();
        let token = encode(&source);
        assert_eq!(decode(&token).unwrap(), source);
        assert!(token.len() < 50);
    }

    #[test]
    fn test_decode_alphabet_boundaries() {
        assert_eq!(decode("9").unwrap().to_string(), "1001");
        assert_eq!(decode("A").unwrap().to_string(), "1010");
        assert_eq!(decode("Z").unwrap().to_string(), "100011");
        assert_eq!(decode("a").unwrap().to_string(), "100100");
        assert_eq!(decode("z").unwrap().to_string(), "111101");
    }

    #[test]
    fn test_decode_trims_whitespace() {
        assert_eq!(decode("  A\n").unwrap().to_string(), "1010");
        assert_eq!(decode("").unwrap().to_string(), "0");
    }

    #[test]
    fn test_invalid_digit() {
        assert_eq!(decode("1-2"), Err(CodecError::InvalidDigit { ch: '-', position: 1 }));
        assert_eq!(decode("é"), Err(CodecError::InvalidDigit { ch: 'é', position: 0 }));
    }
}
