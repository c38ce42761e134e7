//! Byte and hexadecimal encodings of big integers, in the Station's dialect.
//!
//! The firmware's login script does not use standard fixed-width SRP
//! padding. Two conventions must be matched bit-for-bit:
//!
//! * an integer wider than 256 bytes loses exactly its leading byte
//!   (an off-by-one the firmware relies on, not a truncation);
//! * hexadecimal text is padded to even length with a leading zero nibble
//!   before any hashing step decodes it back into bytes.
//!
//! 固件的登录脚本并未使用标准的定宽 SRP 填充。以下两个约定必须逐位复刻：
//!
//! * 宽于 256 字节的整数恰好丢弃其首字节（固件依赖的差一行为，并非截断）；
//! * 十六进制文本在被哈希步骤解码回字节之前，用前导零半字节填充到偶数长度。

use crate::error::ProtocolError;
use num_bigint::BigUint;

/// Width cap, in bytes, applied to public-value encodings.
pub const PUBLIC_VALUE_WIDTH: usize = 256;

/// Minimal big-endian bytes of `value`, with the leading byte dropped when
/// the representation exceeds [`PUBLIC_VALUE_WIDTH`].
pub fn to_padded_bytes(value: &BigUint) -> Vec<u8> {
    let mut bytes = value.to_bytes_be();
    if bytes.len() > PUBLIC_VALUE_WIDTH {
        // Exactly one byte, no matter how far over the cap.
        // 无论超出多少，都恰好丢弃一个字节。
        bytes.remove(0);
    }
    bytes
}

/// Minimal lowercase hex of `value`, zero-prefixed to even length.
pub fn to_even_hex(value: &BigUint) -> String {
    pad_even(value.to_str_radix(16))
}

/// Normalizes hex text received off the wire: lowercase, even length.
pub fn normalize_hex(text: &str) -> String {
    pad_even(text.to_ascii_lowercase())
}

/// Decodes hex text into bytes after normalization.
pub fn decode_hex(text: &str, field: &'static str) -> Result<Vec<u8>, ProtocolError> {
    hex::decode(normalize_hex(text)).map_err(|_| ProtocolError::InvalidHex { field })
}

/// Interprets hex text as a big integer.
pub fn hex_to_uint(text: &str, field: &'static str) -> Result<BigUint, ProtocolError> {
    BigUint::parse_bytes(normalize_hex(text).as_bytes(), 16)
        .ok_or(ProtocolError::InvalidHex { field })
}

fn pad_even(mut text: String) -> String {
    if text.len() % 2 == 1 {
        text.insert(0, '0');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_at_width_cap_is_unchanged() {
        let value = BigUint::from_bytes_be(&[0xffu8; PUBLIC_VALUE_WIDTH]);
        assert_eq!(to_padded_bytes(&value), vec![0xffu8; PUBLIC_VALUE_WIDTH]);
    }

    #[test]
    fn encoding_over_width_cap_drops_exactly_one_leading_byte() {
        let mut raw = vec![0xabu8];
        raw.extend_from_slice(&[0x11u8; PUBLIC_VALUE_WIDTH]);
        let value = BigUint::from_bytes_be(&raw);
        let encoded = to_padded_bytes(&value);
        assert_eq!(encoded.len(), PUBLIC_VALUE_WIDTH);
        assert_eq!(encoded, raw[1..]);
    }

    #[test]
    fn small_encoding_is_minimal() {
        let value = BigUint::from(0x0102u32);
        assert_eq!(to_padded_bytes(&value), vec![0x01, 0x02]);
    }

    #[test]
    fn odd_hex_gains_leading_zero() {
        let value = BigUint::from(0xabcu32);
        assert_eq!(to_even_hex(&value), "0abc");
        assert_eq!(normalize_hex("ABC"), "0abc");
        assert_eq!(normalize_hex("abcd"), "abcd");
    }

    #[test]
    fn decode_is_inverse_for_encoder_output() {
        let value = BigUint::parse_bytes(b"deadbeef0123", 16).unwrap();
        let bytes = decode_hex(&to_even_hex(&value), "test").unwrap();
        assert_eq!(BigUint::from_bytes_be(&bytes), value);
    }

    #[test]
    fn bad_hex_is_a_protocol_error() {
        let err = hex_to_uint("not-hex", "B").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidHex { field: "B" }));
    }
}
