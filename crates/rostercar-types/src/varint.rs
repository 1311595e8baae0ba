//! Unsigned LEB128 varints, as used by protobuf and by CAR frame prefixes.

use crate::error::TypeError;

/// Append `value` as a varint.
pub fn encode(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value > 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Number of bytes [`encode`] writes for `value`.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Decode a varint from the front of `data`. Returns (value, bytes_consumed).
pub fn decode(data: &[u8]) -> Result<(u64, usize), TypeError> {
    let mut value: u64 = 0;
    let mut shift = 0;
    for (i, &byte) in data.iter().enumerate() {
        if shift == 63 && byte > 1 {
            return Err(TypeError::VarintOverflow);
        }
        value |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
        if shift > 63 {
            return Err(TypeError::VarintOverflow);
        }
    }
    Err(TypeError::TruncatedVarint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn small_value_is_one_byte() {
        let mut buf = Vec::new();
        encode(&mut buf, 42);
        assert_eq!(buf, vec![42]);
        assert_eq!(decode(&buf).unwrap(), (42, 1));
    }

    #[test]
    fn multi_byte_value() {
        let mut buf = Vec::new();
        encode(&mut buf, 300);
        assert_eq!(buf, vec![0xac, 0x02]);
        assert_eq!(decode(&buf).unwrap(), (300, 2));
    }

    #[test]
    fn zero() {
        let mut buf = Vec::new();
        encode(&mut buf, 0);
        assert_eq!(buf, vec![0]);
        assert_eq!(decode(&buf).unwrap(), (0, 1));
    }

    #[test]
    fn max_u64() {
        let mut buf = Vec::new();
        encode(&mut buf, u64::MAX);
        assert_eq!(buf.len(), 10);
        assert_eq!(decode(&buf).unwrap(), (u64::MAX, 10));
    }

    #[test]
    fn truncated() {
        assert_eq!(decode(&[0x80]).unwrap_err(), TypeError::TruncatedVarint);
        assert_eq!(decode(&[]).unwrap_err(), TypeError::TruncatedVarint);
    }

    #[test]
    fn overflow() {
        let data = [0xff; 11];
        assert_eq!(decode(&data).unwrap_err(), TypeError::VarintOverflow);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        assert_eq!(decode(&[0x05, 0xff, 0xff]).unwrap(), (5, 1));
    }

    proptest! {
        #[test]
        fn encoded_len_matches_encode(value in any::<u64>()) {
            let mut buf = Vec::new();
            encode(&mut buf, value);
            prop_assert_eq!(buf.len(), encoded_len(value));
            prop_assert_eq!(decode(&buf).unwrap(), (value, buf.len()));
        }
    }
}
