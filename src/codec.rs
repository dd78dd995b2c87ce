//! Binary primitives for the `.osr` wire format.
//!
//! All integers are little-endian. Strings carry a presence byte (`0x00`
//! for an absent string, `0x0b` for a present one) followed by a ULEB128
//! byte length and that many UTF-8 bytes. An absent string and an empty
//! string are distinct values and both survive a round trip.
//!
//! [`ByteReader`] is a borrowing cursor over a byte slice; the `write_*`
//! functions append to a `Vec<u8>`.

use crate::error::{ReplayError, Result};

/// Presence byte marking an absent string.
const STRING_ABSENT: u8 = 0x00;
/// Presence byte marking a present, length-prefixed string.
const STRING_PRESENT: u8 = 0x0b;

/// Borrowing cursor over replay bytes.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Wrap a byte slice, starting at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current offset from the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(ReplayError::TruncatedInput {
                expected: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.take(N)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(slice);
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    /// Read a boolean byte. Zero is false, anything else is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a ULEB128-encoded unsigned integer.
    pub fn read_uleb128(&mut self) -> Result<u64> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let byte = self.read_u8()?;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift >= 64 {
                return Err(ReplayError::MalformedString(
                    "unterminated ULEB128 length".into(),
                ));
            }
        }
    }

    /// Read a presence-prefixed string.
    ///
    /// Returns `None` for an absent string. Fails with
    /// [`ReplayError::MalformedString`] when the presence byte is neither
    /// `0x00` nor `0x0b`, when the declared length overruns the input, or
    /// when the bytes are not valid UTF-8.
    pub fn read_string(&mut self) -> Result<Option<String>> {
        match self.read_u8()? {
            STRING_ABSENT => Ok(None),
            STRING_PRESENT => {
                let declared = self.read_uleb128()?;
                let len = usize::try_from(declared).map_err(|_| {
                    ReplayError::MalformedString(format!(
                        "declared length {declared} is not addressable"
                    ))
                })?;
                if len > self.remaining() {
                    return Err(ReplayError::MalformedString(format!(
                        "declared length {len} exceeds {} remaining byte(s)",
                        self.remaining()
                    )));
                }
                let bytes = self.take(len)?;
                let text = std::str::from_utf8(bytes).map_err(|e| {
                    ReplayError::MalformedString(format!("invalid UTF-8: {e}"))
                })?;
                Ok(Some(text.to_owned()))
            }
            other => Err(ReplayError::MalformedString(format!(
                "invalid presence byte {other:#04x}"
            ))),
        }
    }

    /// Read `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.take(len)?.to_vec())
    }
}

pub fn write_u8(buf: &mut Vec<u8>, value: u8) {
    buf.push(value);
}

pub fn write_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_i64(buf: &mut Vec<u8>, value: i64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_bool(buf: &mut Vec<u8>, value: bool) {
    buf.push(u8::from(value));
}

/// Append a ULEB128-encoded unsigned integer.
pub fn write_uleb128(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            return;
        }
    }
}

/// Append a presence-prefixed string. `None` writes the single absent byte.
pub fn write_string(buf: &mut Vec<u8>, value: Option<&str>) {
    match value {
        None => buf.push(STRING_ABSENT),
        Some(text) => {
            buf.push(STRING_PRESENT);
            write_uleb128(buf, text.len() as u64);
            buf.extend_from_slice(text.as_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_uleb128_known_encodings() {
        for (value, bytes) in [
            (0u64, vec![0x00]),
            (1, vec![0x01]),
            (127, vec![0x7f]),
            (128, vec![0x80, 0x01]),
            (300, vec![0xac, 0x02]),
            (624_485, vec![0xe5, 0x8e, 0x26]),
        ] {
            let mut buf = Vec::new();
            write_uleb128(&mut buf, value);
            assert_eq!(buf, bytes, "encoding of {value}");
            assert_eq!(ByteReader::new(&buf).read_uleb128().unwrap(), value);
        }
    }

    #[test]
    fn test_string_encodings() {
        let mut buf = Vec::new();
        write_string(&mut buf, None);
        assert_eq!(buf, [0x00]);

        let mut buf = Vec::new();
        write_string(&mut buf, Some(""));
        assert_eq!(buf, [0x0b, 0x00]);

        let mut buf = Vec::new();
        write_string(&mut buf, Some("osu"));
        assert_eq!(buf, [0x0b, 0x03, b'o', b's', b'u']);
    }

    #[test]
    fn test_absent_and_empty_strings_are_distinct() {
        let absent = ByteReader::new(&[0x00]).read_string().unwrap();
        let empty = ByteReader::new(&[0x0b, 0x00]).read_string().unwrap();
        assert_eq!(absent, None);
        assert_eq!(empty, Some(String::new()));
    }

    #[test]
    fn test_invalid_presence_byte() {
        let result = ByteReader::new(&[0x0c, 0x00]).read_string();
        assert!(matches!(result, Err(ReplayError::MalformedString(_))));
    }

    #[test]
    fn test_string_length_overrun() {
        // Declares 10 bytes but only 2 follow.
        let result = ByteReader::new(&[0x0b, 0x0a, b'h', b'i']).read_string();
        assert!(matches!(result, Err(ReplayError::MalformedString(_))));
    }

    #[test]
    fn test_string_invalid_utf8() {
        let result = ByteReader::new(&[0x0b, 0x02, 0xff, 0xfe]).read_string();
        assert!(matches!(result, Err(ReplayError::MalformedString(_))));
    }

    #[test]
    fn test_truncated_integer_reports_sizes() {
        let mut reader = ByteReader::new(&[0x01, 0x02]);
        match reader.read_u32() {
            Err(ReplayError::TruncatedInput {
                expected,
                remaining,
            }) => {
                assert_eq!(expected, 4);
                assert_eq!(remaining, 2);
            }
            other => panic!("expected TruncatedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_uleb128() {
        let bytes = [0x80u8; 16];
        let result = ByteReader::new(&bytes).read_uleb128();
        assert!(matches!(result, Err(ReplayError::MalformedString(_))));
    }

    #[test]
    fn test_reader_position_advances() {
        let mut reader = ByteReader::new(&[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(reader.position(), 0);
        reader.read_u16().unwrap();
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.remaining(), 2);
    }

    proptest! {
        #[test]
        fn prop_integers_round_trip(a: u16, b: u32, c: u64, d: i64) {
            let mut buf = Vec::new();
            write_u16(&mut buf, a);
            write_u32(&mut buf, b);
            write_u64(&mut buf, c);
            write_i64(&mut buf, d);

            let mut reader = ByteReader::new(&buf);
            prop_assert_eq!(reader.read_u16().unwrap(), a);
            prop_assert_eq!(reader.read_u32().unwrap(), b);
            prop_assert_eq!(reader.read_u64().unwrap(), c);
            prop_assert_eq!(reader.read_i64().unwrap(), d);
            prop_assert_eq!(reader.remaining(), 0);
        }

        #[test]
        fn prop_uleb128_round_trips(value: u64) {
            let mut buf = Vec::new();
            write_uleb128(&mut buf, value);
            let mut reader = ByteReader::new(&buf);
            prop_assert_eq!(reader.read_uleb128().unwrap(), value);
            prop_assert_eq!(reader.remaining(), 0);
        }

        #[test]
        fn prop_strings_round_trip(value in proptest::option::of(".*")) {
            let mut buf = Vec::new();
            write_string(&mut buf, value.as_deref());
            let mut reader = ByteReader::new(&buf);
            prop_assert_eq!(reader.read_string().unwrap(), value);
            prop_assert_eq!(reader.remaining(), 0);
        }
    }
}
