//! XDR decoding from a byte slice.

use byteorder::{BigEndian, ByteOrder};

use crate::error::XdrError;

/// Decodes values from a borrowed byte slice in the XDR wire format.
///
/// The reader keeps a cursor into the slice and advances it as values are
/// consumed. Decode failures are terminal: the cursor position after an
/// error is unspecified.
#[derive(Debug, Clone)]
pub struct XdrReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> XdrReader<'a> {
    /// Creates a reader over the given bytes.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Reads a 4-byte signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`XdrError::UnexpectedEndOfData`] if fewer than 4 bytes remain.
    pub fn read_int32(&mut self) -> Result<i32, XdrError> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    /// Reads a 4-byte unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`XdrError::UnexpectedEndOfData`] if fewer than 4 bytes remain.
    pub fn read_uint32(&mut self) -> Result<u32, XdrError> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    /// Reads an 8-byte signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`XdrError::UnexpectedEndOfData`] if fewer than 8 bytes remain.
    pub fn read_int64(&mut self) -> Result<i64, XdrError> {
        Ok(BigEndian::read_i64(self.take(8)?))
    }

    /// Reads an 8-byte unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`XdrError::UnexpectedEndOfData`] if fewer than 8 bytes remain.
    pub fn read_uint64(&mut self) -> Result<u64, XdrError> {
        Ok(BigEndian::read_u64(self.take(8)?))
    }

    /// Reads a 4-byte single-precision float.
    ///
    /// # Errors
    ///
    /// Returns [`XdrError::UnexpectedEndOfData`] if fewer than 4 bytes remain.
    pub fn read_float32(&mut self) -> Result<f32, XdrError> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    /// Reads exactly `count` bytes, then consumes and discards the alignment
    /// padding that follows when `count` is not a multiple of 4.
    ///
    /// # Errors
    ///
    /// Returns [`XdrError::UnexpectedEndOfData`] if fewer than `count` bytes
    /// (plus padding) remain.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], XdrError> {
        let bytes = self.take(count)?;
        if !count.is_multiple_of(4) {
            self.take(4 - count % 4)?;
        }
        Ok(bytes)
    }

    /// Reads an opaque block: a 4-byte length prefix followed by that many
    /// bytes and alignment padding.
    ///
    /// The length is validated against `limit` before any of the payload is
    /// consumed, so a corrupt or hostile length field cannot trigger an
    /// over-sized read.
    ///
    /// # Errors
    ///
    /// Returns [`XdrError::LengthLimitExceeded`] if the declared length
    /// exceeds `limit`, [`XdrError::InvalidLength`] if it is negative, or
    /// [`XdrError::UnexpectedEndOfData`] if the payload is truncated.
    pub fn read_opaque(&mut self, limit: usize) -> Result<&'a [u8], XdrError> {
        let declared = self.read_int32()?;
        if declared < 0 {
            return Err(XdrError::InvalidLength { length: declared });
        }
        let length = declared as usize;
        if length > limit {
            return Err(XdrError::LengthLimitExceeded {
                limit,
                actual: length,
            });
        }
        self.read_bytes(length)
    }

    /// Reads a UTF-8 string encoded as opaque data.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`XdrReader::read_opaque`], plus
    /// [`XdrError::InvalidUtf8`] when the payload is not valid UTF-8.
    pub fn read_string(&mut self, limit: usize) -> Result<String, XdrError> {
        let bytes = self.read_opaque(limit)?;
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if every byte has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], XdrError> {
        if self.remaining() < count {
            return Err(XdrError::UnexpectedEndOfData);
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::XdrWriter;

    #[test]
    fn test_numeric_round_trips() {
        let mut writer = XdrWriter::new();
        writer.write_int32(-42);
        writer.write_uint32(u32::MAX);
        writer.write_int64(i64::MIN);
        writer.write_uint64(u64::MAX);
        writer.write_float32(-1.25);
        let bytes = writer.into_bytes();

        let mut reader = XdrReader::new(&bytes);
        assert_eq!(reader.read_int32().unwrap(), -42);
        assert_eq!(reader.read_uint32().unwrap(), u32::MAX);
        assert_eq!(reader.read_int64().unwrap(), i64::MIN);
        assert_eq!(reader.read_uint64().unwrap(), u64::MAX);
        assert_eq!(reader.read_float32().unwrap(), -1.25);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_opaque_round_trips_with_unaligned_lengths() {
        for len in 0..=9usize {
            let payload: Vec<u8> = (0..len as u8).collect();
            let mut writer = XdrWriter::new();
            writer.write_opaque(&payload);
            let bytes = writer.into_bytes();

            // encoded size is always 4 (prefix) + payload rounded up to 4
            assert_eq!(bytes.len(), 4 + len.next_multiple_of(4));

            let mut reader = XdrReader::new(&bytes);
            assert_eq!(reader.read_opaque(100).unwrap(), payload.as_slice());
            assert!(reader.is_empty(), "padding not consumed for len {len}");
        }
    }

    #[test]
    fn test_string_round_trip() {
        let mut writer = XdrWriter::new();
        writer.write_string("héllo wörld");
        let bytes = writer.into_bytes();

        let mut reader = XdrReader::new(&bytes);
        assert_eq!(reader.read_string(100).unwrap(), "héllo wörld");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_padding_is_skipped_between_values() {
        let mut writer = XdrWriter::new();
        writer.write_opaque(b"abc");
        writer.write_int32(7);
        let bytes = writer.into_bytes();

        let mut reader = XdrReader::new(&bytes);
        assert_eq!(reader.read_opaque(10).unwrap(), b"abc");
        assert_eq!(reader.read_int32().unwrap(), 7);
    }

    #[test]
    fn test_limit_enforced_without_consuming_payload() {
        let mut writer = XdrWriter::new();
        writer.write_opaque(&[0xAB; 11]);
        let bytes = writer.into_bytes();

        let mut reader = XdrReader::new(&bytes);
        assert_eq!(
            reader.read_opaque(10),
            Err(XdrError::LengthLimitExceeded {
                limit: 10,
                actual: 11,
            })
        );
        // only the 4-byte length prefix was consumed
        assert_eq!(reader.remaining(), bytes.len() - 4);
    }

    #[test]
    fn test_negative_length_rejected() {
        let mut writer = XdrWriter::new();
        writer.write_int32(-1);
        let bytes = writer.into_bytes();

        let mut reader = XdrReader::new(&bytes);
        assert_eq!(
            reader.read_opaque(10),
            Err(XdrError::InvalidLength { length: -1 })
        );
    }

    #[test]
    fn test_truncated_reads_fail() {
        let mut reader = XdrReader::new(&[0, 0]);
        assert_eq!(reader.read_int32(), Err(XdrError::UnexpectedEndOfData));

        let mut reader = XdrReader::new(&[0, 0, 0, 0, 1]);
        assert_eq!(reader.read_uint64(), Err(XdrError::UnexpectedEndOfData));

        let mut reader = XdrReader::new(&[1, 2, 3]);
        assert_eq!(reader.read_bytes(4), Err(XdrError::UnexpectedEndOfData));
    }

    #[test]
    fn test_truncated_opaque_payload_fails() {
        // declared length of 8, only 3 payload bytes present
        let mut reader = XdrReader::new(&[0, 0, 0, 8, 1, 2, 3]);
        assert_eq!(reader.read_opaque(100), Err(XdrError::UnexpectedEndOfData));
    }

    #[test]
    fn test_invalid_utf8_string() {
        let mut writer = XdrWriter::new();
        writer.write_opaque(&[0xFF, 0xFE]);
        let bytes = writer.into_bytes();

        let mut reader = XdrReader::new(&bytes);
        assert!(matches!(
            reader.read_string(10),
            Err(XdrError::InvalidUtf8(_))
        ));
    }
}
