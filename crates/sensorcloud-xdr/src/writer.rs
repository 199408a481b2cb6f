//! XDR encoding into a byte buffer.

use byteorder::{BigEndian, ByteOrder};

/// Encodes values into an in-memory buffer in the XDR wire format.
///
/// All numerics are written big-endian regardless of host byte order, and
/// variable-length data is zero-padded to a 4-byte boundary.
#[derive(Debug, Default)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer with a preallocated buffer.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Writes a 4-byte signed integer.
    pub fn write_int32(&mut self, value: i32) {
        let mut bytes = [0u8; 4];
        BigEndian::write_i32(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
    }

    /// Writes a 4-byte unsigned integer.
    pub fn write_uint32(&mut self, value: u32) {
        let mut bytes = [0u8; 4];
        BigEndian::write_u32(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
    }

    /// Writes an 8-byte signed integer.
    pub fn write_int64(&mut self, value: i64) {
        let mut bytes = [0u8; 8];
        BigEndian::write_i64(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
    }

    /// Writes an 8-byte unsigned integer.
    pub fn write_uint64(&mut self, value: u64) {
        let mut bytes = [0u8; 8];
        BigEndian::write_u64(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
    }

    /// Writes a 4-byte single-precision float.
    pub fn write_float32(&mut self, value: f32) {
        let mut bytes = [0u8; 4];
        BigEndian::write_f32(&mut bytes, value);
        self.buf.extend_from_slice(&bytes);
    }

    /// Writes raw bytes, zero-padded to the next 4-byte boundary when the
    /// length is not already a multiple of 4.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        if !bytes.len().is_multiple_of(4) {
            let padding = 4 - bytes.len() % 4;
            self.buf.extend(std::iter::repeat_n(0u8, padding));
        }
    }

    /// Writes an opaque block: a 4-byte length prefix followed by the bytes
    /// and alignment padding.
    ///
    /// Padding bytes are never counted in the length prefix.
    pub fn write_opaque(&mut self, bytes: &[u8]) {
        self.write_int32(bytes.len() as i32);
        self.write_bytes(bytes);
    }

    /// Writes a string as UTF-8 encoded opaque data.
    pub fn write_string(&mut self, value: &str) {
        self.write_opaque(value.as_bytes());
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the writer and returns the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numerics_are_big_endian() {
        let mut writer = XdrWriter::new();
        writer.write_int32(1);
        writer.write_uint32(0xDEAD_BEEF);
        assert_eq!(
            writer.into_bytes(),
            [0x00, 0x00, 0x00, 0x01, 0xDE, 0xAD, 0xBE, 0xEF]
        );

        let mut writer = XdrWriter::new();
        writer.write_uint64(0x0102_0304_0506_0708);
        assert_eq!(
            writer.into_bytes(),
            [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }

    #[test]
    fn test_float32_encoding() {
        let mut writer = XdrWriter::new();
        writer.write_float32(1.0);
        assert_eq!(writer.into_bytes(), 1.0f32.to_be_bytes());
    }

    #[test]
    fn test_opaque_pads_to_four_bytes() {
        let mut writer = XdrWriter::new();
        writer.write_opaque(b"abc");
        // length prefix of 3, three bytes, exactly one padding byte
        assert_eq!(writer.into_bytes(), [0, 0, 0, 3, b'a', b'b', b'c', 0]);
    }

    #[test]
    fn test_opaque_aligned_length_gets_no_padding() {
        let mut writer = XdrWriter::new();
        writer.write_opaque(b"abcd");
        assert_eq!(writer.into_bytes(), [0, 0, 0, 4, b'a', b'b', b'c', b'd']);
    }

    #[test]
    fn test_empty_opaque() {
        let mut writer = XdrWriter::new();
        writer.write_opaque(b"");
        assert_eq!(writer.into_bytes(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_string_is_utf8_opaque() {
        let mut writer = XdrWriter::new();
        writer.write_string("hi");
        assert_eq!(writer.into_bytes(), [0, 0, 0, 2, b'h', b'i', 0, 0]);
    }
}
