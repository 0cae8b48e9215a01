//! Parcel encoder.

use crate::error::{EncodeError, EncodeResult};
use crate::parcel::Parcelable;

const INITIAL_CAPACITY: usize = 256;

/// Writer encodes parcel data into a growable little-endian buffer.
///
/// Writes append in call order; the sequence of write calls is the
/// wire schema and the matching [`Reader`](crate::Reader) must read
/// fields in exactly the same order.
///
/// [`export`](Writer::export) takes a non-destructive snapshot of the
/// bytes written so far: the writer stays usable, later writes append,
/// and a later export returns the longer buffer. Use
/// [`into_bytes`](Writer::into_bytes) to finish without copying, or
/// [`reset`](Writer::reset) to start a fresh message.
pub struct Writer {
    buffer: Vec<u8>,
}

impl Writer {
    /// Creates a new writer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates a new writer with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the current write position (same as [`len`](Writer::len)).
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the encoded bytes as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns an exact-length copy of the bytes written so far.
    pub fn export(&self) -> Vec<u8> {
        self.buffer.clone()
    }

    /// Consumes the writer and returns the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Resets the writer for reuse.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> EncodeResult<()> {
        self.buffer.push(value);
        Ok(())
    }

    /// Writes a single signed byte.
    pub fn write_i8(&mut self, value: i8) -> EncodeResult<()> {
        self.write_u8(value as u8)
    }

    /// Writes a 16-bit unsigned integer (little-endian).
    pub fn write_u16(&mut self, value: u16) -> EncodeResult<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a 16-bit signed integer (little-endian).
    pub fn write_i16(&mut self, value: i16) -> EncodeResult<()> {
        self.write_u16(value as u16)
    }

    /// Writes a 32-bit unsigned integer (little-endian).
    pub fn write_u32(&mut self, value: u32) -> EncodeResult<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a 32-bit signed integer (little-endian).
    pub fn write_i32(&mut self, value: i32) -> EncodeResult<()> {
        self.write_u32(value as u32)
    }

    /// Writes a 64-bit unsigned integer (little-endian).
    pub fn write_u64(&mut self, value: u64) -> EncodeResult<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a 64-bit signed integer (little-endian).
    pub fn write_i64(&mut self, value: i64) -> EncodeResult<()> {
        self.write_u64(value as u64)
    }

    /// Writes a boolean as one byte, 1 for true and 0 for false.
    pub fn write_bool(&mut self, value: bool) -> EncodeResult<()> {
        self.write_u8(if value { 1 } else { 0 })
    }

    /// Writes a string: u16 length (= UTF-8 byte length + 1), the
    /// UTF-8 bytes, then one zero terminator byte.
    ///
    /// Rejects strings whose byte length + 1 exceeds the u16 prefix.
    pub fn write_string(&mut self, value: &str) -> EncodeResult<()> {
        let len = value.len();
        if len + 1 > u16::MAX as usize {
            return Err(EncodeError::StringTooLong { len });
        }
        self.write_u16((len + 1) as u16)?;
        self.buffer.extend_from_slice(value.as_bytes());
        self.buffer.push(0);
        Ok(())
    }

    /// Writes a blob: u32 byte count then the raw bytes.
    ///
    /// A partial write is expressed by slicing the input.
    pub fn write_blob(&mut self, bytes: &[u8]) -> EncodeResult<()> {
        if bytes.len() > u32::MAX as usize {
            return Err(EncodeError::BlobTooLarge { len: bytes.len() });
        }
        self.write_u32(bytes.len() as u32)?;
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    /// Writes an array: u16 element count, then each element through
    /// `element_writer`.
    pub fn write_array<T>(
        &mut self,
        items: &[T],
        mut element_writer: impl FnMut(&mut Self, &T) -> EncodeResult<()>,
    ) -> EncodeResult<()> {
        if items.len() > u16::MAX as usize {
            return Err(EncodeError::ArrayTooLarge { len: items.len() });
        }
        self.write_u16(items.len() as u16)?;
        for item in items {
            element_writer(self, item)?;
        }
        Ok(())
    }

    /// Writes an array of bytes (u16 count, one byte each).
    pub fn write_u8_array(&mut self, items: &[u8]) -> EncodeResult<()> {
        self.write_array(items, |w, v| w.write_u8(*v))
    }

    /// Writes an array of 16-bit unsigned integers.
    pub fn write_u16_array(&mut self, items: &[u16]) -> EncodeResult<()> {
        self.write_array(items, |w, v| w.write_u16(*v))
    }

    /// Writes an array of 32-bit unsigned integers.
    pub fn write_u32_array(&mut self, items: &[u32]) -> EncodeResult<()> {
        self.write_array(items, |w, v| w.write_u32(*v))
    }

    /// Writes an array of 64-bit unsigned integers.
    pub fn write_u64_array(&mut self, items: &[u64]) -> EncodeResult<()> {
        self.write_array(items, |w, v| w.write_u64(*v))
    }

    /// Writes an array of booleans.
    pub fn write_bool_array(&mut self, items: &[bool]) -> EncodeResult<()> {
        self.write_array(items, |w, v| w.write_bool(*v))
    }

    /// Writes an array of strings.
    pub fn write_string_array<S: AsRef<str>>(&mut self, items: &[S]) -> EncodeResult<()> {
        self.write_array(items, |w, v| w.write_string(v.as_ref()))
    }

    /// Writes an array of blobs (u16 count, then each blob).
    pub fn write_blob_array<B: AsRef<[u8]>>(&mut self, items: &[B]) -> EncodeResult<()> {
        self.write_array(items, |w, v| w.write_blob(v.as_ref()))
    }

    /// Writes a record by delegating to its own encode method.
    ///
    /// No prefix is written; a record is self-delimiting through the
    /// layout of its fields.
    pub fn write_record(&mut self, record: &impl Parcelable) -> EncodeResult<()> {
        record.encode(self)
    }

    /// Writes an array of records (u16 count, then each record).
    pub fn write_record_array<T: Parcelable>(&mut self, records: &[T]) -> EncodeResult<()> {
        self.write_array(records, |w, r| r.encode(w))
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_scalars() {
        let mut writer = Writer::new();
        writer.write_u8(0xab).unwrap();
        writer.write_u16(0x1234).unwrap();
        writer.write_u32(0xdead_beef).unwrap();
        writer.write_u64(0x0102_0304_0506_0708).unwrap();
        writer.write_bool(true).unwrap();
        assert_eq!(
            writer.as_bytes(),
            &[
                0xab, // u8
                0x34, 0x12, // u16 LE
                0xef, 0xbe, 0xad, 0xde, // u32 LE
                0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, // u64 LE
                0x01, // bool
            ]
        );
    }

    #[test]
    fn test_write_signed_shares_layout() {
        let mut signed = Writer::new();
        signed.write_i32(-1).unwrap();
        assert_eq!(signed.as_bytes(), &[0xff, 0xff, 0xff, 0xff]);

        let mut unsigned = Writer::new();
        unsigned.write_u32(u32::MAX).unwrap();
        assert_eq!(signed.as_bytes(), unsigned.as_bytes());
    }

    #[test]
    fn test_write_string() {
        let mut writer = Writer::new();
        writer.write_string("hello").unwrap();
        assert_eq!(
            writer.as_bytes(),
            &[6, 0, b'h', b'e', b'l', b'l', b'o', 0]
        );
    }

    #[test]
    fn test_write_empty_string() {
        let mut writer = Writer::new();
        writer.write_string("").unwrap();
        assert_eq!(writer.as_bytes(), &[1, 0, 0]);
    }

    #[test]
    fn test_write_string_too_long() {
        let big = "x".repeat(u16::MAX as usize);
        let mut writer = Writer::new();
        assert_eq!(
            writer.write_string(&big),
            Err(EncodeError::StringTooLong { len: big.len() })
        );
    }

    #[test]
    fn test_write_blob() {
        let mut writer = Writer::new();
        writer.write_blob(&[0xde, 0xad]).unwrap();
        assert_eq!(writer.as_bytes(), &[2, 0, 0, 0, 0xde, 0xad]);
    }

    #[test]
    fn test_write_blob_array() {
        let mut writer = Writer::new();
        writer
            .write_blob_array(&[vec![1u8, 2], vec![3u8]])
            .unwrap();
        assert_eq!(
            writer.as_bytes(),
            &[2, 0, 2, 0, 0, 0, 1, 2, 1, 0, 0, 0, 3]
        );
    }

    #[test]
    fn test_write_u32_array() {
        let mut writer = Writer::new();
        writer.write_u32_array(&[1, 2]).unwrap();
        assert_eq!(
            writer.as_bytes(),
            &[2, 0, 1, 0, 0, 0, 2, 0, 0, 0]
        );
    }

    #[test]
    fn test_export_is_snapshot() {
        let mut writer = Writer::new();
        writer.write_u16(7).unwrap();
        let first = writer.export();
        let second = writer.export();
        assert_eq!(first, second);

        writer.write_u8(9).unwrap();
        let third = writer.export();
        assert_eq!(&third[..2], &first[..]);
        assert_eq!(third.len(), first.len() + 1);
    }

    #[test]
    fn test_reset() {
        let mut writer = Writer::new();
        writer.write_u64(42).unwrap();
        writer.reset();
        assert!(writer.is_empty());
        assert_eq!(writer.position(), 0);
    }
}
