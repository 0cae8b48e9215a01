//! Parcel decoder.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::DecodeError;
use crate::parcel::Parcelable;

/// Reader decodes parcel data from a borrowed binary buffer.
///
/// The reader serves exactly one decode pass: reads must follow the
/// order the producer wrote fields in, and the reader is discarded
/// afterwards.
///
/// The first bounds or format violation is retained and every later
/// read returns a type-appropriate default (0, `false`, `""`, empty
/// vec) without advancing. There is no way back to the good state;
/// callers check [`finish`](Reader::finish) once per pass and discard
/// the whole message on failure.
pub struct Reader<'a> {
    buffer: &'a [u8],
    pos: usize,
    failure: Option<DecodeError>,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over a byte slice.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            pos: 0,
            failure: None,
        }
    }

    /// Returns the current position in the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.pos
    }

    /// Returns true once the whole buffer has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos == self.buffer.len()
    }

    /// Returns the underlying buffer.
    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// Returns true if a decode failure has been recorded.
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Returns the retained decode failure, if any.
    pub fn error(&self) -> Option<&DecodeError> {
        self.failure.as_ref()
    }

    /// Returns the outcome of the decode pass so far.
    ///
    /// This is the caller-facing check: a pass that hit any violation
    /// yields the first recorded error here, so silently-zeroed data
    /// never escapes unnoticed.
    pub fn finish(&self) -> Result<(), DecodeError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Records the first failure; later ones are dropped.
    fn fail(&mut self, err: DecodeError) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    /// Takes `needed` bytes, or records a failure and takes nothing.
    fn take(&mut self, needed: usize) -> Option<&'a [u8]> {
        if self.failure.is_some() {
            return None;
        }
        if needed > self.remaining() {
            self.fail(DecodeError::truncated(needed, self.remaining()));
            return None;
        }
        let bytes = &self.buffer[self.pos..self.pos + needed];
        self.pos += needed;
        Some(bytes)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> u8 {
        self.take(1).map_or(0, |b| b[0])
    }

    /// Reads a single signed byte.
    pub fn read_i8(&mut self) -> i8 {
        self.read_u8() as i8
    }

    /// Reads a 16-bit unsigned integer (little-endian).
    pub fn read_u16(&mut self) -> u16 {
        self.take(2).map_or(0, LittleEndian::read_u16)
    }

    /// Reads a 16-bit signed integer (little-endian).
    pub fn read_i16(&mut self) -> i16 {
        self.read_u16() as i16
    }

    /// Reads a 32-bit unsigned integer (little-endian).
    pub fn read_u32(&mut self) -> u32 {
        self.take(4).map_or(0, LittleEndian::read_u32)
    }

    /// Reads a 32-bit signed integer (little-endian).
    pub fn read_i32(&mut self) -> i32 {
        self.read_u32() as i32
    }

    /// Reads a 64-bit unsigned integer (little-endian).
    pub fn read_u64(&mut self) -> u64 {
        self.take(8).map_or(0, LittleEndian::read_u64)
    }

    /// Reads a 64-bit signed integer (little-endian).
    pub fn read_i64(&mut self) -> i64 {
        self.read_u64() as i64
    }

    /// Reads a boolean (any non-zero byte is true).
    pub fn read_bool(&mut self) -> bool {
        self.read_u8() != 0
    }

    /// Reads a string: u16 length `n`, `n-1` UTF-8 bytes, one zero
    /// terminator.
    ///
    /// Requires `n > 0`, `n` bytes remaining, and a zero byte at the
    /// end; any violation records a failure and returns `""` without
    /// advancing past the length prefix. Invalid UTF-8 inside a
    /// well-terminated string decodes lossily.
    pub fn read_string(&mut self) -> String {
        let n = self.read_u16() as usize;
        if self.failure.is_some() {
            return String::new();
        }
        if n == 0 {
            self.fail(DecodeError::MalformedString { at: self.pos });
            return String::new();
        }
        if n > self.remaining() {
            self.fail(DecodeError::truncated(n, self.remaining()));
            return String::new();
        }
        if self.buffer[self.pos + n - 1] != 0 {
            self.fail(DecodeError::MalformedString {
                at: self.pos + n - 1,
            });
            return String::new();
        }
        let result = String::from_utf8_lossy(&self.buffer[self.pos..self.pos + n - 1]).into_owned();
        self.pos += n;
        result
    }

    /// Reads a blob: u32 byte count then the raw bytes.
    ///
    /// The claimed length is checked against the remaining input
    /// before anything is allocated, so a hostile count cannot force
    /// an oversized allocation.
    pub fn read_blob(&mut self) -> Vec<u8> {
        if self.failure.is_some() {
            return Vec::new();
        }
        let len = self.read_u32() as usize;
        if self.failure.is_some() {
            return Vec::new();
        }
        if len > self.remaining() {
            self.fail(DecodeError::truncated(len, self.remaining()));
            return Vec::new();
        }
        let mut value = Vec::new();
        if value.try_reserve_exact(len).is_err() {
            self.fail(DecodeError::AllocationFailure { requested: len });
            return Vec::new();
        }
        value.extend_from_slice(&self.buffer[self.pos..self.pos + len]);
        self.pos += len;
        value
    }

    /// Reads an array: u16 element count, then each element through
    /// `element_reader`.
    ///
    /// The result always has `count` slots. From the first failure on,
    /// remaining elements are not read and their slots stay at
    /// `T::default()`.
    pub fn read_array<T: Default>(
        &mut self,
        mut element_reader: impl FnMut(&mut Self) -> T,
    ) -> Vec<T> {
        let len = self.read_u16() as usize;
        if self.failure.is_some() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(len);
        out.resize_with(len, T::default);
        for slot in &mut out {
            if self.failure.is_some() {
                break;
            }
            let value = element_reader(self);
            if self.failure.is_none() {
                *slot = value;
            }
        }
        out
    }

    /// Reads an array of bytes (u16 count, one byte each).
    pub fn read_u8_array(&mut self) -> Vec<u8> {
        self.read_array(|r| r.read_u8())
    }

    /// Reads an array of 16-bit unsigned integers.
    pub fn read_u16_array(&mut self) -> Vec<u16> {
        self.read_array(|r| r.read_u16())
    }

    /// Reads an array of 32-bit unsigned integers.
    pub fn read_u32_array(&mut self) -> Vec<u32> {
        self.read_array(|r| r.read_u32())
    }

    /// Reads an array of 64-bit unsigned integers.
    pub fn read_u64_array(&mut self) -> Vec<u64> {
        self.read_array(|r| r.read_u64())
    }

    /// Reads an array of booleans.
    pub fn read_bool_array(&mut self) -> Vec<bool> {
        self.read_array(|r| r.read_bool())
    }

    /// Reads an array of strings.
    pub fn read_string_array(&mut self) -> Vec<String> {
        self.read_array(|r| r.read_string())
    }

    /// Reads an array of blobs (u16 count, then each blob).
    pub fn read_blob_array(&mut self) -> Vec<Vec<u8>> {
        self.read_array(|r| r.read_blob())
    }

    /// Reads a raw u16 element count.
    ///
    /// For callers that size storage before reading record elements,
    /// decoupling sizing from element decoding.
    pub fn array_len(&mut self) -> u16 {
        self.read_u16()
    }

    /// Reads one record: default-constructs it, then decodes in place.
    pub fn read_record<T: Parcelable + Default>(&mut self) -> T {
        let mut record = T::default();
        if self.failure.is_none() {
            record.decode(self);
        }
        record
    }

    /// Reads an array of records (u16 count, then each record).
    ///
    /// All `count` slots are default-constructed up front; decoding
    /// stops at the first failure, leaving trailing records default.
    pub fn read_record_array<T: Parcelable + Default>(&mut self) -> Vec<T> {
        let len = self.array_len() as usize;
        if self.failure.is_some() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(len);
        out.resize_with(len, T::default);
        for record in &mut out {
            if self.failure.is_some() {
                break;
            }
            record.decode(self);
        }
        out
    }
}
