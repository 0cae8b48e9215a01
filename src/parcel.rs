//! The record contract: types that encode, decode, and describe
//! themselves.

use tracing::warn;

use crate::error::{DecodeError, EncodeError, EncodeResult};
use crate::reader::Reader;
use crate::text::{TextFormatter, Value};
use crate::writer::Writer;

/// A composite record that knows its own wire layout.
///
/// The wire format carries no field tags or names, only positional
/// layout: `decode` must read fields in exactly the order `encode`
/// wrote them. The field order is the schema, shared statically by
/// producer and consumer.
///
/// Records nest freely — a field may itself be a record or an array of
/// records — with no schema registry involved. Array decoding
/// additionally requires [`Default`] so the reader can materialize
/// elements before populating them.
pub trait Parcelable {
    /// Appends this record's fields to the writer, in schema order.
    fn encode(&self, writer: &mut Writer) -> EncodeResult<()>;

    /// Populates this record from the reader, in schema order.
    ///
    /// Failures stay in the reader; a caller checks
    /// [`Reader::finish`] once the whole pass is done.
    fn decode(&mut self, reader: &mut Reader);

    /// Renders this record's fields into the formatter.
    fn describe(&self, fmt: &mut TextFormatter);

    /// Renders this record as a bracketed debug string.
    fn debug_text(&self) -> String
    where
        Self: Sized,
    {
        TextFormatter::render(Value::Record(self))
    }
}

/// Encodes a record into a fresh exact-length buffer.
pub fn encode_to_vec<T: Parcelable>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    value.encode(&mut writer)?;
    Ok(writer.into_bytes())
}

/// Decodes a record from a received buffer.
///
/// A failed pass invalidates the whole message: the first recorded
/// violation is returned and the partially populated record is
/// dropped.
pub fn decode_from_slice<T: Parcelable + Default>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut reader = Reader::new(bytes);
    let mut value = T::default();
    value.decode(&mut reader);
    if let Err(err) = reader.finish() {
        warn!(%err, position = reader.position(), "discarding parcel after failed decode");
        return Err(err);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        key: String,
        value: u32,
    }

    impl Parcelable for Pair {
        fn encode(&self, writer: &mut Writer) -> EncodeResult<()> {
            writer.write_string(&self.key)?;
            writer.write_u32(self.value)
        }

        fn decode(&mut self, reader: &mut Reader) {
            self.key = reader.read_string();
            self.value = reader.read_u32();
        }

        fn describe(&self, fmt: &mut TextFormatter) {
            fmt.field("key", self.key.as_str());
            fmt.field("value", self.value);
        }
    }

    #[test]
    fn test_roundtrip_helpers() {
        let pair = Pair {
            key: "answer".to_string(),
            value: 42,
        };
        let bytes = encode_to_vec(&pair).unwrap();
        let back: Pair = decode_from_slice(&bytes).unwrap();
        assert_eq!(pair, back);
    }

    #[test]
    fn test_decode_from_slice_rejects_truncation() {
        let pair = Pair {
            key: "answer".to_string(),
            value: 42,
        };
        let bytes = encode_to_vec(&pair).unwrap();
        let err = decode_from_slice::<Pair>(&bytes[..bytes.len() - 2]).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn test_debug_text() {
        let pair = Pair {
            key: "answer".to_string(),
            value: 42,
        };
        assert_eq!(pair.debug_text(), "{key:answer,value:42,}");
    }
}
