//! Human-readable rendering of parcel values.
//!
//! Purely cosmetic: the formatter walks values and builds a bracketed
//! debug string for logging. It never reads or influences the binary
//! layout.

use std::fmt;
use std::fmt::Write as _;

use crate::parcel::Parcelable;

/// Leading bytes shown when a blob exceeds the preview threshold.
const BLOB_PREVIEW_LEN: usize = 16;

/// A scalar rendered by the formatter, as its natural decimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::U8(v) => write!(f, "{v}"),
            Scalar::I8(v) => write!(f, "{v}"),
            Scalar::U16(v) => write!(f, "{v}"),
            Scalar::I16(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::U64(v) => write!(f, "{v}"),
            Scalar::I64(v) => write!(f, "{v}"),
        }
    }
}

/// A value the formatter can render.
///
/// The set is closed: every kind the wire format carries has exactly
/// one variant here, and rendering matches exhaustively.
pub enum Value<'a> {
    Scalar(Scalar),
    Str(&'a str),
    Blob(&'a [u8]),
    BlobArray(&'a [Vec<u8>]),
    Record(&'a dyn Parcelable),
    Array(Vec<Value<'a>>),
}

impl<'a> Value<'a> {
    /// Wraps a slice of records for rendering as an array.
    pub fn records<T: Parcelable>(items: &'a [T]) -> Self {
        Value::Array(items.iter().map(|r| Value::Record(r)).collect())
    }

    /// Wraps a slice of strings for rendering as an array.
    pub fn strings<S: AsRef<str>>(items: &'a [S]) -> Self {
        Value::Array(items.iter().map(|s| Value::Str(s.as_ref())).collect())
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::$variant(value))
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool,
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Str(value)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(value: &'a String) -> Self {
        Value::Str(value)
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(value: &'a [u8]) -> Self {
        Value::Blob(value)
    }
}

impl<'a> From<&'a Vec<u8>> for Value<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl<'a> From<&'a [Vec<u8>]> for Value<'a> {
    fn from(value: &'a [Vec<u8>]) -> Self {
        Value::BlobArray(value)
    }
}

impl<'a> From<&'a Vec<Vec<u8>>> for Value<'a> {
    fn from(value: &'a Vec<Vec<u8>>) -> Self {
        Value::BlobArray(value)
    }
}

/// Builds the debug rendering of a value tree.
///
/// Records render as `{field:value,...}`, arrays as `[v,v,]`, blobs
/// longer than the preview threshold as `<len>[first bytes,]`.
pub struct TextFormatter {
    out: String,
}

impl TextFormatter {
    /// Creates an empty formatter.
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Appends `name:value,` — the building block for
    /// [`Parcelable::describe`] implementations.
    pub fn field<'a>(&mut self, name: &str, value: impl Into<Value<'a>>) {
        self.out.push_str(name);
        self.out.push(':');
        self.format(&value.into());
        self.out.push(',');
    }

    /// Appends the rendering of a single value.
    pub fn format(&mut self, value: &Value<'_>) {
        match value {
            Value::Scalar(scalar) => {
                let _ = write!(self.out, "{scalar}");
            }
            Value::Str(s) => self.out.push_str(s),
            Value::Blob(bytes) => self.format_blob(bytes),
            Value::BlobArray(blobs) => {
                self.out.push('[');
                for blob in *blobs {
                    self.format_blob(blob);
                    self.out.push(',');
                }
                self.out.push(']');
            }
            Value::Record(record) => {
                self.out.push('{');
                record.describe(self);
                self.out.push('}');
            }
            Value::Array(values) => {
                self.out.push('[');
                for v in values {
                    self.format(v);
                    self.out.push(',');
                }
                self.out.push(']');
            }
        }
    }

    fn format_blob(&mut self, bytes: &[u8]) {
        let shown = if bytes.len() > BLOB_PREVIEW_LEN {
            let _ = write!(self.out, "{}", bytes.len());
            BLOB_PREVIEW_LEN
        } else {
            bytes.len()
        };
        self.out.push('[');
        for b in &bytes[..shown] {
            let _ = write!(self.out, "{b},");
        }
        self.out.push(']');
    }

    /// Returns the rendering built so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the formatter and returns the rendering.
    pub fn into_string(self) -> String {
        self.out
    }

    /// Renders one value to a fresh string.
    pub fn render<'a>(value: impl Into<Value<'a>>) -> String {
        let mut fmt = TextFormatter::new();
        fmt.format(&value.into());
        fmt.into_string()
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeResult;
    use crate::reader::Reader;
    use crate::writer::Writer;

    #[derive(Debug, Default)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Parcelable for Point {
        fn encode(&self, writer: &mut Writer) -> EncodeResult<()> {
            writer.write_i32(self.x)?;
            writer.write_i32(self.y)
        }

        fn decode(&mut self, reader: &mut Reader) {
            self.x = reader.read_i32();
            self.y = reader.read_i32();
        }

        fn describe(&self, fmt: &mut TextFormatter) {
            fmt.field("x", self.x);
            fmt.field("y", self.y);
        }
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(TextFormatter::render(42u32), "42");
        assert_eq!(TextFormatter::render(-7i64), "-7");
        assert_eq!(TextFormatter::render(true), "true");
    }

    #[test]
    fn test_record_rendering() {
        let point = Point { x: 3, y: -4 };
        assert_eq!(
            TextFormatter::render(Value::Record(&point)),
            "{x:3,y:-4,}"
        );
    }

    #[test]
    fn test_record_array_rendering() {
        let points = [Point { x: 1, y: 2 }, Point { x: 3, y: 4 }];
        assert_eq!(
            TextFormatter::render(Value::records(&points)),
            "[{x:1,y:2,},{x:3,y:4,},]"
        );
    }

    #[test]
    fn test_short_blob_renders_in_full() {
        let blob = vec![12u8, 23, 34];
        assert_eq!(TextFormatter::render(&blob), "[12,23,34,]");
    }

    #[test]
    fn test_long_blob_renders_count_and_preview() {
        let blob: Vec<u8> = (0u8..20).collect();
        assert_eq!(
            TextFormatter::render(&blob),
            "20[0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,]"
        );
    }

    #[test]
    fn test_blob_array_rendering() {
        let blobs = vec![vec![1u8, 2], vec![3u8]];
        assert_eq!(TextFormatter::render(&blobs), "[[1,2,],[3,],]");
    }
}
