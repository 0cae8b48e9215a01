//! Parcelbuf - compact little-endian object codec for IPC payloads
//!
//! Application values implement [`Parcelable`] to encode themselves
//! into a [`Writer`], decode from a [`Reader`], and render through a
//! [`TextFormatter`] for logging. The wire format is positional: the
//! order of field writes is the schema, and the reader must mirror it
//! exactly.
//!
//! # Example
//!
//! ```rust
//! use parcelbuf::{EncodeResult, Parcelable, Reader, TextFormatter, Writer};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Ping {
//!     seq: u32,
//!     note: String,
//! }
//!
//! impl Parcelable for Ping {
//!     fn encode(&self, writer: &mut Writer) -> EncodeResult<()> {
//!         writer.write_u32(self.seq)?;
//!         writer.write_string(&self.note)
//!     }
//!
//!     fn decode(&mut self, reader: &mut Reader) {
//!         self.seq = reader.read_u32();
//!         self.note = reader.read_string();
//!     }
//!
//!     fn describe(&self, fmt: &mut TextFormatter) {
//!         fmt.field("seq", self.seq);
//!         fmt.field("note", self.note.as_str());
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ping = Ping { seq: 7, note: "hello".to_string() };
//!
//!     let bytes = parcelbuf::encode_to_vec(&ping)?;
//!     let back: Ping = parcelbuf::decode_from_slice(&bytes)?;
//!     assert_eq!(back, ping);
//!
//!     assert_eq!(ping.debug_text(), "{seq:7,note:hello,}");
//!     Ok(())
//! }
//! ```

pub mod endpoint;
mod error;
mod parcel;
mod reader;
mod text;
mod writer;

pub use endpoint::{SendError, Transport};
pub use error::{DecodeError, EncodeError, EncodeResult};
pub use parcel::{decode_from_slice, encode_to_vec, Parcelable};
pub use reader::Reader;
pub use text::{Scalar, TextFormatter, Value};
pub use writer::Writer;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
