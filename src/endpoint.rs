//! The narrow boundary to the external transport collaborator.
//!
//! Connection setup, addressing, and delivery all live in the
//! transport/broker component behind [`Transport`]. The codec's whole
//! contract with it is two operations: hand over a finished byte
//! buffer (optionally with a textual rendering for logging), and
//! decode a byte buffer the transport delivered.

use std::io;

use thiserror::Error;
use tracing::trace;

use crate::error::{DecodeError, EncodeError};
use crate::parcel::{decode_from_slice, Parcelable};
use crate::text::{TextFormatter, Value};
use crate::writer::Writer;

/// The opaque transport/broker component.
pub trait Transport {
    /// Delivers a finished payload.
    ///
    /// `debug_text` is a side-channel rendering for the transport's
    /// logger; it never affects the payload bytes.
    fn deliver(&mut self, payload: &[u8], debug_text: Option<&str>) -> io::Result<()>;
}

/// Errors from the outbound send path.
#[derive(Error, Debug)]
pub enum SendError {
    /// The value could not be encoded.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The transport rejected the payload.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),
}

/// Encodes `value` and hands the finished buffer to the transport.
///
/// With `with_text` set, the value's debug rendering travels alongside
/// the payload.
pub fn send<T, P>(transport: &mut T, value: &P, with_text: bool) -> Result<(), SendError>
where
    T: Transport + ?Sized,
    P: Parcelable,
{
    let mut writer = Writer::new();
    value.encode(&mut writer)?;
    let text = with_text.then(|| TextFormatter::render(Value::Record(value)));
    trace!(len = writer.len(), "delivering parcel");
    transport.deliver(writer.as_bytes(), text.as_deref())?;
    Ok(())
}

/// Decodes a buffer the transport delivered.
///
/// A failed decode invalidates the whole message; no partially
/// populated record escapes.
pub fn receive<P: Parcelable + Default>(payload: &[u8]) -> Result<P, DecodeError> {
    trace!(len = payload.len(), "decoding received parcel");
    decode_from_slice(payload)
}
