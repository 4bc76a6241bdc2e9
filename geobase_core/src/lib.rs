//! Value types and byte I/O shared by the geobase codecs.
//!
//! Contains coordinate types, positions, position series, the error taxonomy of the binary
//! codecs and endian-aware readers and writers over in-memory buffers.

pub mod error;

pub mod io;

pub mod types;

pub use error::{CodecError, codec_error};
pub use types::*;
