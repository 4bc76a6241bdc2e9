//! Endian-aware readers and writers over in-memory buffers.
//!
//! # Overview
//!
//! [`ValueReaderSlice`] reads integers and floats from a borrowed byte slice, taking the byte order
//! per call, since every geometry header of a binary geometry declares its own byte order.
//! [`ValueWriterBlob`] appends values to a growable buffer using a fixed byte order.
//!
//! # Examples
//!
//! ```rust
//! use geobase_core::io::{Endian, ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBlob};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBlob::new(Endian::Big);
//!     writer.write_u32(7)?;
//!     let blob = writer.into_blob();
//!     assert_eq!(blob.as_slice(), &[0, 0, 0, 7]);
//!
//!     let mut reader = ValueReaderSlice::new(blob.as_slice());
//!     assert_eq!(reader.read_u32(Endian::Big)?, 7);
//!     assert!(!reader.has_remaining());
//!     Ok(())
//! }
//! ```

mod endian;
mod value_reader;
mod value_reader_slice;
mod value_writer;
mod value_writer_blob;

pub use endian::*;
pub use value_reader::*;
pub use value_reader_slice::*;
pub use value_writer::*;
pub use value_writer_blob::*;
