//! This module provides the `ValueWriterBlob` struct for writing values to an in-memory blob.
//!
//! # Examples
//!
//! ```rust
//! use geobase_core::io::{Endian, ValueWriter, ValueWriterBlob};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBlob::new_le();
//!     writer.write_u8(1)?;
//!     writer.write_u32(2)?;
//!     assert_eq!(writer.into_blob().into_vec(), vec![1, 2, 0, 0, 0]);
//!     Ok(())
//! }
//! ```

use super::{Endian, ValueWriter};
use crate::types::Blob;
use std::io::{Cursor, Write};

/// A growable in-memory buffer written in a fixed byte order.
pub struct ValueWriterBlob {
	cursor: Cursor<Vec<u8>>,
	endian: Endian,
	nan_encoded_as_negative: bool,
}

impl ValueWriterBlob {
	#[must_use]
	pub fn new(endian: Endian) -> ValueWriterBlob {
		ValueWriterBlob::with_capacity(endian, 0)
	}

	/// Creates a writer whose buffer can hold `capacity` bytes before it has to grow.
	#[must_use]
	pub fn with_capacity(endian: Endian, capacity: usize) -> ValueWriterBlob {
		ValueWriterBlob {
			cursor: Cursor::new(Vec::with_capacity(capacity)),
			endian,
			nan_encoded_as_negative: false,
		}
	}

	#[must_use]
	pub fn new_le() -> ValueWriterBlob {
		ValueWriterBlob::new(Endian::Little)
	}

	#[must_use]
	pub fn new_be() -> ValueWriterBlob {
		ValueWriterBlob::new(Endian::Big)
	}

	/// Enables or disables writing NaN values as negative NaN.
	#[must_use]
	pub fn with_nan_encoded_as_negative(mut self, enabled: bool) -> ValueWriterBlob {
		self.nan_encoded_as_negative = enabled;
		self
	}

	/// Returns the bytes written so far.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		self.cursor.get_ref()
	}

	/// Converts the written data into a `Blob`.
	#[must_use]
	pub fn into_blob(self) -> Blob {
		Blob::from(self.cursor.into_inner())
	}
}

impl ValueWriter for ValueWriterBlob {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}

	fn position(&mut self) -> u64 {
		self.cursor.position()
	}

	fn endian(&self) -> Endian {
		self.endian
	}

	fn nan_encoded_as_negative(&self) -> bool {
		self.nan_encoded_as_negative
	}
}

impl Default for ValueWriterBlob {
	fn default() -> Self {
		Self::new_le()
	}
}
