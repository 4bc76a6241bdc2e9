//! This module provides the `ValueReaderSlice` struct for reading values from a byte slice.
//!
//! # Examples
//!
//! ```rust
//! use geobase_core::io::{Endian, ValueReader, ValueReaderSlice};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let data = &[0x01, 0x02, 0x03, 0x04];
//!
//!     let mut reader = ValueReaderSlice::new(data);
//!     assert_eq!(reader.read_u32(Endian::Little)?, 0x04030201);
//!
//!     let mut reader = ValueReaderSlice::new(data);
//!     assert_eq!(reader.read_u32(Endian::Big)?, 0x01020304);
//!
//!     Ok(())
//! }
//! ```

use super::{SeekRead, ValueReader};
use std::io::Cursor;

/// A struct that provides bounds-checked reading from a byte slice.
pub struct ValueReaderSlice<'a> {
	cursor: Cursor<&'a [u8]>,
	len: u64,
}

impl<'a> ValueReaderSlice<'a> {
	#[must_use]
	pub fn new(slice: &'a [u8]) -> ValueReaderSlice<'a> {
		ValueReaderSlice {
			len: slice.len() as u64,
			cursor: Cursor::new(slice),
		}
	}
}

impl SeekRead for Cursor<&[u8]> {}

impl ValueReader for ValueReaderSlice<'_> {
	fn get_reader(&mut self) -> &mut dyn SeekRead {
		&mut self.cursor
	}

	fn len(&self) -> u64 {
		self.len
	}

	fn position(&mut self) -> u64 {
		self.cursor.position()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::io::Endian;
	use crate::{CodecError, codec_error};
	use anyhow::Result;
	use approx::assert_relative_eq;

	#[test]
	fn test_len() {
		let reader = ValueReaderSlice::new(&[0x80; 42]);
		assert_eq!(reader.len(), 42);
		assert!(!reader.is_empty());
		assert!(ValueReaderSlice::new(&[]).is_empty());
	}

	#[test]
	fn test_read_u8() -> Result<()> {
		let mut reader = ValueReaderSlice::new(&[0x01, 0xFF]);
		assert_eq!(reader.read_u8()?, 0x01);
		assert_eq!(reader.read_i8()?, -1);
		assert!(!reader.has_remaining());
		Ok(())
	}

	#[test]
	fn test_read_u32_per_call_endian() -> Result<()> {
		let data = [0x00, 0x00, 0x00, 0x07, 0x07, 0x00, 0x00, 0x00];
		let mut reader = ValueReaderSlice::new(&data);
		assert_eq!(reader.read_u32(Endian::Big)?, 7);
		assert_eq!(reader.read_u32(Endian::Little)?, 7);
		Ok(())
	}

	#[test]
	fn test_read_i32() -> Result<()> {
		let mut reader = ValueReaderSlice::new(&[0xFD, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFD]);
		assert_eq!(reader.read_i32(Endian::Little)?, -3);
		assert_eq!(reader.read_i32(Endian::Big)?, -3);
		Ok(())
	}

	#[test]
	fn test_read_f64() -> Result<()> {
		let mut data = 1.5f64.to_le_bytes().to_vec();
		data.extend_from_slice(&(-2.25f64).to_be_bytes());
		let mut reader = ValueReaderSlice::new(&data);
		assert_eq!(reader.read_f64(Endian::Little)?, 1.5);
		assert_eq!(reader.read_f64(Endian::Big)?, -2.25);
		assert_eq!(reader.position(), 16);
		Ok(())
	}

	#[test]
	fn test_read_f64_into() -> Result<()> {
		let mut data = Vec::new();
		for value in [0.1f64, 0.2, 0.3] {
			data.extend_from_slice(&value.to_be_bytes());
		}
		let mut reader = ValueReaderSlice::new(&data);
		let mut values = vec![9.0];
		reader.read_f64_into(3, Endian::Big, &mut values)?;
		assert_eq!(values.len(), 4);
		assert_relative_eq!(values[1] + values[2], 0.3, epsilon = 1e-12);
		assert_relative_eq!(values[3], 0.3);
		Ok(())
	}

	#[test]
	fn test_read_past_end() -> Result<()> {
		let mut reader = ValueReaderSlice::new(&[0x01, 0x02, 0x03, 0x04, 0x05]);
		reader.read_u8()?;
		reader.read_u8()?;
		let error = reader.read_u32(Endian::Little).unwrap_err();
		assert_eq!(
			codec_error(&error),
			Some(&CodecError::UnexpectedEndOfData {
				position: 2,
				requested: 4,
				available: 3
			})
		);
		// a failed read does not consume anything
		assert_eq!(reader.position(), 2);
		Ok(())
	}

	#[test]
	fn test_read_f64_into_checks_whole_run() {
		let data = [0u8; 20];
		let mut reader = ValueReaderSlice::new(&data);
		let mut values = Vec::new();
		let error = reader.read_f64_into(3, Endian::Little, &mut values).unwrap_err();
		assert!(matches!(
			codec_error(&error),
			Some(CodecError::UnexpectedEndOfData { requested: 24, .. })
		));
		assert!(values.is_empty());
	}
}
