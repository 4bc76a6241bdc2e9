// This module defines the `ValueReader` trait for reading typed values from a binary source.
//
// # Overview
//
// Implementations provide access to the raw bytes and the read position; the trait supplies
// bounds-checked readers for the primitive types used by binary geometry formats. Unlike a reader
// with a fixed byte order, every multi-byte read takes the `Endian` to use, because a single
// buffer may contain geometries written in different byte orders.

use super::Endian;
use crate::CodecError;
use anyhow::Result;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{Read, Seek};

/// A simple alias for types implementing both `Seek` and `Read`, used for convenience.
pub trait SeekRead: Seek + Read {}

/// A trait for reading values from a binary source with a byte order chosen per read.
pub trait ValueReader {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Returns the current position within the readable data.
	fn position(&mut self) -> u64;

	/// Checks if there is no data to read.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of bytes remaining to be read.
	fn remaining(&mut self) -> u64 {
		self.len().saturating_sub(self.position())
	}

	/// Checks if there are any bytes remaining to be read.
	fn has_remaining(&mut self) -> bool {
		self.remaining() > 0
	}

	/// Verifies that at least `length` more bytes can be read.
	///
	/// # Errors
	/// Fails with [`CodecError::UnexpectedEndOfData`] otherwise.
	fn ensure_available(&mut self, length: u64) -> Result<()> {
		let available = self.remaining();
		if available < length {
			return Err(
				CodecError::UnexpectedEndOfData {
					position: self.position(),
					requested: length,
					available,
				}
				.into(),
			);
		}
		Ok(())
	}

	/// Reads an unsigned 8-bit integer.
	fn read_u8(&mut self) -> Result<u8> {
		self.ensure_available(1)?;
		Ok(self.get_reader().read_u8()?)
	}

	/// Reads a signed 8-bit integer.
	fn read_i8(&mut self) -> Result<i8> {
		self.ensure_available(1)?;
		Ok(self.get_reader().read_i8()?)
	}

	/// Reads an unsigned 32-bit integer in the given byte order.
	fn read_u32(&mut self, endian: Endian) -> Result<u32> {
		self.ensure_available(4)?;
		let reader = self.get_reader();
		Ok(match endian {
			Endian::Big => reader.read_u32::<BigEndian>()?,
			Endian::Little => reader.read_u32::<LittleEndian>()?,
		})
	}

	/// Reads a signed 32-bit integer in the given byte order.
	fn read_i32(&mut self, endian: Endian) -> Result<i32> {
		self.ensure_available(4)?;
		let reader = self.get_reader();
		Ok(match endian {
			Endian::Big => reader.read_i32::<BigEndian>()?,
			Endian::Little => reader.read_i32::<LittleEndian>()?,
		})
	}

	/// Reads a 64-bit IEEE-754 floating point number in the given byte order.
	fn read_f64(&mut self, endian: Endian) -> Result<f64> {
		self.ensure_available(8)?;
		let reader = self.get_reader();
		Ok(match endian {
			Endian::Big => reader.read_f64::<BigEndian>()?,
			Endian::Little => reader.read_f64::<LittleEndian>()?,
		})
	}

	/// Reads `count` 64-bit floats in the given byte order and appends them to `values`.
	///
	/// The availability of all values is checked up front, so a corrupt count fails before
	/// anything is allocated.
	fn read_f64_into(&mut self, count: usize, endian: Endian, values: &mut Vec<f64>) -> Result<()> {
		self.ensure_available((count as u64).saturating_mul(8))?;
		values.reserve(count);
		for _ in 0..count {
			values.push(self.read_f64(endian)?);
		}
		Ok(())
	}
}
