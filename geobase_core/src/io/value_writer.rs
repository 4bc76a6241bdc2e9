//! This module defines the `ValueWriter` trait for writing typed values in a fixed byte order.
//!
//! # Overview
//!
//! Implementations provide the destination and the byte order; the trait supplies writers for the
//! primitive types used by binary geometry formats. Floating point values can optionally be written
//! with a canonical negative NaN bit pattern, which is what GEOS, PostGIS and GDAL emit for the
//! coordinates of an empty point.

use super::Endian;
use anyhow::Result;
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::Write;

/// Bit pattern of a quiet NaN with the sign bit set.
pub const NEGATIVE_NAN_BITS: u64 = 0xFFF8_0000_0000_0000;

/// A trait for writing values to a destination with a fixed byte order.
pub trait ValueWriter {
	/// Returns a mutable reference to the underlying writer.
	fn get_writer(&mut self) -> &mut dyn Write;

	/// Returns the current write position.
	fn position(&mut self) -> u64;

	/// The byte order used for all multi-byte values.
	fn endian(&self) -> Endian;

	/// Whether NaN values are written as [`NEGATIVE_NAN_BITS`].
	fn nan_encoded_as_negative(&self) -> bool {
		false
	}

	/// Returns `true` if nothing has been written yet.
	fn is_empty(&mut self) -> bool {
		self.position() == 0
	}

	/// Writes an 8-bit unsigned integer.
	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.get_writer().write_u8(value)?)
	}

	/// Writes an 8-bit signed integer.
	fn write_i8(&mut self, value: i8) -> Result<()> {
		Ok(self.get_writer().write_i8(value)?)
	}

	/// Writes a 32-bit unsigned integer.
	fn write_u32(&mut self, value: u32) -> Result<()> {
		let endian = self.endian();
		let writer = self.get_writer();
		Ok(match endian {
			Endian::Big => writer.write_u32::<BigEndian>(value)?,
			Endian::Little => writer.write_u32::<LittleEndian>(value)?,
		})
	}

	/// Writes a 32-bit signed integer.
	fn write_i32(&mut self, value: i32) -> Result<()> {
		let endian = self.endian();
		let writer = self.get_writer();
		Ok(match endian {
			Endian::Big => writer.write_i32::<BigEndian>(value)?,
			Endian::Little => writer.write_i32::<LittleEndian>(value)?,
		})
	}

	/// Writes a 64-bit IEEE-754 floating point value.
	fn write_f64(&mut self, value: f64) -> Result<()> {
		let value = if value.is_nan() && self.nan_encoded_as_negative() {
			f64::from_bits(NEGATIVE_NAN_BITS)
		} else {
			value
		};
		let endian = self.endian();
		let writer = self.get_writer();
		Ok(match endian {
			Endian::Big => writer.write_f64::<BigEndian>(value)?,
			Endian::Little => writer.write_f64::<LittleEndian>(value)?,
		})
	}

	/// Writes a slice of bytes as is.
	fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		self.get_writer().write_all(buf)?;
		Ok(())
	}
}
