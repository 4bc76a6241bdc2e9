//! Error taxonomy shared by the binary geometry codecs.
//!
//! Codec functions return [`anyhow::Result`]. Failures that belong to the taxonomy below are raised
//! as a [`CodecError`] wrapped in the [`anyhow::Error`], so callers can classify them with
//! `err.downcast_ref::<CodecError>()` even after additional context has been attached.

use thiserror::Error;

/// All ways a binary geometry encoding or decoding can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
	/// The byte order marker of a geometry header was neither `0` nor `1`.
	#[error("invalid byte order marker {0:#04x}, expected 0x00 (big endian) or 0x01 (little endian)")]
	InvalidByteOrder(u8),

	/// The type code does not describe a known geometry kind.
	#[error("unrecognized geometry type in type code {0}")]
	UnrecognizedGeometryType(u32),

	/// The type code does not describe a known coordinate type.
	#[error("unrecognized coordinate type in type code {0}")]
	UnrecognizedCoordinateType(u32),

	/// A nested geometry header names a different kind than its container requires.
	#[error("unexpected geometry type: expected {expected}, found {found}")]
	UnexpectedGeometryType { expected: String, found: String },

	/// The buffer ended before a value could be read completely.
	#[error(
		"unexpected end of data: needed {requested} bytes at position {position}, but only {available} are available"
	)]
	UnexpectedEndOfData {
		position: u64,
		requested: u64,
		available: u64,
	},

	/// The coordinate source cannot be interpreted as positions.
	#[error("invalid coordinates: {0}")]
	InvalidCoordinates(String),

	/// Geometry collections are nested deeper than the configured limit.
	#[error("geometry collections are nested deeper than {0} levels")]
	NestingTooDeep(usize),
}

/// Returns the [`CodecError`] inside an [`anyhow::Error`], if there is one.
#[must_use]
pub fn codec_error(error: &anyhow::Error) -> Option<&CodecError> {
	error.downcast_ref::<CodecError>()
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::{Context, Result};

	#[test]
	fn display_messages() {
		assert_eq!(
			CodecError::InvalidByteOrder(7).to_string(),
			"invalid byte order marker 0x07, expected 0x00 (big endian) or 0x01 (little endian)"
		);
		assert_eq!(
			CodecError::UnexpectedEndOfData {
				position: 5,
				requested: 4,
				available: 1
			}
			.to_string(),
			"unexpected end of data: needed 4 bytes at position 5, but only 1 are available"
		);
		assert_eq!(
			CodecError::NestingTooDeep(64).to_string(),
			"geometry collections are nested deeper than 64 levels"
		);
	}

	#[test]
	fn survives_context() {
		let result: Result<()> = Err(CodecError::UnrecognizedGeometryType(99).into());
		let error = result.context("while decoding").unwrap_err();
		assert_eq!(codec_error(&error), Some(&CodecError::UnrecognizedGeometryType(99)));
	}

	#[test]
	fn other_errors_are_not_classified() {
		let error = anyhow::anyhow!("something else");
		assert_eq!(codec_error(&error), None);
	}
}
