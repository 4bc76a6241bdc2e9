use crate::CodecError;
use anyhow::{Result, bail};
use std::fmt::Display;

/// Byte order of the values in a binary buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Endian {
	/// Big endian, called XDR in the WKB standard.
	Big,
	/// Little endian, called NDR in the WKB standard.
	#[default]
	Little,
}

impl Endian {
	/// Interprets a WKB byte order marker: `0` is big endian, `1` is little endian.
	///
	/// # Errors
	///
	/// Fails with [`CodecError::InvalidByteOrder`] for every other value.
	pub fn from_marker(marker: u8) -> Result<Self> {
		match marker {
			0 => Ok(Endian::Big),
			1 => Ok(Endian::Little),
			_ => Err(CodecError::InvalidByteOrder(marker).into()),
		}
	}

	#[must_use]
	pub fn marker(&self) -> u8 {
		match self {
			Endian::Big => 0,
			Endian::Little => 1,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Endian::Big => "big",
			Endian::Little => "little",
		}
	}

	pub fn parse_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"big" | "be" | "xdr" => Endian::Big,
			"little" | "le" | "ndr" => Endian::Little,
			_ => bail!("Unknown byte order '{value}'. Expected big or little"),
		})
	}
}

impl Display for Endian {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
