//! This module provides the [`Blob`] struct, a wrapper around [`Vec<u8>`] holding encoded geometry data.
//!
//! # Examples
//!
//! ```rust
//! use geobase_core::Blob;
//!
//! let blob = Blob::from(vec![0x01, 0x01, 0x00, 0x00, 0x00]);
//! assert_eq!(blob.len(), 5);
//! assert_eq!(blob.as_hex(), "01 01 00 00 00");
//! assert_eq!(Blob::from_hex("0101000000").unwrap(), blob);
//! ```

use anyhow::{Context, Result, ensure};
use std::fmt::Debug;

/// A simple wrapper around [`Vec<u8>`] that provides additional methods for working with byte data.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Parses a hexadecimal string into a `Blob`.
	///
	/// Whitespace between the digits is ignored, upper and lower case digits are accepted.
	///
	/// # Errors
	///
	/// Returns an error if the string contains an odd number of digits or a non-hex character.
	pub fn from_hex(text: &str) -> Result<Blob> {
		let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
		ensure!(digits.len() % 2 == 0, "hex string must contain an even number of digits");
		let bytes = digits
			.chunks_exact(2)
			.map(|pair| {
				let pair = std::str::from_utf8(pair).context("hex string is not ASCII")?;
				u8::from_str_radix(pair, 16).with_context(|| format!("invalid hex digits '{pair}'"))
			})
			.collect::<Result<Vec<u8>>>()?;
		Ok(Blob(bytes))
	}

	/// Returns a reference to the underlying byte slice.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		self.0.as_ref()
	}

	/// Consumes this [`Blob`] and returns the underlying `Vec<u8>`.
	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Returns a hexadecimal string representation of the underlying bytes, with each byte separated by a space.
	///
	/// # Examples
	///
	/// ```rust
	/// use geobase_core::Blob;
	///
	/// let blob = Blob::from(&[0xDE, 0xAD, 0xBE, 0xEF]);
	/// assert_eq!(blob.as_hex(), "de ad be ef");
	/// ```
	#[must_use]
	pub fn as_hex(&self) -> String {
		self
			.0
			.iter()
			.map(|byte| format!("{byte:02x}"))
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Returns the length of the underlying byte slice.
	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	/// Returns `true` if the underlying byte slice is empty, `false` otherwise.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl AsRef<[u8]> for Blob {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

/// Implements [`Debug`] by printing the byte length and hexadecimal representation of the bytes.
impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({}): {}", self.0.len(), self.as_hex())
	}
}
