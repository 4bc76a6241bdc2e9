//! This module defines the [`CoordinateType`] enum classifying the dimensionality of positions.
//!
//! # Examples
//!
//! ```
//! use geobase_core::CoordinateType;
//!
//! let t = CoordinateType::resolve(true, true);
//! assert_eq!(t, CoordinateType::XYZM);
//! assert_eq!(t.coordinate_dimension(), 4);
//! assert_eq!(t.index_for_m(), Some(3));
//! ```

use anyhow::{Result, bail};
use std::fmt::Display;

/// The dimensionality of a position or geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoordinateType {
	#[default]
	XY,
	XYZ,
	XYM,
	XYZM,
}

impl CoordinateType {
	/// All variants, ordered by their dimensional offset in standard WKB.
	pub const ALL: [CoordinateType; 4] = [
		CoordinateType::XY,
		CoordinateType::XYZ,
		CoordinateType::XYM,
		CoordinateType::XYZM,
	];

	/// Selects the coordinate type from the two independent dimension flags.
	#[must_use]
	pub fn resolve(is_3d: bool, is_measured: bool) -> Self {
		match (is_3d, is_measured) {
			(false, false) => CoordinateType::XY,
			(true, false) => CoordinateType::XYZ,
			(false, true) => CoordinateType::XYM,
			(true, true) => CoordinateType::XYZM,
		}
	}

	/// Guesses the coordinate type from the number of values of a single position.
	///
	/// Three values are read as XYZ; a measure without z can only be expressed with an explicit type.
	#[must_use]
	pub fn from_dimension(dimension: usize) -> Option<Self> {
		match dimension {
			2 => Some(CoordinateType::XY),
			3 => Some(CoordinateType::XYZ),
			4 => Some(CoordinateType::XYZM),
			_ => None,
		}
	}

	#[must_use]
	pub fn is_3d(&self) -> bool {
		matches!(self, CoordinateType::XYZ | CoordinateType::XYZM)
	}

	#[must_use]
	pub fn is_measured(&self) -> bool {
		matches!(self, CoordinateType::XYM | CoordinateType::XYZM)
	}

	/// Number of values stored per position.
	#[must_use]
	pub fn coordinate_dimension(&self) -> usize {
		match self {
			CoordinateType::XY => 2,
			CoordinateType::XYZ | CoordinateType::XYM => 3,
			CoordinateType::XYZM => 4,
		}
	}

	/// The slot of a flat position holding the measure value.
	#[must_use]
	pub fn index_for_m(&self) -> Option<usize> {
		match self {
			CoordinateType::XY | CoordinateType::XYZ => None,
			CoordinateType::XYM => Some(2),
			CoordinateType::XYZM => Some(3),
		}
	}

	/// Combines two types so that the result carries every dimension of either.
	#[must_use]
	pub fn union(self, other: CoordinateType) -> Self {
		CoordinateType::resolve(self.is_3d() || other.is_3d(), self.is_measured() || other.is_measured())
	}

	pub fn as_str(&self) -> &str {
		match self {
			CoordinateType::XY => "xy",
			CoordinateType::XYZ => "xyz",
			CoordinateType::XYM => "xym",
			CoordinateType::XYZM => "xyzm",
		}
	}

	pub fn parse_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"xy" => CoordinateType::XY,
			"xyz" => CoordinateType::XYZ,
			"xym" => CoordinateType::XYM,
			"xyzm" => CoordinateType::XYZM,
			_ => bail!("Unknown coordinate type '{value}'. Expected xy, xyz, xym or xyzm"),
		})
	}
}

impl Display for CoordinateType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
