//! WKB geometry type codes.
//!
//! The standard (ISO) flavor adds a dimensional offset to the geometry kind: `0` for XY, `1000`
//! for XYZ, `2000` for XYM and `3000` for XYZM. The extended (PostGIS EWKB) flavor keeps the kind
//! in the low byte and sets flag bits for Z, M and an embedded SRID.

use anyhow::{Result, bail};
use geobase_core::{CodecError, CoordinateType, GeometryKind};
use std::fmt::Display;

pub const EWKB_Z_FLAG: u32 = 0x8000_0000;
pub const EWKB_M_FLAG: u32 = 0x4000_0000;
pub const EWKB_SRID_FLAG: u32 = 0x2000_0000;
/// Any of these bits marks a type code as extended.
pub const EWKB_FLAGS: u32 = EWKB_Z_FLAG | EWKB_M_FLAG | EWKB_SRID_FLAG;

/// The type code scheme of a WKB header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WkbFlavor {
	/// ISO WKB with dimensional offsets.
	#[default]
	Standard,
	/// PostGIS EWKB with Z/M/SRID flag bits.
	Extended,
}

impl WkbFlavor {
	pub fn as_str(&self) -> &str {
		match self {
			WkbFlavor::Standard => "standard",
			WkbFlavor::Extended => "extended",
		}
	}

	pub fn parse_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"standard" | "wkb" | "iso" => WkbFlavor::Standard,
			"extended" | "ewkb" => WkbFlavor::Extended,
			_ => bail!("unknown WKB flavor '{value}', expected 'standard' or 'extended'"),
		})
	}
}

impl Display for WkbFlavor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The numeric code of a geometry kind, `1` (Point) to `7` (GeometryCollection).
pub fn kind_to_code(kind: GeometryKind) -> u32 {
	match kind {
		GeometryKind::Point => 1,
		GeometryKind::LineString => 2,
		GeometryKind::Polygon => 3,
		GeometryKind::MultiPoint => 4,
		GeometryKind::MultiLineString => 5,
		GeometryKind::MultiPolygon => 6,
		GeometryKind::GeometryCollection => 7,
	}
}

pub fn kind_from_code(code: u32) -> Option<GeometryKind> {
	Some(match code {
		1 => GeometryKind::Point,
		2 => GeometryKind::LineString,
		3 => GeometryKind::Polygon,
		4 => GeometryKind::MultiPoint,
		5 => GeometryKind::MultiLineString,
		6 => GeometryKind::MultiPolygon,
		7 => GeometryKind::GeometryCollection,
		_ => return None,
	})
}

/// A decoded WKB type code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WkbTypeCode {
	pub kind: GeometryKind,
	pub coord_type: CoordinateType,
	pub flavor: WkbFlavor,
	/// Whether a 4 byte SRID follows the type code. Only the extended flavor can express this.
	pub has_srid: bool,
}

impl WkbTypeCode {
	pub fn new(kind: GeometryKind, coord_type: CoordinateType, flavor: WkbFlavor) -> Self {
		Self {
			kind,
			coord_type,
			flavor,
			has_srid: false,
		}
	}

	#[must_use]
	pub fn with_srid(mut self, has_srid: bool) -> Self {
		self.has_srid = has_srid;
		self
	}

	/// Parses a type code of either flavor.
	///
	/// Any of the EWKB flag bits selects the extended flavor. A plain XY code without flags is
	/// identical in both flavors and reported as standard.
	///
	/// # Errors
	///
	/// Fails with [`CodecError::UnrecognizedGeometryType`] if the kind is not 1 to 7 and with
	/// [`CodecError::UnrecognizedCoordinateType`] if the dimensional part is unknown.
	pub fn parse(code: u32) -> Result<Self> {
		if code & EWKB_FLAGS != 0 {
			let rest = code & !EWKB_FLAGS;
			if rest > 0xFF {
				return Err(CodecError::UnrecognizedCoordinateType(code).into());
			}
			let kind = kind_from_code(rest).ok_or(CodecError::UnrecognizedGeometryType(code))?;
			return Ok(Self {
				kind,
				coord_type: CoordinateType::resolve(code & EWKB_Z_FLAG != 0, code & EWKB_M_FLAG != 0),
				flavor: WkbFlavor::Extended,
				has_srid: code & EWKB_SRID_FLAG != 0,
			});
		}

		let kind = kind_from_code(code % 1000).ok_or(CodecError::UnrecognizedGeometryType(code))?;
		let coord_type = match code / 1000 {
			0 => CoordinateType::XY,
			1 => CoordinateType::XYZ,
			2 => CoordinateType::XYM,
			3 => CoordinateType::XYZM,
			_ => return Err(CodecError::UnrecognizedCoordinateType(code).into()),
		};
		Ok(Self::new(kind, coord_type, WkbFlavor::Standard))
	}

	/// Returns the numeric type code. `has_srid` is ignored under the standard flavor.
	pub fn encode(&self) -> u32 {
		let kind = kind_to_code(self.kind);
		match self.flavor {
			WkbFlavor::Standard => {
				let offset = match self.coord_type {
					CoordinateType::XY => 0,
					CoordinateType::XYZ => 1000,
					CoordinateType::XYM => 2000,
					CoordinateType::XYZM => 3000,
				};
				kind + offset
			}
			WkbFlavor::Extended => {
				let mut code = kind;
				if self.coord_type.is_3d() {
					code |= EWKB_Z_FLAG;
				}
				if self.coord_type.is_measured() {
					code |= EWKB_M_FLAG;
				}
				if self.has_srid {
					code |= EWKB_SRID_FLAG;
				}
				code
			}
		}
	}
}
