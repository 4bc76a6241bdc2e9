//! This module defines the [`GeometryKind`] enum naming the seven simple feature geometry types.

use anyhow::{Result, bail};
use std::fmt::Display;

/// The kind of a geometry, independent of its coordinate type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryKind {
	Point,
	LineString,
	Polygon,
	MultiPoint,
	MultiLineString,
	MultiPolygon,
	GeometryCollection,
}

impl GeometryKind {
	pub const ALL: [GeometryKind; 7] = [
		GeometryKind::Point,
		GeometryKind::LineString,
		GeometryKind::Polygon,
		GeometryKind::MultiPoint,
		GeometryKind::MultiLineString,
		GeometryKind::MultiPolygon,
		GeometryKind::GeometryCollection,
	];

	/// The kind of the items of a multi geometry, `None` for every other kind.
	#[must_use]
	pub fn item_kind(&self) -> Option<GeometryKind> {
		match self {
			GeometryKind::MultiPoint => Some(GeometryKind::Point),
			GeometryKind::MultiLineString => Some(GeometryKind::LineString),
			GeometryKind::MultiPolygon => Some(GeometryKind::Polygon),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			GeometryKind::Point => "Point",
			GeometryKind::LineString => "LineString",
			GeometryKind::Polygon => "Polygon",
			GeometryKind::MultiPoint => "MultiPoint",
			GeometryKind::MultiLineString => "MultiLineString",
			GeometryKind::MultiPolygon => "MultiPolygon",
			GeometryKind::GeometryCollection => "GeometryCollection",
		}
	}

	pub fn parse_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"point" => GeometryKind::Point,
			"linestring" => GeometryKind::LineString,
			"polygon" => GeometryKind::Polygon,
			"multipoint" => GeometryKind::MultiPoint,
			"multilinestring" => GeometryKind::MultiLineString,
			"multipolygon" => GeometryKind::MultiPolygon,
			"geometrycollection" => GeometryKind::GeometryCollection,
			_ => bail!("Unknown geometry kind '{value}'"),
		})
	}
}

impl Display for GeometryKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
