use crate::{
	content::{GeometryContent, points_coord_type, polygons_coord_type, series_coord_type},
	wkb::{WkbDecoder, WkbDecoderOptions, WkbEncoder, WkbEncoderOptions},
};
use super::GeometryBuilder;
use anyhow::Result;
use geobase_core::{Blob, CoordinateType, Coordinates, GeometryKind, Position, PositionSeries};
use std::fmt::Debug;

/// A geometry of any kind, holding its coordinates.
///
/// Container kinds store their coordinate type next to the coordinates, so that a geometry without
/// any position still knows its dimensionality.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(Coordinates),
	LineString(PositionSeries),
	Polygon(Vec<PositionSeries>, CoordinateType),
	MultiPoint(Vec<Coordinates>, CoordinateType),
	MultiLineString(Vec<PositionSeries>, CoordinateType),
	MultiPolygon(Vec<Vec<PositionSeries>>, CoordinateType),
	GeometryCollection(Vec<Geometry>, CoordinateType),
	/// A logically empty geometry of the given kind.
	Empty(GeometryKind),
}

impl Geometry {
	pub fn new_point<T: Into<Coordinates>>(value: T) -> Self {
		Self::Point(value.into())
	}
	pub fn new_line_string<const N: usize>(value: Vec<[f64; N]>) -> Self
	where
		Coordinates: From<[f64; N]>,
	{
		Self::LineString(PositionSeries::from(value))
	}
	pub fn new_polygon<const N: usize>(value: Vec<Vec<[f64; N]>>) -> Self
	where
		Coordinates: From<[f64; N]>,
	{
		let rings: Vec<PositionSeries> = value.into_iter().map(PositionSeries::from).collect();
		let coord_type = series_coord_type(&rings);
		Self::Polygon(rings, coord_type)
	}
	pub fn new_multi_point<const N: usize>(value: Vec<[f64; N]>) -> Self
	where
		Coordinates: From<[f64; N]>,
	{
		let points: Vec<Coordinates> = value.into_iter().map(Coordinates::from).collect();
		let coord_type = points_coord_type(&points);
		Self::MultiPoint(points, coord_type)
	}
	pub fn new_multi_line_string<const N: usize>(value: Vec<Vec<[f64; N]>>) -> Self
	where
		Coordinates: From<[f64; N]>,
	{
		let line_strings: Vec<PositionSeries> = value.into_iter().map(PositionSeries::from).collect();
		let coord_type = series_coord_type(&line_strings);
		Self::MultiLineString(line_strings, coord_type)
	}
	pub fn new_multi_polygon<const N: usize>(value: Vec<Vec<Vec<[f64; N]>>>) -> Self
	where
		Coordinates: From<[f64; N]>,
	{
		let polygons: Vec<Vec<PositionSeries>> = value
			.into_iter()
			.map(|rings| rings.into_iter().map(PositionSeries::from).collect())
			.collect();
		let coord_type = polygons_coord_type(&polygons);
		Self::MultiPolygon(polygons, coord_type)
	}
	/// Creates a collection whose coordinate type carries every dimension of its members.
	pub fn new_collection(geometries: Vec<Geometry>) -> Self {
		let coord_type = geometries
			.iter()
			.filter(|g| !matches!(g, Geometry::Empty(_)))
			.fold(CoordinateType::XY, |t, g| t.union(g.coord_type()));
		Self::GeometryCollection(geometries, coord_type)
	}
	pub fn new_empty(kind: GeometryKind) -> Self {
		Self::Empty(kind)
	}

	pub fn kind(&self) -> GeometryKind {
		match self {
			Geometry::Point(_) => GeometryKind::Point,
			Geometry::LineString(_) => GeometryKind::LineString,
			Geometry::Polygon(..) => GeometryKind::Polygon,
			Geometry::MultiPoint(..) => GeometryKind::MultiPoint,
			Geometry::MultiLineString(..) => GeometryKind::MultiLineString,
			Geometry::MultiPolygon(..) => GeometryKind::MultiPolygon,
			Geometry::GeometryCollection(..) => GeometryKind::GeometryCollection,
			Geometry::Empty(kind) => *kind,
		}
	}

	pub fn coord_type(&self) -> CoordinateType {
		match self {
			Geometry::Point(c) => c.coord_type(),
			Geometry::LineString(s) => s.coord_type(),
			Geometry::Polygon(_, t)
			| Geometry::MultiPoint(_, t)
			| Geometry::MultiLineString(_, t)
			| Geometry::MultiPolygon(_, t)
			| Geometry::GeometryCollection(_, t) => *t,
			Geometry::Empty(_) => CoordinateType::XY,
		}
	}

	/// `true` for [`Geometry::Empty`] and for geometries without any position.
	pub fn is_empty(&self) -> bool {
		match self {
			Geometry::Point(c) => c.is_empty(),
			Geometry::LineString(s) => s.is_empty(),
			Geometry::Polygon(rings, _) | Geometry::MultiLineString(rings, _) => rings.is_empty(),
			Geometry::MultiPoint(points, _) => points.is_empty(),
			Geometry::MultiPolygon(polygons, _) => polygons.is_empty(),
			Geometry::GeometryCollection(geometries, _) => geometries.is_empty(),
			Geometry::Empty(_) => true,
		}
	}

	/// Plays this geometry into `content`.
	pub fn write_to(&self, content: &mut dyn GeometryContent) -> Result<()> {
		match self {
			Geometry::Point(c) => content.point(c, Some(c.coord_type())),
			Geometry::LineString(s) => content.line_string(s, Some(s.coord_type())),
			Geometry::Polygon(rings, t) => content.polygon(rings, Some(*t)),
			Geometry::MultiPoint(points, t) => content.multi_point(points, Some(*t)),
			Geometry::MultiLineString(line_strings, t) => content.multi_line_string(line_strings, Some(*t)),
			Geometry::MultiPolygon(polygons, t) => content.multi_polygon(polygons, Some(*t)),
			Geometry::GeometryCollection(geometries, t) => content.geometry_collection(
				&|sub: &mut dyn GeometryContent| {
					for geometry in geometries {
						geometry.write_to(sub)?;
					}
					Ok(())
				},
				Some(geometries.len()),
				Some(*t),
			),
			Geometry::Empty(kind) => content.empty_geometry(*kind),
		}
	}

	/// Encodes this geometry as WKB.
	pub fn to_wkb(&self, options: WkbEncoderOptions) -> Result<Blob> {
		let mut encoder = WkbEncoder::new(options);
		self.write_to(&mut encoder)?;
		Ok(encoder.into_blob())
	}

	/// Decodes a single geometry from WKB or EWKB bytes.
	pub fn from_wkb(bytes: &[u8]) -> Result<Geometry> {
		let mut builder = GeometryBuilder::new();
		WkbDecoder::new(&mut builder, WkbDecoderOptions::default()).decode_bytes(bytes)?;
		builder.into_single()
	}

	/// Decodes a single geometry from base64 encoded WKB or EWKB.
	pub fn from_wkb_text(text: &str) -> Result<Geometry> {
		let mut builder = GeometryBuilder::new();
		WkbDecoder::new(&mut builder, WkbDecoderOptions::default()).decode_text(text)?;
		builder.into_single()
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let (type_name, inner): (&str, &dyn Debug) = match self {
			Geometry::Point(g) => ("Point", g),
			Geometry::LineString(g) => ("LineString", g),
			Geometry::Polygon(g, _) => ("Polygon", g),
			Geometry::MultiLineString(g, _) => ("MultiLineString", g),
			Geometry::MultiPoint(g, _) => ("MultiPoint", g),
			Geometry::MultiPolygon(g, _) => ("MultiPolygon", g),
			Geometry::GeometryCollection(g, _) => ("GeometryCollection", g),
			Geometry::Empty(kind) => return write!(f, "{kind}Empty"),
		};
		f.debug_tuple(type_name).field(inner).finish()
	}
}
