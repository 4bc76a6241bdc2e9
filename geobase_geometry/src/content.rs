//! The geometry content interface.
//!
//! [`GeometryContent`] is the callback surface that decouples binary codecs from concrete geometry
//! representations: a producer plays a geometry into an implementation one call per geometry, and
//! decoders replay geometries into an implementation the same way. The WKB encoder, the dry-run
//! collection probe and [`GeometryBuilder`](crate::GeometryBuilder) are the implementations in this
//! crate.

use anyhow::Result;
use geobase_core::{CoordinateType, Coordinates, GeometryKind, Position, PositionSeries};

/// Produces the members of a geometry collection by calling methods on the given content.
///
/// The callback may be invoked more than once (for example by an encoder that has to count the
/// members before writing them), so it must be free of side effects and produce the same calls
/// every time.
pub type GeometryContentFn<'a> = &'a dyn Fn(&mut dyn GeometryContent) -> Result<()>;

/// Receives geometries, one method per geometry kind.
///
/// Every method takes an optional explicit coordinate type. Without it, the type is derived from
/// the coordinate data: from the position for points, from the series for line strings, and from
/// the first ring or position of container kinds (XY if there is none).
pub trait GeometryContent {
	fn point(&mut self, position: &Coordinates, coord_type: Option<CoordinateType>) -> Result<()>;

	fn line_string(&mut self, chain: &PositionSeries, coord_type: Option<CoordinateType>) -> Result<()>;

	fn polygon(&mut self, rings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()>;

	fn multi_point(&mut self, points: &[Coordinates], coord_type: Option<CoordinateType>) -> Result<()>;

	fn multi_line_string(&mut self, line_strings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()>;

	fn multi_polygon(&mut self, polygons: &[Vec<PositionSeries>], coord_type: Option<CoordinateType>) -> Result<()>;

	/// Receives a geometry collection whose members are produced by `geometries`.
	///
	/// `count` and `coord_type` may be given when the caller already knows them, which saves
	/// implementations a pass over the members.
	fn geometry_collection(
		&mut self,
		geometries: GeometryContentFn<'_>,
		count: Option<usize>,
		coord_type: Option<CoordinateType>,
	) -> Result<()>;

	/// Receives a geometry that is logically empty.
	///
	/// Only a point has a dedicated empty form; for every other kind this is equivalent to calling
	/// the kind's method with no coordinates.
	fn empty_geometry(&mut self, kind: GeometryKind) -> Result<()>;

	/// Announces the spatial reference id of the geometry that is received next.
	fn srid(&mut self, _srid: i32) -> Result<()> {
		Ok(())
	}

	/// Receives a point given as flat values in x, y[, z][, m] order.
	///
	/// # Errors
	///
	/// Fails with [`CodecError::InvalidCoordinates`](geobase_core::CodecError::InvalidCoordinates)
	/// if the values do not form a position.
	fn point_values(&mut self, values: &[f64], coord_type: Option<CoordinateType>) -> Result<()> {
		let position = Coordinates::from_values(values, coord_type)?;
		self.point(&position, coord_type)
	}

	/// Receives a line string given as flat values; XY unless `coord_type` says otherwise.
	///
	/// # Errors
	///
	/// Fails with [`CodecError::InvalidCoordinates`](geobase_core::CodecError::InvalidCoordinates)
	/// if the number of values does not fit the coordinate type.
	fn line_string_values(&mut self, values: Vec<f64>, coord_type: Option<CoordinateType>) -> Result<()> {
		let chain = PositionSeries::new(values, coord_type.unwrap_or_default())?;
		self.line_string(&chain, coord_type)
	}
}

/// Coordinate type of a list of series: the type of the first one.
pub fn series_coord_type(series: &[PositionSeries]) -> CoordinateType {
	series.first().map_or(CoordinateType::XY, PositionSeries::coord_type)
}

/// Coordinate type of a list of positions: the type of the first one.
pub fn points_coord_type(points: &[Coordinates]) -> CoordinateType {
	points.first().map_or(CoordinateType::XY, Position::coord_type)
}

/// Coordinate type of a list of polygons: the type of the first ring found.
pub fn polygons_coord_type(polygons: &[Vec<PositionSeries>]) -> CoordinateType {
	polygons
		.iter()
		.flatten()
		.next()
		.map_or(CoordinateType::XY, PositionSeries::coord_type)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn inferred_types_use_first_element() {
		let xyz = PositionSeries::from(vec![[0.0, 0.0, 1.0]]);
		let xy = PositionSeries::from(vec![[0.0, 0.0]]);
		assert_eq!(series_coord_type(&[xyz.clone(), xy.clone()]), CoordinateType::XYZ);
		assert_eq!(series_coord_type(&[]), CoordinateType::XY);

		assert_eq!(
			points_coord_type(&[Coordinates::new_xym(1.0, 2.0, 3.0), Coordinates::new(1.0, 2.0)]),
			CoordinateType::XYM
		);
		assert_eq!(points_coord_type(&[]), CoordinateType::XY);

		assert_eq!(polygons_coord_type(&[vec![], vec![xyz], vec![xy]]), CoordinateType::XYZ);
		assert_eq!(polygons_coord_type(&[vec![]]), CoordinateType::XY);
	}
}
