//! Reconstructs [`Geometry`] values from content events.

use super::Geometry;
use crate::content::{GeometryContent, GeometryContentFn, points_coord_type, polygons_coord_type, series_coord_type};
use anyhow::{Result, bail, ensure};
use geobase_core::{CoordinateType, Coordinates, GeometryKind, Position, PositionSeries};

/// A [`GeometryContent`] that collects every received geometry.
///
/// Coordinates are normalized to the resolved coordinate type of their geometry, so a multi
/// geometry holds items of exactly one type.
#[derive(Debug, Default)]
pub struct GeometryBuilder {
	geometries: Vec<Geometry>,
	srid: Option<i32>,
}

impl GeometryBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn geometries(&self) -> &[Geometry] {
		&self.geometries
	}

	pub fn into_geometries(self) -> Vec<Geometry> {
		self.geometries
	}

	/// The last SRID announced, if any.
	pub fn srid(&self) -> Option<i32> {
		self.srid
	}

	/// Returns the only geometry received.
	///
	/// # Errors
	///
	/// Fails if not exactly one geometry was received.
	pub fn into_single(mut self) -> Result<Geometry> {
		ensure!(
			self.geometries.len() == 1,
			"expected exactly one geometry, but {} were received",
			self.geometries.len()
		);
		match self.geometries.pop() {
			Some(geometry) => Ok(geometry),
			None => bail!("no geometry received"),
		}
	}
}

fn convert_series(series: &[PositionSeries], coord_type: CoordinateType) -> Vec<PositionSeries> {
	series.iter().map(|s| s.with_coord_type(coord_type)).collect()
}

impl GeometryContent for GeometryBuilder {
	fn point(&mut self, position: &Coordinates, coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = coord_type.unwrap_or_else(|| position.coord_type());
		self.geometries.push(Geometry::Point(position.with_coord_type(coord_type)));
		Ok(())
	}

	fn line_string(&mut self, chain: &PositionSeries, coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = coord_type.unwrap_or(chain.coord_type());
		self.geometries.push(Geometry::LineString(chain.with_coord_type(coord_type)));
		Ok(())
	}

	fn polygon(&mut self, rings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = coord_type.unwrap_or_else(|| series_coord_type(rings));
		self
			.geometries
			.push(Geometry::Polygon(convert_series(rings, coord_type), coord_type));
		Ok(())
	}

	fn multi_point(&mut self, points: &[Coordinates], coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = coord_type.unwrap_or_else(|| points_coord_type(points));
		let points = points.iter().map(|p| p.with_coord_type(coord_type)).collect();
		self.geometries.push(Geometry::MultiPoint(points, coord_type));
		Ok(())
	}

	fn multi_line_string(&mut self, line_strings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = coord_type.unwrap_or_else(|| series_coord_type(line_strings));
		self.geometries.push(Geometry::MultiLineString(
			convert_series(line_strings, coord_type),
			coord_type,
		));
		Ok(())
	}

	fn multi_polygon(&mut self, polygons: &[Vec<PositionSeries>], coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = coord_type.unwrap_or_else(|| polygons_coord_type(polygons));
		let polygons = polygons
			.iter()
			.map(|rings| convert_series(rings, coord_type))
			.collect();
		self.geometries.push(Geometry::MultiPolygon(polygons, coord_type));
		Ok(())
	}

	fn geometry_collection(
		&mut self,
		geometries: GeometryContentFn<'_>,
		count: Option<usize>,
		coord_type: Option<CoordinateType>,
	) -> Result<()> {
		let mut members = GeometryBuilder::new();
		geometries(&mut members)?;
		let members = members.into_geometries();
		if let Some(count) = count {
			ensure!(
				members.len() == count,
				"geometry collection announced {count} geometries, but {} were produced",
				members.len()
			);
		}
		self.geometries.push(match coord_type {
			Some(coord_type) => Geometry::GeometryCollection(members, coord_type),
			None => Geometry::new_collection(members),
		});
		Ok(())
	}

	fn empty_geometry(&mut self, kind: GeometryKind) -> Result<()> {
		self.geometries.push(Geometry::Empty(kind));
		Ok(())
	}

	fn srid(&mut self, srid: i32) -> Result<()> {
		self.srid = Some(srid);
		Ok(())
	}
}
