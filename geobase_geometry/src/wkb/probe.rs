//! Dry-run pass over the members of a geometry collection.

use crate::content::{GeometryContent, GeometryContentFn, points_coord_type, polygons_coord_type, series_coord_type};
use anyhow::Result;
use geobase_core::{CodecError, CoordinateType, Coordinates, GeometryKind, Position, PositionSeries};

/// Counts the geometries it receives and collects the union of their coordinate types,
/// without storing or writing anything.
#[derive(Debug)]
pub struct CollectionProbe {
	count: usize,
	coord_type: CoordinateType,
	depth: usize,
	max_depth: usize,
}

impl CollectionProbe {
	/// Creates a probe for a collection at nesting level `depth`.
	pub fn new(depth: usize, max_depth: usize) -> Self {
		Self {
			count: 0,
			coord_type: CoordinateType::XY,
			depth,
			max_depth,
		}
	}

	/// Runs `geometries` against a fresh probe and returns the member count and coordinate type.
	pub fn run(geometries: GeometryContentFn<'_>, depth: usize, max_depth: usize) -> Result<(usize, CoordinateType)> {
		let mut probe = Self::new(depth, max_depth);
		geometries(&mut probe)?;
		Ok((probe.count, probe.coord_type))
	}

	pub fn count(&self) -> usize {
		self.count
	}

	pub fn coord_type(&self) -> CoordinateType {
		self.coord_type
	}

	fn add(&mut self, coord_type: CoordinateType) {
		self.count += 1;
		self.coord_type = self.coord_type.union(coord_type);
	}
}

impl GeometryContent for CollectionProbe {
	fn point(&mut self, position: &Coordinates, coord_type: Option<CoordinateType>) -> Result<()> {
		self.add(coord_type.unwrap_or_else(|| position.coord_type()));
		Ok(())
	}

	fn line_string(&mut self, chain: &PositionSeries, coord_type: Option<CoordinateType>) -> Result<()> {
		self.add(coord_type.unwrap_or(chain.coord_type()));
		Ok(())
	}

	fn polygon(&mut self, rings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		self.add(coord_type.unwrap_or_else(|| series_coord_type(rings)));
		Ok(())
	}

	fn multi_point(&mut self, points: &[Coordinates], coord_type: Option<CoordinateType>) -> Result<()> {
		self.add(coord_type.unwrap_or_else(|| points_coord_type(points)));
		Ok(())
	}

	fn multi_line_string(&mut self, line_strings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		self.add(coord_type.unwrap_or_else(|| series_coord_type(line_strings)));
		Ok(())
	}

	fn multi_polygon(&mut self, polygons: &[Vec<PositionSeries>], coord_type: Option<CoordinateType>) -> Result<()> {
		self.add(coord_type.unwrap_or_else(|| polygons_coord_type(polygons)));
		Ok(())
	}

	fn geometry_collection(
		&mut self,
		geometries: GeometryContentFn<'_>,
		_count: Option<usize>,
		coord_type: Option<CoordinateType>,
	) -> Result<()> {
		let coord_type = match coord_type {
			Some(coord_type) => coord_type,
			None => {
				let depth = self.depth + 1;
				if depth > self.max_depth {
					return Err(CodecError::NestingTooDeep(self.max_depth).into());
				}
				Self::run(geometries, depth, self.max_depth)?.1
			}
		};
		self.add(coord_type);
		Ok(())
	}

	fn empty_geometry(&mut self, _kind: GeometryKind) -> Result<()> {
		self.add(CoordinateType::XY);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use geobase_core::codec_error;

	#[test]
	fn counts_and_unions_types() -> Result<()> {
		let (count, coord_type) = CollectionProbe::run(
			&|sub: &mut dyn GeometryContent| {
				sub.point(&Coordinates::new_xym(1.0, 2.0, 3.0), None)?;
				sub.line_string(&PositionSeries::from(vec![[0.0, 0.0, 1.0]]), None)?;
				sub.empty_geometry(GeometryKind::Polygon)
			},
			1,
			64,
		)?;
		assert_eq!(count, 3);
		assert_eq!(coord_type, CoordinateType::XYZM);
		Ok(())
	}

	#[test]
	fn explicit_types_win() -> Result<()> {
		let (count, coord_type) = CollectionProbe::run(
			&|sub: &mut dyn GeometryContent| sub.point(&Coordinates::new_xyz(1.0, 2.0, 3.0), Some(CoordinateType::XY)),
			1,
			64,
		)?;
		assert_eq!((count, coord_type), (1, CoordinateType::XY));
		Ok(())
	}

	#[test]
	fn nested_collections_are_probed() -> Result<()> {
		let mut probe = CollectionProbe::new(1, 64);
		probe.geometry_collection(
			&|sub: &mut dyn GeometryContent| sub.point(&Coordinates::new_xyz(1.0, 2.0, 3.0), None),
			None,
			None,
		)?;
		probe.multi_point(&[], None)?;
		assert_eq!(probe.count(), 2);
		assert_eq!(probe.coord_type(), CoordinateType::XYZ);
		Ok(())
	}

	#[test]
	fn nesting_limit() {
		let mut probe = CollectionProbe::new(2, 2);
		let error = probe
			.geometry_collection(&|_: &mut dyn GeometryContent| Ok(()), None, None)
			.unwrap_err();
		assert_eq!(codec_error(&error), Some(&CodecError::NestingTooDeep(2)));
	}
}
