//! Serializes geometry content into WKB or EWKB.
//!
//! # Example
//!
//! ```
//! use geobase_geometry::{Coordinates, GeometryContent, wkb::{WkbEncoder, WkbEncoderOptions}};
//!
//! let mut encoder = WkbEncoder::new(WkbEncoderOptions::default());
//! encoder.point(&Coordinates::new(1.5, -2.25), None).unwrap();
//! assert_eq!(encoder.to_bytes().len(), 21);
//! ```

use super::{CollectionProbe, WkbFlavor, WkbTypeCode};
use crate::content::{GeometryContent, GeometryContentFn, points_coord_type, polygons_coord_type, series_coord_type};
use anyhow::{Context, Result, ensure};
use base64::{Engine, engine::general_purpose::STANDARD};
use geobase_core::{
	Blob, CodecError, CoordinateType, Coordinates, GeometryKind, Position, PositionSeries,
	io::{Endian, ValueWriter, ValueWriterBlob},
};
use log::{debug, trace};

/// Options for [`WkbEncoder`].
#[derive(Clone, Debug, PartialEq)]
pub struct WkbEncoderOptions {
	pub endian: Endian,
	pub flavor: WkbFlavor,
	/// Initial capacity of the output buffer in bytes.
	pub buffer_size: usize,
	/// Write every member of a geometry collection, recursively, with the collection's coordinate type.
	pub force_coord_type_of_items_on_collection: bool,
	/// SRID of the top-level geometries. Only written under [`WkbFlavor::Extended`].
	pub srid: Option<i32>,
	/// Write NaN values with the sign bit set, as GEOS and PostGIS do.
	pub nan_encoded_as_negative: bool,
	pub max_nesting_depth: usize,
}

impl Default for WkbEncoderOptions {
	fn default() -> Self {
		Self {
			endian: Endian::Little,
			flavor: WkbFlavor::Standard,
			buffer_size: 128,
			force_coord_type_of_items_on_collection: false,
			srid: None,
			nan_encoded_as_negative: true,
			max_nesting_depth: 64,
		}
	}
}

impl WkbEncoderOptions {
	#[must_use]
	pub fn with_endian(mut self, endian: Endian) -> Self {
		self.endian = endian;
		self
	}

	#[must_use]
	pub fn with_flavor(mut self, flavor: WkbFlavor) -> Self {
		self.flavor = flavor;
		self
	}

	#[must_use]
	pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
		self.buffer_size = buffer_size;
		self
	}

	#[must_use]
	pub fn with_force_coord_type_of_items_on_collection(mut self, enabled: bool) -> Self {
		self.force_coord_type_of_items_on_collection = enabled;
		self
	}

	#[must_use]
	pub fn with_srid(mut self, srid: Option<i32>) -> Self {
		self.srid = srid;
		self
	}

	#[must_use]
	pub fn with_nan_encoded_as_negative(mut self, enabled: bool) -> Self {
		self.nan_encoded_as_negative = enabled;
		self
	}

	#[must_use]
	pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
		self.max_nesting_depth = max_nesting_depth;
		self
	}
}

/// A [`GeometryContent`] that appends every received geometry to a WKB buffer.
///
/// An [`srid`](GeometryContent::srid) event sets the SRID of the next geometry and takes precedence
/// over [`WkbEncoderOptions::srid`].
pub struct WkbEncoder {
	writer: ValueWriterBlob,
	options: WkbEncoderOptions,
	next_srid: Option<i32>,
}

impl WkbEncoder {
	pub fn new(options: WkbEncoderOptions) -> Self {
		let writer = ValueWriterBlob::with_capacity(options.endian, options.buffer_size)
			.with_nan_encoded_as_negative(options.nan_encoded_as_negative);
		Self {
			writer,
			options,
			next_srid: None,
		}
	}

	pub fn options(&self) -> &WkbEncoderOptions {
		&self.options
	}

	pub fn as_slice(&self) -> &[u8] {
		self.writer.as_slice()
	}

	/// Returns a copy of the bytes written so far.
	pub fn to_bytes(&self) -> Blob {
		Blob::from(self.writer.as_slice())
	}

	pub fn into_blob(self) -> Blob {
		self.writer.into_blob()
	}

	/// Returns the bytes written so far as standard base64.
	pub fn to_text(&self) -> String {
		STANDARD.encode(self.writer.as_slice())
	}

	fn top_level(&mut self) -> WkbWriter<'_> {
		let srid = match self.options.flavor {
			WkbFlavor::Extended => self.next_srid.take().or(self.options.srid),
			WkbFlavor::Standard => None,
		};
		WkbWriter {
			writer: &mut self.writer,
			flavor: self.options.flavor,
			srid,
			forced: None,
			force_items: self.options.force_coord_type_of_items_on_collection,
			depth: 0,
			max_depth: self.options.max_nesting_depth,
			written: 0,
		}
	}
}

impl GeometryContent for WkbEncoder {
	fn point(&mut self, position: &Coordinates, coord_type: Option<CoordinateType>) -> Result<()> {
		self.top_level().point(position, coord_type)
	}

	fn line_string(&mut self, chain: &PositionSeries, coord_type: Option<CoordinateType>) -> Result<()> {
		self.top_level().line_string(chain, coord_type)
	}

	fn polygon(&mut self, rings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		self.top_level().polygon(rings, coord_type)
	}

	fn multi_point(&mut self, points: &[Coordinates], coord_type: Option<CoordinateType>) -> Result<()> {
		self.top_level().multi_point(points, coord_type)
	}

	fn multi_line_string(&mut self, line_strings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		self.top_level().multi_line_string(line_strings, coord_type)
	}

	fn multi_polygon(&mut self, polygons: &[Vec<PositionSeries>], coord_type: Option<CoordinateType>) -> Result<()> {
		self.top_level().multi_polygon(polygons, coord_type)
	}

	fn geometry_collection(
		&mut self,
		geometries: GeometryContentFn<'_>,
		count: Option<usize>,
		coord_type: Option<CoordinateType>,
	) -> Result<()> {
		self.top_level().geometry_collection(geometries, count, coord_type)
	}

	fn empty_geometry(&mut self, kind: GeometryKind) -> Result<()> {
		self.top_level().empty_geometry(kind)
	}

	fn srid(&mut self, srid: i32) -> Result<()> {
		self.next_srid = Some(srid);
		Ok(())
	}
}

/// Writes geometries of one nesting level into a buffer shared with all other levels.
struct WkbWriter<'w> {
	writer: &'w mut ValueWriterBlob,
	flavor: WkbFlavor,
	srid: Option<i32>,
	/// Coordinate type imposed by an enclosing collection.
	forced: Option<CoordinateType>,
	force_items: bool,
	depth: usize,
	max_depth: usize,
	written: usize,
}

impl WkbWriter<'_> {
	fn resolve(&self, explicit: Option<CoordinateType>, derive: impl FnOnce() -> CoordinateType) -> CoordinateType {
		self.forced.or(explicit).unwrap_or_else(derive)
	}

	/// Writes the header of a geometry: the endian marker, the type code and, if present, the SRID.
	fn write_header(&mut self, kind: GeometryKind, coord_type: CoordinateType, srid: Option<i32>) -> Result<()> {
		let code = WkbTypeCode::new(kind, coord_type, self.flavor).with_srid(srid.is_some());
		let marker = self.writer.endian().marker();
		self.writer.write_u8(marker)?;
		self.writer.write_u32(code.encode())?;
		if let Some(srid) = srid {
			self.writer.write_i32(srid)?;
		}
		Ok(())
	}

	/// Writes the header of a geometry that counts towards this level.
	fn begin(&mut self, kind: GeometryKind, coord_type: CoordinateType) -> Result<()> {
		trace!("write {kind} ({coord_type}) at depth {}", self.depth);
		self.written += 1;
		let srid = self.srid;
		self.write_header(kind, coord_type, srid)
	}

	fn write_count(&mut self, count: usize) -> Result<()> {
		let count = u32::try_from(count).with_context(|| format!("{count} items exceed the WKB count limit"))?;
		self.writer.write_u32(count)
	}

	fn write_position(&mut self, position: &impl Position, coord_type: CoordinateType) -> Result<()> {
		self.writer.write_f64(position.x())?;
		self.writer.write_f64(position.y())?;
		if coord_type.is_3d() {
			self.writer.write_f64(position.z().unwrap_or(0.0))?;
		}
		if coord_type.is_measured() {
			self.writer.write_f64(position.m().unwrap_or(0.0))?;
		}
		Ok(())
	}

	fn write_series(&mut self, series: &PositionSeries, coord_type: CoordinateType) -> Result<()> {
		self.write_count(series.len())?;
		if series.coord_type() == coord_type {
			for value in series.values() {
				self.writer.write_f64(*value)?;
			}
		} else {
			for position in series.iter() {
				self.write_position(&position, coord_type)?;
			}
		}
		Ok(())
	}

	fn write_rings(&mut self, rings: &[PositionSeries], coord_type: CoordinateType) -> Result<()> {
		self.write_count(rings.len())?;
		for ring in rings {
			self.write_series(ring, coord_type)?;
		}
		Ok(())
	}
}

impl GeometryContent for WkbWriter<'_> {
	fn point(&mut self, position: &Coordinates, coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = self.resolve(coord_type, || position.coord_type());
		self.begin(GeometryKind::Point, coord_type)?;
		self.write_position(position, coord_type)
	}

	fn line_string(&mut self, chain: &PositionSeries, coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = self.resolve(coord_type, || chain.coord_type());
		self.begin(GeometryKind::LineString, coord_type)?;
		self.write_series(chain, coord_type)
	}

	fn polygon(&mut self, rings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = self.resolve(coord_type, || series_coord_type(rings));
		self.begin(GeometryKind::Polygon, coord_type)?;
		self.write_rings(rings, coord_type)
	}

	fn multi_point(&mut self, points: &[Coordinates], coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = self.resolve(coord_type, || points_coord_type(points));
		self.begin(GeometryKind::MultiPoint, coord_type)?;
		self.write_count(points.len())?;
		for point in points {
			self.write_header(GeometryKind::Point, coord_type, None)?;
			self.write_position(point, coord_type)?;
		}
		Ok(())
	}

	fn multi_line_string(&mut self, line_strings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = self.resolve(coord_type, || series_coord_type(line_strings));
		self.begin(GeometryKind::MultiLineString, coord_type)?;
		self.write_count(line_strings.len())?;
		for line_string in line_strings {
			self.write_header(GeometryKind::LineString, coord_type, None)?;
			self.write_series(line_string, coord_type)?;
		}
		Ok(())
	}

	fn multi_polygon(&mut self, polygons: &[Vec<PositionSeries>], coord_type: Option<CoordinateType>) -> Result<()> {
		let coord_type = self.resolve(coord_type, || polygons_coord_type(polygons));
		self.begin(GeometryKind::MultiPolygon, coord_type)?;
		self.write_count(polygons.len())?;
		for rings in polygons {
			self.write_header(GeometryKind::Polygon, coord_type, None)?;
			self.write_rings(rings, coord_type)?;
		}
		Ok(())
	}

	fn geometry_collection(
		&mut self,
		geometries: GeometryContentFn<'_>,
		count: Option<usize>,
		coord_type: Option<CoordinateType>,
	) -> Result<()> {
		let depth = self.depth + 1;
		if depth > self.max_depth {
			return Err(CodecError::NestingTooDeep(self.max_depth).into());
		}

		let coord_type = self.forced.or(coord_type);
		let (count, coord_type) = match (count, coord_type) {
			(Some(count), Some(coord_type)) => (count, coord_type),
			_ => {
				debug!("probing geometry collection at depth {depth}");
				let (probed_count, probed_type) = CollectionProbe::run(geometries, depth, self.max_depth)?;
				(count.unwrap_or(probed_count), coord_type.unwrap_or(probed_type))
			}
		};

		self.begin(GeometryKind::GeometryCollection, coord_type)?;
		self.write_count(count)?;

		let mut members = WkbWriter {
			writer: &mut *self.writer,
			flavor: self.flavor,
			srid: None,
			forced: if self.force_items { Some(coord_type) } else { self.forced },
			force_items: self.force_items,
			depth,
			max_depth: self.max_depth,
			written: 0,
		};
		geometries(&mut members)?;
		ensure!(
			members.written == count,
			"geometry collection announced {count} geometries, but {} were written",
			members.written
		);
		Ok(())
	}

	fn empty_geometry(&mut self, kind: GeometryKind) -> Result<()> {
		match kind {
			GeometryKind::Point => {
				self.begin(GeometryKind::Point, CoordinateType::XY)?;
				self.writer.write_f64(f64::NAN)?;
				self.writer.write_f64(f64::NAN)
			}
			_ => {
				let coord_type = self.forced.unwrap_or_default();
				self.begin(kind, coord_type)?;
				self.write_count(0)
			}
		}
	}
}
