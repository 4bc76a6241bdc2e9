//! Replays WKB and EWKB bytes into a [`GeometryContent`].
//!
//! Every geometry header is read on its own: byte order, flavor and coordinate type may differ
//! between the geometries of one buffer, including the members of a collection.

use super::WkbTypeCode;
use crate::{
	content::GeometryContent,
	geometry::{Geometry, GeometryBuilder},
};
use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use geobase_core::{
	CodecError, CoordinateType, Coordinates, GeometryKind, PositionSeries,
	io::{Endian, ValueReader, ValueReaderSlice},
};
use log::trace;

/// Options for [`WkbDecoder`].
#[derive(Clone, Debug, PartialEq)]
pub struct WkbDecoderOptions {
	/// Report a geometry without coordinates through [`GeometryContent::empty_geometry`] instead of
	/// the kind's own method with empty data.
	pub build_empty_geometries: bool,
	pub max_nesting_depth: usize,
}

impl Default for WkbDecoderOptions {
	fn default() -> Self {
		Self {
			build_empty_geometries: true,
			max_nesting_depth: 64,
		}
	}
}

impl WkbDecoderOptions {
	#[must_use]
	pub fn with_build_empty_geometries(mut self, enabled: bool) -> Self {
		self.build_empty_geometries = enabled;
		self
	}

	#[must_use]
	pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
		self.max_nesting_depth = max_nesting_depth;
		self
	}
}

/// Decodes one geometry per call into the sink it was created with.
///
/// An SRID of the top-level geometry is reported through [`GeometryContent::srid`] before the
/// geometry itself. SRIDs of nested geometries are skipped.
///
/// A multi geometry is reported with the union of its own coordinate type and those of its items,
/// so an item never loses a dimension its header declares.
pub struct WkbDecoder<'s> {
	sink: &'s mut dyn GeometryContent,
	options: WkbDecoderOptions,
}

impl<'s> WkbDecoder<'s> {
	pub fn new(sink: &'s mut dyn GeometryContent, options: WkbDecoderOptions) -> Self {
		Self { sink, options }
	}

	pub fn options(&self) -> &WkbDecoderOptions {
		&self.options
	}

	/// Decodes the geometry at the start of `bytes` and returns the number of bytes it occupies.
	/// Anything after the geometry is ignored.
	///
	/// # Errors
	///
	/// Fails with a [`CodecError`] if the bytes are not a valid geometry, or with any error the sink
	/// returns.
	pub fn decode_bytes(&mut self, bytes: &[u8]) -> Result<u64> {
		let mut parser = WkbParser {
			reader: ValueReaderSlice::new(bytes),
			options: &self.options,
		};
		parser.parse_geometry(&mut *self.sink, 0)?;
		Ok(parser.reader.position())
	}

	/// Decodes a geometry given as standard base64 text.
	///
	/// # Errors
	///
	/// Fails if the text is not valid base64, and otherwise like [`WkbDecoder::decode_bytes`].
	pub fn decode_text(&mut self, text: &str) -> Result<u64> {
		let bytes = STANDARD.decode(text.trim()).context("WKB text is not valid base64")?;
		self.decode_bytes(&bytes)
	}
}

struct Header {
	endian: Endian,
	code: WkbTypeCode,
	srid: Option<i32>,
}

struct WkbParser<'a, 'o> {
	reader: ValueReaderSlice<'a>,
	options: &'o WkbDecoderOptions,
}

impl WkbParser<'_, '_> {
	fn read_header(&mut self) -> Result<Header> {
		let endian = Endian::from_marker(self.reader.read_u8()?)?;
		let code = WkbTypeCode::parse(self.reader.read_u32(endian)?)?;
		let srid = if code.has_srid {
			Some(self.reader.read_i32(endian)?)
		} else {
			None
		};
		trace!(
			"read {} ({}, {endian} endian, {} flavor, srid {srid:?})",
			code.kind, code.coord_type, code.flavor
		);
		Ok(Header { endian, code, srid })
	}

	/// Reads the header of a multi geometry item, which must be of kind `expected`.
	fn read_item_header(&mut self, expected: GeometryKind) -> Result<Header> {
		let header = self.read_header()?;
		if header.code.kind != expected {
			return Err(
				CodecError::UnexpectedGeometryType {
					expected: expected.to_string(),
					found: header.code.kind.to_string(),
				}
				.into(),
			);
		}
		Ok(header)
	}

	/// Caps a count read from the input by the number of items the remaining bytes can hold.
	fn capacity_hint(&mut self, count: usize, min_item_size: u64) -> usize {
		let fit = self.reader.remaining() / min_item_size;
		count.min(usize::try_from(fit).unwrap_or(usize::MAX))
	}

	fn read_count(&mut self, endian: Endian) -> Result<usize> {
		let count = self.reader.read_u32(endian)?;
		usize::try_from(count).context("WKB count does not fit into memory")
	}

	fn read_position(&mut self, endian: Endian, coord_type: CoordinateType) -> Result<Coordinates> {
		let mut values = Vec::with_capacity(4);
		self
			.reader
			.read_f64_into(coord_type.coordinate_dimension(), endian, &mut values)?;
		Coordinates::from_values(&values, Some(coord_type))
	}

	fn read_series(&mut self, endian: Endian, coord_type: CoordinateType) -> Result<PositionSeries> {
		let count = self.read_count(endian)?;
		let mut values = Vec::new();
		self.reader.read_f64_into(
			count.saturating_mul(coord_type.coordinate_dimension()),
			endian,
			&mut values,
		)?;
		PositionSeries::new(values, coord_type)
	}

	fn read_rings(&mut self, endian: Endian, coord_type: CoordinateType) -> Result<Vec<PositionSeries>> {
		let count = self.read_count(endian)?;
		let mut rings = Vec::with_capacity(self.capacity_hint(count, 4));
		for _ in 0..count {
			rings.push(self.read_series(endian, coord_type)?);
		}
		Ok(rings)
	}

	fn parse_geometry(&mut self, sink: &mut dyn GeometryContent, depth: usize) -> Result<()> {
		let Header { endian, code, srid } = self.read_header()?;
		if let (0, Some(srid)) = (depth, srid) {
			sink.srid(srid)?;
		}

		let build_empty = self.options.build_empty_geometries;
		let coord_type = code.coord_type;
		match code.kind {
			GeometryKind::Point => {
				let position = self.read_position(endian, coord_type)?;
				if build_empty && position.is_empty() {
					sink.empty_geometry(GeometryKind::Point)
				} else {
					sink.point(&position, Some(coord_type))
				}
			}
			GeometryKind::LineString => {
				let chain = self.read_series(endian, coord_type)?;
				if build_empty && chain.is_empty() {
					sink.empty_geometry(GeometryKind::LineString)
				} else {
					sink.line_string(&chain, Some(coord_type))
				}
			}
			GeometryKind::Polygon => {
				let rings = self.read_rings(endian, coord_type)?;
				if build_empty && rings.is_empty() {
					sink.empty_geometry(GeometryKind::Polygon)
				} else {
					sink.polygon(&rings, Some(coord_type))
				}
			}
			GeometryKind::MultiPoint => {
				let count = self.read_count(endian)?;
				let mut container_type = coord_type;
				let mut points = Vec::with_capacity(self.capacity_hint(count, 21));
				for _ in 0..count {
					let item = self.read_item_header(GeometryKind::Point)?;
					points.push(self.read_position(item.endian, item.code.coord_type)?);
					container_type = container_type.union(item.code.coord_type);
				}
				if build_empty && points.is_empty() {
					sink.empty_geometry(GeometryKind::MultiPoint)
				} else {
					sink.multi_point(&points, Some(container_type))
				}
			}
			GeometryKind::MultiLineString => {
				let count = self.read_count(endian)?;
				let mut container_type = coord_type;
				let mut line_strings = Vec::with_capacity(self.capacity_hint(count, 9));
				for _ in 0..count {
					let item = self.read_item_header(GeometryKind::LineString)?;
					line_strings.push(self.read_series(item.endian, item.code.coord_type)?);
					container_type = container_type.union(item.code.coord_type);
				}
				if build_empty && line_strings.is_empty() {
					sink.empty_geometry(GeometryKind::MultiLineString)
				} else {
					sink.multi_line_string(&line_strings, Some(container_type))
				}
			}
			GeometryKind::MultiPolygon => {
				let count = self.read_count(endian)?;
				let mut container_type = coord_type;
				let mut polygons = Vec::with_capacity(self.capacity_hint(count, 9));
				for _ in 0..count {
					let item = self.read_item_header(GeometryKind::Polygon)?;
					polygons.push(self.read_rings(item.endian, item.code.coord_type)?);
					container_type = container_type.union(item.code.coord_type);
				}
				if build_empty && polygons.is_empty() {
					sink.empty_geometry(GeometryKind::MultiPolygon)
				} else {
					sink.multi_polygon(&polygons, Some(container_type))
				}
			}
			GeometryKind::GeometryCollection => {
				let depth = depth + 1;
				if depth > self.options.max_nesting_depth {
					return Err(CodecError::NestingTooDeep(self.options.max_nesting_depth).into());
				}
				let count = self.read_count(endian)?;
				let mut members = GeometryBuilder::new();
				for _ in 0..count {
					self.parse_geometry(&mut members, depth)?;
				}
				let members: Vec<Geometry> = members.into_geometries();
				if build_empty && members.is_empty() {
					return sink.empty_geometry(GeometryKind::GeometryCollection);
				}
				sink.geometry_collection(
					&|sub: &mut dyn GeometryContent| {
						for member in &members {
							member.write_to(sub)?;
						}
						Ok(())
					},
					Some(members.len()),
					Some(coord_type),
				)
			}
		}
	}
}
