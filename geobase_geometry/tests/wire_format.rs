//! Byte level behavior of the WKB codec: exact encodings, the content events a decoder emits and
//! the rejection of malformed input.

use anyhow::Result;
use approx::assert_relative_eq;
use geobase_core::io::Endian;
use geobase_geometry::{
	Blob, CodecError, CoordinateType, Coordinates, Geometry, GeometryContent, GeometryContentFn, GeometryKind,
	Position, PositionSeries, codec_error,
	wkb::{CollectionProbe, WkbDecoder, WkbDecoderOptions, WkbEncoder, WkbEncoderOptions, WkbFlavor},
};
use pretty_assertions::assert_eq;

/// Records every content event as a line of text.
#[derive(Default)]
struct Recorder {
	events: Vec<String>,
	points: Vec<Coordinates>,
}

impl GeometryContent for Recorder {
	fn point(&mut self, position: &Coordinates, coord_type: Option<CoordinateType>) -> Result<()> {
		self.points.push(*position);
		self.events.push(format!("point {coord_type:?}"));
		Ok(())
	}

	fn line_string(&mut self, chain: &PositionSeries, coord_type: Option<CoordinateType>) -> Result<()> {
		self.events.push(format!("line_string {} {coord_type:?}", chain.len()));
		Ok(())
	}

	fn polygon(&mut self, rings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		let lengths: Vec<usize> = rings.iter().map(PositionSeries::len).collect();
		self.events.push(format!("polygon {lengths:?} {coord_type:?}"));
		Ok(())
	}

	fn multi_point(&mut self, points: &[Coordinates], coord_type: Option<CoordinateType>) -> Result<()> {
		self.events.push(format!("multi_point {} {coord_type:?}", points.len()));
		Ok(())
	}

	fn multi_line_string(&mut self, line_strings: &[PositionSeries], coord_type: Option<CoordinateType>) -> Result<()> {
		self.events.push(format!("multi_line_string {} {coord_type:?}", line_strings.len()));
		Ok(())
	}

	fn multi_polygon(&mut self, polygons: &[Vec<PositionSeries>], coord_type: Option<CoordinateType>) -> Result<()> {
		self.events.push(format!("multi_polygon {} {coord_type:?}", polygons.len()));
		Ok(())
	}

	fn geometry_collection(
		&mut self,
		geometries: GeometryContentFn<'_>,
		count: Option<usize>,
		coord_type: Option<CoordinateType>,
	) -> Result<()> {
		let mut members = Recorder::default();
		geometries(&mut members)?;
		self.events.push(format!("geometry_collection {count:?} {coord_type:?}"));
		self.events.extend(members.events.into_iter().map(|event| format!("  {event}")));
		Ok(())
	}

	fn empty_geometry(&mut self, kind: GeometryKind) -> Result<()> {
		self.events.push(format!("empty {kind}"));
		Ok(())
	}

	fn srid(&mut self, srid: i32) -> Result<()> {
		self.events.push(format!("srid {srid}"));
		Ok(())
	}
}

fn record(bytes: &[u8], options: WkbDecoderOptions) -> Result<Recorder> {
	let mut recorder = Recorder::default();
	WkbDecoder::new(&mut recorder, options).decode_bytes(bytes)?;
	Ok(recorder)
}

fn decode_error(bytes: &[u8]) -> CodecError {
	let error = Geometry::from_wkb(bytes).unwrap_err();
	codec_error(&error).cloned().unwrap()
}

#[test]
fn point_example() -> Result<()> {
	let mut encoder = WkbEncoder::new(WkbEncoderOptions::default().with_endian(Endian::Little));
	encoder.point(&Coordinates::new(1.5, -2.25), None)?;
	let bytes = encoder.into_blob();

	let mut expected = vec![0x01, 0x01, 0x00, 0x00, 0x00];
	expected.extend(1.5f64.to_le_bytes());
	expected.extend((-2.25f64).to_le_bytes());
	assert_eq!(bytes.as_slice(), expected.as_slice());

	let recorder = record(bytes.as_slice(), WkbDecoderOptions::default())?;
	assert_eq!(recorder.events, vec!["point Some(XY)"]);
	assert_relative_eq!(recorder.points[0].x(), 1.5);
	Ok(())
}

#[test]
fn empty_multi_point_example() -> Result<()> {
	let mut encoder = WkbEncoder::new(WkbEncoderOptions::default());
	encoder.multi_point(&[], None)?;
	let bytes = encoder.into_blob();
	assert_eq!(bytes, Blob::from_hex("01 04000000 00000000")?);

	let recorder = record(bytes.as_slice(), WkbDecoderOptions::default())?;
	assert_eq!(recorder.events, vec!["empty MultiPoint"]);
	assert!(recorder.points.is_empty());

	let recorder = record(
		bytes.as_slice(),
		WkbDecoderOptions::default().with_build_empty_geometries(false),
	)?;
	assert_eq!(recorder.events, vec!["multi_point 0 Some(XY)"]);
	Ok(())
}

#[test]
fn polygon_with_two_rings_example() -> Result<()> {
	let outer = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]];
	let inner = vec![[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 2.0]];
	let polygon = Geometry::new_polygon(vec![outer.clone(), inner.clone()]);
	let bytes = polygon.to_wkb(WkbEncoderOptions::default())?;
	let bytes = bytes.as_slice();

	assert_eq!(bytes.len(), 5 + 4 + 2 * (4 + 4 * 16));
	assert_eq!(&bytes[5..9], &2u32.to_le_bytes());
	assert_eq!(&bytes[9..13], &4u32.to_le_bytes());
	assert_eq!(&bytes[77..81], &4u32.to_le_bytes());
	assert_eq!(&bytes[81..89], &2.0f64.to_le_bytes());

	let recorder = record(bytes, WkbDecoderOptions::default())?;
	assert_eq!(recorder.events, vec!["polygon [4, 4] Some(XY)"]);
	assert_eq!(
		Geometry::from_wkb(bytes)?,
		Geometry::Polygon(
			vec![PositionSeries::from(outer), PositionSeries::from(inner)],
			CoordinateType::XY
		)
	);
	Ok(())
}

#[test]
fn empty_point_is_header_and_two_nans_for_every_type() -> Result<()> {
	for coord_type in CoordinateType::ALL {
		let options = WkbEncoderOptions::default().with_force_coord_type_of_items_on_collection(true);
		let mut encoder = WkbEncoder::new(options);
		encoder.geometry_collection(
			&|sub: &mut dyn GeometryContent| sub.empty_geometry(GeometryKind::Point),
			Some(1),
			Some(coord_type),
		)?;
		let bytes = encoder.into_blob();
		assert_eq!(bytes.len(), 9 + 21, "{coord_type}");
		assert_eq!(&bytes.as_slice()[10..14], &1u32.to_le_bytes());
	}

	let bytes = Geometry::new_empty(GeometryKind::Point).to_wkb(WkbEncoderOptions::default())?;
	assert_eq!(bytes, Blob::from_hex("01 01000000 000000000000F8FF 000000000000F8FF")?);

	let recorder = record(bytes.as_slice(), WkbDecoderOptions::default())?;
	assert_eq!(recorder.events, vec!["empty Point"]);

	let recorder = record(
		bytes.as_slice(),
		WkbDecoderOptions::default().with_build_empty_geometries(false),
	)?;
	assert_eq!(recorder.events, vec!["point Some(XY)"]);
	assert!(recorder.points[0].x().is_nan() && recorder.points[0].y().is_nan());
	Ok(())
}

#[test]
fn collection_count_matches_events() -> Result<()> {
	let members = vec![
		Geometry::new_point([1.0, 2.0]),
		Geometry::new_line_string(vec![[0.0, 0.0], [1.0, 1.0]]),
		Geometry::new_empty(GeometryKind::Polygon),
		Geometry::new_multi_point(vec![[5.0, 5.0, 5.0]]),
	];
	let produce = |sub: &mut dyn GeometryContent| -> Result<()> {
		for member in &members {
			member.write_to(sub)?;
		}
		Ok(())
	};

	let mut encoder = WkbEncoder::new(WkbEncoderOptions::default());
	encoder.geometry_collection(&produce, None, None)?;
	let bytes = encoder.into_blob();
	let (probed, coord_type) = CollectionProbe::run(&produce, 1, 64)?;
	assert_eq!(probed, members.len());
	assert_eq!(coord_type, CoordinateType::XYZ);
	assert_eq!(&bytes.as_slice()[1..5], &1007u32.to_le_bytes());
	assert_eq!(&bytes.as_slice()[5..9], &4u32.to_le_bytes());

	let recorder = record(bytes.as_slice(), WkbDecoderOptions::default())?;
	assert_eq!(
		recorder.events,
		vec![
			"geometry_collection Some(4) Some(XYZ)",
			"  point Some(XY)",
			"  line_string 2 Some(XY)",
			"  empty Polygon",
			"  multi_point 1 Some(XYZ)",
		]
	);
	Ok(())
}

#[test]
fn ewkb_srid_is_reported_for_the_top_level_geometry() -> Result<()> {
	let options = WkbEncoderOptions::default()
		.with_flavor(WkbFlavor::Extended)
		.with_srid(Some(4326));
	let geometry = Geometry::new_collection(vec![Geometry::new_point([1.0, 2.0])]);
	let bytes = geometry.to_wkb(options)?;
	assert_eq!(&bytes.as_slice()[1..5], &0x2000_0007u32.to_le_bytes());

	let recorder = record(bytes.as_slice(), WkbDecoderOptions::default())?;
	assert_eq!(
		recorder.events,
		vec!["srid 4326", "geometry_collection Some(1) Some(XY)", "  point Some(XY)"]
	);
	Ok(())
}

#[test]
fn nested_srids_are_skipped() -> Result<()> {
	let bytes = Blob::from_hex(
		"01 04000000 01000000 01 01000020 E6100000 000000000000F03F 0000000000000040",
	)?;
	let recorder = record(bytes.as_slice(), WkbDecoderOptions::default())?;
	assert_eq!(recorder.events, vec!["multi_point 1 Some(XY)"]);
	Ok(())
}

#[test]
fn invalid_byte_order_at_any_header() -> Result<()> {
	let geometry = Geometry::new_collection(vec![
		Geometry::new_point([1.0, 2.0]),
		Geometry::new_multi_point(vec![[3.0, 4.0]]),
	]);
	let bytes = geometry.to_wkb(WkbEncoderOptions::default())?.into_vec();
	// top level, first member, second member, item of the second member
	for offset in [0, 9, 30, 39] {
		let mut corrupt = bytes.clone();
		corrupt[offset] = 0x02;
		assert_eq!(decode_error(&corrupt), CodecError::InvalidByteOrder(2), "offset {offset}");
	}
	Ok(())
}

#[test]
fn truncation_is_reported() -> Result<()> {
	let geometry = Geometry::new_multi_line_string(vec![vec![[0.0, 0.0], [1.0, 1.0]], vec![[2.0, 2.0], [3.0, 3.0]]]);
	let bytes = geometry.to_wkb(WkbEncoderOptions::default())?.into_vec();
	for length in 0..bytes.len() {
		assert!(
			matches!(decode_error(&bytes[..length]), CodecError::UnexpectedEndOfData { .. }),
			"length {length}"
		);
	}
	Ok(())
}

#[test]
fn declared_count_larger_than_data() {
	let bytes = Blob::from_hex("01 07000000 03000000 01 01000000 000000000000F03F 0000000000000040").unwrap();
	assert_eq!(
		decode_error(bytes.as_slice()),
		CodecError::UnexpectedEndOfData {
			position: 30,
			requested: 1,
			available: 0
		}
	);
}

#[test]
fn deep_nesting_is_rejected() {
	let mut bytes = Vec::new();
	for _ in 0..100 {
		bytes.extend([0x01, 0x07, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
	}
	bytes.extend([0x01, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
	assert_eq!(decode_error(&bytes), CodecError::NestingTooDeep(64));
}
