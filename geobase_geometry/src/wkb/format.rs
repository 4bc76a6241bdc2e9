//! Entry points of the WKB format and header inspection without decoding.

use super::{EWKB_FLAGS, EWKB_SRID_FLAG, WkbDecoder, WkbDecoderOptions, WkbEncoder, WkbEncoderOptions, WkbFlavor};
use crate::content::GeometryContent;
use anyhow::Result;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use geobase_core::{CodecError, io::Endian};

/// Creates an encoder writing with the given options.
pub fn encoder(options: WkbEncoderOptions) -> WkbEncoder {
	WkbEncoder::new(options)
}

/// Creates a decoder replaying into `sink`. The flavor is detected per geometry.
pub fn decoder(sink: &mut dyn GeometryContent, options: WkbDecoderOptions) -> WkbDecoder<'_> {
	WkbDecoder::new(sink, options)
}

fn header_bytes(bytes: &[u8], length: usize) -> Result<&[u8]> {
	bytes.get(..length).ok_or_else(|| {
		CodecError::UnexpectedEndOfData {
			position: 0,
			requested: length as u64,
			available: bytes.len() as u64,
		}
		.into()
	})
}

fn read_u32(endian: Endian, bytes: &[u8]) -> u32 {
	match endian {
		Endian::Big => BigEndian::read_u32(bytes),
		Endian::Little => LittleEndian::read_u32(bytes),
	}
}

/// The byte order of the first geometry header.
pub fn sniff_endian(bytes: &[u8]) -> Result<Endian> {
	Endian::from_marker(header_bytes(bytes, 1)?[0])
}

/// The flavor of the first geometry header.
///
/// Only the EWKB flag bits of the type code are tested; the rest of the code is not validated.
/// A header without any of the flags is reported as [`WkbFlavor::Standard`], which both flavors
/// can read.
pub fn sniff_flavor(bytes: &[u8]) -> Result<WkbFlavor> {
	let endian = sniff_endian(bytes)?;
	let code = read_u32(endian, &header_bytes(bytes, 5)?[1..5]);
	Ok(if code & EWKB_FLAGS == 0 {
		WkbFlavor::Standard
	} else {
		WkbFlavor::Extended
	})
}

/// The SRID embedded in the first geometry header, if it has one.
pub fn sniff_srid(bytes: &[u8]) -> Result<Option<i32>> {
	let endian = sniff_endian(bytes)?;
	let code = read_u32(endian, &header_bytes(bytes, 5)?[1..5]);
	if code & EWKB_SRID_FLAG == 0 {
		return Ok(None);
	}
	let srid = &header_bytes(bytes, 9)?[5..9];
	Ok(Some(match endian {
		Endian::Big => BigEndian::read_i32(srid),
		Endian::Little => LittleEndian::read_i32(srid),
	}))
}
