//! Well-Known Binary (WKB) and PostGIS Extended WKB (EWKB).
//!
//! [`WkbEncoder`] implements [`GeometryContent`](crate::GeometryContent) and writes every geometry it
//! receives. [`WkbDecoder`] reads a geometry and replays it into any
//! [`GeometryContent`](crate::GeometryContent).

mod decoder;
mod encoder;
pub mod format;
mod probe;
mod type_code;

pub use decoder::*;
pub use encoder::*;
pub use format::{decoder, encoder, sniff_endian, sniff_flavor, sniff_srid};
pub use probe::*;
pub use type_code::*;
