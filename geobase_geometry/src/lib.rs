//! Geometry content interface, geometry model and the WKB/EWKB codec.
//!
//! Geometries flow through [`GeometryContent`]: a producer calls one method per geometry, a
//! consumer reacts to it. [`Geometry::write_to`] produces content from a geometry value,
//! [`GeometryBuilder`] turns content back into geometry values, and the [`wkb`] module encodes
//! content to bytes and decodes bytes to content.
//!
//! ```
//! use geobase_geometry::{Geometry, wkb::WkbEncoderOptions};
//!
//! let polygon = Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]);
//! let bytes = polygon.to_wkb(WkbEncoderOptions::default()).unwrap();
//! assert_eq!(Geometry::from_wkb(bytes.as_slice()).unwrap(), polygon);
//! ```

pub mod content;
pub mod geometry;
pub mod wkb;

pub use content::{GeometryContent, GeometryContentFn};
pub use geobase_core::{
	Blob, CodecError, CoordinateType, Coordinates, GeometryKind, Position, PositionSeries, codec_error,
};
pub use geometry::{Geometry, GeometryBuilder};
