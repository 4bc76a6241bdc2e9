//! Contains coordinate types, geometry kinds, positions and the blob type holding encoded data.

mod blob;
pub use blob::*;

mod coord_type;
pub use coord_type::*;

mod geometry_kind;
pub use geometry_kind::*;

mod position;
pub use position::*;

mod position_series;
pub use position_series::*;
