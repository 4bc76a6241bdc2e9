//! This module defines the [`Position`] accessor trait and [`Coordinates`], its concrete implementation.
//!
//! Codecs only ever read values off a position (`x`, `y` and the optional `z` and `m`), so every
//! position-like type can be encoded by implementing [`Position`] and handing it over through
//! [`Coordinates::from_position`] or [`PositionSeries::from_positions`](super::PositionSeries::from_positions).

use super::CoordinateType;
use crate::CodecError;
use anyhow::Result;
use std::fmt::Debug;

/// Read access to the coordinate values of a single position.
pub trait Position {
	fn x(&self) -> f64;

	fn y(&self) -> f64;

	fn z(&self) -> Option<f64>;

	fn m(&self) -> Option<f64>;

	fn is_3d(&self) -> bool {
		self.z().is_some()
	}

	fn is_measured(&self) -> bool {
		self.m().is_some()
	}

	/// The coordinate type derived from the presence of `z` and `m`.
	fn coord_type(&self) -> CoordinateType {
		CoordinateType::resolve(self.is_3d(), self.is_measured())
	}

	/// Appends the values of this position in x, y[, z][, m] order as required by `coord_type`.
	///
	/// A dimension that the requested type has but the position lacks is filled with `0.0`.
	fn push_values(&self, coord_type: CoordinateType, values: &mut Vec<f64>) {
		values.push(self.x());
		values.push(self.y());
		if coord_type.is_3d() {
			values.push(self.z().unwrap_or(0.0));
		}
		if coord_type.is_measured() {
			values.push(self.m().unwrap_or(0.0));
		}
	}
}

/// A single position with optional z and m values.
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates {
	x: f64,
	y: f64,
	z: Option<f64>,
	m: Option<f64>,
}

impl Coordinates {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y, z: None, m: None }
	}

	#[must_use]
	pub fn new_xyz(x: f64, y: f64, z: f64) -> Self {
		Self {
			x,
			y,
			z: Some(z),
			m: None,
		}
	}

	#[must_use]
	pub fn new_xym(x: f64, y: f64, m: f64) -> Self {
		Self {
			x,
			y,
			z: None,
			m: Some(m),
		}
	}

	#[must_use]
	pub fn new_xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
		Self {
			x,
			y,
			z: Some(z),
			m: Some(m),
		}
	}

	/// The position used to represent an empty point: x and y are both NaN.
	#[must_use]
	pub fn new_empty() -> Self {
		Self::new(f64::NAN, f64::NAN)
	}

	/// Copies any [`Position`] into a `Coordinates`, keeping exactly the dimensions it has.
	#[must_use]
	pub fn from_position<P: Position + ?Sized>(position: &P) -> Self {
		Self {
			x: position.x(),
			y: position.y(),
			z: position.z(),
			m: position.m(),
		}
	}

	/// Reads a position from flat values.
	///
	/// Without an explicit `coord_type` the type is guessed from the number of values
	/// (2 = XY, 3 = XYZ, 4 = XYZM).
	///
	/// # Errors
	///
	/// Fails with [`CodecError::InvalidCoordinates`] if there are fewer than two values or the
	/// number of values does not match the coordinate type.
	pub fn from_values(values: &[f64], coord_type: Option<CoordinateType>) -> Result<Self> {
		let coord_type = match coord_type {
			Some(t) => t,
			None => CoordinateType::from_dimension(values.len()).ok_or_else(|| {
				CodecError::InvalidCoordinates(format!("a position needs 2 to 4 values, got {}", values.len()))
			})?,
		};
		if values.len() != coord_type.coordinate_dimension() {
			return Err(
				CodecError::InvalidCoordinates(format!(
					"a {coord_type} position needs {} values, got {}",
					coord_type.coordinate_dimension(),
					values.len()
				))
				.into(),
			);
		}
		Ok(Self::from_slice_unchecked(values, coord_type))
	}

	/// Builds a position from a slice that is known to hold `coord_type.coordinate_dimension()` values.
	pub(crate) fn from_slice_unchecked(values: &[f64], coord_type: CoordinateType) -> Self {
		Self {
			x: values[0],
			y: values[1],
			z: coord_type.is_3d().then(|| values[2]),
			m: coord_type.index_for_m().map(|i| values[i]),
		}
	}

	/// Returns this position with exactly the dimensions of `coord_type`, filling missing ones with `0.0`.
	#[must_use]
	pub fn with_coord_type(&self, coord_type: CoordinateType) -> Self {
		Self {
			x: self.x,
			y: self.y,
			z: coord_type.is_3d().then(|| self.z.unwrap_or(0.0)),
			m: coord_type.is_measured().then(|| self.m.unwrap_or(0.0)),
		}
	}

	/// `true` if x and y are both NaN, the convention for an empty point.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.x.is_nan() && self.y.is_nan()
	}

	/// Returns the values in x, y[, z][, m] order.
	#[must_use]
	pub fn values(&self) -> Vec<f64> {
		let mut values = Vec::with_capacity(4);
		self.push_values(self.coord_type(), &mut values);
		values
	}
}

impl Position for Coordinates {
	fn x(&self) -> f64 {
		self.x
	}

	fn y(&self) -> f64 {
		self.y
	}

	fn z(&self) -> Option<f64> {
		self.z
	}

	fn m(&self) -> Option<f64> {
		self.m
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates::new(value[0], value[1])
	}
}

impl From<[f64; 3]> for Coordinates {
	fn from(value: [f64; 3]) -> Self {
		Coordinates::new_xyz(value[0], value[1], value[2])
	}
}

impl From<[f64; 4]> for Coordinates {
	fn from(value: [f64; 4]) -> Self {
		Coordinates::new_xyzm(value[0], value[1], value[2], value[3])
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates::new(value.0, value.1)
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.values().fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec_error;

	struct Station {
		lon: f64,
		lat: f64,
		elevation: f64,
	}

	impl Position for Station {
		fn x(&self) -> f64 {
			self.lon
		}

		fn y(&self) -> f64 {
			self.lat
		}

		fn z(&self) -> Option<f64> {
			Some(self.elevation)
		}

		fn m(&self) -> Option<f64> {
			None
		}
	}

	#[test]
	fn from_position_keeps_dimensions() {
		let station = Station {
			lon: 13.4,
			lat: 52.5,
			elevation: 34.0,
		};
		let position = Coordinates::from_position(&station);
		assert_eq!(position, Coordinates::new_xyz(13.4, 52.5, 34.0));
		assert_eq!(position.coord_type(), CoordinateType::XYZ);

		let dynamic: &dyn Position = &Coordinates::new_xym(1.0, 2.0, 3.0);
		assert_eq!(Coordinates::from_position(dynamic), Coordinates::new_xym(1.0, 2.0, 3.0));
	}

	#[test]
	fn new_and_accessors() {
		let c = Coordinates::new_xyzm(1.0, 2.0, 3.0, 4.0);
		assert_eq!(c.x(), 1.0);
		assert_eq!(c.y(), 2.0);
		assert_eq!(c.z(), Some(3.0));
		assert_eq!(c.m(), Some(4.0));
		assert_eq!(c.coord_type(), CoordinateType::XYZM);

		assert_eq!(Coordinates::new(1.0, 2.0).coord_type(), CoordinateType::XY);
		assert_eq!(Coordinates::new_xyz(1.0, 2.0, 3.0).coord_type(), CoordinateType::XYZ);
		assert_eq!(Coordinates::new_xym(1.0, 2.0, 3.0).coord_type(), CoordinateType::XYM);
	}

	#[test]
	fn debug_formats_like_array() {
		assert_eq!(format!("{:?}", Coordinates::new(1.0, 2.0)), "[1.0, 2.0]");
		assert_eq!(format!("{:?}", Coordinates::new_xym(1.0, 2.0, 5.0)), "[1.0, 2.0, 5.0]");
	}

	#[test]
	fn from_values_guesses_type() -> Result<()> {
		assert_eq!(Coordinates::from_values(&[1.0, 2.0], None)?, Coordinates::new(1.0, 2.0));
		assert_eq!(
			Coordinates::from_values(&[1.0, 2.0, 3.0], None)?,
			Coordinates::new_xyz(1.0, 2.0, 3.0)
		);
		assert_eq!(
			Coordinates::from_values(&[1.0, 2.0, 3.0], Some(CoordinateType::XYM))?,
			Coordinates::new_xym(1.0, 2.0, 3.0)
		);
		assert_eq!(
			Coordinates::from_values(&[1.0, 2.0, 3.0, 4.0], None)?,
			Coordinates::new_xyzm(1.0, 2.0, 3.0, 4.0)
		);
		Ok(())
	}

	#[test]
	fn from_values_rejects_bad_input() {
		let error = Coordinates::from_values(&[1.0], None).unwrap_err();
		assert!(matches!(codec_error(&error), Some(CodecError::InvalidCoordinates(_))));

		let error = Coordinates::from_values(&[1.0, 2.0], Some(CoordinateType::XYZ)).unwrap_err();
		assert!(matches!(codec_error(&error), Some(CodecError::InvalidCoordinates(_))));
	}

	#[test]
	fn with_coord_type_fills_missing_dimensions() {
		let c = Coordinates::new(1.0, 2.0).with_coord_type(CoordinateType::XYZM);
		assert_eq!(c, Coordinates::new_xyzm(1.0, 2.0, 0.0, 0.0));

		let c = Coordinates::new_xyzm(1.0, 2.0, 3.0, 4.0).with_coord_type(CoordinateType::XYM);
		assert_eq!(c, Coordinates::new_xym(1.0, 2.0, 4.0));
	}

	#[test]
	fn push_values_in_type_order() {
		let mut values = Vec::new();
		Coordinates::new_xym(1.0, 2.0, 9.0).push_values(CoordinateType::XYZM, &mut values);
		assert_eq!(values, vec![1.0, 2.0, 0.0, 9.0]);
	}

	#[test]
	fn empty_point_convention() {
		assert!(Coordinates::new_empty().is_empty());
		assert!(!Coordinates::new(f64::NAN, 1.0).is_empty());
		assert!(!Coordinates::new(0.0, 0.0).is_empty());
	}
}
