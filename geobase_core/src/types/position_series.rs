//! This module defines [`PositionSeries`], a flat sequence of coordinate values.
//!
//! A series stores `len() * coord_type.coordinate_dimension()` values and represents the points
//! of a line string or the ring of a polygon.
//!
//! # Examples
//!
//! ```
//! use geobase_core::{CoordinateType, PositionSeries};
//!
//! let series = PositionSeries::new(vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0], CoordinateType::XY).unwrap();
//! assert_eq!(series.len(), 3);
//! assert_eq!(series.get(1).unwrap().values(), vec![10.0, 0.0]);
//! ```

use super::{CoordinateType, Coordinates, Position};
use crate::CodecError;
use anyhow::Result;
use std::fmt::Debug;

#[derive(Clone, PartialEq)]
pub struct PositionSeries {
	values: Vec<f64>,
	coord_type: CoordinateType,
}

impl PositionSeries {
	/// Wraps flat coordinate values.
	///
	/// # Errors
	///
	/// Fails with [`CodecError::InvalidCoordinates`] if the number of values is not a multiple of
	/// the coordinate dimension.
	pub fn new(values: Vec<f64>, coord_type: CoordinateType) -> Result<Self> {
		let dimension = coord_type.coordinate_dimension();
		if values.len() % dimension != 0 {
			return Err(
				CodecError::InvalidCoordinates(format!(
					"{} values cannot be split into {coord_type} positions of {dimension} values",
					values.len()
				))
				.into(),
			);
		}
		Ok(Self { values, coord_type })
	}

	#[must_use]
	pub fn new_empty(coord_type: CoordinateType) -> Self {
		Self {
			values: Vec::new(),
			coord_type,
		}
	}

	/// Collects positions into a series. The coordinate type is taken from the first position
	/// (XY for an empty slice); the other positions are converted to it.
	#[must_use]
	pub fn from_positions<P: Position>(positions: &[P]) -> Self {
		let coord_type = positions.first().map_or(CoordinateType::XY, Position::coord_type);
		let mut values = Vec::with_capacity(positions.len() * coord_type.coordinate_dimension());
		for position in positions {
			position.push_values(coord_type, &mut values);
		}
		Self { values, coord_type }
	}

	/// Returns the series converted to `coord_type`, filling missing dimensions with `0.0`.
	#[must_use]
	pub fn with_coord_type(&self, coord_type: CoordinateType) -> Self {
		if coord_type == self.coord_type {
			return self.clone();
		}
		let mut values = Vec::with_capacity(self.len() * coord_type.coordinate_dimension());
		for position in self.iter() {
			position.push_values(coord_type, &mut values);
		}
		Self { values, coord_type }
	}

	#[must_use]
	pub fn coord_type(&self) -> CoordinateType {
		self.coord_type
	}

	/// The number of positions.
	#[must_use]
	pub fn len(&self) -> usize {
		self.values.len() / self.coord_type.coordinate_dimension()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// The flat values in x, y[, z][, m] order per position.
	#[must_use]
	pub fn values(&self) -> &[f64] {
		&self.values
	}

	#[must_use]
	pub fn into_values(self) -> Vec<f64> {
		self.values
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<Coordinates> {
		let dimension = self.coord_type.coordinate_dimension();
		let start = index.checked_mul(dimension)?;
		let end = start.checked_add(dimension)?;
		self
			.values
			.get(start..end)
			.map(|slice| Coordinates::from_slice_unchecked(slice, self.coord_type))
	}

	pub fn iter(&self) -> impl Iterator<Item = Coordinates> + '_ {
		self
			.values
			.chunks_exact(self.coord_type.coordinate_dimension())
			.map(|slice| Coordinates::from_slice_unchecked(slice, self.coord_type))
	}
}

impl Debug for PositionSeries {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<const N: usize> From<Vec<[f64; N]>> for PositionSeries
where
	Coordinates: From<[f64; N]>,
{
	fn from(value: Vec<[f64; N]>) -> Self {
		let positions: Vec<Coordinates> = value.into_iter().map(Coordinates::from).collect();
		PositionSeries::from_positions(&positions)
	}
}
