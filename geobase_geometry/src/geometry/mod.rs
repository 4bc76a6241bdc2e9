#![allow(clippy::module_inception)]

mod builder;
mod geometry;

pub use builder::*;
pub use geometry::*;
