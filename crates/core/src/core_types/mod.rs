//! Core types and utilities

pub mod geo;
pub mod units;

pub use geo::GeoPoint;
pub use units::*;
