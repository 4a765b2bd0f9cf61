//! WGS84 reference ellipsoid parameters.
//!
//! All conversions in this crate are tied to WGS84; other ellipsoids and
//! datum transformations are out of scope.

/// Semi-major axis (equatorial radius) in meters
pub const WGS84_A: f64 = 6378137.0;

/// Inverse flattening
pub const WGS84_IF: f64 = 298.257223563;

/// Flattening
pub const WGS84_F: f64 = 1.0 / WGS84_IF;

/// First eccentricity squared, e² = f·(2 − f)
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// Semi-minor axis (polar radius) in meters
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
