//! Coordinate and time-scale utilities for satellite navigation.
//!
//! Two independent pieces:
//!
//! - [`geodetic`] and [`ned`]: WGS84 conversions between ECEF Cartesian
//!   and latitude/longitude/height coordinates, local North-East-Down
//!   projections, and azimuth/elevation look angles.
//! - [`gps_time`]: GPS week/time-of-week representation and GPS/UTC
//!   conversions with leap-second correction.
//!
//! Everything is a pure function over process-wide immutable constants;
//! all operations are safe to call concurrently. Angles on the public
//! surface are degrees, distances meters.

pub mod error;
pub mod geodetic;
pub mod gps_time;
pub mod ned;
pub mod wgs84;

pub use error::{Error, Result};
pub use geodetic::{ecef_from_llh, llh_from_ecef, Llh};
pub use gps_time::{
    datetime_to_gps_format, gps_format_to_datetime, gps_minus_utc_seconds, gpst_to_utc,
    utc_to_gpst, GpsTime, GPS_EPOCH, WEEK_SECONDS,
};
pub use ned::{
    azimuth_elevation_from_ecef, ned_from_ecef, ned_rotation, relative_position_in_ned,
};
