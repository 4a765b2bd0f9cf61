use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors produced by the conversion routines.
///
/// The geodetic conversions themselves are total over finite inputs; only
/// degenerate geometry and out-of-range time queries can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Target and reference coincide, so the line-of-sight direction (and
    /// with it azimuth and elevation) is undefined.
    #[error("target coincides with reference point; azimuth/elevation undefined")]
    DegenerateGeometry,

    /// Leap-second information is only defined from the GPS epoch
    /// (1980-01-06T00:00:00Z) onward.
    #[error("instant {0} predates the GPS epoch (1980-01-06T00:00:00Z)")]
    BeforeGpsEpoch(DateTime<Utc>),
}

pub type Result<T> = std::result::Result<T, Error>;
