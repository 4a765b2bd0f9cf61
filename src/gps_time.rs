//! GPS time scale conversions.
//!
//! GPS time is a continuous time scale with no leap seconds, counted from
//! the GPS epoch 1980-01-06T00:00:00Z as a week number plus seconds into
//! the week. UTC diverges from it by the cumulative leap-second count,
//! which this module tracks with a hardcoded table.
//!
//! Week/time-of-week conversions ([`datetime_to_gps_format`],
//! [`gps_format_to_datetime`]) stay entirely within the GPS time scale;
//! only [`gpst_to_utc`] and [`utc_to_gpst`] cross scales.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::{Error, Result};

/// Seconds in a GPS week.
pub const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// GPS epoch: week 0, time-of-week 0.
pub static GPS_EPOCH: LazyLock<DateTime<Utc>> = LazyLock::new(|| ymd_hms(1980, 1, 6, 0, 0, 0));

/// Leap-second history as (UTC effective date, cumulative GPS−UTC offset
/// after the jump). The GPS-UTC offset was zero at the GPS epoch; every
/// entry since has added one second. Append-only; last revised for the
/// 2017-01-01 leap second.
const LEAP_SECONDS: [(i32, u32, i64); 18] = [
    (1981, 7, 1),
    (1982, 7, 2),
    (1983, 7, 3),
    (1985, 7, 4),
    (1988, 1, 5),
    (1990, 1, 6),
    (1991, 1, 7),
    (1992, 7, 8),
    (1993, 7, 9),
    (1994, 7, 10),
    (1996, 1, 11),
    (1997, 7, 12),
    (1999, 1, 13),
    (2006, 1, 14),
    (2009, 1, 15),
    (2012, 7, 16),
    (2015, 7, 17),
    (2017, 1, 18),
];

/// Table thresholds resolved into the GPS time scale.
///
/// A leap second announced for UTC midnight becomes visible in GPS time
/// `offset − 1` seconds after that midnight (the offset already in force
/// shifts the boundary), so each stored threshold is
/// `utc_midnight + (offset − 1)`.
static GPS_THRESHOLDS: LazyLock<Vec<(DateTime<Utc>, i64)>> = LazyLock::new(|| {
    LEAP_SECONDS
        .iter()
        .map(|&(year, month, offset)| {
            let midnight = ymd_hms(year, month, 1, 0, 0, 0);
            (midnight + Duration::seconds(offset - 1), offset)
        })
        .collect()
});

fn ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
        .and_utc()
}

/// A GPS time as week number plus time-of-week seconds.
///
/// `tow` is in [0, 604800) for instants at or after the GPS epoch;
/// pre-epoch instants produce negative week numbers with `tow` still
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsTime {
    pub wn: i64,
    pub tow: f64,
}

impl GpsTime {
    pub fn new(wn: i64, tow: f64) -> Self {
        Self { wn, tow }
    }

    /// The GPS-timescale instant this week/time-of-week pair denotes.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        gps_format_to_datetime(self)
    }

    /// Convert to UTC, applying the leap-second correction.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        gpst_to_utc(self.to_datetime())
    }
}

/// Split an instant on the GPS time scale into week number and
/// time-of-week. No UTC conversion is performed; feed this GPS time, not
/// UTC, unless the leap-second offset is irrelevant to the caller.
pub fn datetime_to_gps_format(t: DateTime<Utc>) -> GpsTime {
    let delta = t.signed_duration_since(*GPS_EPOCH);
    let total_ns = delta.num_seconds() as i128 * NANOS_PER_SEC + delta.subsec_nanos() as i128;
    let week_ns = WEEK_SECONDS as i128 * NANOS_PER_SEC;

    // Euclidean split keeps tow non-negative for pre-epoch instants.
    let wn = total_ns.div_euclid(week_ns) as i64;
    let tow = total_ns.rem_euclid(week_ns) as f64 * 1e-9;

    GpsTime { wn, tow }
}

/// Inverse of [`datetime_to_gps_format`]; the result is still on the GPS
/// time scale. Exact at nanosecond resolution.
pub fn gps_format_to_datetime(gps: &GpsTime) -> DateTime<Utc> {
    *GPS_EPOCH
        + Duration::seconds(gps.wn * WEEK_SECONDS)
        + Duration::nanoseconds((gps.tow * 1e9).round() as i64)
}

/// Cumulative GPS−UTC offset, in whole seconds, in force at the given
/// GPS-timescale instant.
///
/// Instants before the GPS epoch are outside the table's validity and are
/// rejected.
pub fn gps_minus_utc_seconds(gpst: DateTime<Utc>) -> Result<i64> {
    if gpst < *GPS_EPOCH {
        return Err(Error::BeforeGpsEpoch(gpst));
    }

    let table = &*GPS_THRESHOLDS;
    let idx = table.partition_point(|&(threshold, _)| threshold <= gpst);
    Ok(if idx == 0 { 0 } else { table[idx - 1].1 })
}

/// Convert a GPS-timescale instant to UTC.
///
/// For a (week, time-of-week) input use [`GpsTime::to_utc`]. An inserted
/// leap second (23:59:60) has no representation here; GPS instants inside
/// it land on a repeat of 23:59:59.
pub fn gpst_to_utc(gpst: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let offset = gps_minus_utc_seconds(gpst)?;
    Ok(gpst - Duration::seconds(offset))
}

/// Convert a UTC instant to GPS week number and time-of-week.
///
/// The leap-second table is indexed by GPS time, so the offset is found by
/// a one-step fixed-point refinement: estimate it with `utc` standing in
/// for the GPS instant, form the candidate GPS instant, and re-derive.
/// One refinement is exact because adjacent table entries are years apart.
pub fn utc_to_gpst(utc: DateTime<Utc>) -> Result<GpsTime> {
    let estimate = gps_minus_utc_seconds(utc)?;
    let candidate = utc + Duration::seconds(estimate);
    let offset = gps_minus_utc_seconds(candidate)?;
    Ok(datetime_to_gps_format(utc + Duration::seconds(offset)))
}
