//! Property tests for the conversion round trips.

use chrono::Duration;
use nalgebra::Vector3;
use proptest::prelude::*;

use gnssutils::{
    datetime_to_gps_format, ecef_from_llh, gps_format_to_datetime, llh_from_ecef, Llh,
    GPS_EPOCH, WEEK_SECONDS,
};
use gnssutils::wgs84::WGS84_A;

proptest! {
    #[test]
    fn llh_survives_ecef_roundtrip(
        lat in -90.0f64..=90.0,
        lon in -180.0f64..180.0,
        height in (-0.5 * WGS84_A)..(4.0 * WGS84_A),
    ) {
        let llh = Llh::new(lat, lon, height);
        let back = llh_from_ecef(&ecef_from_llh(&llh));

        prop_assert!((back.latitude - lat).abs() < 1e-8,
            "latitude {} -> {}", lat, back.latitude);
        // Longitude is unrecoverable on the polar axis itself.
        if lat.abs() < 90.0 - 1e-9 {
            prop_assert!((back.longitude - lon).abs() < 1e-8,
                "longitude {} -> {}", lon, back.longitude);
        }
        prop_assert!((back.height - height).abs() < 1e-6,
            "height {} -> {}", height, back.height);
    }

    #[test]
    fn ecef_survives_llh_roundtrip(
        x in (-4.0 * WGS84_A)..(4.0 * WGS84_A),
        y in (-4.0 * WGS84_A)..(4.0 * WGS84_A),
        z in (-4.0 * WGS84_A)..(4.0 * WGS84_A),
    ) {
        let ecef = Vector3::new(x, y, z);
        // LLH is not defined at the Earth's center itself.
        prop_assume!(ecef.norm() > 1e-3);

        let back = ecef_from_llh(&llh_from_ecef(&ecef));
        prop_assert!((back - ecef).norm() < 1e-6,
            "{:?} -> {:?}", ecef, back);
    }

    #[test]
    fn week_tow_roundtrip_is_exact(
        wn in 0i64..4096,
        tow_ns in 0i64..(WEEK_SECONDS * 1_000_000_000),
    ) {
        let t = *GPS_EPOCH
            + Duration::seconds(wn * WEEK_SECONDS)
            + Duration::nanoseconds(tow_ns);

        let gps = datetime_to_gps_format(t);
        prop_assert_eq!(gps.wn, wn);
        prop_assert!(gps.tow >= 0.0 && gps.tow < WEEK_SECONDS as f64);
        prop_assert_eq!(gps_format_to_datetime(&gps), t);

        let again = datetime_to_gps_format(gps_format_to_datetime(&gps));
        prop_assert_eq!(again, gps);
    }
}
