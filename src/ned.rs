//! Local North-East-Down tangent frame and look angles.
//!
//! The NED frame is anchored at a reference ECEF point; its rotation is
//! derived from the geodetic latitude/longitude of that point.

use nalgebra::{Matrix3, Vector3};

use crate::error::{Error, Result};
use crate::geodetic::llh_from_ecef;

/// Rotation from ECEF to the NED frame at `ref_ecef`.
///
/// Rows are the North, East, and Down unit vectors expressed in the ECEF
/// basis.
pub fn ned_rotation(ref_ecef: &Vector3<f64>) -> Matrix3<f64> {
    let llh = llh_from_ecef(ref_ecef);
    let lat = llh.latitude.to_radians();
    let lon = llh.longitude.to_radians();

    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    Matrix3::new(
        -sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat,
        -sin_lon,           cos_lon,            0.0,
        -cos_lat * cos_lon, -cos_lat * sin_lon, -sin_lat,
    )
}

/// Rotate an ECEF displacement vector into the NED frame at `ref_ecef`.
///
/// `vector` is a displacement, not a point; no translation is applied.
pub fn ned_from_ecef(vector: &Vector3<f64>, ref_ecef: &Vector3<f64>) -> Vector3<f64> {
    ned_rotation(ref_ecef) * vector
}

/// Position of `target` relative to `reference`, in the NED frame at
/// `reference`.
pub fn relative_position_in_ned(
    target: &Vector3<f64>,
    reference: &Vector3<f64>,
) -> Vector3<f64> {
    ned_from_ecef(&(target - reference), reference)
}

/// Azimuth and elevation of `target` as seen from `reference`, in degrees.
///
/// Azimuth is measured clockwise from North and normalized into
/// [0, 360); elevation is positive above the local horizontal. Returns
/// [`Error::DegenerateGeometry`] when the two points coincide, since the
/// line of sight is then undefined.
pub fn azimuth_elevation_from_ecef(
    target: &Vector3<f64>,
    reference: &Vector3<f64>,
) -> Result<(f64, f64)> {
    let ned = relative_position_in_ned(target, reference);
    let range = ned.norm();
    if range == 0.0 {
        return Err(Error::DegenerateGeometry);
    }

    // atan2 lands in (-180, 180]; fold into [0, 360)
    let mut azimuth = ned.y.atan2(ned.x).to_degrees();
    if azimuth < 0.0 {
        azimuth += 360.0;
    }

    let elevation = (-ned.z / range).asin().to_degrees();

    Ok((azimuth, elevation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::geodetic::{ecef_from_llh, Llh};

    #[test]
    fn test_rotation_rows_are_orthonormal() {
        let reference = ecef_from_llh(&Llh::new(38.0, 122.0, 120.0));
        let m = ned_rotation(&reference);

        for i in 0..3 {
            assert_relative_eq!(m.row(i).norm(), 1.0, epsilon = 1e-12);
            for j in (i + 1)..3 {
                assert_relative_eq!(m.row(i).dot(&m.row(j)), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_known_ned_rotation_value() {
        // Regression value; the reference is deep inside the ellipsoid,
        // which exercises the interior branch of the geodetic solve.
        let ned = ned_from_ecef(&Vector3::new(1.0, 1.0, 1.0), &Vector3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(ned.x, 1.13204490e-01, epsilon = 1e-6);
        assert_relative_eq!(ned.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(ned.z, -1.72834740, epsilon = 1e-6);
    }

    #[test]
    fn test_relative_position_rotates_the_difference() {
        // relative_position_in_ned rotates target − reference, so with
        // target − reference = −(1, 1, 1) it is the negated rotation of
        // the point above.
        let target = Vector3::new(1.0, 1.0, 1.0);
        let reference = Vector3::new(2.0, 2.0, 2.0);

        let rel = relative_position_in_ned(&target, &reference);
        assert_relative_eq!(rel.x, -1.13204490e-01, epsilon = 1e-6);
        assert_relative_eq!(rel.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(rel.z, 1.72834740, epsilon = 1e-6);

        let rotated = ned_from_ecef(&(target - reference), &reference);
        assert_relative_eq!((rel - rotated).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_target_straight_up() {
        let reference = ecef_from_llh(&Llh::new(45.0, 9.0, 200.0));
        let target = ecef_from_llh(&Llh::new(45.0, 9.0, 500200.0));

        let (_, elevation) = azimuth_elevation_from_ecef(&target, &reference).unwrap();
        assert_relative_eq!(elevation, 90.0, epsilon = 1e-6);
    }

    #[test]
    fn test_target_due_east_on_horizon() {
        let reference = ecef_from_llh(&Llh::new(0.0, 0.0, 0.0));
        // A point 1 km due east along the local tangent plane: +y in ECEF
        // at the equator/prime meridian.
        let target = reference + Vector3::new(0.0, 1000.0, 0.0);

        let (azimuth, elevation) = azimuth_elevation_from_ecef(&target, &reference).unwrap();
        assert_relative_eq!(azimuth, 90.0, epsilon = 1e-9);
        assert_relative_eq!(elevation, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_target_due_north() {
        let reference = ecef_from_llh(&Llh::new(0.0, 0.0, 0.0));
        // +z in ECEF is due north on the equatorial tangent plane.
        let target = reference + Vector3::new(0.0, 0.0, 1000.0);

        let (azimuth, elevation) = azimuth_elevation_from_ecef(&target, &reference).unwrap();
        assert_relative_eq!(azimuth, 0.0, epsilon = 1e-9);
        assert_relative_eq!(elevation, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_coincident_points_rejected() {
        let point = ecef_from_llh(&Llh::new(10.0, 10.0, 0.0));
        assert_eq!(
            azimuth_elevation_from_ecef(&point, &point),
            Err(Error::DegenerateGeometry)
        );
    }
}
