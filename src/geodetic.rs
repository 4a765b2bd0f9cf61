//! Conversions between ECEF Cartesian and geodetic (LLH) coordinates.
//!
//! The geodetic-to-Cartesian direction is closed form. The reverse has no
//! satisfactory closed form; we use Fukushima's 2006 method, a Halley-type
//! iteration on the tangent of the reduced latitude which needs no
//! transcendental calls inside the loop and converges cubically
//! ("Transformation from Cartesian to Geodetic Coordinates Accelerated by
//! Halley's Method", T. Fukushima, Journal of Geodesy, 2006).

use nalgebra::Vector3;

use crate::wgs84::{WGS84_A, WGS84_B, WGS84_E2};

/// Geodetic coordinates on the WGS84 ellipsoid.
///
/// Latitude and longitude are in degrees, height in meters above the
/// ellipsoid. Degrees are the convention across this crate's whole public
/// surface; radians never leak out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Llh {
    pub latitude: f64,  // degrees, [-90, 90]
    pub longitude: f64, // degrees, (-180, 180]
    pub height: f64,    // meters above the ellipsoid
}

impl Llh {
    pub fn new(latitude: f64, longitude: f64, height: f64) -> Self {
        Self {
            latitude,
            longitude,
            height,
        }
    }
}

/// Convert geodetic coordinates to ECEF Cartesian coordinates (meters).
///
/// Closed form, defined for all finite inputs.
pub fn ecef_from_llh(llh: &Llh) -> Vector3<f64> {
    let lat = llh.latitude.to_radians();
    let lon = llh.longitude.to_radians();

    // Radius of curvature in the prime vertical
    let d = WGS84_E2.sqrt() * lat.sin();
    let n = WGS84_A / (1.0 - d * d).sqrt();

    let x = (n + llh.height) * lat.cos() * lon.cos();
    let y = (n + llh.height) * lat.cos() * lon.sin();
    let z = ((1.0 - WGS84_E2) * n + llh.height) * lat.sin();

    Vector3::new(x, y, z)
}

/// Convert ECEF Cartesian coordinates (meters) to geodetic coordinates.
///
/// Never fails for finite input: the iteration count is capped at
/// [`ReducedLatitudeSolver::MAX_STEPS`] and the best available result is
/// returned even if the convergence tolerance was not met, trading a few
/// nanometers of worst-case accuracy for a hard latency bound. The cubic
/// convergence rate makes the cap comfortable for physically meaningful
/// inputs; only deep-interior points run it out.
pub fn llh_from_ecef(ecef: &Vector3<f64>) -> Llh {
    // Distance from the polar axis; longitude comes out exactly.
    let p = ecef.xy().norm();
    let lon = if p == 0.0 { 0.0 } else { ecef.y.atan2(ecef.x) };

    // On (or extremely close to) the polar axis the iteration converges
    // too slowly; the answer there is immediate anyway.
    if p < WGS84_A * 1e-16 {
        return Llh {
            latitude: 90f64.copysign(ecef.z),
            longitude: lon.to_degrees(),
            height: ecef.z.abs() - WGS84_B,
        };
    }

    // Non-dimensionalize to keep the iteration well scaled.
    let e_c = (1.0 - WGS84_E2).sqrt();
    let big_p = p / WGS84_A;
    let big_z = ecef.z.abs() * e_c / WGS84_A;

    let mut solver = ReducedLatitudeSolver::new(big_p, big_z);
    let (s, c) = solver.run();
    let a_n = (s * s + c * c).sqrt();

    let lat = 1f64.copysign(ecef.z) * (s / (e_c * c)).atan();
    let height = (p * e_c * c + ecef.z.abs() * s - WGS84_A * e_c * a_n)
        / (e_c * e_c * c * c + s * s).sqrt();

    Llh {
        latitude: lat.to_degrees(),
        longitude: lon.to_degrees(),
        height,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SolverState {
    Iterating,
    Converged,
    CapReached,
}

/// Bounded fixed-point solver for the tangent of the reduced latitude.
///
/// Carries the (S, C) pair whose ratio is tan(reduced latitude) for the
/// scaled inputs (P, Z). Only the ratio is meaningful; each step rescales
/// the pair so the larger component is exactly 1, which keeps the raw
/// values from overflowing across iterations.
#[derive(Debug)]
struct ReducedLatitudeSolver {
    p: f64,
    z: f64,
    s: f64,
    c: f64,
    prev_s: f64,
    prev_c: f64,
    steps: usize,
    state: SolverState,
}

impl ReducedLatitudeSolver {
    const MAX_STEPS: usize = 10;
    const TOLERANCE: f64 = 1e-16;

    fn new(p: f64, z: f64) -> Self {
        Self {
            p,
            z,
            // Zero-height solution as the starting point.
            s: z,
            c: (1.0 - WGS84_E2).sqrt() * p,
            // S and C are non-negative from here on, so -1 can never
            // generate a spurious first-step convergence.
            prev_s: -1.0,
            prev_c: -1.0,
            steps: 0,
            state: SolverState::Iterating,
        }
    }

    /// One Halley update of (S, C), including rescaling and the
    /// convergence check.
    fn step(&mut self) {
        let e = WGS84_E2.sqrt();
        let (s, c) = (self.s, self.c);

        let a_n = (s * s + c * c).sqrt();
        let d_n = self.z * a_n * a_n * a_n + WGS84_E2 * s * s * s;
        let f_n = self.p * a_n * a_n * a_n - WGS84_E2 * c * c * c;
        let b_n = 1.5 * e * s * c * c * (a_n * (self.p * s - self.z * c) - e * s * c);

        self.s = d_n * f_n - b_n * s;
        self.c = f_n * f_n - b_n * c;

        // Rescale by the larger-magnitude component. The ratio S/C is all
        // that matters and at most one of the pair can be zero, so the
        // division is always defined.
        if self.s.abs() > self.c.abs() {
            self.c /= self.s;
            self.s = 1.0;
        } else {
            self.s /= self.c;
            self.c = 1.0;
        }

        self.steps += 1;
        if (self.s - self.prev_s).abs() < Self::TOLERANCE
            && (self.c - self.prev_c).abs() < Self::TOLERANCE
        {
            self.state = SolverState::Converged;
        } else if self.steps >= Self::MAX_STEPS {
            self.state = SolverState::CapReached;
        } else {
            self.prev_s = self.s;
            self.prev_c = self.c;
        }
    }

    /// Drive the iteration to convergence or the step cap and return the
    /// final (S, C) pair.
    fn run(&mut self) -> (f64, f64) {
        while self.state == SolverState::Iterating {
            self.step();
        }
        (self.s, self.c)
    }
}
