//! # Earth-fixed → geodetic conversion
//!
//! Converts an Earth-fixed Cartesian position (km) into geodetic latitude, longitude and
//! altitude above a reference ellipsoid (WGS-84 by default).
//!
//! The latitude is obtained by fixed-point iteration starting from the geocentric
//! declination:
//!
//! ```text
//! C = a / sqrt(1 − e² sin²φ)
//! φ ← atan((z + C e² sin φ) / ρ),      ρ = sqrt(x² + y²)
//! ```
//!
//! The loop is bounded by [`GeodeticSettings`]. The altitude uses `ρ / cos φ − C` away from
//! the poles and `z / sin φ − C (1 − e²)` within one degree of them.
//!
//! Longitudes are reported in `[-π, π)`.
use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Kilometer, Radian, RADEG, WGS84_INVERSE_FLATTENING, WGS84_SEMI_MAJOR_AXIS_KM,
};
use crate::groundtrack_errors::TransformError;
use crate::kepler::signed_angle;

/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Equatorial radius (km)
    pub semi_major_axis_km: Kilometer,
    /// Flattening `f = (a − b) / a`
    pub flattening: f64,
}

impl Ellipsoid {
    pub fn wgs84() -> Self {
        Ellipsoid {
            semi_major_axis_km: WGS84_SEMI_MAJOR_AXIS_KM,
            flattening: 1.0 / WGS84_INVERSE_FLATTENING,
        }
    }

    /// First eccentricity squared, `e² = f (2 − f)`.
    pub fn eccentricity_squared(&self) -> f64 {
        self.flattening * (2.0 - self.flattening)
    }

    /// Polar radius (km).
    pub fn semi_minor_axis_km(&self) -> Kilometer {
        self.semi_major_axis_km * (1.0 - self.flattening)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::wgs84()
    }
}

/// Convergence controls of the latitude iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticSettings {
    /// Stop once the latitude changes by less than this value (radians).
    pub tolerance: f64,
    /// Hard cap on iterations.
    pub max_iterations: usize,
}

impl Default for GeodeticSettings {
    fn default() -> Self {
        GeodeticSettings {
            tolerance: 1.0e-8,
            max_iterations: 10,
        }
    }
}

/// Geodetic coordinates. Angles are stored in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPoint {
    /// Geodetic latitude in `[-π/2, π/2]`
    pub latitude: Radian,
    /// Longitude in `[-π, π)`, positive east
    pub longitude: Radian,
    /// Height above the ellipsoid (km)
    pub altitude: Kilometer,
}

impl GeodeticPoint {
    pub fn latitude_deg(&self) -> Degree {
        self.latitude / RADEG
    }

    pub fn longitude_deg(&self) -> Degree {
        self.longitude / RADEG
    }
}

/// Convert an Earth-fixed position into geodetic coordinates.
///
/// Arguments
/// ---------
/// * `r`: Earth-fixed position (km).
/// * `ellipsoid`: reference ellipsoid.
/// * `settings`: tolerance and iteration cap of the latitude iteration.
///
/// Return
/// ------
/// * The geodetic point, or [`TransformError::NonFinite`] if `r` has a non-finite component.
///
/// See also
/// --------
/// * [`geodetic_to_ecef`] – the closed-form inverse.
pub fn ecef_to_geodetic(
    r: &Vector3<f64>,
    ellipsoid: &Ellipsoid,
    settings: &GeodeticSettings,
) -> Result<GeodeticPoint, TransformError> {
    if !r.iter().all(|c| c.is_finite()) {
        return Err(TransformError::NonFinite("earth-fixed position"));
    }

    let a = ellipsoid.semi_major_axis_km;
    let e2 = ellipsoid.eccentricity_squared();
    let rho = r.x.hypot(r.y);

    // on the polar axis the longitude is undefined
    if rho < settings.tolerance {
        let latitude = if r.z >= 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
        return Ok(GeodeticPoint {
            latitude,
            longitude: 0.0,
            altitude: r.z.abs() - ellipsoid.semi_minor_axis_km(),
        });
    }

    let longitude = signed_angle(r.y.atan2(r.x));

    let mut latitude = (r.z / r.norm()).asin();
    let mut previous = f64::INFINITY;
    let mut c = a;
    let mut iterations = 0;
    while (previous - latitude).abs() >= settings.tolerance
        && iterations < settings.max_iterations
    {
        previous = latitude;
        let sin_lat = latitude.sin();
        c = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude = ((r.z + c * e2 * sin_lat) / rho).atan();
        iterations += 1;
    }

    let altitude = if FRAC_PI_2 - latitude.abs() > RADEG {
        rho / latitude.cos() - c
    } else {
        r.z / latitude.sin() - c * (1.0 - e2)
    };

    Ok(GeodeticPoint {
        latitude,
        longitude,
        altitude,
    })
}

/// Earth-fixed position (km) of a geodetic point.
pub fn geodetic_to_ecef(point: &GeodeticPoint, ellipsoid: &Ellipsoid) -> Vector3<f64> {
    let e2 = ellipsoid.eccentricity_squared();
    let (sin_lat, cos_lat) = point.latitude.sin_cos();
    let (sin_lon, cos_lon) = point.longitude.sin_cos();
    let n = ellipsoid.semi_major_axis_km / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    Vector3::new(
        (n + point.altitude) * cos_lat * cos_lon,
        (n + point.altitude) * cos_lat * sin_lon,
        (n * (1.0 - e2) + point.altitude) * sin_lat,
    )
}
