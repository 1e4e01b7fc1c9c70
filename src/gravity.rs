//! # Earth gravity models
//!
//! SGP4 is defined against a specific set of geopotential constants. Three sets are in
//! common use; the TLE producer historically fits elements with WGS-72, while most modern
//! consumers run WGS-84. [`GravityModel::Wgs84`] is the default.
//!
//! Each set provides:
//!
//! * `radius_km` – Earth equatorial radius Rₑ (km), the canonical distance unit,
//! * `mu` – gravitational parameter (km³/s²),
//! * `xke` – `60 / sqrt(Rₑ³/μ)`, the canonical rate unit (1/min),
//! * `tumin` – `1 / xke`, minutes per canonical time unit,
//! * `j2`, `j3`, `j4` – un-normalized zonal harmonics,
//! * `j3oj2` – `J3 / J2`.
use serde::{Deserialize, Serialize};

/// Selectable geopotential constant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityModel {
    /// Original Spacetrack Report #3 constants (xke given directly).
    Wgs72Old,
    /// WGS-72 constants.
    Wgs72,
    /// WGS-84 / EGM-96 constants.
    #[default]
    Wgs84,
}

/// Resolved constants for a [`GravityModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthGravity {
    pub tumin: f64,
    pub mu: f64,
    pub radius_km: f64,
    pub xke: f64,
    pub j2: f64,
    pub j3: f64,
    pub j4: f64,
    pub j3oj2: f64,
}

impl GravityModel {
    /// Resolve the constant set.
    pub fn constants(&self) -> EarthGravity {
        let (mu, radius_km, xke, j2, j3, j4) = match self {
            GravityModel::Wgs72Old => (
                398_600.799_64,
                6378.135,
                0.074_366_916_1,
                0.001_082_616,
                -0.000_002_538_81,
                -0.000_001_655_97,
            ),
            GravityModel::Wgs72 => {
                let (mu, radius_km): (f64, f64) = (398_600.8, 6378.135);
                (
                    mu,
                    radius_km,
                    60.0 / (radius_km * radius_km * radius_km / mu).sqrt(),
                    0.001_082_616,
                    -0.000_002_538_81,
                    -0.000_001_655_97,
                )
            }
            GravityModel::Wgs84 => {
                let (mu, radius_km): (f64, f64) = (398_600.5, 6378.137);
                (
                    mu,
                    radius_km,
                    60.0 / (radius_km * radius_km * radius_km / mu).sqrt(),
                    0.001_082_629_989_05,
                    -0.000_002_532_153_06,
                    -0.000_001_610_987_61,
                )
            }
        };

        EarthGravity {
            tumin: 1.0 / xke,
            mu,
            radius_km,
            xke,
            j2,
            j3,
            j4,
            j3oj2: j3 / j2,
        }
    }
}

impl EarthGravity {
    /// Canonical velocity unit expressed in km/s (`Rₑ · xke / 60`).
    pub fn velocity_unit_km_s(&self) -> f64 {
        self.radius_km * self.xke / 60.0
    }
}

#[cfg(test)]
mod gravity_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_constants() {
        let g = GravityModel::Wgs84.constants();
        assert_eq!(g.radius_km, 6378.137);
        assert_relative_eq!(g.xke, 0.07436685316871385, epsilon = 1e-12);
        assert_relative_eq!(g.tumin * g.xke, 1.0, epsilon = 1e-15);
        assert_relative_eq!(g.j3oj2, g.j3 / g.j2);
    }

    #[test]
    fn test_wgs72old_uses_tabulated_xke() {
        let g = GravityModel::Wgs72Old.constants();
        assert_eq!(g.xke, 0.0743669161);
        assert_eq!(g.radius_km, 6378.135);
    }

    #[test]
    fn test_default_model() {
        assert_eq!(GravityModel::default(), GravityModel::Wgs84);
    }

    #[test]
    fn test_velocity_unit() {
        let g = GravityModel::Wgs72.constants();
        assert_relative_eq!(g.velocity_unit_km_s(), 7.905_370_51, epsilon = 1e-7);
    }
}
