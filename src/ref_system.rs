//! # Reference frames
//!
//! SGP4 outputs states in the True Equator, Mean Equinox (TEME) frame of date. Ground
//! tracks need them in an Earth-fixed frame; this module performs that rotation.
//!
//! The Earth-fixed frame used here is the pseudo Earth-fixed frame with polar motion set
//! to identity and no length-of-day correction, which is the usual companion of SGP4:
//!
//! ```text
//! r_ecef = R_z(−θ) · r_teme
//! v_ecef = R_z(−θ) · v_teme − ω⊕ × r_ecef
//! ```
//!
//! where `θ` is the IAU-82 Greenwich mean sidereal time ([`crate::time::gstime`]) and
//! `ω⊕ = 7.292115146706979e-5 rad/s`.
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{JulianDate, EARTH_ROTATION_RATE};
use crate::groundtrack_errors::TransformError;
use crate::time::gstime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefSystem {
    // True equator, mean equinox of date (SGP4 output frame)
    Teme,
    // Earth-fixed, polar motion neglected
    Ecef,
}

/// Position (km) and velocity (km/s) tagged with their frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub frame: RefSystem,
}

impl StateVector {
    pub fn teme(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector {
            position,
            velocity,
            frame: RefSystem::Teme,
        }
    }

    pub fn ecef(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector {
            position,
            velocity,
            frame: RefSystem::Ecef,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|c| c.is_finite())
    }

    fn expect_frame(&self, expected: RefSystem) -> Result<(), TransformError> {
        if self.frame != expected {
            return Err(TransformError::UnexpectedFrame {
                expected,
                found: self.frame,
            });
        }
        if !self.is_finite() {
            return Err(TransformError::NonFinite("state vector"));
        }
        Ok(())
    }
}

/// Rotation matrix of angle `alpha` around the Z axis.
///
/// The rotation is applied to the vector in a fixed frame (direct sense), so
/// `rotation_z(−θ)` expresses an inertial vector in a frame rotated by `+θ`.
pub fn rotation_z(alpha: f64) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), alpha).into()
}

/// Earth angular velocity vector (rad/s).
pub fn earth_rotation_vector() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, EARTH_ROTATION_RATE)
}

/// Rotate a TEME state into the Earth-fixed frame.
///
/// Arguments
/// ---------
/// * `state`: TEME state vector.
/// * `jd_ut1`: Julian date (UT1) of the state.
///
/// Return
/// ------
/// * The Earth-fixed state, or a [`TransformError`] if `state` is not tagged TEME or has
///   a non-finite component.
///
/// See also
/// --------
/// * [`ecef_to_teme`] – inverse rotation.
pub fn teme_to_ecef(state: &StateVector, jd_ut1: JulianDate) -> Result<StateVector, TransformError> {
    state.expect_frame(RefSystem::Teme)?;
    if !jd_ut1.is_finite() {
        return Err(TransformError::NonFinite("julian date"));
    }

    let rot = rotation_z(-gstime(jd_ut1));
    let position = rot * state.position;
    let velocity = rot * state.velocity - earth_rotation_vector().cross(&position);
    Ok(StateVector::ecef(position, velocity))
}

/// Rotate an Earth-fixed state back into TEME.
pub fn ecef_to_teme(state: &StateVector, jd_ut1: JulianDate) -> Result<StateVector, TransformError> {
    state.expect_frame(RefSystem::Ecef)?;
    if !jd_ut1.is_finite() {
        return Err(TransformError::NonFinite("julian date"));
    }

    let rot = rotation_z(gstime(jd_ut1));
    let inertial_velocity = state.velocity + earth_rotation_vector().cross(&state.position);
    Ok(StateVector::teme(
        rot * state.position,
        rot * inertial_velocity,
    ))
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use crate::constants::JD_J2000;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_z_direction() {
        let rot = rotation_z(std::f64::consts::FRAC_PI_2);
        let x = rot * Vector3::x();
        assert_relative_eq!(x, Vector3::y(), epsilon = 1e-15);
        assert_relative_eq!(rot.transpose() * rot, Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_teme_to_ecef_at_j2000() {
        let theta = gstime(JD_J2000);
        let r = Vector3::new(7000.0, 0.0, 1000.0);
        let state = StateVector::teme(r, Vector3::zeros());
        let ecef = teme_to_ecef(&state, JD_J2000).unwrap();

        assert_eq!(ecef.frame, RefSystem::Ecef);
        assert_relative_eq!(ecef.position.x, 7000.0 * theta.cos(), epsilon = 1e-9);
        assert_relative_eq!(ecef.position.y, -7000.0 * theta.sin(), epsilon = 1e-9);
        assert_relative_eq!(ecef.position.z, 1000.0, epsilon = 1e-12);
        assert_relative_eq!(ecef.position.norm(), r.norm(), epsilon = 1e-9);
    }

    #[test]
    fn test_ground_fixed_point_has_zero_earth_fixed_velocity() {
        let jd = 2_454_000.25;
        let site = StateVector::ecef(Vector3::new(4000.0, 3000.0, 3500.0), Vector3::zeros());
        let inertial = ecef_to_teme(&site, jd).unwrap();
        assert_relative_eq!(
            inertial.velocity.norm(),
            EARTH_ROTATION_RATE * 5000.0,
            epsilon = 1e-12
        );

        let back = teme_to_ecef(&inertial, jd).unwrap();
        assert_relative_eq!(back.position, site.position, epsilon = 1e-9);
        assert_relative_eq!(back.velocity, Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn test_frame_and_finiteness_checks() {
        let ecef = StateVector::ecef(Vector3::x(), Vector3::y());
        assert_eq!(
            teme_to_ecef(&ecef, JD_J2000),
            Err(TransformError::UnexpectedFrame {
                expected: RefSystem::Teme,
                found: RefSystem::Ecef
            })
        );

        let bad = StateVector::teme(Vector3::new(f64::NAN, 0.0, 0.0), Vector3::zeros());
        assert_eq!(
            teme_to_ecef(&bad, JD_J2000),
            Err(TransformError::NonFinite("state vector"))
        );

        let ok = StateVector::teme(Vector3::x(), Vector3::y());
        assert_eq!(
            teme_to_ecef(&ok, f64::NAN),
            Err(TransformError::NonFinite("julian date"))
        );
    }
}
