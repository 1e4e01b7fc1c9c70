//! # Constants and type definitions for groundtrack
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Angular and time conversions (degrees ↔ radians, days ↔ minutes)
//! - Julian date reference points used by the SGP4 epoch convention
//! - WGS-84 reference ellipsoid used for geodetic conversion
//! - Earth rotation rate used for the TEME → Earth-fixed velocity correction
//!
//! Gravity-model constants (μ, Rₑ, J2…J4) live in [`crate::gravity`] because they are
//! selectable at configuration time.

// -------------------------------------------------------------------------------------------------
// Angular and time conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of minutes in a day
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Minutes per radian of mean motion at one revolution per day (`1440 / 2π`)
pub const XPDOTP: f64 = MINUTES_PER_DAY / DPI;

/// Julian date of J2000.0 (2000-01-01 12:00:00)
pub const JD_J2000: f64 = 2_451_545.0;

/// Julian date of 1949-12-31 00:00 UT, origin of the SGP4 internal epoch
pub const JD_SGP4_EPOCH_ORIGIN: f64 = 2_433_281.5;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

// -------------------------------------------------------------------------------------------------
// Earth figure and rotation
// -------------------------------------------------------------------------------------------------

/// WGS-84 equatorial radius in kilometers
pub const WGS84_SEMI_MAJOR_AXIS_KM: f64 = 6378.137;

/// WGS-84 inverse flattening
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;

/// Earth rotation rate in rad/s (IAU-82, zero excess length of day)
pub const EARTH_ROTATION_RATE: f64 = 7.292_115_146_706_98e-5;

// -------------------------------------------------------------------------------------------------
// Propagation defaults
// -------------------------------------------------------------------------------------------------

/// Orbital period (minutes) at or above which the deep-space branch is used
pub const DEEP_SPACE_PERIOD_MINUTES: f64 = 225.0;

/// Radius, in earth radii, below which a satellite is declared decayed
pub const DECAY_RADIUS_ER: f64 = 1.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Time offset in minutes
pub type Minutes = f64;
/// Julian date (days)
pub type JulianDate = f64;
/// NORAD catalog number
pub type SatelliteNumber = u32;
