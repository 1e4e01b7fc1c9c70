//! # Time utilities
//!
//! Conversions between the TLE epoch convention (two-digit year + fractional day of
//! year, UTC), Julian dates, and [`hifitime::Epoch`], together with the two sidereal
//! time models used by SGP4:
//!
//! * [`gstime`] – IAU-82 Greenwich mean sidereal time from a UT1 Julian date,
//! * [`gstime_afspc`] – the legacy AFSPC polynomial referenced to 1970-01-01.
//!
//! UT1 is approximated by UTC everywhere; no EOP data is read.
use hifitime::Epoch;

use crate::constants::{
    JulianDate, Radian, DAYS_PER_JULIAN_CENTURY, DPI, JD_J2000, JD_SGP4_EPOCH_ORIGIN, RADEG,
};
use crate::kepler::principal_angle;

/// Julian date from a Gregorian calendar date (valid 1900–2100).
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`: calendar date (`day` may be 0 to reference the last day of
///   the previous month).
/// * `hour`, `minute`: integral time of day.
/// * `second`: seconds, may be fractional.
///
/// Return
/// ------
/// * The Julian date.
pub fn jday(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> JulianDate {
    let year = year as f64;
    let month = month as f64;

    367.0 * year - (7.0 * (year + ((month + 9.0) / 12.0).floor()) * 0.25).floor()
        + (275.0 * month / 9.0).floor()
        + day as f64
        + 1_721_013.5
        + ((second / 60.0 + minute as f64) / 60.0 + hour as f64) / 24.0
}

/// Calendar breakdown of a fractional day of year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayOfYearBreakdown {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// Split a fractional day of year (1.0 = Jan 1 00:00) into month, day, hour, minute and second.
pub fn days_to_mdhms(year: i32, days: f64) -> DayOfYearBreakdown {
    let february = if year % 4 == 0 { 29 } else { 28 };
    let month_lengths = [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let day_of_year = days.floor() as u32;
    let mut month = 1;
    let mut elapsed = 0;
    while month < 12 && day_of_year > elapsed + month_lengths[month as usize - 1] {
        elapsed += month_lengths[month as usize - 1];
        month += 1;
    }

    let mut temp = (days - day_of_year as f64) * 24.0;
    let hour = temp.floor();
    temp = (temp - hour) * 60.0;
    let minute = temp.floor();

    DayOfYearBreakdown {
        month,
        day: day_of_year - elapsed,
        hour: hour as u32,
        minute: minute as u32,
        second: (temp - minute) * 60.0,
    }
}

/// Expand a two-digit TLE year: values below 57 belong to the 21st century.
pub fn full_year(two_digit_year: u32) -> i32 {
    if two_digit_year < 57 {
        2000 + two_digit_year as i32
    } else {
        1900 + two_digit_year as i32
    }
}

/// Julian date of a TLE epoch.
///
/// Arguments
/// ---------
/// * `year`: four-digit year.
/// * `epoch_days`: fractional day of year, Jan 1 00:00 UTC being `1.0`.
///
/// Return
/// ------
/// * The Julian date of the epoch (UTC, used as UT1).
pub fn tle_epoch_to_jd(year: i32, epoch_days: f64) -> JulianDate {
    let b = days_to_mdhms(year, epoch_days);
    jday(year, b.month, b.day, b.hour, b.minute, b.second)
}

/// Days since 1949-12-31 00:00 UT, the epoch argument expected by the SGP4 initializer.
pub fn sgp4_epoch_days(jd: JulianDate) -> f64 {
    jd - JD_SGP4_EPOCH_ORIGIN
}

/// Build a UTC [`Epoch`] from a Julian date.
pub fn jd_to_epoch(jd: JulianDate) -> Epoch {
    Epoch::from_jde_utc(jd)
}

/// Greenwich mean sidereal time (IAU-82) from a UT1 Julian date.
///
/// The polynomial gives sidereal time in seconds of time:
///
/// ```text
/// θ = 67310.54841 + (876600·3600 + 8640184.812866)·T + 0.093104·T² − 6.2e-6·T³
/// ```
///
/// with `T` the Julian centuries of UT1 since J2000. One second of time is 1/240 degree.
///
/// Arguments
/// ---------
/// * `jd_ut1`: Julian date in UT1.
///
/// Return
/// ------
/// * GMST in radians, reduced to `[0, 2π)`.
///
/// See also
/// --------
/// * [`gstime_afspc`] – legacy sidereal angle used in AFSPC operation mode.
pub fn gstime(jd_ut1: JulianDate) -> Radian {
    let tut1 = (jd_ut1 - JD_J2000) / DAYS_PER_JULIAN_CENTURY;
    let seconds = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876_600.0 * 3600.0 + 8_640_184.812_866) * tut1
        + 67_310.548_41;

    principal_angle(seconds * RADEG / 240.0)
}

/// Greenwich sidereal angle at epoch with the AFSPC formulation.
///
/// Arguments
/// ---------
/// * `epoch`: days since 1949-12-31 00:00 UT (see [`sgp4_epoch_days`]).
///
/// Return
/// ------
/// * Sidereal angle in radians, reduced to `[0, 2π)`.
pub fn gstime_afspc(epoch: f64) -> Radian {
    const C1: f64 = 1.720_279_169_407_036_39e-2;
    const THGR70: f64 = 1.732_134_385_650_937_4;
    const FK5R: f64 = 5.075_514_194_322_694_42e-15;

    let ts70 = epoch - 7305.0;
    let ds70 = (ts70 + 1.0e-8).floor();
    let tfrac = ts70 - ds70;
    let c1p2p = C1 + DPI;

    principal_angle(THGR70 + C1 * ds70 + c1p2p * tfrac + ts70 * ts70 * FK5R)
}
