//! # Two-line element set reader
//!
//! Parse NORAD **two-line element sets** (TLE) into a [`Tle`] record of decoded fields,
//! ready to be turned into propagator state by [`crate::elements::OrbitalElements::new`].
//!
//! ## Overview
//! -----------------
//! This module provides:
//! - A line-level error type [`ParseTleError`] describing every rejection reason.
//! - [`Tle::parse`], the fixed-column decoder for one pair of lines.
//! - [`parse_tle_set`], which splits a text blob into 2-line or 3-line (named) sets.
//! - [`read_tle_catalog`], which reads such a blob from disk.
//!
//! ## Units & Conventions
//! -----------------
//! - Fields are kept in the **TLE units**: degrees, revolutions per day, rev/day² and
//!   rev/day³ (the latter two already divided by 2 and 6 by the producer), B* in 1/earth radii.
//! - Two-digit epoch years below 57 are mapped to the 21st century.
//! - Catalog numbers support the **Alpha-5** scheme (leading letter, `I` and `O` skipped).
//!
//! ## Field Layout (0-based, half-open)
//! -----------------
//! Line 1: satnum `2..7`, classification `7`, designator `9..17`, epoch `18..32`,
//! ndot `33..43`, nddot `44..52`, B* `53..61`, ephemeris type `62`, element set `64..68`.
//!
//! Line 2: satnum `2..7`, inclination `8..16`, RAAN `17..25`, eccentricity `26..33`,
//! argument of perigee `34..42`, mean anomaly `43..51`, mean motion `52..63`,
//! revolution number `63..68`.
//!
//! Column 69 of both lines carries the modulo-10 checksum.
use std::ops::Range;

use camino::Utf8Path;
use hifitime::Epoch;
use itertools::Itertools;
use thiserror::Error;

use crate::{
    constants::{Degree, JulianDate, SatelliteNumber},
    groundtrack_errors::GroundTrackError,
    time::{full_year, jd_to_epoch, tle_epoch_to_jd},
};

/// Length of a TLE line including its checksum digit.
pub const TLE_LINE_LENGTH: usize = 69;

/// Line-level parsing errors for two-line element sets.
///
/// Variants
/// -----------------
/// * `LineLength` – The line (trailing whitespace removed) is not 69 characters long.
/// * `NonAscii` – The line contains non-ASCII characters.
/// * `LineNumber` – Column 1 does not hold the expected line number.
/// * `Checksum` – Column 69 does not match the modulo-10 checksum of columns 1–68.
/// * `SatelliteNumberMismatch` – Both lines do not describe the same object.
/// * `InvalidField` – A numeric field could not be decoded; payload carries the offending slice.
/// * `IncompleteSet` – A text blob ended in the middle of a set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseTleError {
    #[error("line {line} has {length} characters, expected 69")]
    LineLength { line: u8, length: usize },
    #[error("line {line} contains non-ASCII characters")]
    NonAscii { line: u8 },
    #[error("expected line number {line}, found {found:?}")]
    LineNumber { line: u8, found: char },
    #[error("checksum mismatch on line {line}: expected {expected}, computed {computed}")]
    Checksum { line: u8, expected: u8, computed: u8 },
    #[error("satellite numbers differ between lines ({line1} vs {line2})")]
    SatelliteNumberMismatch { line1: u32, line2: u32 },
    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
    #[error("incomplete element set starting at text line {0}")]
    IncompleteSet(usize),
}

/// Options controlling [`Tle::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TleParseOptions {
    /// Reject lines whose column-69 checksum does not match.
    pub verify_checksum: bool,
}

impl Default for TleParseOptions {
    fn default() -> Self {
        TleParseOptions {
            verify_checksum: true,
        }
    }
}

/// Decoded content of a two-line element set, in TLE units.
#[derive(Debug, Clone, PartialEq)]
pub struct Tle {
    /// Optional name line of a three-line set.
    pub name: Option<String>,
    pub satellite_number: SatelliteNumber,
    pub classification: char,
    pub international_designator: String,
    /// Four-digit epoch year.
    pub epoch_year: i32,
    /// Fractional day of year (1.0 = Jan 1 00:00 UTC).
    pub epoch_days: f64,
    /// First derivative of mean motion divided by two (rev/day²).
    pub mean_motion_dot: f64,
    /// Second derivative of mean motion divided by six (rev/day³).
    pub mean_motion_ddot: f64,
    /// Drag term (1/earth radii).
    pub bstar: f64,
    pub ephemeris_type: char,
    pub element_set_number: u32,
    pub inclination: Degree,
    pub right_ascension: Degree,
    pub eccentricity: f64,
    pub argument_of_perigee: Degree,
    pub mean_anomaly: Degree,
    /// Kozai mean motion (rev/day).
    pub mean_motion: f64,
    pub revolution_number: u32,
}

impl Tle {
    /// Decode a pair of TLE lines.
    ///
    /// Arguments
    /// -----------------
    /// * `line1`, `line2` – the two element lines; trailing whitespace and CR/LF are ignored.
    /// * `options` – parser switches (checksum verification).
    ///
    /// Return
    /// ----------
    /// * The decoded [`Tle`], or the first [`ParseTleError`] encountered. Fields are never
    ///   read out of bounds: the length is validated before any slicing.
    pub fn parse(line1: &str, line2: &str, options: &TleParseOptions) -> Result<Tle, ParseTleError> {
        let line1 = check_line(line1, 1, options)?;
        let line2 = check_line(line2, 2, options)?;

        let satellite_number = parse_satellite_number(line1)?;
        let satellite_number_2 = parse_satellite_number(line2)?;
        if satellite_number != satellite_number_2 {
            return Err(ParseTleError::SatelliteNumberMismatch {
                line1: satellite_number,
                line2: satellite_number_2,
            });
        }

        let classification = match line1.as_bytes()[7] {
            b' ' => 'U',
            c => c as char,
        };

        let two_digit_year: u32 = parse_number(line1, 18..20, "epoch year")?;
        let epoch_days = parse_decimal(line1, 20..32, "epoch day")?;
        if !(1.0..367.0).contains(&epoch_days) {
            return Err(invalid("epoch day", line1[20..32].trim()));
        }

        let ephemeris_type = match line1.as_bytes()[62] {
            b' ' => '0',
            c => c as char,
        };

        Ok(Tle {
            name: None,
            satellite_number,
            classification,
            international_designator: line1[9..17].trim().to_string(),
            epoch_year: full_year(two_digit_year),
            epoch_days,
            mean_motion_dot: parse_decimal(line1, 33..43, "first derivative of mean motion")?,
            mean_motion_ddot: parse_implied_decimal(
                line1,
                44..52,
                "second derivative of mean motion",
            )?,
            bstar: parse_implied_decimal(line1, 53..61, "bstar")?,
            ephemeris_type,
            element_set_number: parse_optional_integer(line1, 64..68, "element set number")?,
            inclination: parse_decimal(line2, 8..16, "inclination")?,
            right_ascension: parse_decimal(line2, 17..25, "right ascension")?,
            eccentricity: parse_eccentricity(line2)?,
            argument_of_perigee: parse_decimal(line2, 34..42, "argument of perigee")?,
            mean_anomaly: parse_decimal(line2, 43..51, "mean anomaly")?,
            mean_motion: parse_decimal(line2, 52..63, "mean motion")?,
            revolution_number: parse_optional_integer(line2, 63..68, "revolution number")?,
        })
    }

    /// Attach the name line of a three-line set.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Julian date of the element epoch (UTC).
    pub fn epoch_jd(&self) -> JulianDate {
        tle_epoch_to_jd(self.epoch_year, self.epoch_days)
    }

    /// Element epoch as a [`hifitime::Epoch`] (UTC).
    pub fn epoch(&self) -> Epoch {
        jd_to_epoch(self.epoch_jd())
    }
}

/// Modulo-10 checksum of the first 68 columns: digits count for their value, `-` for 1.
pub fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .take(TLE_LINE_LENGTH - 1)
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

fn check_line<'a>(
    raw: &'a str,
    line_number: u8,
    options: &TleParseOptions,
) -> Result<&'a str, ParseTleError> {
    let line = raw.trim_end();
    if !line.is_ascii() {
        return Err(ParseTleError::NonAscii { line: line_number });
    }
    if line.len() != TLE_LINE_LENGTH {
        return Err(ParseTleError::LineLength {
            line: line_number,
            length: line.len(),
        });
    }

    let found = line.as_bytes()[0] as char;
    if found.to_digit(10) != Some(line_number as u32) {
        return Err(ParseTleError::LineNumber {
            line: line_number,
            found,
        });
    }

    if options.verify_checksum {
        let computed = checksum(line);
        let expected = line.as_bytes()[TLE_LINE_LENGTH - 1];
        if !expected.is_ascii_digit() || expected - b'0' != computed {
            return Err(ParseTleError::Checksum {
                line: line_number,
                expected: expected.wrapping_sub(b'0'),
                computed,
            });
        }
    }
    Ok(line)
}

fn invalid(field: &'static str, value: &str) -> ParseTleError {
    ParseTleError::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(
    line: &str,
    range: Range<usize>,
    field: &'static str,
) -> Result<T, ParseTleError> {
    let raw = line[range].trim();
    raw.parse::<T>().map_err(|_| invalid(field, raw))
}

/// Decode a fixed-point field `[sign]digits[.digits]`.
///
/// Only digits, one leading sign and the decimal point are accepted, so the words
/// `inf`, `infinity` and `NaN` understood by `f64::from_str` are rejected.
fn parse_decimal(
    line: &str,
    range: Range<usize>,
    field: &'static str,
) -> Result<f64, ParseTleError> {
    let raw = line[range].trim();
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if !unsigned.bytes().any(|b| b.is_ascii_digit())
        || !unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
    {
        return Err(invalid(field, raw));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(field, raw))
}

fn parse_optional_integer(
    line: &str,
    range: Range<usize>,
    field: &'static str,
) -> Result<u32, ParseTleError> {
    let raw = line[range].trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>().map_err(|_| invalid(field, raw))
}

/// Decode a catalog number, including the Alpha-5 extension (`A0001` = 100001).
fn parse_satellite_number(line: &str) -> Result<SatelliteNumber, ParseTleError> {
    let raw = line[2..7].trim();
    let mut chars = raw.chars();
    let first = chars.next().ok_or_else(|| invalid("satellite number", raw))?;

    if first.is_ascii_uppercase() {
        if first == 'I' || first == 'O' {
            return Err(invalid("satellite number", raw));
        }
        let skipped = (first > 'I') as u32 + (first > 'O') as u32;
        let prefix = 10 + (first as u32 - 'A' as u32) - skipped;
        let rest: u32 = chars
            .as_str()
            .parse()
            .map_err(|_| invalid("satellite number", raw))?;
        return Ok(prefix * 10_000 + rest);
    }
    raw.parse().map_err(|_| invalid("satellite number", raw))
}

/// Eccentricity with its implied leading `0.`.
fn parse_eccentricity(line: &str) -> Result<f64, ParseTleError> {
    let raw = line[26..33].trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("eccentricity", raw));
    }
    format!("0.{raw}")
        .parse()
        .map_err(|_| invalid("eccentricity", raw))
}

/// Decode `[sign]ddddd[sign]d`, i.e. `±0.ddddd × 10^±d`. A blank field is zero.
fn parse_implied_decimal(
    line: &str,
    range: Range<usize>,
    field: &'static str,
) -> Result<f64, ParseTleError> {
    let raw = line[range].trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    if raw.len() < 3 {
        return Err(invalid(field, raw));
    }

    let (mantissa, exponent) = raw.split_at(raw.len() - 2);
    if !exponent.starts_with(['+', '-']) {
        return Err(invalid(field, raw));
    }
    let exponent: i32 = exponent.parse().map_err(|_| invalid(field, raw))?;

    let (sign, digits) = match mantissa.as_bytes()[0] {
        b'-' => (-1.0, &mantissa[1..]),
        b'+' => (1.0, &mantissa[1..]),
        _ => (1.0, mantissa),
    };
    let digits = digits.trim_start();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(field, raw));
    }
    let value: f64 = format!("0.{digits}")
        .parse()
        .map_err(|_| invalid(field, raw))?;

    Ok(sign * value * 10f64.powi(exponent))
}

/// Parse every element set contained in a text blob.
///
/// Both the bare two-line layout and the three-line layout (a name line, optionally
/// prefixed with `0 `, followed by the two element lines) are accepted, and may be mixed.
/// Blank lines are ignored.
///
/// Arguments
/// -----------------
/// * `text` – the catalog content.
/// * `options` – parser switches applied to every set.
///
/// Return
/// ----------
/// * The sets in file order, or the first parsing error.
pub fn parse_tle_set(text: &str, options: &TleParseOptions) -> Result<Vec<Tle>, ParseTleError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()))
        .filter(|(_, l)| !l.is_empty())
        .collect_vec();

    let is_element_line = |l: &str, n: char| l.starts_with(n) && l.as_bytes().get(1) == Some(&b' ');

    let mut sets = Vec::new();
    let mut cursor = 0;
    while cursor < lines.len() {
        let (start, first) = lines[cursor];
        let (name, offset) = if is_element_line(first, '1') {
            (None, cursor)
        } else {
            let name = first.strip_prefix("0 ").unwrap_or(first).trim();
            (Some(name.to_string()), cursor + 1)
        };

        let (Some((_, line1)), Some((_, line2))) = (lines.get(offset), lines.get(offset + 1))
        else {
            return Err(ParseTleError::IncompleteSet(start));
        };

        let tle = Tle::parse(line1, line2, options)?;
        sets.push(match name {
            Some(n) => tle.with_name(n),
            None => tle,
        });
        cursor = offset + 2;
    }
    Ok(sets)
}

/// Read and parse a TLE catalog file.
///
/// See also
/// ------------
/// * [`parse_tle_set`] – accepted layouts.
pub fn read_tle_catalog(
    path: &Utf8Path,
    options: &TleParseOptions,
) -> Result<Vec<Tle>, GroundTrackError> {
    let content = std::fs::read_to_string(path)?;
    let sets = parse_tle_set(&content, options)?;
    log::debug!(
        "read {} element sets from {}: [{}]",
        sets.len(),
        path,
        sets.iter().map(|t| t.satellite_number).join(", ")
    );
    Ok(sets)
}

#[cfg(test)]
mod tle_test {
    use super::*;
    use approx::assert_relative_eq;

    const VANGUARD_1: &str = "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
    const VANGUARD_2: &str = "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";
    const ISS_1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn test_parse_vanguard() {
        let tle = Tle::parse(VANGUARD_1, VANGUARD_2, &TleParseOptions::default()).unwrap();
        assert_eq!(tle.satellite_number, 5);
        assert_eq!(tle.classification, 'U');
        assert_eq!(tle.international_designator, "58002B");
        assert_eq!(tle.epoch_year, 2000);
        assert_eq!(tle.epoch_days, 179.78495062);
        assert_eq!(tle.mean_motion_dot, 0.00000023);
        assert_eq!(tle.mean_motion_ddot, 0.0);
        assert_relative_eq!(tle.bstar, 2.8098e-5, max_relative = 1e-12);
        assert_eq!(tle.element_set_number, 475);
        assert_eq!(tle.inclination, 34.2682);
        assert_eq!(tle.right_ascension, 348.7242);
        assert_eq!(tle.eccentricity, 0.1859667);
        assert_eq!(tle.argument_of_perigee, 331.7664);
        assert_eq!(tle.mean_anomaly, 19.3264);
        assert_eq!(tle.mean_motion, 10.82419157);
        assert_eq!(tle.revolution_number, 41366);
    }

    #[test]
    fn test_parse_negative_fields() {
        let tle = Tle::parse(ISS_1, ISS_2, &TleParseOptions::default()).unwrap();
        assert_eq!(tle.satellite_number, 25544);
        assert_eq!(tle.epoch_year, 2008);
        assert_eq!(tle.mean_motion_dot, -0.00002182);
        assert_relative_eq!(tle.bstar, -1.1606e-5, max_relative = 1e-12);
        assert_eq!(tle.eccentricity, 0.0006703);
    }

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(VANGUARD_1), 3);
        assert_eq!(checksum(VANGUARD_2), 7);
        assert_eq!(checksum(ISS_1), 7);
    }

    #[test]
    fn test_checksum_mismatch() {
        let bad = format!("{}8", &ISS_1[..68]);
        let err = Tle::parse(&bad, ISS_2, &TleParseOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ParseTleError::Checksum {
                line: 1,
                expected: 8,
                computed: 7
            }
        );

        let relaxed = TleParseOptions {
            verify_checksum: false,
        };
        assert!(Tle::parse(&bad, ISS_2, &relaxed).is_ok());
    }

    #[test]
    fn test_line_length() {
        let err = Tle::parse(&ISS_1[..60], ISS_2, &TleParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseTleError::LineLength { line: 1, length: 60 });

        let crlf = format!("{ISS_1}\r\n");
        assert!(Tle::parse(&crlf, ISS_2, &TleParseOptions::default()).is_ok());
    }

    #[test]
    fn test_swapped_lines() {
        let err = Tle::parse(ISS_2, ISS_1, &TleParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseTleError::LineNumber { line: 1, found: '2' });
    }

    #[test]
    fn test_non_ascii() {
        let line = ISS_1.replacen('U', "é", 1);
        let err = Tle::parse(&line, ISS_2, &TleParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseTleError::NonAscii { line: 1 });
    }

    #[test]
    fn test_satnum_mismatch() {
        let err = Tle::parse(ISS_1, VANGUARD_2, &TleParseOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ParseTleError::SatelliteNumberMismatch {
                line1: 25544,
                line2: 5
            }
        );
    }

    #[test]
    fn test_implied_decimal() {
        let field = |s: &str| {
            let line = format!("{:44}{s:8}", "");
            parse_implied_decimal(&line, 44..52, "test")
        };
        assert_eq!(field(" 00000-0").unwrap(), 0.0);
        assert_relative_eq!(field(" 28098-4").unwrap(), 2.8098e-5, max_relative = 1e-12);
        assert_relative_eq!(field("-11606-4").unwrap(), -1.1606e-5, max_relative = 1e-12);
        assert_relative_eq!(field("+12345+1").unwrap(), 1.2345, max_relative = 1e-12);
        assert_eq!(field("        ").unwrap(), 0.0);
        assert!(field(" 1a345-4").is_err());
        assert!(field(" 12345 4").is_err());
    }

    #[test]
    fn test_alpha5() {
        let line = |s: &str| format!("1 {s}");
        assert_eq!(parse_satellite_number(&line("A0001")).unwrap(), 100_001);
        assert_eq!(parse_satellite_number(&line("H9999")).unwrap(), 179_999);
        assert_eq!(parse_satellite_number(&line("J0000")).unwrap(), 180_000);
        assert_eq!(parse_satellite_number(&line("P1234")).unwrap(), 231_234);
        assert_eq!(parse_satellite_number(&line("Z9999")).unwrap(), 339_999);
        assert!(parse_satellite_number(&line("I0001")).is_err());
        assert!(parse_satellite_number(&line("A00x1")).is_err());
    }

    #[test]
    fn test_parse_tle_set_mixed_layouts() {
        let text = format!("0 VANGUARD 1\n{VANGUARD_1}\n{VANGUARD_2}\n\n{ISS_1}\n{ISS_2}\n");
        let sets = parse_tle_set(&text, &TleParseOptions::default()).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name.as_deref(), Some("VANGUARD 1"));
        assert_eq!(sets[1].name, None);
        assert_eq!(sets[1].satellite_number, 25544);
    }

    #[test]
    fn test_parse_tle_set_incomplete() {
        let text = format!("ISS (ZARYA)\n{ISS_1}\n");
        let err = parse_tle_set(&text, &TleParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseTleError::IncompleteSet(1));
    }

    /// Overwrite a right-aligned field and recompute the checksum.
    fn with_field(line: &str, range: Range<usize>, value: &str) -> String {
        let mut edited = line.to_string();
        edited.replace_range(range.clone(), &format!("{value:>width$}", width = range.len()));
        let sum = checksum(&edited);
        edited.replace_range(68..69, &sum.to_string());
        edited
    }

    #[test]
    fn test_non_numeric_words_in_decimal_fields() {
        let options = TleParseOptions::default();
        let cases = [
            (1, 20..32, "inf", "epoch day"),
            (1, 20..32, "NaN", "epoch day"),
            (1, 33..43, "-infinity", "first derivative of mean motion"),
            (2, 8..16, "inf", "inclination"),
            (2, 17..25, "NaN", "right ascension"),
            (2, 34..42, "-inf", "argument of perigee"),
            (2, 43..51, "nan", "mean anomaly"),
            (2, 52..63, "+inf", "mean motion"),
        ];
        for (line, range, value, field) in cases {
            let err = if line == 1 {
                Tle::parse(&with_field(ISS_1, range, value), ISS_2, &options)
            } else {
                Tle::parse(ISS_1, &with_field(ISS_2, range, value), &options)
            }
            .unwrap_err();
            assert_eq!(
                err,
                ParseTleError::InvalidField {
                    field,
                    value: value.to_string()
                }
            );
        }
    }

    #[test]
    fn test_decimal_field_syntax() {
        let field = |s: &str| {
            let line = format!("{s:>10}");
            parse_decimal(&line, 0..10, "test")
        };
        assert_eq!(field("-.00002182").unwrap(), -0.00002182);
        assert_eq!(field("+12.5").unwrap(), 12.5);
        assert_eq!(field("7").unwrap(), 7.0);
        assert!(field("").is_err());
        assert!(field("-").is_err());
        assert!(field("1e3").is_err());
        assert!(field("1.2.3").is_err());
        assert!(field("--1").is_err());
    }

    #[test]
    fn test_epoch_day_range() {
        let options = TleParseOptions::default();
        for day in ["000.50000000", "367.00000000", "999.99999999"] {
            let err = Tle::parse(&with_field(ISS_1, 20..32, day), ISS_2, &options).unwrap_err();
            assert_eq!(
                err,
                ParseTleError::InvalidField {
                    field: "epoch day",
                    value: day.to_string()
                }
            );
        }
        let last = Tle::parse(&with_field(ISS_1, 20..32, "366.99999999"), ISS_2, &options);
        assert_eq!(last.unwrap().epoch_days, 366.99999999);
    }

    #[test]
    fn test_epoch_jd() {
        let tle = Tle::parse(VANGUARD_1, VANGUARD_2, &TleParseOptions::default()).unwrap();
        assert_relative_eq!(tle.epoch_jd(), 2_451_723.284_950_62, epsilon = 1e-8);
    }
}
