//! # SGP4 element record
//!
//! [`OrbitalElements`] is the initialized, immutable form of a TLE. Building one performs
//! the SGP4 initialization once:
//!
//! 1. unit conversion of the TLE fields (degrees → radians, rev/day → rad/min),
//! 2. recovery of the un-Kozai'd (Brouwer) mean motion and the epoch semi-major axis,
//! 3. the perigee-dependent atmospheric density parameters `s` and `(q₀ − s)⁴`,
//! 4. the secular rates and drag coefficients,
//! 5. the choice of [`Dynamics`]: near-earth, or deep space (with its resonance) when the
//!    period reaches the configured threshold,
//! 6. a sanity propagation at epoch.
//!
//! Failures never yield a record; they are reported as [`ElementsError`].
//!
//! Internally distances are in earth radii and times in minutes.
use hifitime::Epoch;
use log::debug;

use crate::config::{OperationMode, PropagationConfig};
use crate::constants::{
    JulianDate, Kilometer, Minutes, Radian, SatelliteNumber, DPI, MINUTES_PER_DAY, RADEG, XPDOTP,
};
use crate::deep_space::{DeepSpace, DeepSpaceSeed, Resonance};
use crate::gravity::{EarthGravity, GravityModel};
use crate::groundtrack_errors::ElementsError;
use crate::kepler::KeplerSettings;
use crate::propagator::propagate;
use crate::time::{gstime, gstime_afspc, sgp4_epoch_days};
use crate::tle::Tle;

/// Lower bound on `1 + cos i` used by the `xlcof` coefficient of retrograde equatorial orbits.
pub(crate) const XLCOF_GUARD: f64 = 1.5e-12;

/// Classical mean elements in canonical units (radians, rad/min).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElements {
    pub eccentricity: f64,
    pub inclination: Radian,
    /// Right ascension of the ascending node
    pub node: Radian,
    pub argument_of_perigee: Radian,
    pub mean_anomaly: Radian,
    /// Mean motion (rad/min)
    pub mean_motion: f64,
}

/// Secular and drag coefficients computed at epoch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NearEarthCoefficients {
    pub mdot: f64,
    pub argpdot: f64,
    pub nodedot: f64,
    pub nodecf: f64,
    pub cc1: f64,
    pub cc4: f64,
    pub cc5: f64,
    pub d2: f64,
    pub d3: f64,
    pub d4: f64,
    pub t2cof: f64,
    pub t3cof: f64,
    pub t4cof: f64,
    pub t5cof: f64,
    pub omgcof: f64,
    pub xmcof: f64,
    pub delmo: f64,
    pub sinmao: f64,
    pub eta: f64,
    pub aycof: f64,
    pub xlcof: f64,
    pub con41: f64,
    pub x1mth2: f64,
    pub x7thm1: f64,
}

/// Propagation branch, fixed at initialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamics {
    NearEarth,
    DeepSpace(Box<DeepSpace>),
}

/// Initialized SGP4 element record.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElements {
    pub name: Option<String>,
    pub satellite_number: SatelliteNumber,
    pub classification: char,
    pub international_designator: String,

    /// Epoch as a Julian date (UTC, used as UT1)
    pub epoch_jd: JulianDate,
    pub epoch: Epoch,

    pub gravity_model: GravityModel,
    pub gravity: EarthGravity,
    pub operation_mode: OperationMode,
    pub kepler: KeplerSettings,
    /// Decay threshold (earth radii)
    pub decay_radius_er: f64,

    /// Mean elements at epoch, with the un-Kozai'd mean motion
    pub mean: MeanElements,
    /// Kozai mean motion from the TLE (rad/min)
    pub no_kozai: f64,
    /// First derivative of mean motion (rad/min²)
    pub ndot: f64,
    /// Second derivative of mean motion (rad/min³)
    pub nddot: f64,
    pub bstar: f64,

    /// Semi-major axis (earth radii)
    pub a: f64,
    /// Apogee altitude (earth radii)
    pub alta: f64,
    /// Perigee altitude (earth radii)
    pub altp: f64,

    /// Perigee below 220 km: the higher-order drag terms are dropped.
    pub simplified_drag: bool,
    pub coefficients: NearEarthCoefficients,
    pub dynamics: Dynamics,
}

/// `(aycof, xlcof)` long-period coefficients for an inclination of sine `sini`, cosine `cosi`.
pub(crate) fn long_period_coefficients(j3oj2: f64, sini: f64, cosi: f64) -> (f64, f64) {
    let aycof = -0.5 * j3oj2 * sini;
    let xlcof = if (cosi + 1.0).abs() > XLCOF_GUARD {
        -0.25 * j3oj2 * sini * (3.0 + 5.0 * cosi) / (1.0 + cosi)
    } else {
        -0.25 * j3oj2 * sini * (3.0 + 5.0 * cosi) / XLCOF_GUARD
    };
    (aycof, xlcof)
}

fn fourth_power(x: f64) -> f64 {
    x * x * x * x
}

impl OrbitalElements {
    /// Initialize SGP4 from a decoded TLE.
    ///
    /// Arguments
    /// -----------------
    /// * `tle` – decoded element set.
    /// * `config` – gravity model, operation mode, deep-space threshold, decay radius and
    ///   Kepler settings.
    ///
    /// Return
    /// ----------
    /// * The initialized record, or an [`ElementsError`] if the elements are outside the
    ///   domain of the theory or the epoch propagation fails.
    pub fn new(tle: &Tle, config: &PropagationConfig) -> Result<Self, ElementsError> {
        let g = config.gravity_model.constants();
        let x2o3 = 2.0 / 3.0;

        for (field, value) in [
            ("epoch day", tle.epoch_days),
            ("inclination", tle.inclination),
            ("right ascension", tle.right_ascension),
            ("argument of perigee", tle.argument_of_perigee),
            ("mean anomaly", tle.mean_anomaly),
            ("first derivative of mean motion", tle.mean_motion_dot),
            ("second derivative of mean motion", tle.mean_motion_ddot),
            ("bstar", tle.bstar),
        ] {
            if !value.is_finite() {
                return Err(ElementsError::NonFinite { field, value });
            }
        }

        let ecco = tle.eccentricity;
        let inclo = tle.inclination * RADEG;
        let nodeo = tle.right_ascension * RADEG;
        let argpo = tle.argument_of_perigee * RADEG;
        let mo = tle.mean_anomaly * RADEG;
        let no_kozai = tle.mean_motion / XPDOTP;
        let bstar = tle.bstar;

        if !(0.0..1.0).contains(&ecco) {
            return Err(ElementsError::Eccentricity(ecco));
        }
        if !(no_kozai > 0.0) || !no_kozai.is_finite() {
            return Err(ElementsError::MeanMotion(no_kozai));
        }

        let epoch_jd = tle.epoch_jd();
        let epoch_days = sgp4_epoch_days(epoch_jd);

        // ---- un-Kozai the mean motion ----
        let eccsq = ecco * ecco;
        let omeosq = 1.0 - eccsq;
        let rteosq = omeosq.sqrt();
        let (sinio, cosio) = inclo.sin_cos();
        let cosio2 = cosio * cosio;

        let ak = (g.xke / no_kozai).powf(x2o3);
        let d1 = 0.75 * g.j2 * (3.0 * cosio2 - 1.0) / (rteosq * omeosq);
        let mut del = d1 / (ak * ak);
        let adel = ak * (1.0 - del * del - del * (1.0 / 3.0 + 134.0 * del * del / 81.0));
        del = d1 / (adel * adel);
        let no_unkozai = no_kozai / (1.0 + del);

        if !(no_unkozai > 0.0) {
            return Err(ElementsError::MeanMotion(no_unkozai));
        }

        let ao = (g.xke / no_unkozai).powf(x2o3);
        let po = ao * omeosq;
        let con42 = 1.0 - 5.0 * cosio2;
        let con41 = -con42 - cosio2 - cosio2;
        let posq = po * po;
        let rp = ao * (1.0 - ecco);

        if !(ao > 0.0) {
            return Err(ElementsError::SemiMajorAxis(ao));
        }
        if !(po > 0.0) {
            return Err(ElementsError::SemiLatusRectum(po));
        }
        if rp < 1.0 {
            return Err(ElementsError::SubOrbital(rp));
        }

        let gsto = match config.operation_mode {
            OperationMode::Improved => gstime(epoch_jd),
            OperationMode::Afspc => gstime_afspc(epoch_days),
        };

        // ---- atmospheric density parameters ----
        let ss = 78.0 / g.radius_km + 1.0;
        let qzms2t = fourth_power((120.0 - 78.0) / g.radius_km);
        let mut sfour = ss;
        let mut qzms24 = qzms2t;
        let perige = (rp - 1.0) * g.radius_km;
        if perige < 156.0 {
            sfour = perige - 78.0;
            if perige < 98.0 {
                sfour = 20.0;
            }
            qzms24 = fourth_power((120.0 - sfour) / g.radius_km);
            sfour = sfour / g.radius_km + 1.0;
        }

        // ---- drag coefficients ----
        let pinvsq = 1.0 / posq;
        let tsi = 1.0 / (ao - sfour);
        let eta = ao * ecco * tsi;
        let etasq = eta * eta;
        let eeta = ecco * eta;
        let psisq = (1.0 - etasq).abs();
        let coef = qzms24 * tsi.powf(4.0);
        let coef1 = coef / psisq.powf(3.5);
        let cc2 = coef1
            * no_unkozai
            * (ao * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
                + 0.375 * g.j2 * tsi / psisq * con41 * (8.0 + 3.0 * etasq * (8.0 + etasq)));
        let cc1 = bstar * cc2;
        let cc3 = if ecco > 1.0e-4 {
            -2.0 * coef * tsi * g.j3oj2 * no_unkozai * sinio / ecco
        } else {
            0.0
        };
        let x1mth2 = 1.0 - cosio2;
        let cc4 = 2.0
            * no_unkozai
            * coef1
            * ao
            * omeosq
            * (eta * (2.0 + 0.5 * etasq) + ecco * (0.5 + 2.0 * etasq)
                - g.j2 * tsi / (ao * psisq)
                    * (-3.0 * con41 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                        + 0.75
                            * x1mth2
                            * (2.0 * etasq - eeta * (1.0 + etasq))
                            * (2.0 * argpo).cos()));
        let cc5 = 2.0 * coef1 * ao * omeosq * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);

        // ---- secular rates ----
        let cosio4 = cosio2 * cosio2;
        let temp1 = 1.5 * g.j2 * pinvsq * no_unkozai;
        let temp2 = 0.5 * temp1 * g.j2 * pinvsq;
        let temp3 = -0.46875 * g.j4 * pinvsq * pinvsq * no_unkozai;
        let mdot = no_unkozai
            + 0.5 * temp1 * rteosq * con41
            + 0.0625 * temp2 * rteosq * (13.0 - 78.0 * cosio2 + 137.0 * cosio4);
        let argpdot = -0.5 * temp1 * con42
            + 0.0625 * temp2 * (7.0 - 114.0 * cosio2 + 395.0 * cosio4)
            + temp3 * (3.0 - 36.0 * cosio2 + 49.0 * cosio4);
        let xhdot1 = -temp1 * cosio;
        let nodedot = xhdot1
            + (0.5 * temp2 * (4.0 - 19.0 * cosio2) + 2.0 * temp3 * (3.0 - 7.0 * cosio2)) * cosio;
        let xpidot = argpdot + nodedot;

        let (aycof, xlcof) = long_period_coefficients(g.j3oj2, sinio, cosio);
        let delmotemp = 1.0 + eta * mo.cos();

        let mut coefficients = NearEarthCoefficients {
            mdot,
            argpdot,
            nodedot,
            nodecf: 3.5 * omeosq * xhdot1 * cc1,
            cc1,
            cc4,
            cc5,
            t2cof: 1.5 * cc1,
            omgcof: bstar * cc3 * argpo.cos(),
            xmcof: if ecco > 1.0e-4 {
                -x2o3 * coef * bstar / eeta
            } else {
                0.0
            },
            delmo: delmotemp * delmotemp * delmotemp,
            sinmao: mo.sin(),
            eta,
            aycof,
            xlcof,
            con41,
            x1mth2,
            x7thm1: 7.0 * cosio2 - 1.0,
            ..NearEarthCoefficients::default()
        };

        let mean = MeanElements {
            eccentricity: ecco,
            inclination: inclo,
            node: nodeo,
            argument_of_perigee: argpo,
            mean_anomaly: mo,
            mean_motion: no_unkozai,
        };

        let mut simplified_drag = rp < 220.0 / g.radius_km + 1.0;

        // ---- branch selection ----
        let dynamics = if DPI / no_unkozai >= config.deep_space_period_minutes {
            simplified_drag = true;
            let seed = DeepSpaceSeed {
                epoch: epoch_days,
                xke: g.xke,
                gsto,
                mdot,
                nodedot,
                xpidot,
            };
            Dynamics::DeepSpace(Box::new(DeepSpace::initialize(&mean, &seed)))
        } else {
            Dynamics::NearEarth
        };

        if !simplified_drag {
            let cc1sq = cc1 * cc1;
            let d2 = 4.0 * ao * tsi * cc1sq;
            let temp = d2 * tsi * cc1 / 3.0;
            let d3 = (17.0 * ao + sfour) * temp;
            let d4 = 0.5 * temp * ao * tsi * (221.0 * ao + 31.0 * sfour) * cc1;
            coefficients.d2 = d2;
            coefficients.d3 = d3;
            coefficients.d4 = d4;
            coefficients.t3cof = d2 + 2.0 * cc1sq;
            coefficients.t4cof = 0.25 * (3.0 * d3 + cc1 * (12.0 * d2 + 10.0 * cc1sq));
            coefficients.t5cof = 0.2
                * (3.0 * d4
                    + 12.0 * cc1 * d3
                    + 6.0 * d2 * d2
                    + 15.0 * cc1sq * (2.0 * d2 + cc1sq));
        }

        let elements = OrbitalElements {
            name: tle.name.clone(),
            satellite_number: tle.satellite_number,
            classification: tle.classification,
            international_designator: tle.international_designator.clone(),
            epoch_jd,
            epoch: tle.epoch(),
            gravity_model: config.gravity_model,
            gravity: g,
            operation_mode: config.operation_mode,
            kepler: config.kepler,
            decay_radius_er: config.decay_radius_er,
            mean,
            no_kozai,
            ndot: tle.mean_motion_dot / (XPDOTP * MINUTES_PER_DAY),
            nddot: tle.mean_motion_ddot / (XPDOTP * MINUTES_PER_DAY * MINUTES_PER_DAY),
            bstar,
            a: ao,
            alta: ao * (1.0 + ecco) - 1.0,
            altp: ao * (1.0 - ecco) - 1.0,
            simplified_drag,
            coefficients,
            dynamics,
        };

        debug!(
            "satellite {:05}: {} branch, period {:.3} min, perigee {:.1} km, apogee {:.1} km, simplified drag = {}",
            elements.satellite_number,
            elements.branch_name(),
            elements.period_minutes(),
            elements.perigee_altitude_km(),
            elements.apogee_altitude_km(),
            elements.simplified_drag
        );

        propagate(&elements, 0.0)?;
        Ok(elements)
    }

    /// Orbital period from the un-Kozai'd mean motion (minutes).
    pub fn period_minutes(&self) -> Minutes {
        DPI / self.mean.mean_motion
    }

    pub fn is_deep_space(&self) -> bool {
        matches!(self.dynamics, Dynamics::DeepSpace(_))
    }

    /// Resonance regime of a deep-space record, `None` for near-earth records.
    pub fn resonance(&self) -> Option<&Resonance> {
        match &self.dynamics {
            Dynamics::NearEarth => None,
            Dynamics::DeepSpace(ds) => Some(&ds.resonance),
        }
    }

    /// Perigee altitude above the equatorial radius (km).
    pub fn perigee_altitude_km(&self) -> Kilometer {
        self.altp * self.gravity.radius_km
    }

    /// Apogee altitude above the equatorial radius (km).
    pub fn apogee_altitude_km(&self) -> Kilometer {
        self.alta * self.gravity.radius_km
    }

    /// Julian date of a time offset in minutes since epoch.
    pub fn jd_at(&self, tsince: Minutes) -> JulianDate {
        self.epoch_jd + tsince / MINUTES_PER_DAY
    }

    fn branch_name(&self) -> &'static str {
        match self.resonance() {
            None => "near-earth",
            Some(Resonance::None) => "deep-space",
            Some(Resonance::Synchronous(_)) => "deep-space (24h resonance)",
            Some(Resonance::HalfDay(_)) => "deep-space (12h resonance)",
        }
    }
}

#[cfg(test)]
mod elements_test {
    use super::*;
    use crate::tle::TleParseOptions;
    use approx::assert_relative_eq;

    const VANGUARD: (&str, &str) = (
        "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753",
        "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
    );
    const ISS: (&str, &str) = (
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
    );
    const MOLNIYA: (&str, &str) = (
        "1 08195U 75081A   06176.33215444  .00000099  00000-0  11873-3 0   813",
        "2 08195  64.1586 279.0717 6877146 264.7651  20.2257  2.00491383225656",
    );
    const GEO: (&str, &str) = (
        "1 28626U 05008A   06176.46683397 -.00000205  00000-0  10000-3 0  2190",
        "2 28626   0.0019 286.9433 0000335  13.7918  55.6504  1.00270176  4891",
    );

    fn tle(lines: (&str, &str)) -> Tle {
        Tle::parse(lines.0, lines.1, &TleParseOptions::default()).unwrap()
    }

    fn wgs72() -> PropagationConfig {
        PropagationConfig::builder()
            .gravity_model(GravityModel::Wgs72)
            .build()
            .unwrap()
    }

    #[test]
    fn test_near_earth_initialization() {
        let el = OrbitalElements::new(&tle(VANGUARD), &wgs72()).unwrap();
        assert_eq!(el.satellite_number, 5);
        assert_eq!(el.dynamics, Dynamics::NearEarth);
        assert!(!el.simplified_drag);
        assert!(el.coefficients.d2 != 0.0);
        assert_relative_eq!(el.epoch_jd, 2451723.28495062, epsilon = 1e-8);

        // prograde orbit below the critical inclination: the Brouwer motion is slower
        assert!(el.mean.mean_motion < el.no_kozai);
        assert_relative_eq!(el.period_minutes(), 1440.0 / 10.824, max_relative = 1e-3);
        assert!(el.alta > el.altp);
    }

    #[test]
    fn test_iss_perigee() {
        let el = OrbitalElements::new(&tle(ISS), &PropagationConfig::default()).unwrap();
        assert!(!el.is_deep_space());
        assert!(el.resonance().is_none());
        let perigee = el.perigee_altitude_km();
        assert!(perigee > 300.0 && perigee < 400.0, "perigee {perigee}");
        // e = 0.00067 keeps apogee within a dozen kilometres of perigee
        let apogee = el.apogee_altitude_km();
        assert!(apogee > perigee && apogee - perigee < 12.0, "apogee {apogee}");
    }

    #[test]
    fn test_deep_space_resonances() {
        let molniya = OrbitalElements::new(&tle(MOLNIYA), &PropagationConfig::default()).unwrap();
        assert!(molniya.is_deep_space());
        assert!(molniya.simplified_drag);
        assert!(matches!(molniya.resonance(), Some(Resonance::HalfDay(_))));
        assert_eq!(molniya.coefficients.d2, 0.0);

        let geo = OrbitalElements::new(&tle(GEO), &PropagationConfig::default()).unwrap();
        assert!(matches!(geo.resonance(), Some(Resonance::Synchronous(_))));
    }

    #[test]
    fn test_deep_space_threshold_is_configurable() {
        let config = PropagationConfig::builder()
            .deep_space_period_minutes(100.0)
            .build()
            .unwrap();
        let el = OrbitalElements::new(&tle(VANGUARD), &config).unwrap();
        assert!(matches!(el.resonance(), Some(Resonance::None)));
    }

    #[test]
    fn test_operation_mode_changes_sidereal_angle_only_slightly() {
        let afspc = PropagationConfig::builder()
            .operation_mode(OperationMode::Afspc)
            .build()
            .unwrap();
        let a = OrbitalElements::new(&tle(GEO), &afspc).unwrap();
        let i = OrbitalElements::new(&tle(GEO), &PropagationConfig::default()).unwrap();
        let (Dynamics::DeepSpace(da), Dynamics::DeepSpace(di)) = (&a.dynamics, &i.dynamics)
        else {
            panic!("expected deep-space records");
        };
        assert_relative_eq!(da.gsto, di.gsto, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_elements() {
        let mut t = tle(ISS);
        t.eccentricity = 1.2;
        assert_eq!(
            OrbitalElements::new(&t, &PropagationConfig::default()),
            Err(ElementsError::Eccentricity(1.2))
        );

        let mut t = tle(ISS);
        t.mean_motion = 0.0;
        assert!(matches!(
            OrbitalElements::new(&t, &PropagationConfig::default()),
            Err(ElementsError::MeanMotion(_))
        ));

        let mut t = tle(ISS);
        t.mean_motion = 17.5;
        t.eccentricity = 0.1;
        let err = OrbitalElements::new(&t, &PropagationConfig::default()).unwrap_err();
        assert!(matches!(err, ElementsError::SubOrbital(rp) if rp < 1.0));
        assert_eq!(err.code(), 5);
    }

    #[test]
    fn test_non_finite_fields_are_rejected_before_initialization() {
        let mut t = tle(ISS);
        t.right_ascension = f64::NAN;
        assert!(matches!(
            OrbitalElements::new(&t, &PropagationConfig::default()),
            Err(ElementsError::NonFinite {
                field: "right ascension",
                ..
            })
        ));

        let mut t = tle(ISS);
        t.epoch_days = f64::INFINITY;
        assert_eq!(
            OrbitalElements::new(&t, &PropagationConfig::default()),
            Err(ElementsError::NonFinite {
                field: "epoch day",
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn test_long_period_guard() {
        let (aycof, xlcof) = long_period_coefficients(-0.0023, 0.0, -1.0);
        assert_eq!(aycof, 0.0);
        assert!(xlcof.is_finite());
    }
}
