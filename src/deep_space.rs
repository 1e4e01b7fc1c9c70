//! # Deep-space (SDP4) theory
//!
//! Orbits with a period of 225 minutes or more are perturbed by the Moon and the Sun
//! strongly enough that SGP4 switches to its deep-space extension. This module holds
//! everything specific to that branch:
//!
//! * [`DeepSpace::initialize`] – lunar-solar common terms, secular rates and resonance
//!   coefficients computed once at epoch,
//! * [`DeepSpace::secular`] – secular lunar-solar drift plus the resonance integrator,
//! * [`DeepSpace::periodics`] – lunar-solar long-period periodic corrections.
//!
//! Two resonances are handled by numerical integration of the mean motion and mean
//! longitude: the 24 h geosynchronous resonance ([`Resonance::Synchronous`]) and the
//! 12 h Molniya-type resonance ([`Resonance::HalfDay`]).
//!
//! The integrator always restarts from epoch and advances in fixed steps of 720 minutes,
//! so a call only depends on its own time offset.
use std::f64::consts::PI;

use crate::config::OperationMode;
use crate::constants::{Minutes, DPI};
use crate::elements::MeanElements;

/// Solar mean motion (rad/min)
const ZNS: f64 = 1.19459e-5;
/// Solar eccentricity
const ZES: f64 = 0.01675;
/// Lunar mean motion (rad/min)
const ZNL: f64 = 1.5835218e-4;
/// Lunar eccentricity
const ZEL: f64 = 0.05490;
/// Earth rotation rate in rad/min, as used by the resonance terms
const RPTIM: f64 = 4.375_269_088_011_299_66e-3;
/// Resonance integrator step (minutes)
const STEP: f64 = 720.0;
/// Half the squared step
const STEP2: f64 = 259_200.0;

/// Lunar and solar long-period periodic coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LunarSolarPeriodics {
    pub e3: f64,
    pub ee2: f64,
    pub se2: f64,
    pub se3: f64,
    pub sgh2: f64,
    pub sgh3: f64,
    pub sgh4: f64,
    pub sh2: f64,
    pub sh3: f64,
    pub si2: f64,
    pub si3: f64,
    pub sl2: f64,
    pub sl3: f64,
    pub sl4: f64,
    pub xgh2: f64,
    pub xgh3: f64,
    pub xgh4: f64,
    pub xh2: f64,
    pub xh3: f64,
    pub xi2: f64,
    pub xi3: f64,
    pub xl2: f64,
    pub xl3: f64,
    pub xl4: f64,
    /// Lunar mean anomaly at epoch
    pub zmol: f64,
    /// Solar mean anomaly at epoch
    pub zmos: f64,
}

/// Lunar-solar secular rates of the mean elements (per minute).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SecularRates {
    pub dedt: f64,
    pub didt: f64,
    pub dmdt: f64,
    pub domdt: f64,
    pub dnodt: f64,
}

/// Coefficients of the 24 h geosynchronous resonance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynchronousResonance {
    pub del1: f64,
    pub del2: f64,
    pub del3: f64,
    pub xlamo: f64,
    pub xfact: f64,
}

/// Coefficients of the 12 h half-day resonance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfDayResonance {
    pub d2201: f64,
    pub d2211: f64,
    pub d3210: f64,
    pub d3222: f64,
    pub d4410: f64,
    pub d4422: f64,
    pub d5220: f64,
    pub d5232: f64,
    pub d5421: f64,
    pub d5433: f64,
    pub xlamo: f64,
    pub xfact: f64,
}

/// Resonance regime, fixed at initialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resonance {
    None,
    Synchronous(SynchronousResonance),
    HalfDay(HalfDayResonance),
}

/// Deep-space payload of an element record.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepSpace {
    /// Greenwich sidereal angle at epoch (radians)
    pub gsto: f64,
    pub periodics: LunarSolarPeriodics,
    pub rates: SecularRates,
    pub resonance: Resonance,
}

/// Intermediate quantities shared by the common-term and initialization steps.
struct CommonTerms {
    sinim: f64,
    cosim: f64,
    emsq: f64,
    s: [f64; 5],
    ss: [f64; 5],
    sz1: f64,
    sz3: f64,
    sz11: f64,
    sz13: f64,
    sz21: f64,
    sz23: f64,
    sz31: f64,
    sz33: f64,
    z1: f64,
    z3: f64,
    z11: f64,
    z13: f64,
    z21: f64,
    z23: f64,
    z31: f64,
    z33: f64,
}

/// Epoch quantities the deep-space initialization needs from the near-earth setup.
#[derive(Debug, Clone, Copy)]
pub struct DeepSpaceSeed {
    /// Days since 1949-12-31 00:00 UT
    pub epoch: f64,
    pub xke: f64,
    pub gsto: f64,
    pub mdot: f64,
    pub nodedot: f64,
    pub xpidot: f64,
}

impl DeepSpace {
    /// Compute the lunar-solar terms, secular rates and resonance coefficients at epoch.
    ///
    /// Arguments
    /// ---------
    /// * `elements`: mean elements at epoch, with the un-Kozai'd mean motion.
    /// * `seed`: epoch, gravity rate unit, sidereal angle and near-earth secular rates.
    ///
    /// Return
    /// ------
    /// * The deep-space payload. At epoch the lunar-solar periodics are zero by
    ///   construction, so the epoch elements are left untouched.
    pub fn initialize(elements: &MeanElements, seed: &DeepSpaceSeed) -> DeepSpace {
        let (common, periodics) = common_terms(seed.epoch, elements);
        let (rates, resonance) = resonance_terms(elements, seed, &common);

        DeepSpace {
            gsto: seed.gsto,
            periodics,
            rates,
            resonance,
        }
    }

    /// Apply the lunar-solar secular drift and, for resonant orbits, integrate the
    /// resonance equations up to `t`.
    ///
    /// The integrator restarts from epoch on every call and advances in 720-minute
    /// steps, so its cost grows linearly with `|t|` and a trajectory of `N` resonant
    /// samples costs `O(N²)` steps. No state is carried between calls: the result only
    /// depends on `t`.
    ///
    /// Arguments
    /// ---------
    /// * `t`: minutes since epoch.
    /// * `epoch`: mean elements at epoch (`mean_motion` is the un-Kozai'd value).
    /// * `argpdot`: secular rate of the argument of perigee.
    /// * `mean`: mean elements after the near-earth secular update.
    ///
    /// Return
    /// ------
    /// * The updated mean elements.
    pub fn secular(
        &self,
        t: Minutes,
        epoch: &MeanElements,
        argpdot: f64,
        mean: MeanElements,
    ) -> MeanElements {
        const FASX2: f64 = 0.13130908;
        const FASX4: f64 = 2.8843198;
        const FASX6: f64 = 0.37448087;
        const G22: f64 = 5.7686396;
        const G32: f64 = 0.95240898;
        const G44: f64 = 1.8014998;
        const G52: f64 = 1.0508330;
        const G54: f64 = 4.4108898;

        let r = &self.rates;
        let mut out = MeanElements {
            eccentricity: mean.eccentricity + r.dedt * t,
            inclination: mean.inclination + r.didt * t,
            argument_of_perigee: mean.argument_of_perigee + r.domdt * t,
            node: mean.node + r.dnodt * t,
            mean_anomaly: mean.mean_anomaly + r.dmdt * t,
            mean_motion: mean.mean_motion,
        };

        let (xlamo, xfact) = match &self.resonance {
            Resonance::None => return out,
            Resonance::Synchronous(s) => (s.xlamo, s.xfact),
            Resonance::HalfDay(h) => (h.xlamo, h.xfact),
        };

        // derivatives of the resonant mean longitude and mean motion at (xli, xni, atime)
        let derivatives = |xli: f64, xni: f64, atime: f64| -> (f64, f64, f64) {
            let xldot = xni + xfact;
            match &self.resonance {
                Resonance::Synchronous(s) => {
                    let xndt = s.del1 * (xli - FASX2).sin()
                        + s.del2 * (2.0 * (xli - FASX4)).sin()
                        + s.del3 * (3.0 * (xli - FASX6)).sin();
                    let xnddt = s.del1 * (xli - FASX2).cos()
                        + 2.0 * s.del2 * (2.0 * (xli - FASX4)).cos()
                        + 3.0 * s.del3 * (3.0 * (xli - FASX6)).cos();
                    (xndt, xldot, xnddt * xldot)
                }
                Resonance::HalfDay(h) => {
                    let xomi = epoch.argument_of_perigee + argpdot * atime;
                    let x2omi = xomi + xomi;
                    let x2li = xli + xli;
                    let xndt = h.d2201 * (x2omi + xli - G22).sin()
                        + h.d2211 * (xli - G22).sin()
                        + h.d3210 * (xomi + xli - G32).sin()
                        + h.d3222 * (-xomi + xli - G32).sin()
                        + h.d4410 * (x2omi + x2li - G44).sin()
                        + h.d4422 * (x2li - G44).sin()
                        + h.d5220 * (xomi + xli - G52).sin()
                        + h.d5232 * (-xomi + xli - G52).sin()
                        + h.d5421 * (xomi + x2li - G54).sin()
                        + h.d5433 * (-xomi + x2li - G54).sin();
                    let xnddt = h.d2201 * (x2omi + xli - G22).cos()
                        + h.d2211 * (xli - G22).cos()
                        + h.d3210 * (xomi + xli - G32).cos()
                        + h.d3222 * (-xomi + xli - G32).cos()
                        + h.d5220 * (xomi + xli - G52).cos()
                        + h.d5232 * (-xomi + xli - G52).cos()
                        + 2.0
                            * (h.d4410 * (x2omi + x2li - G44).cos()
                                + h.d4422 * (x2li - G44).cos()
                                + h.d5421 * (xomi + x2li - G54).cos()
                                + h.d5433 * (-xomi + x2li - G54).cos());
                    (xndt, xldot, xnddt * xldot)
                }
                Resonance::None => (0.0, xldot, 0.0),
            }
        };

        let theta = (self.gsto + t * RPTIM) % DPI;
        let delt = if t > 0.0 { STEP } else { -STEP };

        let mut atime = 0.0;
        let mut xli = xlamo;
        let mut xni = epoch.mean_motion;
        let (mut xndt, mut xldot, mut xnddt) = derivatives(xli, xni, atime);
        while (t - atime).abs() >= STEP {
            xli += xldot * delt + xndt * STEP2;
            xni += xndt * delt + xnddt * STEP2;
            atime += delt;
            (xndt, xldot, xnddt) = derivatives(xli, xni, atime);
        }

        let ft = t - atime;
        let nm = xni + xndt * ft + xnddt * ft * ft * 0.5;
        out.mean_motion = epoch.mean_motion + (nm - epoch.mean_motion);
        let xl = xli + xldot * ft + xndt * ft * ft * 0.5;
        out.mean_anomaly = match self.resonance {
            Resonance::Synchronous(_) => xl - out.node - out.argument_of_perigee + theta,
            _ => xl - 2.0 * out.node + 2.0 * theta,
        };
        out
    }

    /// Lunar-solar long-period periodic corrections at `t` minutes since epoch.
    ///
    /// Arguments
    /// ---------
    /// * `t`: minutes since epoch.
    /// * `osc`: mean elements after the secular update (the mean motion is not used).
    /// * `mode`: operation mode, which decides the node wrapping of the Lyddane branch.
    ///
    /// Return
    /// ------
    /// * The perturbed eccentricity, inclination, node, argument of perigee and mean anomaly.
    pub fn periodics(&self, t: Minutes, osc: MeanElements, mode: OperationMode) -> MeanElements {
        let p = &self.periodics;

        let (sinzf, f2, f3) = lunisolar_phase(p.zmos + ZNS * t, ZES);
        let ses = p.se2 * f2 + p.se3 * f3;
        let sis = p.si2 * f2 + p.si3 * f3;
        let sls = p.sl2 * f2 + p.sl3 * f3 + p.sl4 * sinzf;
        let sghs = p.sgh2 * f2 + p.sgh3 * f3 + p.sgh4 * sinzf;
        let shs = p.sh2 * f2 + p.sh3 * f3;

        let (sinzf, f2, f3) = lunisolar_phase(p.zmol + ZNL * t, ZEL);
        let sel = p.ee2 * f2 + p.e3 * f3;
        let sil = p.xi2 * f2 + p.xi3 * f3;
        let sll = p.xl2 * f2 + p.xl3 * f3 + p.xl4 * sinzf;
        let sghl = p.xgh2 * f2 + p.xgh3 * f3 + p.xgh4 * sinzf;
        let shll = p.xh2 * f2 + p.xh3 * f3;

        let pe = ses + sel;
        let pinc = sis + sil;
        let pl = sls + sll;
        let pgh = sghs + sghl;
        let ph = shs + shll;

        let mut out = osc;
        out.inclination += pinc;
        out.eccentricity += pe;
        let (sinip, cosip) = out.inclination.sin_cos();

        if out.inclination >= 0.2 {
            let ph = ph / sinip;
            out.argument_of_perigee += pgh - cosip * ph;
            out.node += ph;
            out.mean_anomaly += pl;
        } else {
            // Lyddane modification for low inclinations
            let (sinop, cosop) = out.node.sin_cos();
            let alfdp = sinip * sinop + (ph * cosop + pinc * cosip * sinop);
            let betdp = sinip * cosop + (-ph * sinop + pinc * cosip * cosop);

            let mut nodep = out.node % DPI;
            if nodep < 0.0 && mode == OperationMode::Afspc {
                nodep += DPI;
            }
            let mut xls = out.mean_anomaly + out.argument_of_perigee + cosip * nodep;
            let dls = pl + pgh - pinc * nodep * sinip;
            xls += dls;
            let xnoh = nodep;
            nodep = alfdp.atan2(betdp);
            if nodep < 0.0 && mode == OperationMode::Afspc {
                nodep += DPI;
            }
            if (xnoh - nodep).abs() > PI {
                if nodep < xnoh {
                    nodep += DPI;
                } else {
                    nodep -= DPI;
                }
            }
            out.mean_anomaly += pl;
            out.argument_of_perigee = xls - out.mean_anomaly - cosip * nodep;
            out.node = nodep;
        }
        out
    }
}

/// `(sin zf, f2, f3)` for a perturbing body of mean anomaly `zm` and eccentricity `ecc`.
fn lunisolar_phase(zm: f64, ecc: f64) -> (f64, f64, f64) {
    let zf = zm + 2.0 * ecc * zm.sin();
    let (sinzf, coszf) = zf.sin_cos();
    (sinzf, 0.5 * sinzf * sinzf - 0.25, -0.5 * sinzf * coszf)
}

/// Lunar-solar terms common to the secular and periodic contributions.
fn common_terms(epoch: f64, el: &MeanElements) -> (CommonTerms, LunarSolarPeriodics) {
    const C1SS: f64 = 2.986_479_7e-6;
    const C1L: f64 = 4.796_806_5e-7;
    const ZSINIS: f64 = 0.397_854_16;
    const ZCOSIS: f64 = 0.917_448_67;
    const ZCOSGS: f64 = 0.194_590_5;
    const ZSINGS: f64 = -0.980_884_58;

    let (snodm, cnodm) = el.node.sin_cos();
    let (sinomm, cosomm) = el.argument_of_perigee.sin_cos();
    let (sinim, cosim) = el.inclination.sin_cos();
    let em = el.eccentricity;
    let emsq = em * em;
    let betasq = 1.0 - emsq;
    let rtemsq = betasq.sqrt();

    let day = epoch + 18_261.5;
    let xnodce = (4.523_602_0 - 9.242_202_9e-4 * day) % DPI;
    let (stem, ctem) = xnodce.sin_cos();
    let zcosil = 0.913_751_64 - 0.035_680_96 * ctem;
    let zsinil = (1.0 - zcosil * zcosil).sqrt();
    let zsinhl = 0.089_683_511 * stem / zsinil;
    let zcoshl = (1.0 - zsinhl * zsinhl).sqrt();
    let gam = 5.835_151_4 + 0.001_944_368_0 * day;
    let zx = 0.397_854_16 * stem / zsinil;
    let zy = zcoshl * ctem + 0.917_448_67 * zsinhl * stem;
    let zx = gam + zx.atan2(zy) - xnodce;
    let (zsingl, zcosgl) = zx.sin_cos();

    let xnoi = 1.0 / el.mean_motion;

    // solar pass first, then lunar
    let bodies = [
        (ZCOSGS, ZSINGS, ZCOSIS, ZSINIS, cnodm, snodm, C1SS),
        (
            zcosgl,
            zsingl,
            zcosil,
            zsinil,
            zcoshl * cnodm + zsinhl * snodm,
            snodm * zcoshl - cnodm * zsinhl,
            C1L,
        ),
    ];

    let mut terms = [[0.0; 19]; 2];
    for (k, &(zcosg, zsing, zcosi, zsini, zcosh, zsinh, cc)) in bodies.iter().enumerate() {
        let a1 = zcosg * zcosh + zsing * zcosi * zsinh;
        let a3 = -zsing * zcosh + zcosg * zcosi * zsinh;
        let a7 = -zcosg * zsinh + zsing * zcosi * zcosh;
        let a8 = zsing * zsini;
        let a9 = zsing * zsinh + zcosg * zcosi * zcosh;
        let a10 = zcosg * zsini;
        let a2 = cosim * a7 + sinim * a8;
        let a4 = cosim * a9 + sinim * a10;
        let a5 = -sinim * a7 + cosim * a8;
        let a6 = -sinim * a9 + cosim * a10;

        let x1 = a1 * cosomm + a2 * sinomm;
        let x2 = a3 * cosomm + a4 * sinomm;
        let x3 = -a1 * sinomm + a2 * cosomm;
        let x4 = -a3 * sinomm + a4 * cosomm;
        let x5 = a5 * sinomm;
        let x6 = a6 * sinomm;
        let x7 = a5 * cosomm;
        let x8 = a6 * cosomm;

        let z31 = 12.0 * x1 * x1 - 3.0 * x3 * x3;
        let z32 = 24.0 * x1 * x2 - 6.0 * x3 * x4;
        let z33 = 12.0 * x2 * x2 - 3.0 * x4 * x4;
        let mut z1 = 3.0 * (a1 * a1 + a2 * a2) + z31 * emsq;
        let mut z2 = 6.0 * (a1 * a3 + a2 * a4) + z32 * emsq;
        let mut z3 = 3.0 * (a3 * a3 + a4 * a4) + z33 * emsq;
        let z11 = -6.0 * a1 * a5 + emsq * (-24.0 * x1 * x7 - 6.0 * x3 * x5);
        let z12 = -6.0 * (a1 * a6 + a3 * a5)
            + emsq * (-24.0 * (x2 * x7 + x1 * x8) - 6.0 * (x3 * x6 + x4 * x5));
        let z13 = -6.0 * a3 * a6 + emsq * (-24.0 * x2 * x8 - 6.0 * x4 * x6);
        let z21 = 6.0 * a2 * a5 + emsq * (24.0 * x1 * x5 - 6.0 * x3 * x7);
        let z22 = 6.0 * (a4 * a5 + a2 * a6)
            + emsq * (24.0 * (x2 * x5 + x1 * x6) - 6.0 * (x4 * x7 + x3 * x8));
        let z23 = 6.0 * a4 * a6 + emsq * (24.0 * x2 * x6 - 6.0 * x4 * x8);
        z1 = z1 + z1 + betasq * z31;
        z2 = z2 + z2 + betasq * z32;
        z3 = z3 + z3 + betasq * z33;
        let s3 = cc * xnoi;
        let s2 = -0.5 * s3 / rtemsq;
        let s4 = s3 * rtemsq;
        let s1 = -15.0 * em * s4;
        let s5 = x1 * x3 + x2 * x4;
        let s6 = x2 * x3 + x1 * x4;
        let s7 = x2 * x4 - x1 * x3;

        terms[k] = [
            s1, s2, s3, s4, s5, s6, s7, z1, z2, z3, z11, z12, z13, z21, z22, z23, z31, z32, z33,
        ];
    }

    let [ss1, ss2, ss3, ss4, ss5, ss6, ss7, sz1, sz2, sz3, sz11, sz12, sz13, sz21, sz22, sz23, sz31, sz32, sz33] =
        terms[0];
    let [s1, s2, s3, s4, s5, s6, s7, z1, z2, z3, z11, z12, z13, z21, z22, z23, z31, z32, z33] =
        terms[1];

    let periodics = LunarSolarPeriodics {
        se2: 2.0 * ss1 * ss6,
        se3: 2.0 * ss1 * ss7,
        si2: 2.0 * ss2 * sz12,
        si3: 2.0 * ss2 * (sz13 - sz11),
        sl2: -2.0 * ss3 * sz2,
        sl3: -2.0 * ss3 * (sz3 - sz1),
        sl4: -2.0 * ss3 * (-21.0 - 9.0 * emsq) * ZES,
        sgh2: 2.0 * ss4 * sz32,
        sgh3: 2.0 * ss4 * (sz33 - sz31),
        sgh4: -18.0 * ss4 * ZES,
        sh2: -2.0 * ss2 * sz22,
        sh3: -2.0 * ss2 * (sz23 - sz21),
        ee2: 2.0 * s1 * s6,
        e3: 2.0 * s1 * s7,
        xi2: 2.0 * s2 * z12,
        xi3: 2.0 * s2 * (z13 - z11),
        xl2: -2.0 * s3 * z2,
        xl3: -2.0 * s3 * (z3 - z1),
        xl4: -2.0 * s3 * (-21.0 - 9.0 * emsq) * ZEL,
        xgh2: 2.0 * s4 * z32,
        xgh3: 2.0 * s4 * (z33 - z31),
        xgh4: -18.0 * s4 * ZEL,
        xh2: -2.0 * s2 * z22,
        xh3: -2.0 * s2 * (z23 - z21),
        zmol: (4.719_967_2 + 0.229_971_50 * day - gam) % DPI,
        zmos: (6.256_583_7 + 0.017_201_977 * day) % DPI,
    };

    let common = CommonTerms {
        sinim,
        cosim,
        emsq,
        s: [s1, s2, s3, s4, s5],
        ss: [ss1, ss2, ss3, ss4, ss5],
        sz1,
        sz3,
        sz11,
        sz13,
        sz21,
        sz23,
        sz31,
        sz33,
        z1,
        z3,
        z11,
        z13,
        z21,
        z23,
        z31,
        z33,
    };
    (common, periodics)
}

/// Secular lunar-solar rates and resonance coefficients at epoch.
fn resonance_terms(
    el: &MeanElements,
    seed: &DeepSpaceSeed,
    c: &CommonTerms,
) -> (SecularRates, Resonance) {
    const Q22: f64 = 1.7891679e-6;
    const Q31: f64 = 2.1460748e-6;
    const Q33: f64 = 2.2123015e-7;
    const ROOT22: f64 = 1.7891679e-6;
    const ROOT44: f64 = 7.3636953e-9;
    const ROOT54: f64 = 2.1765803e-9;
    const ROOT32: f64 = 3.7393792e-7;
    const ROOT52: f64 = 1.1428639e-7;
    const NEAR_EQUATORIAL: f64 = 5.2359877e-2;

    let [s1, s2, s3, s4, s5] = c.s;
    let [ss1, ss2, ss3, ss4, ss5] = c.ss;
    let (sinim, cosim, emsq) = (c.sinim, c.cosim, c.emsq);
    let nm = el.mean_motion;
    let em = el.eccentricity;
    let inclm = el.inclination;
    let near_equatorial = inclm < NEAR_EQUATORIAL || inclm > PI - NEAR_EQUATORIAL;

    // solar contributions
    let ses = ss1 * ZNS * ss5;
    let sis = ss2 * ZNS * (c.sz11 + c.sz13);
    let sls = -ZNS * ss3 * (c.sz1 + c.sz3 - 14.0 - 6.0 * emsq);
    let sghs = ss4 * ZNS * (c.sz31 + c.sz33 - 6.0);
    let mut shs = -ZNS * ss2 * (c.sz21 + c.sz23);
    if near_equatorial {
        shs = 0.0;
    }
    if sinim != 0.0 {
        shs /= sinim;
    }
    let sgs = sghs - cosim * shs;

    // lunar contributions
    let mut rates = SecularRates {
        dedt: ses + s1 * ZNL * s5,
        didt: sis + s2 * ZNL * (c.z11 + c.z13),
        dmdt: sls - ZNL * s3 * (c.z1 + c.z3 - 14.0 - 6.0 * emsq),
        domdt: 0.0,
        dnodt: shs,
    };
    let sghl = s4 * ZNL * (c.z31 + c.z33 - 6.0);
    let mut shll = -ZNL * s2 * (c.z21 + c.z23);
    if near_equatorial {
        shll = 0.0;
    }
    rates.domdt = sgs + sghl;
    if sinim != 0.0 {
        rates.domdt -= cosim / sinim * shll;
        rates.dnodt += shll / sinim;
    }

    let theta = seed.gsto % DPI;
    let aonv = (nm / seed.xke).powf(2.0 / 3.0);

    let resonance = if nm > 0.0034906585 && nm < 0.0052359877 {
        let g200 = 1.0 + emsq * (-2.5 + 0.8125 * emsq);
        let g310 = 1.0 + 2.0 * emsq;
        let g300 = 1.0 + emsq * (-6.0 + 6.60937 * emsq);
        let f220 = 0.75 * (1.0 + cosim) * (1.0 + cosim);
        let f311 = 0.9375 * sinim * sinim * (1.0 + 3.0 * cosim) - 0.75 * (1.0 + cosim);
        let f330 = 1.0 + cosim;
        let f330 = 1.875 * f330 * f330 * f330;
        let del1 = 3.0 * nm * nm * aonv * aonv;

        Resonance::Synchronous(SynchronousResonance {
            del2: 2.0 * del1 * f220 * g200 * Q22,
            del3: 3.0 * del1 * f330 * g300 * Q33 * aonv,
            del1: del1 * f311 * g310 * Q31 * aonv,
            xlamo: (el.mean_anomaly + el.node + el.argument_of_perigee - theta) % DPI,
            xfact: seed.mdot + seed.xpidot - RPTIM + rates.dmdt + rates.domdt + rates.dnodt - nm,
        })
    } else if (8.26e-3..=9.24e-3).contains(&nm) && em >= 0.5 {
        let cosisq = cosim * cosim;
        let eoc = em * emsq;
        let g201 = -0.306 - (em - 0.64) * 0.440;

        let (g211, g310, g322, g410, g422, g520) = if em <= 0.65 {
            (
                3.616 - 13.2470 * em + 16.2900 * emsq,
                -19.302 + 117.3900 * em - 228.4190 * emsq + 156.5910 * eoc,
                -18.9068 + 109.7927 * em - 214.6334 * emsq + 146.5816 * eoc,
                -41.122 + 242.6940 * em - 471.0940 * emsq + 313.9530 * eoc,
                -146.407 + 841.8800 * em - 1629.014 * emsq + 1083.4350 * eoc,
                -532.114 + 3017.977 * em - 5740.032 * emsq + 3708.2760 * eoc,
            )
        } else {
            let g520 = if em > 0.715 {
                -5149.66 + 29936.92 * em - 54087.36 * emsq + 31324.56 * eoc
            } else {
                1464.74 - 4664.75 * em + 3763.64 * emsq
            };
            (
                -72.099 + 331.819 * em - 508.738 * emsq + 266.724 * eoc,
                -346.844 + 1582.851 * em - 2415.925 * emsq + 1246.113 * eoc,
                -342.585 + 1554.908 * em - 2366.899 * emsq + 1215.972 * eoc,
                -1052.797 + 4758.686 * em - 7193.992 * emsq + 3651.957 * eoc,
                -3581.690 + 16178.110 * em - 24462.770 * emsq + 12422.520 * eoc,
                g520,
            )
        };

        let (g533, g521, g532) = if em < 0.7 {
            (
                -919.22770 + 4988.61 * em - 9064.77 * emsq + 5542.21 * eoc,
                -822.71072 + 4568.6173 * em - 8491.4146 * emsq + 5337.524 * eoc,
                -853.66600 + 4690.25 * em - 8624.77 * emsq + 5341.4 * eoc,
            )
        } else {
            (
                -37995.78 + 161616.52 * em - 229838.2 * emsq + 109377.94 * eoc,
                -51752.104 + 218913.95 * em - 309468.16 * emsq + 146349.42 * eoc,
                -40023.88 + 170470.89 * em - 242699.48 * emsq + 115605.82 * eoc,
            )
        };

        let sini2 = sinim * sinim;
        let f220 = 0.75 * (1.0 + 2.0 * cosim + cosisq);
        let f221 = 1.5 * sini2;
        let f321 = 1.875 * sinim * (1.0 - 2.0 * cosim - 3.0 * cosisq);
        let f322 = -1.875 * sinim * (1.0 + 2.0 * cosim - 3.0 * cosisq);
        let f441 = 35.0 * sini2 * f220;
        let f442 = 39.375 * sini2 * sini2;
        let f522 = 9.84375
            * sinim
            * (sini2 * (1.0 - 2.0 * cosim - 5.0 * cosisq)
                + 0.33333333 * (-2.0 + 4.0 * cosim + 6.0 * cosisq));
        let f523 = sinim
            * (4.92187512 * sini2 * (-2.0 - 4.0 * cosim + 10.0 * cosisq)
                + 6.56250012 * (1.0 + 2.0 * cosim - 3.0 * cosisq));
        let f542 = 29.53125
            * sinim
            * (2.0 - 8.0 * cosim + cosisq * (-12.0 + 8.0 * cosim + 10.0 * cosisq));
        let f543 = 29.53125
            * sinim
            * (-2.0 - 8.0 * cosim + cosisq * (12.0 + 8.0 * cosim - 10.0 * cosisq));

        let xno2 = nm * nm;
        let ainv2 = aonv * aonv;
        let mut temp1 = 3.0 * xno2 * ainv2;
        let mut temp = temp1 * ROOT22;
        let d2201 = temp * f220 * g201;
        let d2211 = temp * f221 * g211;
        temp1 *= aonv;
        temp = temp1 * ROOT32;
        let d3210 = temp * f321 * g310;
        let d3222 = temp * f322 * g322;
        temp1 *= aonv;
        temp = 2.0 * temp1 * ROOT44;
        let d4410 = temp * f441 * g410;
        let d4422 = temp * f442 * g422;
        temp1 *= aonv;
        temp = temp1 * ROOT52;
        let d5220 = temp * f522 * g520;
        let d5232 = temp * f523 * g532;
        temp = 2.0 * temp1 * ROOT54;
        let d5421 = temp * f542 * g521;
        let d5433 = temp * f543 * g533;

        Resonance::HalfDay(HalfDayResonance {
            d2201,
            d2211,
            d3210,
            d3222,
            d4410,
            d4422,
            d5220,
            d5232,
            d5421,
            d5433,
            xlamo: (el.mean_anomaly + el.node + el.node - theta - theta) % DPI,
            xfact: seed.mdot + rates.dmdt + 2.0 * (seed.nodedot + rates.dnodt - RPTIM) - nm,
        })
    } else {
        Resonance::None
    };

    (rates, resonance)
}

#[cfg(test)]
mod deep_space_test {
    use super::*;

    fn molniya() -> MeanElements {
        MeanElements {
            eccentricity: 0.6877146,
            inclination: 64.1586_f64.to_radians(),
            node: 279.0717_f64.to_radians(),
            argument_of_perigee: 264.7651_f64.to_radians(),
            mean_anomaly: 20.2257_f64.to_radians(),
            mean_motion: 0.0087467,
        }
    }

    fn seed() -> DeepSpaceSeed {
        DeepSpaceSeed {
            epoch: 20_636.332_154_44,
            xke: 0.0743669161,
            gsto: 1.0,
            mdot: 0.0087467,
            nodedot: -1.0e-7,
            xpidot: 1.0e-7,
        }
    }

    #[test]
    fn test_half_day_resonance_selected() {
        let ds = DeepSpace::initialize(&molniya(), &seed());
        assert!(matches!(ds.resonance, Resonance::HalfDay(_)));
        assert!(ds.periodics.zmol.abs() < DPI);
        assert!(ds.periodics.zmos.abs() < DPI);
    }

    #[test]
    fn test_synchronous_resonance_selected() {
        let geo = MeanElements {
            eccentricity: 0.0000335,
            inclination: 0.0019_f64.to_radians(),
            node: 286.9433_f64.to_radians(),
            argument_of_perigee: 13.7918_f64.to_radians(),
            mean_anomaly: 55.6504_f64.to_radians(),
            mean_motion: 0.004375,
        };
        let ds = DeepSpace::initialize(&geo, &seed());
        assert!(matches!(ds.resonance, Resonance::Synchronous(_)));
        // near-equatorial orbits carry no node drift from the sun or the moon
        assert_eq!(ds.rates.dnodt, 0.0);
    }

    #[test]
    fn test_non_resonant_orbit() {
        let mut el = molniya();
        el.mean_motion = 0.0060;
        let ds = DeepSpace::initialize(&el, &seed());
        assert_eq!(ds.resonance, Resonance::None);

        let out = ds.secular(0.0, &el, 0.0, el);
        assert_eq!(out, el);
    }

    #[test]
    fn test_resonance_at_epoch_returns_epoch_motion() {
        let el = molniya();
        let ds = DeepSpace::initialize(&el, &seed());
        let out = ds.secular(0.0, &el, 0.0, el);
        assert_eq!(out.mean_motion, el.mean_motion);
    }

    #[test]
    fn test_resonance_is_path_independent() {
        let el = molniya();
        let ds = DeepSpace::initialize(&el, &seed());
        let a = ds.secular(4000.0, &el, 1.0e-6, el);
        let _ = ds.secular(1000.0, &el, 1.0e-6, el);
        let b = ds.secular(4000.0, &el, 1.0e-6, el);
        assert_eq!(a, b);
    }
}
