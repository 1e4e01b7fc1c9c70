//! # SGP4 / SDP4 propagation
//!
//! [`propagate`] evaluates an initialized [`OrbitalElements`] record at a time offset and
//! returns the TEME position (km) and velocity (km/s).
//!
//! The evaluation is a pure function of the record and the offset: the record is never
//! mutated and the deep-space resonance integrator restarts from epoch on every call, so
//! the same inputs always produce bit-identical outputs regardless of call order.
//!
//! Steps, in order:
//!
//! 1. secular gravity and atmospheric drag,
//! 2. deep-space secular and resonance terms (SDP4 only),
//! 3. mean motion, eccentricity and angle updates with their validity checks,
//! 4. lunar-solar periodics (SDP4 only),
//! 5. long-period terms and the Lyddane Kepler equation,
//! 6. J2 short-period corrections and orientation vectors,
//! 7. decay check on the osculating radius.
use log::trace;
use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::constants::{Minutes, DPI};
use crate::elements::{long_period_coefficients, Dynamics, MeanElements, OrbitalElements};
use crate::groundtrack_errors::PropagationError;
use crate::kepler::solve_lyddane_kepler;
use crate::ref_system::StateVector;

/// Propagate `elements` to `tsince` minutes from epoch.
///
/// Arguments
/// ---------
/// * `elements`: initialized SGP4 record.
/// * `tsince`: minutes since the TLE epoch, may be negative.
///
/// Return
/// ------
/// * The TEME state vector, or the first [`PropagationError`] met. No partial state is
///   returned on failure.
pub fn propagate(
    elements: &OrbitalElements,
    tsince: Minutes,
) -> Result<StateVector, PropagationError> {
    if !tsince.is_finite() {
        return Err(PropagationError::NonFiniteTime(tsince));
    }

    let g = &elements.gravity;
    let c = &elements.coefficients;
    let epoch = &elements.mean;
    let t = tsince;
    let x2o3 = 2.0 / 3.0;

    // ---- secular gravity and drag ----
    let xmdf = epoch.mean_anomaly + c.mdot * t;
    let argpdf = epoch.argument_of_perigee + c.argpdot * t;
    let nodedf = epoch.node + c.nodedot * t;
    let mut argpm = argpdf;
    let mut mm = xmdf;
    let t2 = t * t;
    let mut nodem = nodedf + c.nodecf * t2;
    let mut tempa = 1.0 - c.cc1 * t;
    let mut tempe = elements.bstar * c.cc4 * t;
    let mut templ = c.t2cof * t2;

    if !elements.simplified_drag {
        let delomg = c.omgcof * t;
        let delmtemp = 1.0 + c.eta * xmdf.cos();
        let delm = c.xmcof * (delmtemp * delmtemp * delmtemp - c.delmo);
        let temp = delomg + delm;
        mm = xmdf + temp;
        argpm = argpdf - temp;
        let t3 = t2 * t;
        let t4 = t3 * t;
        tempa = tempa - c.d2 * t2 - c.d3 * t3 - c.d4 * t4;
        tempe += elements.bstar * c.cc5 * (mm.sin() - c.sinmao);
        templ = templ + c.t3cof * t3 + t4 * (c.t4cof + t * c.t5cof);
    }

    let mut mean = MeanElements {
        eccentricity: epoch.eccentricity,
        inclination: epoch.inclination,
        node: nodem,
        argument_of_perigee: argpm,
        mean_anomaly: mm,
        mean_motion: epoch.mean_motion,
    };

    if let Dynamics::DeepSpace(ds) = &elements.dynamics {
        mean = ds.secular(t, epoch, c.argpdot, mean);
    }

    // ---- mean motion and eccentricity ----
    let mut nm = mean.mean_motion;
    if nm <= 0.0 {
        return Err(PropagationError::MeanMotion {
            tsince,
            value: nm,
        });
    }
    let am = (g.xke / nm).powf(x2o3) * tempa * tempa;
    nm = g.xke / am.powf(1.5);
    let mut em = mean.eccentricity - tempe;

    if em >= 1.0 || em < -0.001 {
        return Err(PropagationError::MeanEccentricity { tsince, value: em });
    }
    if em < 1.0e-6 {
        em = 1.0e-6;
    }

    mm = mean.mean_anomaly + epoch.mean_motion * templ;
    let xlm = mm + mean.argument_of_perigee + mean.node;

    nodem = mean.node % DPI;
    argpm = mean.argument_of_perigee % DPI;
    let xlm = xlm % DPI;
    mm = (xlm - argpm - nodem) % DPI;

    let mut osc = MeanElements {
        eccentricity: em,
        inclination: mean.inclination,
        node: nodem,
        argument_of_perigee: argpm,
        mean_anomaly: mm,
        mean_motion: nm,
    };

    // ---- lunar-solar periodics ----
    let (mut aycof, mut xlcof) = (c.aycof, c.xlcof);
    let (mut con41, mut x1mth2, mut x7thm1) = (c.con41, c.x1mth2, c.x7thm1);

    if let Dynamics::DeepSpace(ds) = &elements.dynamics {
        osc = ds.periodics(t, osc, elements.operation_mode);
        if osc.inclination < 0.0 {
            osc.inclination = -osc.inclination;
            osc.node += PI;
            osc.argument_of_perigee -= PI;
        }
        if osc.eccentricity < 0.0 || osc.eccentricity > 1.0 {
            return Err(PropagationError::PerturbedEccentricity {
                tsince,
                value: osc.eccentricity,
            });
        }
    }

    let (sinip, cosip) = osc.inclination.sin_cos();
    if elements.is_deep_space() {
        (aycof, xlcof) = long_period_coefficients(g.j3oj2, sinip, cosip);
    }

    // ---- long-period terms ----
    let ep = osc.eccentricity;
    let argpp = osc.argument_of_perigee;
    let nodep = osc.node;
    let axnl = ep * argpp.cos();
    let temp = 1.0 / (am * (1.0 - ep * ep));
    let aynl = ep * argpp.sin() + temp * aycof;
    let xl = osc.mean_anomaly + argpp + nodep + temp * xlcof * axnl;

    // ---- Kepler ----
    let u = (xl - nodep) % DPI;
    let kepler = solve_lyddane_kepler(u, axnl, aynl, &elements.kepler);
    if !kepler.converged(&elements.kepler) {
        trace!(
            "satellite {:05}: kepler iteration stopped after {} steps at t = {} min (last step {:e})",
            elements.satellite_number,
            kepler.iterations,
            tsince,
            kepler.last_step
        );
    }
    let (sineo1, coseo1) = kepler.sin_cos;

    // ---- short-period terms ----
    let ecose = axnl * coseo1 + aynl * sineo1;
    let esine = axnl * sineo1 - aynl * coseo1;
    let el2 = axnl * axnl + aynl * aynl;
    let pl = semi_latus_rectum(am, el2, tsince)?;

    let rl = am * (1.0 - ecose);
    let rdotl = am.sqrt() * esine / rl;
    let rvdotl = pl.sqrt() / rl;
    let betal = (1.0 - el2).sqrt();
    let temp = esine / (1.0 + betal);
    let sinu = am / rl * (sineo1 - aynl - axnl * temp);
    let cosu = am / rl * (coseo1 - axnl + aynl * temp);
    let mut su = sinu.atan2(cosu);
    let sin2u = (cosu + cosu) * sinu;
    let cos2u = 1.0 - 2.0 * sinu * sinu;
    let temp = 1.0 / pl;
    let temp1 = 0.5 * g.j2 * temp;
    let temp2 = temp1 * temp;

    if elements.is_deep_space() {
        let cosisq = cosip * cosip;
        con41 = 3.0 * cosisq - 1.0;
        x1mth2 = 1.0 - cosisq;
        x7thm1 = 7.0 * cosisq - 1.0;
    }

    let mrt = rl * (1.0 - 1.5 * temp2 * betal * con41) + 0.5 * temp1 * x1mth2 * cos2u;
    su -= 0.25 * temp2 * x7thm1 * sin2u;
    let xnode = nodep + 1.5 * temp2 * cosip * sin2u;
    let xinc = osc.inclination + 1.5 * temp2 * cosip * sinip * cos2u;
    let mvt = rdotl - nm * temp1 * x1mth2 * sin2u / g.xke;
    let rvdot = rvdotl + nm * temp1 * (x1mth2 * cos2u + 1.5 * con41) / g.xke;

    // ---- orientation vectors ----
    let (sinsu, cossu) = su.sin_cos();
    let (snod, cnod) = xnode.sin_cos();
    let (sini, cosi) = xinc.sin_cos();
    let xmx = -snod * cosi;
    let xmy = cnod * cosi;
    let ux = Vector3::new(
        xmx * sinsu + cnod * cossu,
        xmy * sinsu + snod * cossu,
        sini * sinsu,
    );
    let vx = Vector3::new(
        xmx * cossu - cnod * sinsu,
        xmy * cossu - snod * sinsu,
        sini * cossu,
    );

    let position = ux * mrt * g.radius_km;
    let velocity = (ux * mvt + vx * rvdot) * g.velocity_unit_km_s();

    if mrt < elements.decay_radius_er {
        return Err(PropagationError::Decayed {
            tsince,
            radius_km: mrt * g.radius_km,
        });
    }

    Ok(StateVector::teme(position, velocity))
}

/// Semi-latus rectum `am (1 − e²)` of the long-period elements; must be strictly positive.
fn semi_latus_rectum(am: f64, el2: f64, tsince: Minutes) -> Result<f64, PropagationError> {
    let pl = am * (1.0 - el2);
    if pl <= 0.0 || !pl.is_finite() {
        return Err(PropagationError::SemiLatusRectum { tsince, value: pl });
    }
    Ok(pl)
}
