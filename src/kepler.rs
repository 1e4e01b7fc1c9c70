//! # Kepler equation solver
//!
//! SGP4 solves Kepler's equation in the Lyddane (non-singular) variables
//!
//! ```text
//! U = E + aₙ·cos E − aₓ·sin E
//! ```
//!
//! where `aₓ = e·cos ω`, `aₙ = e·sin ω` (+ long-period terms) and `U = (L − Ω) mod 2π`.
//! The Newton iteration is bounded: each correction is clamped to `±0.95` rad and the
//! number of iterations is capped by [`KeplerSettings::max_iterations`].
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::constants::{Radian, DPI};

/// Largest Newton correction allowed in a single step (radians).
const MAX_NEWTON_STEP: f64 = 0.95;

/// Convergence controls for [`solve_lyddane_kepler`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerSettings {
    /// Stop once the Newton correction drops below this value (radians).
    pub tolerance: f64,
    /// Hard cap on Newton iterations.
    pub max_iterations: usize,
}

impl Default for KeplerSettings {
    fn default() -> Self {
        KeplerSettings {
            tolerance: 1.0e-12,
            max_iterations: 10,
        }
    }
}

/// Result of the Lyddane Kepler iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric longitude `E + ω` (radians).
    pub eccentric_longitude: Radian,
    /// Sine and cosine of the last Newton iterate, before its final correction.
    pub sin_cos: (f64, f64),
    /// Number of Newton steps performed.
    pub iterations: usize,
    /// Last applied correction (radians).
    pub last_step: f64,
}

impl KeplerSolution {
    pub fn converged(&self, settings: &KeplerSettings) -> bool {
        self.last_step.abs() < settings.tolerance
    }
}

/// Solve `U = E + aynl·cos E − axnl·sin E` for the eccentric longitude.
///
/// Arguments
/// ---------
/// * `u`: mean longitude minus node, already reduced modulo 2π.
/// * `axnl`: `e·cos ω`.
/// * `aynl`: `e·sin ω` plus the long-period correction.
/// * `settings`: tolerance and iteration cap.
///
/// Return
/// ------
/// * The eccentric longitude together with iteration diagnostics. The iteration is
///   started from `E = U`; it never diverges since every step is clamped. The
///   short-period terms use [`KeplerSolution::sin_cos`], evaluated at the iterate that
///   produced the last correction.
pub fn solve_lyddane_kepler(
    u: Radian,
    axnl: f64,
    aynl: f64,
    settings: &KeplerSettings,
) -> KeplerSolution {
    let mut eo1 = u;
    let mut tem5 = f64::INFINITY;
    let mut iterations = 0;
    let (mut sineo1, mut coseo1) = eo1.sin_cos();

    while tem5.abs() >= settings.tolerance && iterations < settings.max_iterations {
        (sineo1, coseo1) = eo1.sin_cos();
        tem5 = 1.0 - coseo1 * axnl - sineo1 * aynl;
        tem5 = (u - aynl * coseo1 + axnl * sineo1 - eo1) / tem5;
        if tem5.abs() >= MAX_NEWTON_STEP {
            tem5 = MAX_NEWTON_STEP.copysign(tem5);
        }
        eo1 += tem5;
        iterations += 1;
    }

    KeplerSolution {
        eccentric_longitude: eo1,
        sin_cos: (sineo1, coseo1),
        iterations,
        last_step: tem5,
    }
}

/// Principal value of an angle in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Reduce an angle to `[-π, π)`.
pub fn signed_angle(a: Radian) -> Radian {
    let mut reduced = principal_angle(a);
    if reduced >= PI {
        reduced -= DPI;
    }
    reduced
}
