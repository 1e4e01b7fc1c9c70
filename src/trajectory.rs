//! # Trajectory driver
//!
//! Builds ground tracks by sampling an [`OrbitalElements`] record on a regular time grid.
//! Each sample runs the full chain
//!
//! ```text
//! propagate (TEME) → teme_to_ecef → ecef_to_geodetic
//! ```
//!
//! and is stored as a [`TrajectorySample`].
//!
//! ## Grid
//!
//! For a request of `duration_hours` and `step_minutes`, the grid holds
//! `max(floor(duration_hours · 60 / step_minutes), 0) + 1` samples at
//! `t_i = i · step_minutes` minutes since the TLE epoch. A negative duration therefore
//! yields a single sample at epoch.
//!
//! ## Failures
//!
//! The first failing sample aborts the whole trajectory: the error carries the grid index
//! of that sample (which is also the number of samples completed before it) and no partial
//! trajectory is returned.
//!
//! ## Cancellation and batches
//!
//! A [`CancellationToken`] is polled before every sample. [`compute_trajectories`]
//! evaluates independent records in parallel with rayon and returns the results in input
//! order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use groundtrack::config::PropagationConfig;
//! use groundtrack::elements::OrbitalElements;
//! use groundtrack::tle::Tle;
//! use groundtrack::trajectory::{compute_trajectory, TrajectoryRequest};
//!
//! # fn main() -> Result<(), groundtrack::groundtrack_errors::GroundTrackError> {
//! let config = PropagationConfig::default();
//! let tle = Tle::parse(
//!     "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
//!     "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
//!     &config.tle_options(),
//! )?;
//! let elements = OrbitalElements::new(&tle, &config)?;
//! let track = compute_trajectory(&elements, &TrajectoryRequest::new(2.0, 30.0), &config, None)?;
//! for row in track.rows() {
//!     println!("{row:?}");
//! }
//! # Ok(()) }
//! ```
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::PropagationConfig;
use crate::constants::{JulianDate, Minutes, SatelliteNumber};
use crate::elements::OrbitalElements;
use crate::geodetic::{ecef_to_geodetic, GeodeticPoint};
use crate::groundtrack_errors::{GroundTrackError, RequestError};
use crate::propagator::propagate;
use crate::ref_system::{teme_to_ecef, StateVector};

/// Number of scalars exported per sample by [`TrajectorySample::to_row`].
pub const ROW_WIDTH: usize = 9;

/// Time grid of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRequest {
    pub duration_hours: f64,
    pub step_minutes: Minutes,
}

impl TrajectoryRequest {
    pub fn new(duration_hours: f64, step_minutes: Minutes) -> Self {
        TrajectoryRequest {
            duration_hours,
            step_minutes,
        }
    }

    /// Validate the request and return its number of samples.
    ///
    /// Arguments
    /// -----------------
    /// * `max_samples` – upper bound on the accepted sample count.
    ///
    /// Return
    /// ----------
    /// * `max(floor(duration_hours · 60 / step_minutes), 0) + 1`, or a [`RequestError`] if
    ///   the step is not a positive finite number, the duration is not finite, or the count
    ///   exceeds `max_samples`.
    pub fn sample_count(&self, max_samples: usize) -> Result<usize, RequestError> {
        if !(self.step_minutes > 0.0) || !self.step_minutes.is_finite() {
            return Err(RequestError::NonPositiveStep(self.step_minutes));
        }
        if !self.duration_hours.is_finite() {
            return Err(RequestError::NonFiniteDuration(self.duration_hours));
        }

        let requested = (self.duration_hours * 60.0 / self.step_minutes).floor().max(0.0) + 1.0;
        if requested > max_samples as f64 {
            return Err(RequestError::TooManySamples {
                requested,
                max: max_samples,
            });
        }
        Ok(requested as usize)
    }

    /// Minutes since epoch of grid point `index`.
    pub fn offset(&self, index: usize) -> Minutes {
        index as f64 * self.step_minutes
    }
}

/// Cooperative cancellation flag shared between a caller and running trajectories.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One grid point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub index: usize,
    /// Minutes since the TLE epoch
    pub tsince: Minutes,
    /// Julian date (UT1) of the sample
    pub jd: JulianDate,
    pub teme: StateVector,
    pub ecef: StateVector,
    pub geodetic: GeodeticPoint,
}

impl TrajectorySample {
    /// Flat export: TEME position (km), TEME velocity (km/s), latitude (deg),
    /// longitude (deg), altitude (km).
    pub fn to_row(&self) -> [f64; ROW_WIDTH] {
        let r = &self.teme.position;
        let v = &self.teme.velocity;
        [
            r.x,
            r.y,
            r.z,
            v.x,
            v.y,
            v.z,
            self.geodetic.latitude_deg(),
            self.geodetic.longitude_deg(),
            self.geodetic.altitude,
        ]
    }
}

#[derive(Serialize)]
struct CsvRecord {
    tsince_min: f64,
    jd: f64,
    x_km: f64,
    y_km: f64,
    z_km: f64,
    vx_km_s: f64,
    vy_km_s: f64,
    vz_km_s: f64,
    lat_deg: f64,
    lon_deg: f64,
    alt_km: f64,
}

impl From<&TrajectorySample> for CsvRecord {
    fn from(s: &TrajectorySample) -> Self {
        let [x_km, y_km, z_km, vx_km_s, vy_km_s, vz_km_s, lat_deg, lon_deg, alt_km] = s.to_row();
        CsvRecord {
            tsince_min: s.tsince,
            jd: s.jd,
            x_km,
            y_km,
            z_km,
            vx_km_s,
            vy_km_s,
            vz_km_s,
            lat_deg,
            lon_deg,
            alt_km,
        }
    }
}

/// Ordered samples of a single satellite, strictly increasing in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub satellite_number: SatelliteNumber,
    pub epoch_jd: JulianDate,
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn rows(&self) -> impl Iterator<Item = [f64; ROW_WIDTH]> + '_ {
        self.samples.iter().map(TrajectorySample::to_row)
    }

    /// All rows concatenated, `ROW_WIDTH` values per sample.
    pub fn to_flat_vec(&self) -> Vec<f64> {
        self.rows().flatten().collect()
    }

    /// Write the trajectory as CSV with a header row.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for sample in &self.samples {
            wtr.serialize(CsvRecord::from(sample))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Sample `elements` on the grid described by `request`.
///
/// Arguments
/// -----------------
/// * `elements` – initialized record.
/// * `request` – duration and step of the grid.
/// * `config` – sample cap, ellipsoid and geodetic solver settings.
/// * `cancel` – optional token polled before each sample.
///
/// Return
/// ----------
/// * The full trajectory, or the first error met. Propagation failures and decay carry the
///   index of the failing sample; cancellation carries the index of the first sample not
///   computed.
pub fn compute_trajectory(
    elements: &OrbitalElements,
    request: &TrajectoryRequest,
    config: &PropagationConfig,
    cancel: Option<&CancellationToken>,
) -> Result<Trajectory, GroundTrackError> {
    let result = sample_grid(elements, request, config, cancel);
    match &result {
        Ok(track) => info!(
            "satellite {:05}: trajectory of {} samples",
            elements.satellite_number,
            track.len()
        ),
        Err(e) => warn!(
            "satellite {:05}: trajectory aborted: {e}",
            elements.satellite_number
        ),
    }
    result
}

fn sample_grid(
    elements: &OrbitalElements,
    request: &TrajectoryRequest,
    config: &PropagationConfig,
    cancel: Option<&CancellationToken>,
) -> Result<Trajectory, GroundTrackError> {
    let count = request.sample_count(config.max_samples)?;
    let mut samples = Vec::with_capacity(count);

    for index in 0..count {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(RequestError::Cancelled { index }.into());
        }

        let tsince = request.offset(index);
        let jd = elements.jd_at(tsince);
        let teme = propagate(elements, tsince).map_err(|e| GroundTrackError::at_sample(index, e))?;
        let ecef = teme_to_ecef(&teme, jd)
            .map_err(|source| GroundTrackError::TransformFailure { index, source })?;
        let geodetic = ecef_to_geodetic(&ecef.position, &config.ellipsoid, &config.geodetic)
            .map_err(|source| GroundTrackError::TransformFailure { index, source })?;

        samples.push(TrajectorySample {
            index,
            tsince,
            jd,
            teme,
            ecef,
            geodetic,
        });
    }

    Ok(Trajectory {
        satellite_number: elements.satellite_number,
        epoch_jd: elements.epoch_jd,
        samples,
    })
}

/// Sample several records in parallel.
///
/// Return
/// ----------
/// * One result per record, in the order of `elements`.
pub fn compute_trajectories(
    elements: &[OrbitalElements],
    request: &TrajectoryRequest,
    config: &PropagationConfig,
    cancel: Option<&CancellationToken>,
) -> Vec<Result<Trajectory, GroundTrackError>> {
    elements
        .par_iter()
        .map(|el| compute_trajectory(el, request, config, cancel))
        .collect()
}
