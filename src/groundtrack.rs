//! # GroundTrack: one-call façade
//!
//! [`GroundTrack`] owns a [`PropagationConfig`] and wires the pipeline stages together:
//!
//! 1. **TLE decoding** ([`Tle::parse`], [`parse_tle_set`], [`read_tle_catalog`]),
//! 2. **SGP4 initialization** ([`OrbitalElements::new`]),
//! 3. **trajectory sampling** ([`compute_trajectory`], [`compute_trajectories`]).
//!
//! The most common entry point mirrors a host-side binding: two TLE lines, a duration in
//! hours and a step in minutes in, one trajectory out.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use groundtrack::groundtrack::GroundTrack;
//!
//! let gt = GroundTrack::new();
//! let track = gt
//!     .propagate_from_tle(
//!         "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
//!         "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
//!         24.0,
//!         1.0,
//!     )
//!     .unwrap();
//! let flat: Vec<f64> = track.to_flat_vec();
//! ```
//!
//! ## See also
//! ------------
//! * [`PropagationConfig`] – every tunable of the pipeline.
//! * [`GroundTrackError`] – error taxonomy returned by every method.
use camino::Utf8Path;

use crate::config::PropagationConfig;
use crate::elements::OrbitalElements;
use crate::groundtrack_errors::GroundTrackError;
use crate::tle::{parse_tle_set, read_tle_catalog, Tle};
use crate::trajectory::{
    compute_trajectories, compute_trajectory, CancellationToken, Trajectory, TrajectoryRequest,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundTrack {
    config: PropagationConfig,
}

impl GroundTrack {
    /// Façade with the default configuration (WGS-84, improved mode, checksums verified).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PropagationConfig) -> Self {
        GroundTrack { config }
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Decode and initialize one element set.
    pub fn elements_from_tle(
        &self,
        line1: &str,
        line2: &str,
    ) -> Result<OrbitalElements, GroundTrackError> {
        let tle = Tle::parse(line1, line2, &self.config.tle_options())?;
        Ok(OrbitalElements::new(&tle, &self.config)?)
    }

    /// Decode a TLE and sample its trajectory.
    ///
    /// Arguments
    /// -----------------
    /// * `line1`, `line2` – the element lines.
    /// * `duration_hours` – span covered from the TLE epoch; negative spans give one sample.
    /// * `step_minutes` – grid step, strictly positive.
    ///
    /// Return
    /// ----------
    /// * The trajectory, or the first error of the chain (decoding, initialization,
    ///   request validation, or the failing sample).
    pub fn propagate_from_tle(
        &self,
        line1: &str,
        line2: &str,
        duration_hours: f64,
        step_minutes: f64,
    ) -> Result<Trajectory, GroundTrackError> {
        let request = TrajectoryRequest::new(duration_hours, step_minutes);
        // reject a bad grid before paying for the initialization
        request.sample_count(self.config.max_samples)?;

        let elements = self.elements_from_tle(line1, line2)?;
        compute_trajectory(&elements, &request, &self.config, None)
    }

    /// Same as [`Self::propagate_from_tle`] with a cancellation token.
    pub fn propagate_from_tle_with_cancel(
        &self,
        line1: &str,
        line2: &str,
        request: &TrajectoryRequest,
        cancel: &CancellationToken,
    ) -> Result<Trajectory, GroundTrackError> {
        request.sample_count(self.config.max_samples)?;

        let elements = self.elements_from_tle(line1, line2)?;
        compute_trajectory(&elements, request, &self.config, Some(cancel))
    }

    /// Decode and initialize every set of a text blob.
    pub fn elements_from_text(&self, text: &str) -> Result<Vec<OrbitalElements>, GroundTrackError> {
        parse_tle_set(text, &self.config.tle_options())?
            .iter()
            .map(|tle| OrbitalElements::new(tle, &self.config).map_err(GroundTrackError::from))
            .collect()
    }

    /// Read a catalog file and initialize every set it contains.
    pub fn load_catalog(&self, path: &Utf8Path) -> Result<Vec<OrbitalElements>, GroundTrackError> {
        read_tle_catalog(path, &self.config.tle_options())?
            .iter()
            .map(|tle| OrbitalElements::new(tle, &self.config).map_err(GroundTrackError::from))
            .collect()
    }

    /// Sample many records in parallel, results in input order.
    pub fn propagate_catalog(
        &self,
        elements: &[OrbitalElements],
        request: &TrajectoryRequest,
    ) -> Vec<Result<Trajectory, GroundTrackError>> {
        compute_trajectories(elements, request, &self.config, None)
    }
}

#[cfg(test)]
mod groundtrack_test {
    use super::*;
    use crate::groundtrack_errors::ErrorKind;
    use crate::unit_test_global::ISS_LINES;

    const ISS_1: &str = ISS_LINES.0;
    const ISS_2: &str = ISS_LINES.1;

    #[test]
    fn test_propagate_from_tle() {
        let track = GroundTrack::new()
            .propagate_from_tle(ISS_1, ISS_2, 2.0, 30.0)
            .unwrap();
        assert_eq!(track.len(), 5);
        assert_eq!(track.satellite_number, 25544);
    }

    #[test]
    fn test_request_checked_before_parsing() {
        let err = GroundTrack::new()
            .propagate_from_tle("garbage", ISS_2, 2.0, 0.0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_request_checked_before_parsing_with_cancel() {
        let token = CancellationToken::new();
        let err = GroundTrack::new()
            .propagate_from_tle_with_cancel(
                "garbage",
                ISS_2,
                &TrajectoryRequest::new(2.0, 0.0),
                &token,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);

        let err = GroundTrack::new()
            .propagate_from_tle_with_cancel(
                "garbage",
                ISS_2,
                &TrajectoryRequest::new(2.0, 30.0),
                &token,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_malformed_line() {
        let err = GroundTrack::new()
            .propagate_from_tle(&ISS_1[..40], ISS_2, 2.0, 30.0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(err.failed_index(), None);
    }

    #[test]
    fn test_elements_from_text() {
        let text = format!("ISS (ZARYA)\n{ISS_1}\n{ISS_2}\n\n{ISS_1}\n{ISS_2}\n");
        let all = GroundTrack::new().elements_from_text(&text).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name.as_deref(), Some("ISS (ZARYA)"));
        assert_eq!(all[1].name, None);
    }
}
