use thiserror::Error;

use crate::constants::Minutes;
use crate::ref_system::RefSystem;
pub use crate::tle::ParseTleError;

/// Coarse classification of every failure surfaced by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The TLE text could not be decoded.
    MalformedInput,
    /// The decoded elements cannot initialize the propagator.
    InvalidElements,
    /// Propagation or frame transformation failed at a sample.
    PropagationFailure,
    /// The orbit radius dropped below the decay threshold at a sample.
    Decayed,
    /// The trajectory request or the configuration is unusable.
    InvalidRequest,
}

/// Failures of a single SGP4 evaluation.
///
/// The numeric codes returned by [`PropagationError::code`] follow the historical
/// SGP4 convention (1 mean eccentricity, 2 mean motion, 3 perturbed eccentricity,
/// 4 semi-latus rectum, 6 decay).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropagationError {
    #[error("time offset {0} min is not finite")]
    NonFiniteTime(Minutes),

    #[error("mean motion {value} rad/min is not positive at t = {tsince} min")]
    MeanMotion { tsince: Minutes, value: f64 },

    #[error("mean eccentricity {value} outside [-0.001, 1) at t = {tsince} min")]
    MeanEccentricity { tsince: Minutes, value: f64 },

    #[error("perturbed eccentricity {value} outside [0, 1] at t = {tsince} min")]
    PerturbedEccentricity { tsince: Minutes, value: f64 },

    #[error("semi-latus rectum {value} er is not positive at t = {tsince} min")]
    SemiLatusRectum { tsince: Minutes, value: f64 },

    #[error("satellite decayed at t = {tsince} min (radius {radius_km:.3} km)")]
    Decayed { tsince: Minutes, radius_km: f64 },
}

impl PropagationError {
    /// Historical SGP4 error number, `0` for conditions SGP4 never reported.
    pub fn code(&self) -> u8 {
        match self {
            PropagationError::NonFiniteTime(_) => 0,
            PropagationError::MeanEccentricity { .. } => 1,
            PropagationError::MeanMotion { .. } => 2,
            PropagationError::PerturbedEccentricity { .. } => 3,
            PropagationError::SemiLatusRectum { .. } => 4,
            PropagationError::Decayed { .. } => 6,
        }
    }
}

/// Failures while building [`crate::elements::OrbitalElements`] from a TLE.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementsError {
    #[error("eccentricity {0} outside [0, 1)")]
    Eccentricity(f64),

    #[error("mean motion {0} rad/min is not positive")]
    MeanMotion(f64),

    #[error("semi-major axis {0} er is not positive")]
    SemiMajorAxis(f64),

    #[error("semi-latus rectum {0} er is not positive")]
    SemiLatusRectum(f64),

    #[error("epoch elements are sub-orbital (perigee radius {0} er)")]
    SubOrbital(f64),

    #[error("{field} is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("propagation at epoch failed: {0}")]
    EpochPropagation(#[from] PropagationError),
}

impl ElementsError {
    /// Historical SGP4 error number (1 to 6), `0` for non-finite fields.
    pub fn code(&self) -> u8 {
        match self {
            ElementsError::NonFinite { .. } => 0,
            ElementsError::Eccentricity(_) => 1,
            ElementsError::MeanMotion(_) | ElementsError::SemiMajorAxis(_) => 2,
            ElementsError::SemiLatusRectum(_) => 4,
            ElementsError::SubOrbital(_) => 5,
            ElementsError::EpochPropagation(e) => e.code(),
        }
    }
}

/// Failures of the TEME → Earth-fixed → geodetic chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("expected a state in {expected:?}, got {found:?}")]
    UnexpectedFrame {
        expected: RefSystem,
        found: RefSystem,
    },

    #[error("non-finite component in {0}")]
    NonFinite(&'static str),
}

/// Rejections of a trajectory request or of a configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("step must be a positive finite number of minutes, got {0}")]
    NonPositiveStep(f64),

    #[error("duration must be finite, got {0} h")]
    NonFiniteDuration(f64),

    #[error("request needs {requested} samples, limit is {max}")]
    TooManySamples { requested: f64, max: usize },

    #[error("trajectory cancelled before sample {index}")]
    Cancelled { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum GroundTrackError {
    #[error("Malformed TLE: {0}")]
    MalformedInput(#[from] ParseTleError),

    #[error("Invalid orbital elements: {0}")]
    InvalidElements(#[from] ElementsError),

    #[error("Propagation failed at sample {index}: {source}")]
    PropagationFailure {
        index: usize,
        #[source]
        source: PropagationError,
    },

    #[error("Frame transformation failed at sample {index}: {source}")]
    TransformFailure {
        index: usize,
        #[source]
        source: TransformError,
    },

    #[error("Satellite decayed at sample {index} (t = {tsince} min, radius {radius_km:.3} km)")]
    Decayed {
        index: usize,
        tsince: Minutes,
        radius_km: f64,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("Unable to read TLE catalog: {0}")]
    IoError(#[from] std::io::Error),
}

impl GroundTrackError {
    /// Wrap a propagation failure observed at grid index `index`.
    pub fn at_sample(index: usize, error: PropagationError) -> Self {
        match error {
            PropagationError::Decayed { tsince, radius_km } => GroundTrackError::Decayed {
                index,
                tsince,
                radius_km,
            },
            source => GroundTrackError::PropagationFailure { index, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GroundTrackError::MalformedInput(_) | GroundTrackError::IoError(_) => {
                ErrorKind::MalformedInput
            }
            GroundTrackError::InvalidElements(_) => ErrorKind::InvalidElements,
            GroundTrackError::PropagationFailure { .. }
            | GroundTrackError::TransformFailure { .. } => ErrorKind::PropagationFailure,
            GroundTrackError::Decayed { .. } => ErrorKind::Decayed,
            GroundTrackError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// Grid index of the sample that failed, when the failure happened mid-trajectory.
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            GroundTrackError::PropagationFailure { index, .. }
            | GroundTrackError::TransformFailure { index, .. }
            | GroundTrackError::Decayed { index, .. }
            | GroundTrackError::InvalidRequest(RequestError::Cancelled { index }) => Some(*index),
            _ => None,
        }
    }

    /// Number of samples successfully produced before the failure.
    ///
    /// Samples are computed in grid order, so this equals [`Self::failed_index`].
    pub fn completed_samples(&self) -> Option<usize> {
        self.failed_index()
    }
}

impl PartialEq for GroundTrackError {
    fn eq(&self, other: &Self) -> bool {
        use GroundTrackError::*;
        match (self, other) {
            (MalformedInput(a), MalformedInput(b)) => a == b,
            (InvalidElements(a), InvalidElements(b)) => a == b,
            (
                PropagationFailure {
                    index: i,
                    source: a,
                },
                PropagationFailure {
                    index: j,
                    source: b,
                },
            ) => i == j && a == b,
            (
                TransformFailure {
                    index: i,
                    source: a,
                },
                TransformFailure {
                    index: j,
                    source: b,
                },
            ) => i == j && a == b,
            (
                Decayed {
                    index: i,
                    tsince: t,
                    radius_km: r,
                },
                Decayed {
                    index: j,
                    tsince: u,
                    radius_km: s,
                },
            ) => i == j && t == u && r == s,
            (InvalidRequest(a), InvalidRequest(b)) => a == b,

            // io errors are not comparable, same kind is enough
            (IoError(a), IoError(b)) => a.kind() == b.kind(),

            _ => false,
        }
    }
}
