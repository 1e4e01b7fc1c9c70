//! # Propagation configuration
//!
//! This module defines [`PropagationConfig`] and its validating builder. A single
//! configuration object controls every tunable of the pipeline:
//!
//! - the **gravity model** and the **operation mode** used to initialize SGP4,
//! - TLE **checksum verification**,
//! - the **deep-space period threshold** and the **decay radius**,
//! - the bounded iterations of the **Kepler** and **geodetic** solvers,
//! - the **reference ellipsoid** used for geodetic output,
//! - a **sample cap** protecting callers against runaway trajectory requests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use groundtrack::config::{OperationMode, PropagationConfig};
//! use groundtrack::gravity::GravityModel;
//!
//! let config = PropagationConfig::builder()
//!     .gravity_model(GravityModel::Wgs72)
//!     .operation_mode(OperationMode::Afspc)
//!     .max_samples(100_000)
//!     .build()
//!     .unwrap();
//! ```
//!
//! Configurations are serde-serializable and can be read from YAML with
//! [`PropagationConfig::from_yaml_str`]; missing keys take their default value.
use std::cmp::Ordering::{Equal, Greater};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Minutes, DECAY_RADIUS_ER, DEEP_SPACE_PERIOD_MINUTES};
use crate::geodetic::{Ellipsoid, GeodeticSettings};
use crate::gravity::GravityModel;
use crate::groundtrack_errors::{GroundTrackError, RequestError};
use crate::kepler::KeplerSettings;
use crate::tle::TleParseOptions;

/// SGP4 operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    /// IAU-82 sidereal time at epoch, node kept signed in the Lyddane branch.
    #[default]
    Improved,
    /// Legacy AFSPC sidereal time polynomial, node wrapped to `[0, 2π)`.
    Afspc,
}

/// Every tunable of the propagation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    pub gravity_model: GravityModel,
    pub operation_mode: OperationMode,
    /// Reject TLE lines whose checksum does not match.
    pub verify_checksum: bool,
    /// Period (minutes) at or above which the deep-space branch is used.
    pub deep_space_period_minutes: Minutes,
    /// Orbit radius (earth radii) below which the satellite is considered decayed.
    pub decay_radius_er: f64,
    pub kepler: KeplerSettings,
    pub geodetic: GeodeticSettings,
    pub ellipsoid: Ellipsoid,
    /// Largest number of samples a single trajectory may hold.
    pub max_samples: usize,
}

impl PropagationConfig {
    /// Construct a configuration with default values.
    ///
    /// Equivalent to [`PropagationConfig::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fluent, validating builder initialized with default values.
    pub fn builder() -> PropagationConfigBuilder {
        PropagationConfigBuilder::new()
    }

    /// TLE parser switches derived from this configuration.
    pub fn tle_options(&self) -> TleParseOptions {
        TleParseOptions {
            verify_checksum: self.verify_checksum,
        }
    }

    /// Deserialize a configuration from YAML and validate it.
    ///
    /// Arguments
    /// -----------------
    /// * `yaml` – YAML document; absent keys keep their default value.
    ///
    /// Return
    /// ----------
    /// * The validated configuration, or [`RequestError::InvalidConfig`] wrapped in a
    ///   [`GroundTrackError`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GroundTrackError> {
        let config: PropagationConfig = serde_yaml::from_str(yaml)
            .map_err(|e| RequestError::InvalidConfig(e.to_string()))?;
        PropagationConfigBuilder { config }.build()
    }

    /// Serialize the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, GroundTrackError> {
        serde_yaml::to_string(self)
            .map_err(|e| RequestError::InvalidConfig(e.to_string()).into())
    }
}

impl Default for PropagationConfig {
    fn default() -> Self {
        PropagationConfig {
            gravity_model: GravityModel::Wgs84,
            operation_mode: OperationMode::Improved,
            verify_checksum: true,
            deep_space_period_minutes: DEEP_SPACE_PERIOD_MINUTES,
            decay_radius_er: DECAY_RADIUS_ER,
            kepler: KeplerSettings::default(),
            geodetic: GeodeticSettings::default(),
            ellipsoid: Ellipsoid::wgs84(),
            max_samples: 10_000_000,
        }
    }
}

/// Builder for [`PropagationConfig`], with validation.
#[derive(Debug, Clone, Default)]
pub struct PropagationConfigBuilder {
    config: PropagationConfig,
}

impl PropagationConfigBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gravity_model(mut self, v: GravityModel) -> Self {
        self.config.gravity_model = v;
        self
    }
    pub fn operation_mode(mut self, v: OperationMode) -> Self {
        self.config.operation_mode = v;
        self
    }
    pub fn verify_checksum(mut self, v: bool) -> Self {
        self.config.verify_checksum = v;
        self
    }
    pub fn deep_space_period_minutes(mut self, v: f64) -> Self {
        self.config.deep_space_period_minutes = v;
        self
    }
    pub fn decay_radius_er(mut self, v: f64) -> Self {
        self.config.decay_radius_er = v;
        self
    }

    // --- Solvers ---
    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.config.kepler.tolerance = v;
        self
    }
    pub fn kepler_max_iterations(mut self, v: usize) -> Self {
        self.config.kepler.max_iterations = v;
        self
    }
    pub fn geodetic_tolerance(mut self, v: f64) -> Self {
        self.config.geodetic.tolerance = v;
        self
    }
    pub fn geodetic_max_iterations(mut self, v: usize) -> Self {
        self.config.geodetic.max_iterations = v;
        self
    }

    pub fn ellipsoid(mut self, v: Ellipsoid) -> Self {
        self.config.ellipsoid = v;
        self
    }
    pub fn max_samples(mut self, v: usize) -> Self {
        self.config.max_samples = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater) && x.is_finite()
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal)) && x.is_finite()
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `deep_space_period_minutes > 0`.
    /// * `decay_radius_er >= 0` (zero disables the decay check).
    /// * `kepler.tolerance >= 0`, `kepler.max_iterations >= 1`.
    /// * `geodetic.tolerance > 0`, `geodetic.max_iterations >= 1`.
    /// * `ellipsoid.semi_major_axis_km > 0` and `0 <= ellipsoid.flattening < 1`.
    /// * `max_samples >= 1`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(PropagationConfig)` if every rule holds.
    /// * `Err(GroundTrackError::InvalidRequest)` naming the first violated rule.
    pub fn build(self) -> Result<PropagationConfig, GroundTrackError> {
        let c = &self.config;
        let invalid = |msg: &str| -> Result<PropagationConfig, GroundTrackError> {
            Err(RequestError::InvalidConfig(msg.into()).into())
        };

        if !Self::gt0(c.deep_space_period_minutes) {
            return invalid("deep_space_period_minutes must be > 0");
        }
        if !Self::ge0(c.decay_radius_er) {
            return invalid("decay_radius_er must be >= 0");
        }
        if !Self::ge0(c.kepler.tolerance) {
            return invalid("kepler.tolerance must be >= 0");
        }
        if c.kepler.max_iterations == 0 {
            return invalid("kepler.max_iterations must be >= 1");
        }
        if !Self::gt0(c.geodetic.tolerance) {
            return invalid("geodetic.tolerance must be > 0");
        }
        if c.geodetic.max_iterations == 0 {
            return invalid("geodetic.max_iterations must be >= 1");
        }
        if !Self::gt0(c.ellipsoid.semi_major_axis_km) {
            return invalid("ellipsoid.semi_major_axis_km must be > 0");
        }
        if !Self::ge0(c.ellipsoid.flattening) || c.ellipsoid.flattening >= 1.0 {
            return invalid("ellipsoid.flattening must be in [0, 1)");
        }
        if c.max_samples == 0 {
            return invalid("max_samples must be >= 1");
        }

        Ok(self.config)
    }
}

impl fmt::Display for PropagationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Propagation Configuration")?;
            writeln!(f, "-------------------------")?;
            writeln!(f, "  gravity_model             = {:?}", self.gravity_model)?;
            writeln!(f, "  operation_mode            = {:?}", self.operation_mode)?;
            writeln!(f, "  verify_checksum           = {}", self.verify_checksum)?;
            writeln!(
                f,
                "  deep_space_period_minutes = {}",
                self.deep_space_period_minutes
            )?;
            writeln!(f, "  decay_radius_er           = {}", self.decay_radius_er)?;
            writeln!(
                f,
                "  kepler                    = {:e} / {} it",
                self.kepler.tolerance, self.kepler.max_iterations
            )?;
            writeln!(
                f,
                "  geodetic                  = {:e} / {} it",
                self.geodetic.tolerance, self.geodetic.max_iterations
            )?;
            writeln!(
                f,
                "  ellipsoid                 = a {} km, 1/f {}",
                self.ellipsoid.semi_major_axis_km,
                1.0 / self.ellipsoid.flattening
            )?;
            write!(f, "  max_samples               = {}", self.max_samples)
        } else {
            write!(
                f,
                "PropagationConfig({:?}, {:?}, checksum={}, max_samples={})",
                self.gravity_model, self.operation_mode, self.verify_checksum, self.max_samples
            )
        }
    }
}
