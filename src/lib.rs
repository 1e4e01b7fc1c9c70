pub mod config;
pub mod constants;
pub mod deep_space;
pub mod elements;
pub mod geodetic;
pub mod gravity;
pub mod groundtrack;
pub mod groundtrack_errors;
pub mod kepler;
pub mod propagator;
pub mod ref_system;
pub mod time;
pub mod tle;
pub mod trajectory;

pub use config::{OperationMode, PropagationConfig};
pub use elements::OrbitalElements;
pub use groundtrack::GroundTrack;
pub use groundtrack_errors::{ErrorKind, GroundTrackError};
pub use tle::Tle;
pub use trajectory::{Trajectory, TrajectoryRequest};

#[cfg(test)]
pub(crate) mod unit_test_global {
    use std::sync::LazyLock;

    use crate::{
        config::PropagationConfig,
        elements::OrbitalElements,
        tle::{Tle, TleParseOptions},
    };

    pub(crate) const ISS_LINES: (&str, &str) = (
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
    );

    pub(crate) static ISS_ELEMENTS: LazyLock<OrbitalElements> = LazyLock::new(|| {
        let tle = Tle::parse(ISS_LINES.0, ISS_LINES.1, &TleParseOptions::default()).unwrap();
        OrbitalElements::new(&tle, &PropagationConfig::default()).unwrap()
    });
}
