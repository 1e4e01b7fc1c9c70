#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use groundtrack::config::PropagationConfig;
use groundtrack::elements::OrbitalElements;
use groundtrack::gravity::GravityModel;
use groundtrack::ref_system::StateVector;
use groundtrack::tle::{checksum, Tle, TleParseOptions};

pub const VANGUARD: (&str, &str) = (
    "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753",
    "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
);

pub const ISS: (&str, &str) = (
    "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
    "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
);

pub const MOLNIYA: (&str, &str) = (
    "1 08195U 75081A   06176.33215444  .00000099  00000-0  11873-3 0   813",
    "2 08195  64.1586 279.0717 6877146 264.7651  20.2257  2.00491383225656",
);

pub const GEO: (&str, &str) = (
    "1 28626U 05008A   06176.46683397 -.00000205  00000-0  10000-3 0  2190",
    "2 28626   0.0019 286.9433 0000335  13.7918  55.6504  1.00270176  4891",
);

/// Replace the last column of `line` with its recomputed checksum.
pub fn with_checksum(line: &str) -> String {
    let body = &line[..68];
    format!("{body}{}", checksum(body))
}

/// ISS line 1 with a drag term large enough to bring the orbit down within two days.
pub fn heavy_drag_iss_line1() -> String {
    let line = ISS.0.replacen("-11606-4", " 50000-0", 1);
    with_checksum(&line)
}

pub fn wgs72_config() -> PropagationConfig {
    PropagationConfig::builder()
        .gravity_model(GravityModel::Wgs72)
        .build()
        .unwrap()
}

pub fn elements(lines: (&str, &str), config: &PropagationConfig) -> OrbitalElements {
    let tle = Tle::parse(lines.0, lines.1, &TleParseOptions::default()).unwrap();
    OrbitalElements::new(&tle, config).unwrap()
}

pub fn assert_state_close(state: &StateVector, position: [f64; 3], velocity: [f64; 3]) {
    for k in 0..3 {
        assert_abs_diff_eq!(state.position[k], position[k], epsilon = 1e-3);
        assert_abs_diff_eq!(state.velocity[k], velocity[k], epsilon = 1e-6);
    }
}
