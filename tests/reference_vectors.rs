use groundtrack::deep_space::Resonance;
use groundtrack::propagator::propagate;

mod common;
use common::{assert_state_close, elements, wgs72_config, GEO, MOLNIYA, VANGUARD};

#[test]
fn test_vanguard_near_earth() {
    let el = elements(VANGUARD, &wgs72_config());
    assert!(!el.is_deep_space());

    let cases = [
        (
            0.0,
            [7022.46529266, -1400.08296755, 0.03995155],
            [1.893841015, 6.405893759, 4.534807250],
        ),
        (
            360.0,
            [-7154.03120202, -3783.17682504, -3536.19412294],
            [4.741887409, -4.151817765, -2.093935425],
        ),
        (
            720.0,
            [-7134.59340119, 6531.68641334, 3260.27186483],
            [-4.113793027, -2.911922039, -2.557327851],
        ),
    ];
    for (t, r, v) in cases {
        assert_state_close(&propagate(&el, t).unwrap(), r, v);
    }
}

#[test]
fn test_molniya_half_day_resonance() {
    let el = elements(MOLNIYA, &wgs72_config());
    assert!(matches!(el.resonance(), Some(Resonance::HalfDay(_))));

    assert_state_close(
        &propagate(&el, 0.0).unwrap(),
        [2349.89483350, -14785.93811562, 0.02119378],
        [2.721488096, -3.256811655, 4.498416672],
    );
    assert_state_close(
        &propagate(&el, 120.0).unwrap(),
        [15223.91713658, -17852.95881713, 25280.39558224],
        [1.079041732, 0.875187372, 2.485682813],
    );
}

#[test]
fn test_geostationary_synchronous_resonance() {
    let el = elements(GEO, &wgs72_config());
    assert!(matches!(el.resonance(), Some(Resonance::Synchronous(_))));

    assert_state_close(
        &propagate(&el, 0.0).unwrap(),
        [42080.71852213, -2646.86387436, 0.81851294],
        [0.193105177, 3.068688251, 0.000438449],
    );
    assert_state_close(
        &propagate(&el, 120.0).unwrap(),
        [37740.00085593, 18802.76872802, 3.45512584],
        [-1.371035206, 2.752105932, 0.000336883],
    );
}

#[test]
fn test_resonance_integration_is_order_independent() {
    let el = elements(MOLNIYA, &wgs72_config());
    let forward = propagate(&el, 2880.0).unwrap();
    let _ = propagate(&el, -1440.0).unwrap();
    let _ = propagate(&el, 10_000.0).unwrap();
    assert_eq!(propagate(&el, 2880.0).unwrap(), forward);
}

#[test]
fn test_epoch_state_matches_mean_elements() {
    use groundtrack::config::PropagationConfig;

    let el = elements(common::ISS, &PropagationConfig::default());
    let state = propagate(&el, 0.0).unwrap();
    let radius_er = state.position.norm() / el.gravity.radius_km;

    // osculating radius stays near the mean semi-major axis for a near-circular orbit
    assert!((radius_er - el.a).abs() < 0.01);

    let h = state.position.cross(&state.velocity);
    let inclination = (h.z / h.norm()).acos();
    assert!((inclination - el.mean.inclination).abs() < 1e-3);
}
