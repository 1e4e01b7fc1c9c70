use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use groundtrack::config::PropagationConfig;
use groundtrack::elements::OrbitalElements;
use groundtrack::kepler::{solve_lyddane_kepler, KeplerSettings};
use groundtrack::propagator::propagate;
use groundtrack::tle::{Tle, TleParseOptions};
use groundtrack::trajectory::{compute_trajectories, compute_trajectory};
use groundtrack::TrajectoryRequest;

const ISS: (&str, &str) = (
    "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
    "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
);

const MOLNIYA: (&str, &str) = (
    "1 08195U 75081A   06176.33215444  .00000099  00000-0  11873-3 0   813",
    "2 08195  64.1586 279.0717 6877146 264.7651  20.2257  2.00491383225656",
);

fn elements(lines: (&str, &str)) -> OrbitalElements {
    let tle = Tle::parse(lines.0, lines.1, &TleParseOptions::default()).unwrap();
    OrbitalElements::new(&tle, &PropagationConfig::default()).unwrap()
}

/// Single evaluations at random offsets within ±3 days.
fn bench_single_evaluation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let samples = 1_000usize;

    for (label, lines) in [("near_earth", ISS), ("half_day_resonance", MOLNIYA)] {
        let el = elements(lines);
        c.bench_function(&format!("propagate/{label}"), |b| {
            b.iter_batched(
                || {
                    (0..samples)
                        .map(|_| rng.random_range(-4320.0..=4320.0))
                        .collect::<Vec<f64>>()
                },
                |times| {
                    for t in times {
                        let _ = black_box(propagate(black_box(&el), black_box(t)));
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
}

/// Lyddane Kepler solver on low and high eccentricity vectors.
fn bench_kepler(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let settings = KeplerSettings::default();

    c.bench_function("solve_lyddane_kepler/e<=0.75", |b| {
        b.iter_batched(
            || {
                (0..10_000)
                    .map(|_| {
                        let e = rng.random_range(0.0..=0.75);
                        let w = rng.random::<f64>() * std::f64::consts::TAU;
                        let u = rng.random::<f64>() * std::f64::consts::TAU;
                        (u, e * w.cos(), e * w.sin())
                    })
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (u, axnl, aynl) in cases {
                    black_box(solve_lyddane_kepler(u, axnl, aynl, &settings));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// One day sampled every minute, single record and a small batch.
fn bench_trajectory(c: &mut Criterion) {
    let config = PropagationConfig::default();
    let request = TrajectoryRequest::new(24.0, 1.0);
    let iss = elements(ISS);
    let batch: Vec<OrbitalElements> = (0..8)
        .map(|i| if i % 2 == 0 { elements(ISS) } else { elements(MOLNIYA) })
        .collect();

    let mut group = c.benchmark_group("trajectory");
    group.sample_size(20);
    group.bench_function("iss_one_day", |b| {
        b.iter(|| compute_trajectory(black_box(&iss), &request, &config, None).unwrap())
    });
    group.bench_function("batch_of_8_one_day", |b| {
        b.iter(|| compute_trajectories(black_box(&batch), &request, &config, None))
    });
    group.finish();
}

criterion_group!(benches, bench_single_evaluation, bench_kepler, bench_trajectory);
criterion_main!(benches);
