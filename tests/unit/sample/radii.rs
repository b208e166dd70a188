use super::*;
use crate::config::settings::GenerationConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn params() -> SceneParams {
    GenerationConfig::default().scene_params().unwrap()
}

#[test]
fn ratio_range_is_capped() {
    let p = params();
    let (lo, hi) = RadiusSetSampler::new(&p).ratio_range();
    assert_eq!(lo, 1.15);
    assert!((hi - 1.33).abs() < 1e-12);

    let p = SceneParams {
        min_radius_ratio: 1.3,
        ..params()
    };
    assert_eq!(RadiusSetSampler::new(&p).ratio_range(), (1.3, RATIO_CAP));

    let p = SceneParams {
        min_radius_ratio: 1.5,
        ..params()
    };
    assert_eq!(RadiusSetSampler::new(&p).ratio_range(), (1.5, 1.5));
}

#[test]
fn sampled_sets_are_distinguishable() {
    let p = params();
    let sampler = RadiusSetSampler::new(&p);
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for n in 1..=6 {
        let radii = sampler.sample(n, &mut rng).unwrap();
        assert_eq!(radii.len(), n);
        assert!(radii.iter().all(|r| (30..=80).contains(r)), "{radii:?}");
        for w in radii.windows(2) {
            assert!(w[0] >= w[1] + 4, "{radii:?}");
        }
        assert!(meets_ratio(&radii, 1.15), "{radii:?}");
        assert!(row_width(&radii, 20) <= 824);
    }
}

#[test]
fn too_many_circles_is_infeasible() {
    let p = params();
    let sampler = RadiusSetSampler::new(&p);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert_eq!(sampler.sample(8, &mut rng), None);
    assert_eq!(sampler.sample(0, &mut rng), None);
}

#[test]
fn narrow_radius_range_is_infeasible() {
    let p = SceneParams {
        min_radius: 30,
        max_radius: 33,
        ..params()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    assert_eq!(RadiusSetSampler::new(&p).sample(2, &mut rng), None);
}

#[test]
fn meets_ratio_checks_neighbours() {
    assert!(meets_ratio(&[46, 40], 1.15));
    assert!(!meets_ratio(&[45, 40], 1.15));
    assert!(meets_ratio(&[50], 1.15));
    assert!(meets_ratio(&[], 1.15));
}
