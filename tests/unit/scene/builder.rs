use super::*;
use crate::config::settings::GenerationConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn builder(cfg: GenerationConfig) -> SceneBuilder {
    SceneBuilder::new(cfg.scene_params().unwrap()).unwrap()
}

fn five_circles() -> SceneBuilder {
    builder(GenerationConfig {
        min_circles: 5,
        max_circles: 5,
        ..GenerationConfig::default()
    })
}

#[test]
fn five_circle_scene_meets_every_constraint() {
    let b = five_circles();
    let scene = b.build(&mut ChaCha8Rng::seed_from_u64(7)).unwrap();
    assert_eq!(scene.count(), 5);
    assert_eq!(scene.verify(b.params()), Ok(()));
    assert_eq!(scene.line_y(), 512);

    let sorted: Vec<&Circle> = scene.sorted().collect();
    for pair in sorted.windows(2) {
        assert!(pair[0].radius >= pair[1].radius + 4);
        assert!(f64::from(pair[0].radius) / f64::from(pair[1].radius) >= 1.15 - 1e-6);
        assert!(pair[0].final_pos.x < pair[1].final_pos.x);
    }
    for c in &sorted {
        assert_eq!(c.final_pos.y, 512.0);
        assert!((30..=80).contains(&c.radius));
    }

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];
    let left = first.final_pos.x - f64::from(first.radius);
    let right = last.final_pos.x + f64::from(last.radius);
    assert!(((1024.0 - right) - left).abs() <= 1.0, "row not centered: {left}..{right}");
}

#[test]
fn same_seed_same_scene() {
    let b = five_circles();
    let a = b.build(&mut ChaCha8Rng::seed_from_u64(11)).unwrap();
    let c = b.build(&mut ChaCha8Rng::seed_from_u64(11)).unwrap();
    assert_eq!(a, c);

    let d = b.build(&mut ChaCha8Rng::seed_from_u64(12)).unwrap();
    assert_ne!(a, d);
}

#[test]
fn default_range_reduces_to_feasible_counts() {
    // More than seven circles can never fit an 824px row at ratio >= 1.15 and radius >= 30.
    let b = builder(GenerationConfig::default());
    for seed in 0..8 {
        let scene = b.build(&mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        assert!((5..=7).contains(&scene.count()), "{} circles", scene.count());
        assert_eq!(scene.verify(b.params()), Ok(()));
    }
}

#[test]
fn infeasible_config_exhausts_with_typed_error() {
    let b = builder(GenerationConfig {
        min_circles: 3,
        max_circles: 3,
        min_radius: 30,
        max_radius: 31,
        generation_attempts: 3,
        radius_attempts: 5,
        ..GenerationConfig::default()
    });
    let err = b.build(&mut ChaCha8Rng::seed_from_u64(0)).unwrap_err();
    assert!(err.is_generation_exhausted());
    match err {
        SceneError::GenerationExhausted { attempts, last } => {
            assert_eq!(attempts, 3);
            assert_eq!(last, AttemptFailure::InfeasibleCount { count: 3 });
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unusable_params_are_rejected_up_front() {
    let base = GenerationConfig::default().scene_params().unwrap();
    let bad = [
        SceneParams {
            min_circles: 6,
            max_circles: 5,
            ..base.clone()
        },
        SceneParams {
            palette: Vec::new(),
            ..base.clone()
        },
        SceneParams {
            min_circles: 0,
            ..base.clone()
        },
        SceneParams {
            min_radius: 50,
            max_radius: 40,
            ..base.clone()
        },
        SceneParams {
            placement_attempts: 0,
            ..base.clone()
        },
        SceneParams {
            margin: 600,
            ..base.clone()
        },
    ];
    for params in bad {
        let err = SceneBuilder::new(params).err().unwrap();
        assert!(matches!(err, SceneError::Validation(_)), "{err}");
    }
    assert!(SceneBuilder::new(base).is_ok());
}
