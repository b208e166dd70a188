use super::*;

const ALL: [Ease; 3] = [Ease::Linear, Ease::Smoothstep, Ease::InOutCubic];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn smoothstep_is_symmetric_at_midpoint() {
    assert_eq!(Ease::Smoothstep.apply(0.5), 0.5);
    let a = Ease::Smoothstep.apply(0.2);
    let b = Ease::Smoothstep.apply(0.8);
    assert!((a + b - 1.0).abs() < 1e-12);
}

#[test]
fn curves_are_monotonic_and_bounded() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=200 {
            let v = ease.apply(f64::from(i) / 200.0);
            assert!(v >= prev, "{ease:?} not monotonic at step {i}");
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }
}

#[test]
fn smoothstep_has_flat_ends() {
    let h = 1e-4;
    let start_slope = Ease::Smoothstep.apply(h) / h;
    let end_slope = (1.0 - Ease::Smoothstep.apply(1.0 - h)) / h;
    assert!(start_slope < 1e-3);
    assert!(end_slope < 1e-3);
}

#[test]
fn out_of_range_input_is_clamped() {
    assert_eq!(Ease::Smoothstep.apply(-1.0), 0.0);
    assert_eq!(Ease::InOutCubic.apply(2.0), 1.0);
}

#[test]
fn serde_uses_snake_case() {
    let json = serde_json::to_string(&Ease::InOutCubic).unwrap();
    assert_eq!(json, "\"in_out_cubic\"");
    let back: Ease = serde_json::from_str("\"smoothstep\"").unwrap();
    assert_eq!(back, Ease::Smoothstep);
}
