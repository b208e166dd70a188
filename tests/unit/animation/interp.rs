use super::*;
use crate::foundation::core::Fps;
use crate::scene::model::Circle;

fn circle(id: usize, radius: u32, from: (f64, f64), to: (f64, f64)) -> Circle {
    Circle {
        id,
        radius,
        color: Rgb8::new(100, 100, 255),
        initial: Point::new(from.0, from.1),
        final_pos: Point::new(to.0, to.1),
    }
}

fn scene() -> Scene {
    Scene::new(
        vec![
            circle(0, 30, (200.0, 700.0), (400.0, 512.0)),
            circle(1, 50, (800.0, 300.0), (300.0, 512.0)),
        ],
        512,
        vec![1, 0],
    )
    .unwrap()
}

#[test]
fn default_timing_gives_fifty_frames() {
    let scene = scene();
    let interp = Interpolator::new(&scene, &AnimationTiming::default()).unwrap();
    assert_eq!(interp.budget().frame_count(), 50);

    let frames: Vec<FrameDesc> = interp.frames().collect();
    assert_eq!(frames.len(), 50);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.index, i);
        let expected = match i {
            0..5 => FramePhase::HoldStart,
            5..45 => FramePhase::Transition,
            _ => FramePhase::HoldEnd,
        };
        assert_eq!(f.phase, expected, "frame {i}");
    }
}

#[test]
fn endpoints_match_scene_states() {
    let scene = scene();
    let frames: Vec<FrameDesc> = Interpolator::new(&scene, &AnimationTiming::default())
        .unwrap()
        .frames()
        .collect();

    for f in [&frames[0], &frames[5]] {
        assert_eq!(f.blend, 0.0);
        for (fc, c) in f.circles.iter().zip(scene.circles()) {
            assert_eq!(fc.center, c.initial);
            assert_eq!(fc.radius, c.radius);
            assert_eq!(fc.color, c.color);
        }
    }
    for f in [&frames[44], &frames[49]] {
        assert_eq!(f.blend, 1.0);
        for (fc, c) in f.circles.iter().zip(scene.circles()) {
            assert_eq!(fc.center, c.final_pos);
        }
    }
}

#[test]
fn motion_is_monotonic() {
    let scene = scene();
    let frames: Vec<FrameDesc> = Interpolator::new(&scene, &AnimationTiming::default())
        .unwrap()
        .frames()
        .collect();

    for pair in frames.windows(2) {
        assert!(pair[1].blend >= pair[0].blend);
        for (a, b) in pair[0].circles.iter().zip(&pair[1].circles) {
            let target = scene.circles()[a.id].final_pos;
            assert!(b.center.distance(target) <= a.center.distance(target) + 1e-9);
        }
    }
}

#[test]
fn shortest_transition_still_starts_at_initial_state() {
    let scene = scene();
    let timing = AnimationTiming {
        fps: Fps::new(1, 1).unwrap(),
        duration_secs: 3.0,
        max_transition_frames: 1,
        ..AnimationTiming::default()
    };
    let interp = Interpolator::new(&scene, &timing).unwrap();
    assert_eq!(interp.budget().frame_count(), 2);
    assert_eq!(interp.blend_at(0), (FramePhase::Transition, 0.0));
    assert_eq!(interp.blend_at(1), (FramePhase::Transition, 1.0));

    let frames: Vec<FrameDesc> = interp.frames().collect();
    assert_eq!(frames[0].circles[0].center, scene.circles()[0].initial);
    assert_eq!(frames[1].circles[0].center, scene.circles()[0].final_pos);
}

#[test]
fn iterator_reports_exact_size() {
    let scene = scene();
    let mut frames = Interpolator::new(&scene, &AnimationTiming::default())
        .unwrap()
        .frames();
    assert_eq!(frames.len(), 50);
    frames.next();
    assert_eq!(frames.size_hint(), (49, Some(49)));
    assert_eq!(frames.by_ref().count(), 49);
    assert!(frames.next().is_none());
}

#[test]
fn non_finite_positions_are_rejected() {
    let bad = Scene::new(
        vec![circle(0, 30, (f64::NAN, 10.0), (100.0, 512.0))],
        512,
        vec![0],
    )
    .unwrap();
    assert!(Interpolator::new(&bad, &AnimationTiming::default()).is_err());
}

#[test]
fn pose_interpolates_linearly_in_blend() {
    let scene = scene();
    let mid = pose(&scene, 0.5);
    assert_eq!(mid[0].center, Point::new(300.0, 606.0));
    assert_eq!(mid[1].center, Point::new(550.0, 406.0));
}
