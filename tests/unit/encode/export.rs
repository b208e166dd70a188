use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Fps, Point, Rgb8};
use crate::scene::model::Circle;

fn scene() -> Scene {
    Scene::new(
        vec![Circle {
            id: 0,
            radius: 8,
            color: Rgb8::new(100, 255, 100),
            initial: Point::new(12.0, 30.0),
            final_pos: Point::new(40.0, 24.0),
        }],
        24,
        vec![0],
    )
    .unwrap()
}

// Half a second at 10 fps: five transition frames, no holds.
fn short_timing() -> AnimationTiming {
    AnimationTiming {
        fps: Fps::new(10, 1).unwrap(),
        duration_secs: 0.5,
        ..AnimationTiming::default()
    }
}

#[test]
fn gif_backend_writes_gif() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = Canvas::new(64, 48).unwrap();
    let out = export_video(
        &scene(),
        canvas,
        &short_timing(),
        &RenderThreading::default(),
        &dir.path().join("ground_truth"),
        VideoBackend::Gif,
    )
    .unwrap();
    assert_eq!(out.backend, VideoBackend::Gif);
    assert_eq!(out.path, dir.path().join("ground_truth.gif"));
    assert!(out.path.is_file());
    assert_eq!(out.stats.frames_total, 5);
}

#[test]
fn auto_backend_on_odd_canvas_uses_gif() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = Canvas::new(63, 48).unwrap();
    let out = export_video(
        &scene(),
        canvas,
        &short_timing(),
        &RenderThreading::default(),
        &dir.path().join("clip"),
        VideoBackend::Auto,
    )
    .unwrap();
    assert_eq!(out.backend, VideoBackend::Gif);
    assert!(!dir.path().join("clip.mp4").exists());
}

#[test]
fn forced_ffmpeg_does_not_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = Canvas::new(63, 48).unwrap();
    let res = export_video(
        &scene(),
        canvas,
        &short_timing(),
        &RenderThreading::default(),
        &dir.path().join("clip"),
        VideoBackend::Ffmpeg,
    );
    assert!(res.is_err());
    assert!(!dir.path().join("clip.gif").exists());
}

#[test]
fn encode_with_streams_default_animation() {
    let mut sink = InMemorySink::new();
    let stats = encode_with(
        &scene(),
        Canvas::new(64, 48).unwrap(),
        &AnimationTiming::default(),
        &RenderThreading::default(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(stats.frames_total, 50);
    assert_eq!(sink.frames().len(), 50);
}

#[test]
fn backend_names_are_snake_case() {
    assert_eq!(serde_json::to_string(&VideoBackend::Ffmpeg).unwrap(), "\"ffmpeg\"");
    let b: VideoBackend = serde_json::from_str("\"auto\"").unwrap();
    assert_eq!(b, VideoBackend::Auto);
}

#[test]
fn explicit_backends_resolve_to_themselves() {
    let odd = Canvas::new(63, 48).unwrap();
    assert_eq!(resolve_backend(VideoBackend::Gif, odd), VideoBackend::Gif);
    assert_eq!(resolve_backend(VideoBackend::Ffmpeg, odd), VideoBackend::Ffmpeg);
    assert_eq!(resolve_backend(VideoBackend::Auto, odd), VideoBackend::Gif);

    let even = Canvas::new(64, 48).unwrap();
    let expected = if is_ffmpeg_on_path() {
        VideoBackend::Ffmpeg
    } else {
        VideoBackend::Gif
    };
    assert_eq!(resolve_backend(VideoBackend::Auto, even), expected);
}

#[test]
fn auto_backend_falls_back_without_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let out = export_video(
        &scene(),
        Canvas::new(64, 48).unwrap(),
        &short_timing(),
        &RenderThreading::default(),
        &dir.path().join("clip"),
        VideoBackend::Auto,
    )
    .unwrap();
    assert!(out.path.is_file());
    if out.backend == VideoBackend::Gif {
        assert!(!dir.path().join("clip.mp4").exists());
    }
}
