use super::*;
use crate::foundation::core::{Canvas, Rgb8};

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(10, 1).unwrap(),
    }
}

#[test]
fn mp4_config_requires_even_nonzero_size() {
    assert!(validate_mp4_config(&cfg(1024, 1024)).is_ok());
    assert!(validate_mp4_config(&cfg(1023, 1024)).is_err());
    assert!(validate_mp4_config(&cfg(64, 47)).is_err());
    assert!(validate_mp4_config(&cfg(0, 64)).is_err());
    let zero_fps = SinkConfig {
        fps: Fps { num: 0, den: 1 },
        ..cfg(64, 64)
    };
    assert!(validate_mp4_config(&zero_fps).is_err());
}

#[test]
fn odd_size_fails_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("odd.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    assert!(sink.begin(cfg(63, 48)).is_err());
    assert!(!out.exists());
}

#[test]
fn unstarted_sink_rejects_frames() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA::filled(Canvas::new(4, 4).unwrap(), Rgb8::WHITE);
    assert!(sink.push_frame(0, &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("clip.mp4");
    ensure_parent_dir(&path).unwrap();
    assert!(dir.path().join("a").join("b").is_dir());
}

#[test]
fn encodes_mp4_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("clip.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(32, 32)).unwrap();
    let frame = FrameRGBA::filled(Canvas::new(32, 32).unwrap(), Rgb8::new(200, 50, 50));
    for i in 0..5 {
        sink.push_frame(i, &frame).unwrap();
    }
    sink.end().unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn dropping_an_unstarted_sink_is_quiet() {
    drop(FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4")));
}

#[test]
fn dropping_mid_stream_waits_for_the_encoder() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("abandoned.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(32, 32)).unwrap();
    let frame = FrameRGBA::filled(Canvas::new(32, 32).unwrap(), Rgb8::new(20, 80, 160));
    sink.push_frame(0, &frame).unwrap();
    drop(sink);
    // The encoder has exited by now, so its output is complete.
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}
