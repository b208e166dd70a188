use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.as_f64() - 29.97).abs() < 1e-2);
}

#[test]
fn frame_delay_is_thousand_over_fps() {
    let fps = Fps::new(10, 1).unwrap();
    assert_eq!(fps.frame_delay_ms(), (1000, 10));
}

#[test]
fn canvas_mid_y_floors() {
    assert_eq!(Canvas::new(1024, 1024).unwrap().mid_y(), 512);
    assert_eq!(Canvas::new(64, 33).unwrap().mid_y(), 16);
    assert!(Canvas::new(0, 10).is_err());
}

#[test]
fn rgb_serializes_as_triple() {
    let c = Rgb8::new(255, 100, 50);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "[255,100,50]");
    let back: Rgb8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
    assert_eq!(c.to_rgba(), [255, 100, 50, 255]);
}
