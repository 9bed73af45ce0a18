use super::*;

#[test]
fn fps_rejects_zero_terms() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(60, 0).is_err());
    assert!(Fps::new(60, 1).is_ok());
}

#[test]
fn fps_time_mapping() {
    let fps = Fps::new(60, 1).unwrap();
    assert!((fps.as_f64() - 60.0).abs() < 1e-12);
    assert!((fps.frame_duration_secs() - 1.0 / 60.0).abs() < 1e-12);
    assert!((fps.frames_to_secs(120) - 2.0).abs() < 1e-12);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn canvas_area() {
    assert_eq!(Canvas::new(1920, 1080).area(), 2_073_600.0);
    assert_eq!(Canvas::new(0, 1080).area(), 0.0);
}

#[test]
fn rgb8_alpha_expansion() {
    let c = Rgb8::new(10, 20, 30);
    assert_eq!(c.with_alpha(0), [10, 20, 30, 0]);
    assert_eq!(c.with_alpha(255), [10, 20, 30, 255]);
}
