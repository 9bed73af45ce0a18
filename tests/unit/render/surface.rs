use super::*;

const CLEAR: [u8; 4] = [5, 5, 16, 255];

#[test]
fn zero_and_oversized_canvases_yield_no_surface() {
    assert!(Surface::new(Canvas::new(0, 100), CLEAR).is_none());
    assert!(Surface::new(Canvas::new(100, 0), CLEAR).is_none());
    assert!(Surface::new(Canvas::new(70_000, 100), CLEAR).is_none());
    assert!(Surface::new(Canvas::new(100, 70_000), CLEAR).is_none());
    assert!(Surface::new(Canvas::new(100, 100), CLEAR).is_some());
}

#[test]
fn empty_frame_reads_back_clear_color() {
    let canvas = Canvas::new(16, 8);
    let mut surface = Surface::new(canvas, CLEAR).unwrap();
    surface.begin_frame();
    let frame = surface.finish_frame();

    assert_eq!(frame.width, 16);
    assert_eq!(frame.height, 8);
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    // Opaque clear color premultiplies to itself.
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, CLEAR);
    }
}

#[test]
fn custom_clear_color_reaches_readback() {
    let clear = [20, 40, 60, 255];
    let mut surface = Surface::new(Canvas::new(4, 4), clear).unwrap();
    surface.begin_frame();
    let frame = surface.finish_frame();
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, clear);
    }
}

#[test]
fn clear_covers_previous_frame_content() {
    let mut surface = Surface::new(Canvas::new(8, 8), CLEAR).unwrap();

    surface.begin_frame();
    let ctx = surface.ctx();
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 8.0, 8.0));
    let first = surface.finish_frame();
    assert!(first.data.chunks_exact(4).all(|px| px != CLEAR));

    // The next frame starts from the clear color, not the old pixels.
    surface.begin_frame();
    let second = surface.finish_frame();
    for px in second.data.chunks_exact(4) {
        assert_eq!(px, CLEAR);
    }
}

#[test]
fn surface_reports_its_canvas() {
    let canvas = Canvas::new(32, 24);
    let surface = Surface::new(canvas, CLEAR).unwrap();
    assert_eq!(surface.canvas(), canvas);
}

#[test]
fn premultiply_math() {
    assert_eq!(premul_rgba8([255, 255, 255, 255]), [255, 255, 255, 255]);
    assert_eq!(premul_rgba8([200, 100, 50, 0]), [0, 0, 0, 0]);
    // Half alpha rounds to nearest.
    assert_eq!(premul_rgba8([255, 100, 0, 128]), [128, 50, 0, 128]);
}
