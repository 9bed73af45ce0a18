use super::*;
use crate::config::{ModeConfig, PerformanceMode};
use crate::foundation::core::Point;

const CLEAR: [u8; 4] = [5, 5, 16, 255];

fn surface(w: u32, h: u32) -> Surface {
    Surface::new(Canvas::new(w, h), CLEAR).unwrap()
}

fn touched_pixels(frame: &crate::render::surface::FrameRGBA) -> usize {
    frame
        .data
        .chunks_exact(4)
        .filter(|px| *px != CLEAR)
        .count()
}

#[test]
fn flat_star_marks_pixels() {
    let mut surface = surface(32, 32);
    let mut sprites = SpriteCache::new();
    let mut config = ModeConfig::resolve(PerformanceMode::Minimal);
    config.twinkle = false;
    config.glow = false;
    let star = Star {
        position: Point::new(16.0, 16.0),
        size: 3.0,
        speed: 0.0,
        opacity: 0.8,
        twinkle_speed: 1.0,
        twinkle_offset: 0.0,
    };

    surface.begin_frame();
    draw_star(&mut surface, &mut sprites, &star, 0.0, &config, Vec2::ZERO).unwrap();
    let frame = surface.finish_frame();
    assert!(touched_pixels(&frame) > 0);
}

#[test]
fn glowing_star_covers_more_than_flat_core() {
    let mut config = ModeConfig::resolve(PerformanceMode::Full);
    config.twinkle = false;
    let star = Star {
        position: Point::new(16.0, 16.0),
        size: 2.0,
        speed: 0.0,
        opacity: 0.8,
        twinkle_speed: 1.0,
        twinkle_offset: 0.0,
    };

    let mut count = [0usize; 2];
    for (i, glow) in [false, true].into_iter().enumerate() {
        let mut surface = surface(32, 32);
        let mut sprites = SpriteCache::new();
        config.glow = glow;
        surface.begin_frame();
        draw_star(&mut surface, &mut sprites, &star, 0.0, &config, Vec2::ZERO).unwrap();
        count[i] = touched_pixels(&surface.finish_frame());
    }
    assert!(count[1] > count[0]);
}

#[test]
fn nebula_marks_pixels() {
    let mut surface = surface(64, 64);
    let mut sprites = SpriteCache::new();
    let config = ModeConfig::resolve(PerformanceMode::Full).nebula;
    let nebula = Nebula {
        position: Point::new(32.0, 32.0),
        radius: 20.0,
        color: crate::entity::NEBULA_PALETTE[0],
        opacity: 0.18,
        drift: Vec2::new(8.0, 8.0),
        pulse_speed: 0.4,
        pulse_offset: 0.0,
    };

    surface.begin_frame();
    draw_nebula(&mut surface, &mut sprites, &nebula, 0.0, &config, Vec2::ZERO).unwrap();
    assert!(touched_pixels(&surface.finish_frame()) > 0);
}

#[test]
fn galaxy_marks_pixels() {
    let mut surface = surface(64, 64);
    let mut sprites = SpriteCache::new();
    let galaxy = Galaxy {
        position: Point::new(32.0, 32.0),
        radius: 18.0,
        rotation: 0.3,
        rotation_speed: 0.02,
        arm_count: 3,
        opacity: 0.8,
        palette: crate::entity::GALAXY_PALETTES[0],
        pulse_speed: 0.5,
        pulse_offset: 0.0,
        seed: 42,
    };

    surface.begin_frame();
    draw_galaxy(&mut surface, &mut sprites, &galaxy, 1.0, Vec2::ZERO).unwrap();
    assert!(touched_pixels(&surface.finish_frame()) > 0);
}

#[test]
fn shooting_star_respects_fade_envelope() {
    let mut star = ShootingStar {
        position: Point::new(40.0, 30.0),
        length: 30.0,
        speed: 8.0,
        angle: std::f64::consts::FRAC_PI_4,
        opacity: 1.0,
        life: 30,
        max_life: 60,
    };

    let mut surface_mid = surface(64, 64);
    let mut sprites = SpriteCache::new();
    surface_mid.begin_frame();
    draw_shooting_star(&mut surface_mid, &mut sprites, &star).unwrap();
    assert!(touched_pixels(&surface_mid.finish_frame()) > 0);

    // Fully faded out: nothing drawn.
    star.life = 60;
    let mut surface_end = surface(64, 64);
    surface_end.begin_frame();
    draw_shooting_star(&mut surface_end, &mut sprites, &star).unwrap();
    assert_eq!(touched_pixels(&surface_end.finish_frame()), 0);
}

#[test]
fn aurora_draws_only_when_enabled() {
    let canvas = Canvas::new(64, 48);
    let mut config = ModeConfig::resolve(PerformanceMode::Full).aurora;

    let mut surface_on = surface(64, 48);
    let mut sprites = SpriteCache::new();
    surface_on.begin_frame();
    draw_aurora(&mut surface_on, &mut sprites, canvas, 0.5, &config).unwrap();
    assert!(touched_pixels(&surface_on.finish_frame()) > 0);

    config.enabled = false;
    let mut surface_off = surface(64, 48);
    surface_off.begin_frame();
    draw_aurora(&mut surface_off, &mut sprites, canvas, 0.5, &config).unwrap();
    assert_eq!(touched_pixels(&surface_off.finish_frame()), 0);
}

#[test]
fn ambient_glow_marks_pixels() {
    let mut surface = surface(64, 48);
    let mut sprites = SpriteCache::new();
    surface.begin_frame();
    draw_ambient_glow(&mut surface, &mut sprites, Canvas::new(64, 48)).unwrap();
    assert!(touched_pixels(&surface.finish_frame()) > 0);
}

#[test]
fn spiral_points_grow_outward() {
    let (r0, th0) = spiral_point(100.0, 0.0, 0.0);
    let (r1, th1) = spiral_point(100.0, 0.0, 1.0);
    assert!(r0 < 25.0, "hub radius {r0}");
    assert!(r1 > 90.0, "rim radius {r1}");
    assert!((th1 - th0 - SPIRAL_SWEEP).abs() < 1e-12);

    // Monotone growth apart from the small wobble.
    let mut prev = 0.0;
    for i in 0..=20 {
        let s = f64::from(i) / 20.0;
        let (r, _) = spiral_point(100.0, 1.0, s);
        assert!(r > prev - 6.0);
        prev = r;
    }
}
