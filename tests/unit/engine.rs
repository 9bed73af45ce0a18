use super::*;

fn opts(seed: u64) -> EngineOpts {
    EngineOpts {
        seed: Some(seed),
        ..EngineOpts::default()
    }
}

#[test]
fn disabled_engine_renders_nothing_until_resized() {
    let mut engine = Engine::new(Canvas::new(0, 0), PerformanceMode::Full, opts(1));
    assert!(engine.is_disabled());
    assert!(engine.render_frame(FrameIndex(0)).unwrap().is_none());

    // A later resize to a usable canvas brings the engine back.
    engine.resize(Canvas::new(64, 48));
    assert!(!engine.is_disabled());
    let frame = engine.render_frame(FrameIndex(0)).unwrap().unwrap();
    assert_eq!(frame.width, 64);
    assert_eq!(frame.height, 48);
    assert_eq!(frame.data.len(), 64 * 48 * 4);
}

#[test]
fn pools_match_tier_tables() {
    let engine = Engine::new(Canvas::new(800, 600), PerformanceMode::Reduced, opts(2));
    assert_eq!(engine.stars().len(), engine.expected_star_count());
    assert_eq!(engine.stars().len(), 60);
    assert_eq!(engine.nebulae().len(), 2);
    assert_eq!(engine.galaxies().len(), 0);

    let engine = Engine::new(Canvas::new(800, 600), PerformanceMode::Full, opts(2));
    assert_eq!(engine.stars().len(), 137);
    assert_eq!(engine.nebulae().len(), 4);
    assert_eq!(engine.galaxies().len(), 2);
}

#[test]
fn resize_regenerates_pools_for_new_area() {
    let mut engine = Engine::new(Canvas::new(800, 600), PerformanceMode::Full, opts(3));
    let before = engine.stars().len();
    engine.resize(Canvas::new(400, 300));
    assert_eq!(engine.canvas(), Canvas::new(400, 300));
    assert_eq!(engine.stars().len(), engine.expected_star_count());
    assert!(engine.stars().len() < before);
    for s in engine.stars() {
        assert!(s.position.x <= 400.0);
        assert!(s.position.y <= 300.0);
    }
}

#[test]
fn set_mode_reresolves_the_tier() {
    let mut engine = Engine::new(Canvas::new(800, 600), PerformanceMode::Full, opts(4));
    engine.set_mode(PerformanceMode::Minimal);
    assert_eq!(engine.mode(), PerformanceMode::Minimal);
    assert_eq!(engine.config().speed_multiplier, 0.0);
    assert_eq!(engine.stars().len(), 32);
    assert!(engine.nebulae().is_empty());
    assert!(engine.galaxies().is_empty());
    assert!(engine.shooting_stars().is_empty());
}

#[test]
fn minimal_tier_is_fully_static() {
    let mut engine = Engine::new(Canvas::new(256, 128), PerformanceMode::Minimal, opts(5));
    assert!(!engine.stars().is_empty());
    let a = engine.render_frame(FrameIndex(0)).unwrap().unwrap();
    let positions: Vec<_> = engine.stars().iter().map(|s| s.position).collect();
    let b = engine.render_frame(FrameIndex(1)).unwrap().unwrap();

    assert_eq!(a.data, b.data);
    for (s, p) in engine.stars().iter().zip(&positions) {
        assert_eq!(s.position, *p);
    }
}

#[test]
fn stars_fall_and_wrap_to_the_top() {
    let mut config = ModeConfig::resolve(PerformanceMode::Minimal);
    config.speed_multiplier = 50.0;
    config.density_divisor = 100.0;
    let mut engine = Engine::with_config(Canvas::new(64, 32), PerformanceMode::Minimal, config, opts(6));
    assert!(!engine.stars().is_empty());

    let start: Vec<f64> = engine.stars().iter().map(|s| s.position.y).collect();
    let mut wrapped = false;
    for frame in 0..50 {
        engine.render_frame(FrameIndex(frame)).unwrap().unwrap();
        for (s, y0) in engine.stars().iter().zip(&start) {
            assert!((0.0..=32.0).contains(&s.position.y));
            if s.position.y < *y0 {
                wrapped = true;
            }
        }
    }
    assert!(wrapped);
}

#[test]
fn shooting_stars_never_exceed_the_cap() {
    let mut config = ModeConfig::resolve(PerformanceMode::Full);
    config.shooting_star.spawn_chance = 1.0;
    config.shooting_star.max_active = 3;
    let mut engine = Engine::with_config(Canvas::new(256, 128), PerformanceMode::Full, config, opts(7));

    let mut seen_any = false;
    for frame in 0..120 {
        engine.render_frame(FrameIndex(frame)).unwrap().unwrap();
        assert!(engine.shooting_stars().len() <= 3);
        seen_any |= !engine.shooting_stars().is_empty();
    }
    assert!(seen_any);
}

#[test]
fn auto_tier_caps_shooting_stars_at_one() {
    let mut config = ModeConfig::resolve(PerformanceMode::Auto);
    config.shooting_star.spawn_chance = 1.0;
    let mut engine = Engine::with_config(Canvas::new(256, 128), PerformanceMode::Auto, config, opts(8));
    for frame in 0..120 {
        engine.render_frame(FrameIndex(frame)).unwrap().unwrap();
        assert!(engine.shooting_stars().len() <= 1);
    }
}

#[test]
fn pointer_input_steers_parallax() {
    let mut engine = Engine::new(Canvas::new(96, 64), PerformanceMode::Full, opts(9));
    engine.pointer_moved(1.0, 0.0);
    engine.render_frame(FrameIndex(0)).unwrap().unwrap();
    let cur = engine.parallax().current();
    assert!(cur.x > 0.5);
    assert!(cur.y < 0.5);
}

#[test]
fn custom_config_keeps_the_declared_mode() {
    let mut config = ModeConfig::resolve(PerformanceMode::Full);
    config.density_divisor = 5000.0;
    let engine = Engine::with_config(Canvas::new(320, 240), PerformanceMode::Full, config, opts(11));
    assert_eq!(engine.mode(), PerformanceMode::Full);
    assert_eq!(engine.config().density_divisor, 5000.0);
}

#[test]
fn seeded_engines_agree() {
    let a = Engine::new(Canvas::new(320, 240), PerformanceMode::Full, opts(10));
    let b = Engine::new(Canvas::new(320, 240), PerformanceMode::Full, opts(10));
    assert_eq!(a.stars().len(), b.stars().len());
    for (x, y) in a.stars().iter().zip(b.stars()) {
        assert_eq!(x.position, y.position);
        assert_eq!(x.size, y.size);
    }
}
