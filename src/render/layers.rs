//! One draw routine per entity layer.
//!
//! Routines are pure functions of (entity, time, config, surface): all
//! animation phase lives on the entities, and gradients come pre-rasterized
//! from the [`SpriteCache`]. Layer order and parallax offsets are the
//! engine's concern; everything here draws exactly one entity (or one fixed
//! overlay) at the given offset.

use crate::config::{AuroraConfig, ModeConfig, NebulaConfig};
use crate::entity::{Galaxy, Nebula, ShootingStar, Star, fade_envelope, twinkle_opacity};
use crate::foundation::core::{Canvas, Vec2};
use crate::foundation::error::SkyResult;
use crate::foundation::rand::Rng64;
use crate::render::sprites::{SpriteCache, Stop};
use crate::render::surface::Surface;
use std::f64::consts::{PI, TAU};
use vello_cpu::kurbo::{Affine, BezPath, Circle, Rect, Shape, Stroke};
use vello_cpu::peniko::Color;

const STAR_GLOW_SPRITE: u32 = 32;
const NEBULA_SPRITE: u32 = 128;
const GALAXY_SPRITE: u32 = 64;
const AMBIENT_SPRITE: u32 = 128;

/// White core fading through violet to transparent.
const STAR_GLOW_STOPS: [Stop; 3] = [
    (0.0, [255, 255, 255, 255]),
    (0.4, [190, 160, 255, 180]),
    (1.0, [120, 80, 255, 0]),
];

/// Transparent tail to bright head, sampled left to right.
const STREAK_STOPS: [Stop; 3] = [
    (0.0, [255, 255, 255, 0]),
    (0.7, [220, 225, 255, 120]),
    (1.0, [255, 255, 255, 255]),
];

const AURORA_COLORS: [[u8; 3]; 3] = [[90, 255, 170], [70, 200, 255], [170, 130, 255]];

/// Spiral arms sweep this many radians from hub to rim.
const SPIRAL_SWEEP: f64 = 1.5 * PI;
const SPIRAL_SAMPLES: u32 = 80;
const CLUSTERS_PER_ARM: u32 = 30;

/// Draw one star: twinkle-modulated opacity, glow sprite or flat dot.
pub(crate) fn draw_star(
    surface: &mut Surface,
    sprites: &mut SpriteCache,
    star: &Star,
    t: f64,
    config: &ModeConfig,
    offset: Vec2,
) -> SkyResult<()> {
    let alpha = if config.twinkle {
        twinkle_opacity(star.opacity, star.twinkle_speed, star.twinkle_offset, t)
    } else {
        star.opacity
    };
    let x = star.position.x + offset.x;
    let y = star.position.y + offset.y;

    if config.glow {
        let img = sprites.radial(&STAR_GLOW_STOPS, STAR_GLOW_SPRITE)?;
        draw_sprite(
            surface.ctx(),
            img,
            STAR_GLOW_SPRITE,
            Affine::IDENTITY,
            x,
            y,
            star.size * 3.0,
            alpha,
        );
    } else {
        let ctx = surface.ctx();
        ctx.set_transform(Affine::IDENTITY);
        ctx.set_paint(Color::from_rgba8(255, 255, 255, alpha_u8(alpha)));
        ctx.fill_path(&circle_path(x, y, star.size));
    }
    Ok(())
}

/// Draw one nebula: three-stop radial gradient, optional drift and pulse.
pub(crate) fn draw_nebula(
    surface: &mut Surface,
    sprites: &mut SpriteCache,
    nebula: &Nebula,
    t: f64,
    config: &NebulaConfig,
    offset: Vec2,
) -> SkyResult<()> {
    let mut x = nebula.position.x + offset.x;
    let mut y = nebula.position.y + offset.y;
    if config.drift {
        // Two independent low-frequency sine terms.
        x += (t * 0.31 + nebula.pulse_offset).sin() * nebula.drift.x;
        y += (t * 0.23 + nebula.pulse_offset * 1.7).sin() * nebula.drift.y;
    }
    let alpha = if config.pulse {
        nebula.opacity * ((t * nebula.pulse_speed + nebula.pulse_offset).sin() * 0.25 + 0.75)
    } else {
        nebula.opacity
    };

    let c = nebula.color;
    let stops: [Stop; 3] = [
        (0.0, c.with_alpha(255)),
        (0.45, c.with_alpha(110)),
        (1.0, c.with_alpha(0)),
    ];
    let img = sprites.radial(&stops, NEBULA_SPRITE)?;
    draw_sprite(
        surface.ctx(),
        img,
        NEBULA_SPRITE,
        Affine::IDENTITY,
        x,
        y,
        nebula.radius,
        alpha,
    );

    if config.inner_glow {
        let glow: [Stop; 2] = [(0.0, [255, 255, 255, 200]), (1.0, [255, 255, 255, 0])];
        let img = sprites.radial(&glow, NEBULA_SPRITE)?;
        draw_sprite(
            surface.ctx(),
            img,
            NEBULA_SPRITE,
            Affine::IDENTITY,
            x,
            y,
            nebula.radius * 0.35,
            alpha * 0.6,
        );
    }
    Ok(())
}

/// Draw one galaxy: spiral arm strokes, cluster scatter, and gradient bulges
/// under a rotation transform with a 0.35 vertical squash faking disk tilt.
pub(crate) fn draw_galaxy(
    surface: &mut Surface,
    sprites: &mut SpriteCache,
    galaxy: &Galaxy,
    t: f64,
    offset: Vec2,
) -> SkyResult<()> {
    let rot = galaxy.rotation + t * galaxy.rotation_speed;
    let pulse = (t * galaxy.pulse_speed + galaxy.pulse_offset).sin() * 0.15 + 0.85;
    let alpha = (galaxy.opacity * pulse).clamp(0.0, 1.0);
    let r = galaxy.radius;
    let pal = galaxy.palette;

    let local = Affine::translate((
        galaxy.position.x + offset.x,
        galaxy.position.y + offset.y,
    )) * Affine::rotate(rot)
        * Affine::scale_non_uniform(1.0, 0.35);

    let dust_img = sprites.radial(
        &[(0.0, pal.dust.with_alpha(120)), (1.0, pal.dust.with_alpha(0))],
        GALAXY_SPRITE,
    )?;
    let halo_img = sprites.radial(
        &[(0.0, pal.core.with_alpha(160)), (1.0, pal.core.with_alpha(0))],
        GALAXY_SPRITE,
    )?;
    let core_img = sprites.radial(
        &[
            (0.0, [255, 255, 255, 255]),
            (0.35, pal.core.with_alpha(220)),
            (1.0, pal.core.with_alpha(0)),
        ],
        GALAXY_SPRITE,
    )?;

    let ctx = surface.ctx();
    ctx.push_opacity_layer(alpha as f32);

    // Arms: three stroke passes per arm, widest and faintest first.
    for arm in 0..galaxy.arm_count {
        let arm_phase = f64::from(arm) * TAU / f64::from(galaxy.arm_count);
        let path = spiral_path(r, arm_phase);
        for (width, stroke_alpha) in [(0.14, 0.18), (0.08, 0.40), (0.035, 0.90)] {
            ctx.set_transform(local);
            ctx.set_stroke(Stroke::new(r * width));
            ctx.set_paint(Color::from_rgba8(
                pal.arms.r,
                pal.arms.g,
                pal.arms.b,
                alpha_u8(stroke_alpha),
            ));
            ctx.stroke_path(&path);
        }

        // Star-cluster scatter along the same curve. Seeded per galaxy and
        // arm so the dots hold still between frames.
        let mut rng = Rng64::new(
            galaxy
                .seed
                .wrapping_add(u64::from(arm).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        );
        for _ in 0..CLUSTERS_PER_ARM {
            let s = rng.next_f64_in(0.08, 1.0);
            let (mut cr, mut th) = spiral_point(r, arm_phase, s);
            cr += rng.next_f64_in(-0.05, 0.05) * r;
            th += rng.next_f64_in(-0.04, 0.04);
            let dot = rng.next_f64_in(0.008, 0.022) * r;
            let dot_alpha = rng.next_f64_in(0.3, 0.9);
            ctx.set_transform(local);
            ctx.set_paint(Color::from_rgba8(
                pal.arms.r,
                pal.arms.g,
                pal.arms.b,
                alpha_u8(dot_alpha),
            ));
            ctx.fill_path(&circle_path(th.cos() * cr, th.sin() * cr, dot));
        }
    }

    // Outermost faint dust halo, then the two concentric bulges.
    draw_sprite(ctx, dust_img, GALAXY_SPRITE, local, 0.0, 0.0, r * 1.1, 1.0);
    draw_sprite(ctx, halo_img, GALAXY_SPRITE, local, 0.0, 0.0, r * 0.6, 1.0);
    draw_sprite(ctx, core_img, GALAXY_SPRITE, local, 0.0, 0.0, r * 0.25, 1.0);

    ctx.pop_layer();
    Ok(())
}

/// Draw one shooting star: gradient streak from tail to head plus head glow.
pub(crate) fn draw_shooting_star(
    surface: &mut Surface,
    sprites: &mut SpriteCache,
    star: &ShootingStar,
) -> SkyResult<()> {
    let alpha = (star.opacity * fade_envelope(star.progress())).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return Ok(());
    }

    let (dx, dy) = (star.angle.cos(), star.angle.sin());
    let tail = (
        star.position.x - dx * star.length,
        star.position.y - dy * star.length,
    );

    let streak = sprites.horizontal(&STREAK_STOPS, 64, 4)?;
    let head = sprites.radial(&STAR_GLOW_STOPS, STAR_GLOW_SPRITE)?;

    let ctx = surface.ctx();
    ctx.push_opacity_layer(alpha as f32);

    ctx.set_transform(
        Affine::translate(tail)
            * Affine::rotate(star.angle)
            * Affine::scale_non_uniform(star.length / 64.0, 0.5)
            * Affine::translate((0.0, -2.0)),
    );
    ctx.set_paint(streak);
    ctx.fill_rect(&Rect::new(0.0, 0.0, 64.0, 4.0));

    draw_sprite(
        ctx,
        head,
        STAR_GLOW_SPRITE,
        Affine::IDENTITY,
        star.position.x,
        star.position.y,
        4.0,
        1.0,
    );

    ctx.pop_layer();
    Ok(())
}

/// Draw all aurora curtains: wavy-topped vertical gradient bands with
/// periodic streak texture, clipped to the curtain polygon.
pub(crate) fn draw_aurora(
    surface: &mut Surface,
    sprites: &mut SpriteCache,
    canvas: Canvas,
    t: f64,
    config: &AuroraConfig,
) -> SkyResult<()> {
    if !config.enabled {
        return Ok(());
    }
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);

    for i in 0..config.curtains {
        let [cr, cg, cb] = AURORA_COLORS[i as usize % AURORA_COLORS.len()];
        let phase = t * config.wave_speed + f64::from(i) * 0.8;
        let base_y = h * (0.10 + 0.09 * f64::from(i));
        let band = h * 0.26;

        // Top edge: sum of three sines at distinct spatial frequencies
        // sharing the time phase.
        let top = |x: f64| -> f64 {
            base_y
                + h * 0.040 * ((x / w) * 1.5 * TAU + phase).sin()
                + h * 0.025 * ((x / w) * 3.7 * TAU + phase * 1.3).sin()
                + h * 0.012 * ((x / w) * 7.3 * TAU + phase * 0.7).sin()
        };

        let steps = 64;
        let mut poly = BezPath::new();
        poly.move_to((0.0, top(0.0)));
        for k in 1..=steps {
            let x = w * f64::from(k) / f64::from(steps);
            poly.line_to((x, top(x)));
        }
        poly.line_to((w, base_y + band));
        poly.line_to((0.0, base_y + band));
        poly.close_path();

        let fill = sprites.vertical(&[(0.0, [cr, cg, cb, 230]), (1.0, [cr, cg, cb, 0])], 8, 64)?;
        let streak =
            sprites.vertical(&[(0.0, [255, 255, 255, 90]), (1.0, [255, 255, 255, 0])], 8, 64)?;

        // Band bounding box; the top margin covers the tallest crest.
        let y0 = base_y - h * 0.08;
        let y1 = base_y + band;

        let ctx = surface.ctx();
        ctx.set_transform(Affine::IDENTITY);
        ctx.push_opacity_layer(config.intensity as f32);
        ctx.push_clip_layer(&poly);

        ctx.set_transform(
            Affine::translate((0.0, y0)) * Affine::scale_non_uniform(w / 8.0, (y1 - y0) / 64.0),
        );
        ctx.set_paint(fill);
        ctx.fill_rect(&Rect::new(0.0, 0.0, 8.0, 64.0));

        for k in 0..9u32 {
            let x = w * (f64::from(k) + 0.5) / 9.0 + (phase + f64::from(k)).sin() * w * 0.02;
            ctx.set_transform(
                Affine::translate((x - w * 0.005, y0))
                    * Affine::scale_non_uniform(w * 0.01 / 8.0, band * 0.8 / 64.0),
            );
            ctx.set_paint(streak.clone());
            ctx.fill_rect(&Rect::new(0.0, 0.0, 8.0, 64.0));
        }

        ctx.pop_layer();
        ctx.pop_layer();
    }
    Ok(())
}

/// Draw the two fixed ambient-glow gradients behind the star layer.
pub(crate) fn draw_ambient_glow(
    surface: &mut Surface,
    sprites: &mut SpriteCache,
    canvas: Canvas,
) -> SkyResult<()> {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let extent = w.max(h);

    let violet = sprites.radial(
        &[(0.0, [130, 90, 220, 90]), (1.0, [130, 90, 220, 0])],
        AMBIENT_SPRITE,
    )?;
    let teal = sprites.radial(
        &[(0.0, [50, 180, 200, 70]), (1.0, [50, 180, 200, 0])],
        AMBIENT_SPRITE,
    )?;

    let ctx = surface.ctx();
    draw_sprite(
        ctx,
        violet,
        AMBIENT_SPRITE,
        Affine::IDENTITY,
        w * 0.25,
        h * 0.30,
        extent * 0.55,
        1.0,
    );
    draw_sprite(
        ctx,
        teal,
        AMBIENT_SPRITE,
        Affine::IDENTITY,
        w * 0.80,
        h * 0.75,
        extent * 0.45,
        1.0,
    );
    Ok(())
}

/// Fill a cached sprite centered at `(cx, cy)` with the given radius, under
/// an optional base transform (galaxy local space, otherwise identity).
#[allow(clippy::too_many_arguments)]
fn draw_sprite(
    ctx: &mut vello_cpu::RenderContext,
    img: vello_cpu::Image,
    sprite_size: u32,
    base: Affine,
    cx: f64,
    cy: f64,
    radius: f64,
    alpha: f64,
) {
    let size = f64::from(sprite_size);
    let scale = (radius * 2.0) / size;
    ctx.set_transform(base * Affine::translate((cx - radius, cy - radius)) * Affine::scale(scale));
    ctx.set_paint(img);
    let a = alpha.clamp(0.0, 1.0) as f32;
    if a < 1.0 {
        ctx.push_opacity_layer(a);
    }
    ctx.fill_rect(&Rect::new(0.0, 0.0, size, size));
    if a < 1.0 {
        ctx.pop_layer();
    }
}

fn alpha_u8(alpha: f64) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn circle_path(cx: f64, cy: f64, r: f64) -> BezPath {
    let c = Circle::new((cx, cy), r.max(0.05));
    let mut p = BezPath::new();
    for el in c.path_elements(0.1) {
        p.push(el);
    }
    p
}

/// Point on a spiral arm at normalized curve position `s` in `[0, 1]`,
/// returned as (radius, angle). Radius grows linearly hub to rim with a small
/// sinusoidal wobble for organic shape.
fn spiral_point(radius: f64, arm_phase: f64, s: f64) -> (f64, f64) {
    let mut r = radius * 0.15 + s * radius * 0.9;
    r *= 1.0 + 0.04 * (s * 12.0 * PI + arm_phase).sin();
    let th = arm_phase + s * SPIRAL_SWEEP;
    (r, th)
}

fn spiral_path(radius: f64, arm_phase: f64) -> BezPath {
    let mut p = BezPath::new();
    for i in 0..=SPIRAL_SAMPLES {
        let s = f64::from(i) / f64::from(SPIRAL_SAMPLES);
        let (r, th) = spiral_point(radius, arm_phase, s);
        let pt = (th.cos() * r, th.sin() * r);
        if i == 0 {
            p.move_to(pt);
        } else {
            p.line_to(pt);
        }
    }
    p
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
