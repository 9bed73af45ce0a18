//! Entity records and canvas-sized pool generation.
//!
//! All entities are plain records owned exclusively by the engine. The
//! persistent pools (stars, nebulae, galaxies) are created at resize time and
//! replaced wholesale by the next resize; shooting stars are ephemeral and
//! churn every frame.

use crate::config::ModeConfig;
use crate::foundation::core::{Canvas, Point, Rgb8, Vec2};
use crate::foundation::rand::Rng64;

/// Fixed nebula palette (6 hues).
pub(crate) const NEBULA_PALETTE: [Rgb8; 6] = [
    Rgb8::new(96, 78, 189),  // violet
    Rgb8::new(56, 96, 204),  // blue
    Rgb8::new(44, 160, 178), // teal
    Rgb8::new(170, 64, 172), // magenta
    Rgb8::new(70, 62, 166),  // indigo
    Rgb8::new(52, 130, 198), // cyan
];

/// One galaxy color scheme: core, arms, dust halo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GalaxyPalette {
    /// Bright central bulge color.
    pub core: Rgb8,
    /// Spiral arm stroke color.
    pub arms: Rgb8,
    /// Outermost faint dust halo color.
    pub dust: Rgb8,
}

/// Fixed galaxy palettes (3 schemes).
pub(crate) const GALAXY_PALETTES: [GalaxyPalette; 3] = [
    GalaxyPalette {
        core: Rgb8::new(255, 240, 214),
        arms: Rgb8::new(168, 188, 255),
        dust: Rgb8::new(90, 80, 160),
    },
    GalaxyPalette {
        core: Rgb8::new(255, 224, 230),
        arms: Rgb8::new(228, 170, 255),
        dust: Rgb8::new(140, 70, 150),
    },
    GalaxyPalette {
        core: Rgb8::new(224, 244, 255),
        arms: Rgb8::new(150, 220, 240),
        dust: Rgb8::new(60, 110, 150),
    },
];

/// One background star.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Star {
    /// Position in canvas pixels.
    pub position: Point,
    /// Radius in pixels.
    pub size: f64,
    /// Downward fall speed in pixels per frame (already tier-scaled).
    pub speed: f64,
    /// Base opacity in `[0.3, 0.8]`.
    pub opacity: f64,
    /// Twinkle angular speed in rad/s.
    pub twinkle_speed: f64,
    /// Twinkle phase offset, randomized so stars don't flash in sync.
    pub twinkle_offset: f64,
}

/// One nebula cloud. Count is fixed per canvas lifetime.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Nebula {
    /// Center in canvas pixels.
    pub position: Point,
    /// Gradient radius in pixels.
    pub radius: f64,
    /// Hue from [`NEBULA_PALETTE`].
    pub color: Rgb8,
    /// Base opacity (subtle; the gradient is layered three ways).
    pub opacity: f64,
    /// Drift amplitude in pixels for the two sine terms.
    pub drift: Vec2,
    /// Pulse angular speed in rad/s.
    pub pulse_speed: f64,
    /// Pulse phase offset.
    pub pulse_offset: f64,
}

/// One spiral galaxy. Count is fixed per canvas lifetime.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Galaxy {
    /// Center in canvas pixels, biased into the inner 80% of the viewport.
    pub position: Point,
    /// Disk radius in pixels.
    pub radius: f64,
    /// Initial rotation in radians; accumulates as `rotation + t * rotation_speed`.
    pub rotation: f64,
    /// Signed rotation speed in rad/s.
    pub rotation_speed: f64,
    /// Number of spiral arms.
    pub arm_count: u32,
    /// Base opacity.
    pub opacity: f64,
    /// Color scheme from [`GALAXY_PALETTES`].
    pub palette: GalaxyPalette,
    /// Pulse angular speed in rad/s.
    pub pulse_speed: f64,
    /// Pulse phase offset.
    pub pulse_offset: f64,
    /// Seed for the per-arm cluster scatter, so dots are stable across frames.
    pub seed: u64,
}

/// One ephemeral shooting star.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShootingStar {
    /// Head position in canvas pixels.
    pub position: Point,
    /// Streak length in pixels.
    pub length: f64,
    /// Speed in pixels per frame.
    pub speed: f64,
    /// Heading in radians (positive y is down).
    pub angle: f64,
    /// Peak opacity; the envelope scales this over the lifetime.
    pub opacity: f64,
    /// Frames lived so far.
    pub life: u32,
    /// Lifetime in frames.
    pub max_life: u32,
}

impl ShootingStar {
    /// Spawn in the upper half of the canvas, heading down-right.
    pub(crate) fn spawn(canvas: Canvas, rng: &mut Rng64) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        Self {
            position: Point::new(rng.next_f64_in(0.0, w), rng.next_f64_in(0.0, h * 0.5)),
            length: rng.next_f64_in(40.0, 100.0),
            speed: rng.next_f64_in(6.0, 12.0),
            angle: std::f64::consts::FRAC_PI_4 + rng.next_f64_in(-0.26, 0.26),
            opacity: rng.next_f64_in(0.6, 1.0),
            life: 0,
            max_life: rng.next_f64_in(40.0, 80.0) as u32,
        }
    }

    /// Normalized lifetime progress in `[0, 1]`.
    pub fn progress(self) -> f64 {
        if self.max_life == 0 {
            return 1.0;
        }
        f64::from(self.life) / f64::from(self.max_life)
    }

    /// Advance one frame of kinematics.
    pub(crate) fn advance(&mut self) {
        self.position.x += self.angle.cos() * self.speed;
        self.position.y += self.angle.sin() * self.speed;
        self.life += 1;
    }

    /// Expired once the lifetime runs out or the streak fully exits the canvas.
    pub(crate) fn expired(self, canvas: Canvas) -> bool {
        if self.life >= self.max_life {
            return true;
        }
        let m = self.length;
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        self.position.x < -m || self.position.x > w + m || self.position.y < -m || self.position.y > h + m
    }
}

/// Number of stars for a canvas under a tier table: `floor(w * h / density_divisor)`.
pub fn star_count(canvas: Canvas, config: &ModeConfig) -> usize {
    (canvas.area() / config.density_divisor).floor() as usize
}

/// Twinkle-modulated opacity: `base * (sin(t * speed + offset) * 0.3 + 0.7)`.
///
/// The sine term maps into `[0.4, 1.0]`, so the result stays within
/// `[0.4 * base, base]`.
pub fn twinkle_opacity(base: f64, twinkle_speed: f64, twinkle_offset: f64, t: f64) -> f64 {
    base * ((t * twinkle_speed + twinkle_offset).sin() * 0.3 + 0.7)
}

/// Shooting-star opacity envelope over normalized `progress` in `[0, 1]`.
///
/// Product of a fast fade-in (`min(progress * 4, 1)`) and a fade-out that
/// begins at 70% of life and reaches zero at the end.
pub fn fade_envelope(progress: f64) -> f64 {
    let fade_in = (progress * 4.0).min(1.0);
    let fade_out = (1.0 - (progress - 0.7) / 0.3).clamp(0.0, 1.0);
    fade_in * fade_out
}

/// The persistent per-canvas entity pools.
///
/// Regenerated wholesale on every resize: prior animation phase (positions,
/// twinkle offsets) is intentionally discarded.
#[derive(Clone, Debug, Default)]
pub struct EntityPools {
    /// Background stars.
    pub stars: Vec<Star>,
    /// Nebula clouds.
    pub nebulae: Vec<Nebula>,
    /// Spiral galaxies.
    pub galaxies: Vec<Galaxy>,
}

impl EntityPools {
    /// Generate fresh pools for a canvas under a tier table.
    pub fn generate(canvas: Canvas, config: &ModeConfig, rng: &mut Rng64) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let extent = w.min(h);

        let stars = (0..star_count(canvas, config))
            .map(|_| Star {
                position: Point::new(rng.next_f64_in(0.0, w), rng.next_f64_in(0.0, h)),
                size: rng.next_f64_in(0.5, 0.5 + config.max_star_size),
                speed: rng.next_f64_in(0.1, 0.4) * config.speed_multiplier,
                opacity: rng.next_f64_in(0.3, 0.8),
                twinkle_speed: rng.next_f64_in(0.5, 3.0),
                twinkle_offset: rng.next_f64_in(0.0, std::f64::consts::TAU),
            })
            .collect();

        let nebula_count = if config.nebula.enabled { config.nebula.count } else { 0 };
        let nebulae = (0..nebula_count)
            .map(|_| Nebula {
                position: Point::new(rng.next_f64_in(0.0, w), rng.next_f64_in(0.0, h)),
                radius: rng.next_f64_in(0.25, 0.45) * w.max(h),
                color: NEBULA_PALETTE[rng.next_index(NEBULA_PALETTE.len())],
                opacity: rng.next_f64_in(0.08, 0.18),
                drift: Vec2::new(rng.next_f64_in(8.0, 24.0), rng.next_f64_in(8.0, 24.0)),
                pulse_speed: rng.next_f64_in(0.2, 0.6),
                pulse_offset: rng.next_f64_in(0.0, std::f64::consts::TAU),
            })
            .collect();

        let galaxy_count = if config.galaxy.enabled { config.galaxy.count } else { 0 };
        let galaxies = (0..galaxy_count)
            .map(|_| Galaxy {
                // Inner 80% of the viewport to avoid edge clipping.
                position: Point::new(
                    rng.next_f64_in(0.1 * w, 0.9 * w),
                    rng.next_f64_in(0.1 * h, 0.9 * h),
                ),
                radius: rng.next_f64_in(0.08, 0.16) * extent,
                rotation: rng.next_f64_in(0.0, std::f64::consts::TAU),
                rotation_speed: rng.next_f64_in(0.01, 0.05)
                    * if rng.next_f64_01() < 0.5 { -1.0 } else { 1.0 },
                arm_count: 2 + rng.next_index(3) as u32,
                opacity: rng.next_f64_in(0.5, 0.8),
                palette: GALAXY_PALETTES[rng.next_index(GALAXY_PALETTES.len())],
                pulse_speed: rng.next_f64_in(0.3, 0.8),
                pulse_offset: rng.next_f64_in(0.0, std::f64::consts::TAU),
                seed: rng.next_u64(),
            })
            .collect();

        Self {
            stars,
            nebulae,
            galaxies,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/entity.rs"]
mod tests;
