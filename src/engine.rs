//! Per-frame orchestration: the engine state and the fixed draw/update order.

use crate::config::{ModeConfig, PerformanceMode};
use crate::entity::{EntityPools, ShootingStar, star_count};
use crate::foundation::core::{Canvas, FrameIndex, Fps};
use crate::foundation::error::SkyResult;
use crate::foundation::rand::Rng64;
use crate::parallax::ParallaxTracker;
use crate::render::layers;
use crate::render::sprites::SpriteCache;
use crate::render::surface::{FrameRGBA, Surface};
use smallvec::SmallVec;

/// Per-layer parallax depth coefficients. Stars are the foreground-most
/// repeating layer, so they drift fastest; aurora and shooting stars take no
/// parallax at all.
const NEBULA_DEPTH: f64 = 0.02;
const GALAXY_DEPTH: f64 = 0.035;
const STAR_DEPTH: f64 = 0.05;

/// Engine construction options.
#[derive(Clone, Copy, Debug)]
pub struct EngineOpts {
    /// Frame rate used to map frame indices to animation time.
    pub fps: Fps,
    /// RNG seed. `None` seeds from wall-clock entropy (production); tests pin
    /// a seed and assert counts and bounds.
    pub seed: Option<u64>,
    /// Straight RGBA8 clear color (deep-space navy by default).
    pub clear_rgba: [u8; 4],
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            fps: Fps { num: 60, den: 1 },
            seed: None,
            clear_rgba: [5, 5, 16, 255],
        }
    }
}

/// The celestial background engine.
///
/// Owns every piece of mutable animation state: entity pools, parallax
/// tracker, the shooting-star list, the RNG, and the raster surface. All
/// mutation happens inside [`Engine::render_frame`] or through the explicit
/// `resize`/`set_mode`/`pointer_moved` entry points; nothing is shared.
pub struct Engine {
    canvas: Canvas,
    mode: PerformanceMode,
    config: ModeConfig,
    fps: Fps,
    clear_rgba: [u8; 4],

    pools: EntityPools,
    parallax: ParallaxTracker,
    shooting: SmallVec<[ShootingStar; 4]>,
    rng: Rng64,

    surface: Option<Surface>,
    sprites: SpriteCache,
}

impl Engine {
    /// Build an engine for a canvas under a performance mode.
    ///
    /// When the canvas dimensions are unusable (zero, or beyond the raster
    /// backend's `u16` limit) the engine is permanently disabled:
    /// [`Engine::render_frame`] returns `Ok(None)` and draws nothing. This is
    /// a silent, terminal condition; the worst case is a blank background.
    pub fn new(canvas: Canvas, mode: PerformanceMode, opts: EngineOpts) -> Self {
        Self::build(canvas, mode, ModeConfig::resolve(mode), opts)
    }

    /// Build an engine with an explicit tier table (tests and host tuning).
    ///
    /// `mode` is reported as-is by [`Engine::mode`] and in the presenter
    /// config; the table is taken from `config`, not re-resolved. A later
    /// [`Engine::set_mode`] replaces the custom table with the resolved one.
    pub fn with_config(
        canvas: Canvas,
        mode: PerformanceMode,
        config: ModeConfig,
        opts: EngineOpts,
    ) -> Self {
        Self::build(canvas, mode, config, opts)
    }

    fn build(canvas: Canvas, mode: PerformanceMode, config: ModeConfig, opts: EngineOpts) -> Self {
        let mut rng = match opts.seed {
            Some(seed) => Rng64::new(seed),
            None => Rng64::from_entropy(),
        };
        let surface = Surface::new(canvas, opts.clear_rgba);
        if surface.is_none() {
            tracing::debug!(
                width = canvas.width,
                height = canvas.height,
                "surface unavailable; engine disabled"
            );
        }
        let pools = EntityPools::generate(canvas, &config, &mut rng);
        Self {
            canvas,
            mode,
            config,
            fps: opts.fps,
            clear_rgba: opts.clear_rgba,
            pools,
            parallax: ParallaxTracker::new(),
            shooting: SmallVec::new(),
            rng,
            surface,
            sprites: SpriteCache::new(),
        }
    }

    /// `true` when the surface could not be created and the engine no-ops.
    pub fn is_disabled(&self) -> bool {
        self.surface.is_none()
    }

    /// Canvas this engine renders to.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Active performance mode.
    pub fn mode(&self) -> PerformanceMode {
        self.mode
    }

    /// Active tier table.
    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    /// Frame rate used for time mapping.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Background stars.
    pub fn stars(&self) -> &[crate::entity::Star] {
        &self.pools.stars
    }

    /// Nebula pool.
    pub fn nebulae(&self) -> &[crate::entity::Nebula] {
        &self.pools.nebulae
    }

    /// Galaxy pool.
    pub fn galaxies(&self) -> &[crate::entity::Galaxy] {
        &self.pools.galaxies
    }

    /// Live shooting stars.
    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting
    }

    /// Parallax tracker state.
    pub fn parallax(&self) -> &ParallaxTracker {
        &self.parallax
    }

    /// Record the latest pointer or touch position in normalized viewport
    /// coordinates. Mouse and touch share the target; the last write wins.
    pub fn pointer_moved(&mut self, x_norm: f64, y_norm: f64) {
        self.parallax.set_target(x_norm, y_norm);
    }

    /// Rebuild for a new canvas size.
    ///
    /// This is a destructive rebuild: entity pools are regenerated wholesale
    /// and in-flight animation phase is discarded.
    pub fn resize(&mut self, canvas: Canvas) {
        tracing::debug!(width = canvas.width, height = canvas.height, "resize");
        self.canvas = canvas;
        self.surface = Surface::new(canvas, self.clear_rgba);
        self.pools = EntityPools::generate(canvas, &self.config, &mut self.rng);
        self.shooting.clear();
    }

    /// Switch performance mode, re-resolving the tier table and rebuilding
    /// the pools. The mode is read here once, not polled per frame.
    pub fn set_mode(&mut self, mode: PerformanceMode) {
        tracing::debug!(?mode, "set_mode");
        self.mode = mode;
        self.config = ModeConfig::resolve(mode);
        self.pools = EntityPools::generate(self.canvas, &self.config, &mut self.rng);
        self.shooting.clear();
    }

    /// Render one frame.
    ///
    /// Returns `Ok(None)` when the engine is disabled (no surface). Otherwise
    /// executes the fixed per-frame sequence (clear, parallax smoothing,
    /// aurora, nebulae, galaxies, ambient glow, stars with kinematics, then
    /// shooting-star spawn/advance/prune/draw) and reads the frame back.
    pub fn render_frame(&mut self, frame: FrameIndex) -> SkyResult<Option<FrameRGBA>> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(None);
        };
        let t = self.fps.frames_to_secs(frame.0);
        let sm = self.config.speed_multiplier;
        let canvas = self.canvas;

        // 1. Clear.
        surface.begin_frame();

        // 2. Advance parallax smoothing.
        self.parallax.advance();

        // 3. Aurora: backmost, fixed (no parallax).
        layers::draw_aurora(surface, &mut self.sprites, canvas, t, &self.config.aurora)?;

        // 4. Nebulae.
        if self.config.nebula.enabled {
            let offset = self.parallax.offset(NEBULA_DEPTH, canvas, sm);
            for nebula in &self.pools.nebulae {
                layers::draw_nebula(
                    surface,
                    &mut self.sprites,
                    nebula,
                    t,
                    &self.config.nebula,
                    offset,
                )?;
            }
        }

        // 5. Galaxies.
        if self.config.galaxy.enabled {
            let offset = self.parallax.offset(GALAXY_DEPTH, canvas, sm);
            for galaxy in &self.pools.galaxies {
                layers::draw_galaxy(surface, &mut self.sprites, galaxy, t, offset)?;
            }
        }

        // 6. Ambient glow.
        if self.config.ambient_glow {
            layers::draw_ambient_glow(surface, &mut self.sprites, canvas)?;
        }

        // 7. Stars: draw, then advance kinematics. Frozen when the tier's
        // speed multiplier is zero.
        let offset = self.parallax.offset(STAR_DEPTH, canvas, sm);
        let h = f64::from(canvas.height);
        let w = f64::from(canvas.width);
        for star in &mut self.pools.stars {
            layers::draw_star(surface, &mut self.sprites, star, t, &self.config, offset)?;
            if sm > 0.0 {
                star.position.y += star.speed;
                if star.position.y > h {
                    star.position.y = 0.0;
                    star.position.x = self.rng.next_f64_in(0.0, w);
                }
            }
        }

        // 8. Probabilistic shooting-star spawn.
        let ss = self.config.shooting_star;
        if ss.enabled
            && self.shooting.len() < ss.max_active
            && self.rng.next_f64_01() < ss.spawn_chance
        {
            tracing::trace!(active = self.shooting.len() + 1, "shooting star spawned");
            self.shooting.push(ShootingStar::spawn(canvas, &mut self.rng));
        }

        // 9. Advance, prune, then draw survivors topmost (no parallax).
        for star in self.shooting.iter_mut() {
            star.advance();
        }
        self.shooting.retain(|s| !s.expired(canvas));
        for star in &self.shooting {
            layers::draw_shooting_star(surface, &mut self.sprites, star)?;
        }
        debug_assert!(self.shooting.len() <= ss.max_active);

        Ok(Some(surface.finish_frame()))
    }

    /// Star count the current canvas and tier produce: the resize invariant
    /// `floor(w * h / density_divisor)`.
    pub fn expected_star_count(&self) -> usize {
        star_count(self.canvas, &self.config)
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
