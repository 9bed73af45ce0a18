//! Performance tiers and the per-tier parameter tables.
//!
//! [`ModeConfig::resolve`] is a total static mapping: every mode resolves to a
//! fully-populated table, and there is no fallible lookup path. Hosts that
//! want to tune a tier can deserialize their own [`ModeConfig`] and construct
//! the engine with [`crate::Engine::with_config`].

/// Renderer fidelity tier selected by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceMode {
    /// Every layer enabled at maximum density.
    Full,
    /// Stars and a thin nebula layer; no glow, galaxies, or aurora.
    Reduced,
    /// Static stars only. `speed_multiplier` is 0, so the scene never moves.
    Minimal,
    /// Conservative mid-tier for hosts that cannot probe the device.
    Auto,
}

/// Nebula layer tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NebulaConfig {
    /// Layer on/off. When off, the pool is generated empty.
    pub enabled: bool,
    /// Fixed count per canvas lifetime.
    pub count: u32,
    /// Apply the two-sine positional drift.
    pub drift: bool,
    /// Apply the sine opacity pulse.
    pub pulse: bool,
    /// Secondary white inner-glow pass (full tier only).
    pub inner_glow: bool,
}

/// Galaxy layer tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GalaxyConfig {
    /// Layer on/off.
    pub enabled: bool,
    /// Fixed count per canvas lifetime.
    pub count: u32,
}

/// Shooting-star layer tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShootingStarConfig {
    /// Layer on/off.
    pub enabled: bool,
    /// Hard cap on simultaneously live shooting stars.
    pub max_active: usize,
    /// Per-frame spawn probability in `[0, 1]`.
    pub spawn_chance: f64,
}

/// Aurora layer tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuroraConfig {
    /// Layer on/off.
    pub enabled: bool,
    /// Number of overlapping curtains.
    pub curtains: u32,
    /// Time multiplier for the shared wave phase.
    pub wave_speed: f64,
    /// Peak curtain opacity in `[0, 1]`.
    pub intensity: f64,
}

/// Immutable parameter table for one performance tier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModeConfig {
    /// Canvas-area divisor: `star_count = floor(w * h / density_divisor)`.
    pub density_divisor: f64,
    /// Star radius is drawn from `[0.5, 0.5 + max_star_size]`.
    pub max_star_size: f64,
    /// Scales star fall speed; 0 freezes the scene and disables parallax.
    pub speed_multiplier: f64,
    /// Per-star sinusoidal opacity oscillation.
    pub twinkle: bool,
    /// Radial glow sprite per star instead of a flat fill.
    pub glow: bool,
    /// Two fixed ambient radial gradients behind the star layer.
    pub ambient_glow: bool,
    /// Nebula sub-table.
    pub nebula: NebulaConfig,
    /// Galaxy sub-table.
    pub galaxy: GalaxyConfig,
    /// Shooting-star sub-table.
    pub shooting_star: ShootingStarConfig,
    /// Aurora sub-table.
    pub aurora: AuroraConfig,
}

impl ModeConfig {
    /// Resolve a performance mode to its tier table.
    pub fn resolve(mode: PerformanceMode) -> Self {
        match mode {
            PerformanceMode::Full => Self {
                density_divisor: 3500.0,
                max_star_size: 2.5,
                speed_multiplier: 1.0,
                twinkle: true,
                glow: true,
                ambient_glow: true,
                nebula: NebulaConfig {
                    enabled: true,
                    count: 4,
                    drift: true,
                    pulse: true,
                    inner_glow: true,
                },
                galaxy: GalaxyConfig {
                    enabled: true,
                    count: 2,
                },
                shooting_star: ShootingStarConfig {
                    enabled: true,
                    max_active: 3,
                    spawn_chance: 0.01,
                },
                aurora: AuroraConfig {
                    enabled: true,
                    curtains: 3,
                    wave_speed: 0.3,
                    intensity: 0.25,
                },
            },
            PerformanceMode::Reduced => Self {
                density_divisor: 8000.0,
                max_star_size: 2.0,
                speed_multiplier: 0.75,
                twinkle: true,
                glow: false,
                ambient_glow: false,
                nebula: NebulaConfig {
                    enabled: true,
                    count: 2,
                    drift: false,
                    pulse: true,
                    inner_glow: false,
                },
                galaxy: GalaxyConfig {
                    enabled: false,
                    count: 0,
                },
                shooting_star: ShootingStarConfig {
                    enabled: true,
                    max_active: 2,
                    spawn_chance: 0.005,
                },
                aurora: AuroraConfig {
                    enabled: false,
                    curtains: 0,
                    wave_speed: 0.0,
                    intensity: 0.0,
                },
            },
            PerformanceMode::Minimal => Self {
                density_divisor: 15000.0,
                max_star_size: 1.5,
                speed_multiplier: 0.0,
                twinkle: false,
                glow: false,
                ambient_glow: false,
                nebula: NebulaConfig {
                    enabled: false,
                    count: 0,
                    drift: false,
                    pulse: false,
                    inner_glow: false,
                },
                galaxy: GalaxyConfig {
                    enabled: false,
                    count: 0,
                },
                shooting_star: ShootingStarConfig {
                    enabled: false,
                    max_active: 0,
                    spawn_chance: 0.0,
                },
                aurora: AuroraConfig {
                    enabled: false,
                    curtains: 0,
                    wave_speed: 0.0,
                    intensity: 0.0,
                },
            },
            PerformanceMode::Auto => Self {
                density_divisor: 10000.0,
                max_star_size: 1.8,
                speed_multiplier: 0.6,
                twinkle: true,
                glow: false,
                ambient_glow: false,
                nebula: NebulaConfig {
                    enabled: true,
                    count: 2,
                    drift: false,
                    pulse: true,
                    inner_glow: false,
                },
                galaxy: GalaxyConfig {
                    enabled: true,
                    count: 1,
                },
                shooting_star: ShootingStarConfig {
                    enabled: true,
                    max_active: 1,
                    spawn_chance: 0.003,
                },
                aurora: AuroraConfig {
                    enabled: false,
                    curtains: 0,
                    wave_speed: 0.0,
                    intensity: 0.0,
                },
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
