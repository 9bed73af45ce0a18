//! Nightsky is a procedural celestial background renderer.
//!
//! It draws a layered night sky (stars, nebulae, galaxies, aurora curtains, and
//! shooting stars) into an owned CPU pixel surface, frame by frame. Fidelity and
//! entity density follow a selectable [`PerformanceMode`], and the whole scene
//! drifts with smoothed pointer parallax. The public API is handle-oriented:
//!
//! - Resolve a tier with [`ModeConfig::resolve`]
//! - Build an [`Engine`] for a canvas
//! - Either pull frames with [`Engine::render_frame`], or hand the engine to
//!   [`AnimationLoop::start`] and receive frames through a [`FramePresenter`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod render;

/// Performance tiers and per-tier parameter tables.
pub mod config;
/// Per-frame orchestration: the engine state and draw/update sequence.
pub mod engine;
/// Entity records and canvas-sized pool generation.
pub mod entity;
/// Smoothed pointer/touch parallax tracking.
pub mod parallax;
/// Frame output boundary.
pub mod present;
/// Threaded animation loop driver.
pub mod runtime;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgb8, Vec2};
pub use crate::foundation::error::{SkyError, SkyResult};
pub use crate::foundation::rand::Rng64;

pub use crate::config::{
    AuroraConfig, GalaxyConfig, ModeConfig, NebulaConfig, PerformanceMode, ShootingStarConfig,
};
pub use crate::engine::{Engine, EngineOpts};
pub use crate::entity::{EntityPools, Galaxy, Nebula, ShootingStar, Star};
pub use crate::parallax::ParallaxTracker;
pub use crate::present::{FramePresenter, InMemoryPresenter, PresenterConfig};
pub use crate::render::surface::FrameRGBA;
pub use crate::runtime::{AnimationLoop, LoopHandle, LoopOpts};
