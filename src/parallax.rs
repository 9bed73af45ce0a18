//! Smoothed pointer/touch parallax tracking.

use crate::foundation::core::{Canvas, Vec2};

/// Exponential smoothing factor applied once per frame.
const SMOOTHING: f64 = 0.05;

/// Smooths raw pointer/touch coordinates into a per-layer drift offset.
///
/// `target` is overwritten directly by input events (mouse and touch share it;
/// whichever fires last wins). `current` chases it by 5% per frame. Layers
/// multiply the centered offset by their depth coefficient, so foreground
/// layers drift faster than background ones.
#[derive(Clone, Copy, Debug)]
pub struct ParallaxTracker {
    target: Vec2,
    current: Vec2,
}

impl Default for ParallaxTracker {
    fn default() -> Self {
        // Centered pointer means zero drift.
        let mid = Vec2::new(0.5, 0.5);
        Self {
            target: mid,
            current: mid,
        }
    }
}

impl ParallaxTracker {
    /// Create a tracker at rest (centered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest normalized pointer position. Values are clamped into
    /// `[0, 1] x [0, 1]`.
    pub fn set_target(&mut self, x: f64, y: f64) {
        self.target = Vec2::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
    }

    /// Advance one frame of smoothing: `current += (target - current) * 0.05`.
    pub fn advance(&mut self) {
        self.current += (self.target - self.current) * SMOOTHING;
    }

    /// Smoothed normalized position.
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Pixel offset for a layer at `depth`, proportional to canvas extent.
    ///
    /// Returns zero when `speed_multiplier` is 0 (the minimal tier renders a
    /// fully static scene).
    pub fn offset(&self, depth: f64, canvas: Canvas, speed_multiplier: f64) -> Vec2 {
        if speed_multiplier <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (self.current.x - 0.5) * depth * f64::from(canvas.width),
            (self.current.y - 0.5) * depth * f64::from(canvas.height),
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/parallax.rs"]
mod tests;
