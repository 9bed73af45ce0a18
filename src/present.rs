//! Frame output boundary.
//!
//! The engine's only observable output is pixel data; a [`FramePresenter`] is
//! where those pixels go (a window blit, a shared texture, a test buffer).

use crate::config::PerformanceMode;
use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::error::SkyResult;
use crate::render::surface::FrameRGBA;

/// Configuration provided to a [`FramePresenter`] when a loop starts.
#[derive(Debug, Clone, Copy)]
pub struct PresenterConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Loop frame rate.
    pub fps: Fps,
    /// Performance mode the loop started under.
    pub mode: PerformanceMode,
}

/// Consumer contract for rendered frames.
///
/// Ordering contract: `present` is called in strictly increasing
/// [`FrameIndex`] order for the lifetime of one loop.
pub trait FramePresenter: Send {
    /// Called once before any frames are presented.
    fn begin(&mut self, cfg: PresenterConfig) -> SkyResult<()>;
    /// Present one frame in strictly increasing order.
    fn present(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SkyResult<()>;
    /// Called once after the last frame, on every loop exit path.
    fn end(&mut self) -> SkyResult<()>;
}

/// In-memory presenter for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryPresenter {
    cfg: Option<PresenterConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemoryPresenter {
    /// Create an empty presenter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<PresenterConfig> {
        self.cfg
    }

    /// Captured frames in presentation order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FramePresenter for InMemoryPresenter {
    fn begin(&mut self, cfg: PresenterConfig) -> SkyResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn present(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SkyResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SkyResult<()> {
        self.ended = true;
        Ok(())
    }
}
