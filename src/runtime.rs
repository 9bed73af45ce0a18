//! Threaded animation loop driver.
//!
//! The loop is a two-state machine: **Running** (the render thread is alive
//! and exactly one frame is pending at a time) and **Stopped**. The thread
//! owns the [`Engine`] outright, so every piece of mutable animation state
//! stays single-threaded; input events cross over as messages that only ever
//! overwrite scalar targets, applied between frames with last-write-wins
//! semantics.

use crate::config::PerformanceMode;
use crate::engine::Engine;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{SkyError, SkyResult};
use crate::present::{FramePresenter, PresenterConfig};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Options controlling loop behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoopOpts {
    /// Stop after this many frames. `None` runs until [`LoopHandle::stop`].
    pub max_frames: Option<u64>,
}

enum Command {
    Pointer { x: f64, y: f64 },
    Resize(Canvas),
    SetMode(PerformanceMode),
    Stop,
}

/// The animation loop entry point.
pub struct AnimationLoop;

impl AnimationLoop {
    /// Start the loop: Stopped → Running.
    ///
    /// Takes ownership of the engine and presenter; both come back from
    /// [`LoopHandle::stop`]. When the engine is disabled (no surface),
    /// nothing is scheduled at all (no thread, no presenter calls) and the
    /// returned handle is inert, matching the silent-degradation contract.
    pub fn start<P: FramePresenter + 'static>(
        engine: Engine,
        presenter: P,
        opts: LoopOpts,
    ) -> SkyResult<LoopHandle<P>> {
        let (tx, rx) = unbounded();

        if engine.is_disabled() {
            tracing::debug!("engine disabled; animation loop not scheduled");
            return Ok(LoopHandle {
                tx,
                join: None,
                inert: Some((engine, presenter)),
            });
        }

        tracing::debug!(
            width = engine.canvas().width,
            height = engine.canvas().height,
            mode = ?engine.mode(),
            "animation loop started"
        );
        let join = std::thread::Builder::new()
            .name("nightsky-loop".into())
            .spawn(move || run(engine, presenter, rx, opts))
            .map_err(|e| SkyError::render(format!("failed to spawn loop thread: {e}")))?;

        Ok(LoopHandle {
            tx,
            join: Some(join),
            inert: None,
        })
    }
}

/// Handle to a running (or inert) animation loop.
///
/// Dropping the handle stops the loop; prefer [`LoopHandle::stop`] to observe
/// the terminal result and recover the engine and presenter.
pub struct LoopHandle<P: FramePresenter> {
    tx: Sender<Command>,
    join: Option<JoinHandle<SkyResult<(Engine, P)>>>,
    inert: Option<(Engine, P)>,
}

impl<P: FramePresenter> LoopHandle<P> {
    /// Forward a normalized pointer/touch position to the loop.
    pub fn pointer_moved(&self, x_norm: f64, y_norm: f64) {
        let _ = self.tx.send(Command::Pointer {
            x: x_norm,
            y: y_norm,
        });
    }

    /// Ask the loop to rebuild for a new canvas size.
    pub fn resize(&self, canvas: Canvas) {
        let _ = self.tx.send(Command::Resize(canvas));
    }

    /// Ask the loop to switch performance mode.
    pub fn set_mode(&self, mode: PerformanceMode) {
        let _ = self.tx.send(Command::SetMode(mode));
    }

    /// `true` once the render thread has exited (a bounded run completed, the
    /// surface went away, or an error occurred). Inert handles are finished
    /// from the start. [`LoopHandle::stop`] still collects the result.
    pub fn is_finished(&self) -> bool {
        match &self.join {
            Some(join) => join.is_finished(),
            None => true,
        }
    }

    /// Stop the loop: Running → Stopped.
    ///
    /// Cancels the pending frame, joins the render thread, and returns the
    /// engine and presenter. Once this returns, no further frame can run.
    pub fn stop(mut self) -> SkyResult<(Engine, P)> {
        if let Some((engine, presenter)) = self.inert.take() {
            return Ok((engine, presenter));
        }
        let join = self
            .join
            .take()
            .ok_or_else(|| SkyError::render("animation loop already stopped"))?;
        let _ = self.tx.send(Command::Stop);
        let out = join
            .join()
            .map_err(|_| SkyError::render("animation loop thread panicked"))?;
        tracing::debug!("animation loop stopped");
        out
    }
}

impl<P: FramePresenter> Drop for LoopHandle<P> {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = self.tx.send(Command::Stop);
            let _ = join.join();
        }
    }
}

fn run<P: FramePresenter>(
    mut engine: Engine,
    mut presenter: P,
    rx: Receiver<Command>,
    opts: LoopOpts,
) -> SkyResult<(Engine, P)> {
    let cfg = PresenterConfig {
        width: engine.canvas().width,
        height: engine.canvas().height,
        fps: engine.fps(),
        mode: engine.mode(),
    };
    presenter.begin(cfg)?;

    let frame_dur = Duration::from_secs_f64(engine.fps().frame_duration_secs());
    let mut frame = 0u64;
    let mut deadline = Instant::now();

    let result = loop {
        match engine.render_frame(FrameIndex(frame)) {
            Err(e) => break Err(e),
            // Surface gone (e.g. resized to zero): terminal no-op, nothing
            // further is scheduled.
            Ok(None) => break Ok(()),
            Ok(Some(f)) => {
                if let Err(e) = presenter.present(FrameIndex(frame), &f) {
                    break Err(e);
                }
            }
        }
        frame += 1;
        if opts.max_frames.is_some_and(|m| frame >= m) {
            break Ok(());
        }

        // Wait out the frame budget, applying commands as they arrive.
        // Commands only overwrite scalar state, so applying them in receipt
        // order gives last-write-wins.
        deadline += frame_dur;
        let stop = loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(timeout) {
                Ok(Command::Stop) => break true,
                Ok(Command::Pointer { x, y }) => engine.pointer_moved(x, y),
                Ok(Command::Resize(c)) => engine.resize(c),
                Ok(Command::SetMode(m)) => engine.set_mode(m),
                Err(RecvTimeoutError::Timeout) => break false,
                Err(RecvTimeoutError::Disconnected) => break true,
            }
        };
        if stop {
            break Ok(());
        }
    };

    let ended = presenter.end();
    result.and(ended)?;
    Ok((engine, presenter))
}
