use crate::foundation::core::Canvas;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; with the default opaque clear color the
/// alpha channel is 255 everywhere.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

/// One CPU raster target: a `vello_cpu` render context plus its pixmap.
///
/// Construction returns `None` when the canvas dimensions are unusable (zero,
/// or beyond the `u16` pixmap limit). That is the engine's terminal
/// "context unavailable" condition: callers degrade to a silent no-op, there
/// is no fallback renderer.
pub(crate) struct Surface {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    canvas: Canvas,
    clear_rgba: [u8; 4],
}

impl Surface {
    pub(crate) fn new(canvas: Canvas, clear_rgba: [u8; 4]) -> Option<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return None;
        }
        let w: u16 = canvas.width.try_into().ok()?;
        let h: u16 = canvas.height.try_into().ok()?;
        Some(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            canvas,
            clear_rgba,
        })
    }

    pub(crate) fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub(crate) fn ctx(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Reset draw state for a new frame and record the clear.
    ///
    /// Rendering composites the recorded scene over transparent, so the clear
    /// is itself geometry: a full-canvas rect in the clear color, drawn first.
    pub(crate) fn begin_frame(&mut self) {
        self.ctx.reset();
        self.ctx
            .set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let [r, g, b, a] = self.clear_rgba;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));
    }

    /// Flush pending geometry onto the pixmap and read the frame back.
    pub(crate) fn finish_frame(&mut self) -> FrameRGBA {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

pub(crate) fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
