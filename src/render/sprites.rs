use crate::foundation::error::{SkyError, SkyResult};
use crate::foundation::rand::Fnv1a64;
use crate::render::surface::premul_rgba8;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache of hand-rasterized gradient paints.
///
/// `vello_cpu` paints are solid colors or images, so radial and linear
/// gradients are rasterized once into small pixmaps at full brightness and
/// reused every frame, scaled into place by the draw transform. The stop sets
/// come from the fixed palettes, so the cache stays small and warm after the
/// first frame.
#[derive(Default)]
pub(crate) struct SpriteCache {
    images: HashMap<u64, vello_cpu::Image>,
}

/// A gradient stop: normalized offset plus straight RGBA8.
pub(crate) type Stop = (f32, [u8; 4]);

impl SpriteCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Radial gradient sprite, `size` x `size`, transparent outside the circle.
    pub(crate) fn radial(&mut self, stops: &[Stop], size: u32) -> SkyResult<vello_cpu::Image> {
        let key = sprite_key(0, size, size, stops);
        if let Some(img) = self.images.get(&key).cloned() {
            return Ok(img);
        }

        let mut bytes = vec![0u8; (size as usize).saturating_mul(size as usize).saturating_mul(4)];
        let center = (f64::from(size) - 1.0) / 2.0;
        let radius = f64::from(size) / 2.0;
        for y in 0..size {
            for x in 0..size {
                let dx = f64::from(x) - center;
                let dy = f64::from(y) - center;
                let d = ((dx * dx + dy * dy).sqrt() / radius).min(1.0) as f32;
                let c = premul_rgba8(sample_stops(stops, d));
                let idx = ((y as usize) * (size as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c);
            }
        }

        let img = image_from_premul_bytes(&bytes, size, size)?;
        self.images.insert(key, img.clone());
        Ok(img)
    }

    /// Vertical gradient sprite running top (offset 0) to bottom (offset 1).
    pub(crate) fn vertical(
        &mut self,
        stops: &[Stop],
        width: u32,
        height: u32,
    ) -> SkyResult<vello_cpu::Image> {
        let key = sprite_key(1, width, height, stops);
        if let Some(img) = self.images.get(&key).cloned() {
            return Ok(img);
        }

        let mut bytes =
            vec![0u8; (width as usize).saturating_mul(height as usize).saturating_mul(4)];
        let h1 = (height.max(1) - 1) as f32;
        for y in 0..height {
            let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
            let c = premul_rgba8(sample_stops(stops, t));
            for x in 0..width {
                let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c);
            }
        }

        let img = image_from_premul_bytes(&bytes, width, height)?;
        self.images.insert(key, img.clone());
        Ok(img)
    }

    /// Horizontal gradient sprite running left (offset 0) to right (offset 1).
    pub(crate) fn horizontal(
        &mut self,
        stops: &[Stop],
        width: u32,
        height: u32,
    ) -> SkyResult<vello_cpu::Image> {
        let key = sprite_key(2, width, height, stops);
        if let Some(img) = self.images.get(&key).cloned() {
            return Ok(img);
        }

        let mut bytes =
            vec![0u8; (width as usize).saturating_mul(height as usize).saturating_mul(4)];
        let w1 = (width.max(1) - 1) as f32;
        for x in 0..width {
            let t = if w1 <= 0.0 { 0.0 } else { (x as f32) / w1 };
            let c = premul_rgba8(sample_stops(stops, t));
            for y in 0..height {
                let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c);
            }
        }

        let img = image_from_premul_bytes(&bytes, width, height)?;
        self.images.insert(key, img.clone());
        Ok(img)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.images.len()
    }
}

fn sprite_key(kind: u8, w: u32, h: u32, stops: &[Stop]) -> u64 {
    let mut hasher = Fnv1a64::new_default();
    hasher.write_bytes(&[kind]);
    hasher.write_u32(w);
    hasher.write_u32(h);
    for (offset, rgba) in stops {
        hasher.write_u32(offset.to_bits());
        hasher.write_bytes(rgba);
    }
    hasher.finish()
}

/// Piecewise-linear sample of a stop list at `t` in `[0, 1]`.
///
/// Stops must be sorted by offset; values outside the covered range clamp to
/// the nearest stop.
pub(crate) fn sample_stops(stops: &[Stop], t: f32) -> [u8; 4] {
    debug_assert!(!stops.is_empty());
    let first = stops[0];
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let span = (o1 - o0).max(f32::EPSILON);
            let f = (t - o0) / span;
            let lerp = |a: u8, b: u8| -> u8 {
                (f32::from(a) + (f32::from(b) - f32::from(a)) * f)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            return [
                lerp(c0[0], c1[0]),
                lerp(c0[1], c1[1]),
                lerp(c0[2], c1[2]),
                lerp(c0[3], c1[3]),
            ];
        }
    }
    stops[stops.len() - 1].1
}

fn image_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> SkyResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SkyError::render("sprite width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SkyError::render("sprite height exceeds u16"))?;
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(
            vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true),
        )),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/sprites.rs"]
mod tests;
