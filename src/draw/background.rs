//! Imported background images.
//!
//! The picker hands back opaque encoded bytes; they are decoded with the `image`
//! crate and converted into a Cairo surface that is painted behind the drawing.

use std::fmt;
use thiserror::Error;

/// Errors raised while decoding an imported background.
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("Unsupported or corrupt image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),
}

/// A decoded, non-editable background layer.
pub struct BackgroundImage {
    surface: cairo::ImageSurface,
}

impl fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl BackgroundImage {
    /// Decodes encoded image bytes (PNG, JPEG, ...) into a background layer.
    pub fn decode(bytes: &[u8]) -> Result<Self, BackgroundError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let too_large = || BackgroundError::TooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;

        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
        let stride = surface.stride() as usize;
        {
            let mut data = surface.data()?;
            for (y, row) in rgba.rows().enumerate() {
                let line = &mut data[y * stride..y * stride + width as usize * 4];
                for (dst, px) in line.chunks_exact_mut(4).zip(row) {
                    dst.copy_from_slice(&premultiplied_argb(px.0).to_ne_bytes());
                }
            }
        }
        surface.mark_dirty();

        log::info!("Decoded background image {width}x{height}");
        Ok(Self { surface })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// Paints the image scaled to cover a `width` x `height` area, centred and
    /// cropped to keep its aspect ratio.
    pub fn paint_cover(&self, ctx: &cairo::Context, width: f64, height: f64) {
        let (iw, ih) = (self.width() as f64, self.height() as f64);
        if iw <= 0.0 || ih <= 0.0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        let scale = (width / iw).max(height / ih);
        let offset_x = (width - iw * scale) / 2.0;
        let offset_y = (height - ih * scale) / 2.0;

        let _ = ctx.save();
        ctx.rectangle(0.0, 0.0, width, height);
        ctx.clip();
        ctx.translate(offset_x, offset_y);
        ctx.scale(scale, scale);
        let painted = ctx
            .set_source_surface(&self.surface, 0.0, 0.0)
            .and_then(|_| {
                // Pad so upscaled edges don't fade into transparency
                ctx.source().set_extend(cairo::Extend::Pad);
                ctx.paint()
            });
        if let Err(err) = painted {
            log::warn!("Failed to paint background image: {err}");
        }
        let _ = ctx.restore();
    }
}

/// Packs straight RGBA into Cairo's premultiplied native-endian ARGB32.
fn premultiplied_argb([r, g, b, a]: [u8; 4]) -> u32 {
    let premultiply = |c: u8| ((c as u32 * a as u32 + 127) / 255) & 0xff;
    ((a as u32) << 24) | (premultiply(r) << 16) | (premultiply(g) << 8) | premultiply(b)
}
