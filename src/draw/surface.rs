//! Off-screen raster that composites the drawing.

use super::background::BackgroundImage;
use super::color::Color;
use super::history::StrokeHistory;
use super::render;

/// Raster backing store for the drawing view.
///
/// Holds the background fill, an optional imported background image and an
/// off-screen layer that committed strokes can be flattened into. Each frame the
/// surface is composited with the strokes that are not flattened yet:
///
/// 1. background fill color
/// 2. imported background image (scaled to cover)
/// 3. flattened raster layer
/// 4. committed strokes not yet flattened, oldest first
/// 5. the in-progress stroke
pub struct CanvasSurface {
    width: i32,
    height: i32,
    /// Layer that flattened strokes are baked into (transparent elsewhere)
    raster: cairo::ImageSurface,
    background_color: Color,
    background: Option<BackgroundImage>,
    /// Whether committed strokes get baked into `raster`
    flatten: bool,
    /// Number of leading history strokes already baked into `raster`
    flattened: usize,
    /// Leading flattened strokes dropped by a resize; never replayed
    lost: usize,
}

impl CanvasSurface {
    /// Creates a surface of the given size. Negative sizes are treated as zero.
    pub fn new(
        width: i32,
        height: i32,
        background_color: Color,
        flatten: bool,
    ) -> Result<Self, cairo::Error> {
        let (width, height) = (width.max(0), height.max(0));
        Ok(Self {
            width,
            height,
            raster: cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?,
            background_color,
            background: None,
            flatten,
            flattened: 0,
            lost: 0,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of committed strokes currently baked into the raster layer.
    pub fn flattened_count(&self) -> usize {
        self.flattened
    }

    /// Recreates the raster buffer at the new size.
    ///
    /// Content that was flattened into the old buffer is lost and stays lost, even
    /// when a later undo rebuilds the layer. The background image is a separate
    /// layer and is kept.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), cairo::Error> {
        let (width, height) = (width.max(0), height.max(0));
        if width == self.width && height == self.height {
            return Ok(());
        }
        self.raster = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        if self.flattened > 0 {
            log::warn!(
                "Canvas resized to {width}x{height}; dropping {} flattened strokes",
                self.flattened
            );
        }
        self.lost = self.flattened;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Installs (or removes) the imported background image.
    pub fn set_background(&mut self, background: Option<BackgroundImage>) {
        self.background = background;
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Brings the raster layer in line with the history.
    ///
    /// New committed strokes are baked in. If strokes that were baked in have since
    /// been undone, the layer is rebuilt from the remaining history.
    pub fn sync(&mut self, history: &StrokeHistory) {
        if !self.flatten {
            return;
        }
        let committed = history.strokes();
        if committed.len() == self.flattened {
            return;
        }

        let ctx = match cairo::Context::new(&self.raster) {
            Ok(ctx) => ctx,
            Err(err) => {
                log::error!("Failed to open raster layer: {err}");
                return;
            }
        };

        if committed.len() < self.flattened {
            self.lost = self.lost.min(committed.len());
            log::debug!(
                "Rebuilding raster layer with {} strokes",
                committed.len() - self.lost
            );
            render::clear(&ctx);
            render::render_strokes(&ctx, &committed[self.lost..]);
        } else {
            render::render_strokes(&ctx, &committed[self.flattened..]);
        }
        self.flattened = committed.len();
    }

    /// Composites the background, raster layer and live strokes onto `ctx`.
    pub fn render(&mut self, ctx: &cairo::Context, history: &StrokeHistory) {
        self.sync(history);

        render::fill_background(ctx, self.background_color);
        if let Some(background) = &self.background {
            background.paint_cover(ctx, self.width as f64, self.height as f64);
        }

        if self.flattened > 0 {
            let _ = ctx.save();
            let painted = ctx
                .set_source_surface(&self.raster, 0.0, 0.0)
                .and_then(|_| ctx.paint());
            if let Err(err) = painted {
                log::warn!("Failed to paint raster layer: {err}");
            }
            let _ = ctx.restore();
        }

        render::render_strokes(ctx, history.render_items().skip(self.flattened));
    }

    /// Renders the full composited view into a new image (same content as on-screen).
    pub fn snapshot(&mut self, history: &StrokeHistory) -> Result<cairo::ImageSurface, cairo::Error> {
        let image = cairo::ImageSurface::create(cairo::Format::ARgb32, self.width, self.height)?;
        {
            let ctx = cairo::Context::new(&image)?;
            self.render(&ctx, history);
        }
        image.flush();
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};
    use crate::draw::stroke::Point;

    fn pixel(image: &mut cairo::ImageSurface, x: usize, y: usize) -> [u8; 4] {
        let stride = image.stride() as usize;
        let data = image.data().unwrap();
        let offset = y * stride + x * 4;
        // stored as native-endian ARGB32: B, G, R, A on little-endian
        [data[offset + 2], data[offset + 1], data[offset], data[offset + 3]]
    }

    fn commit_line(history: &mut StrokeHistory, color: Color, y: f64) {
        history.begin_stroke(color, 4.0);
        history.extend_stroke(Point::new(0.0, y));
        history.extend_stroke(Point::new(40.0, y));
        history.end_stroke(BLACK, 4.0);
    }

    #[test]
    fn renders_background_only_without_strokes() {
        let mut surface = CanvasSurface::new(40, 40, WHITE, false).unwrap();
        let history = StrokeHistory::new();
        let mut image = surface.snapshot(&history).unwrap();
        assert_eq!(pixel(&mut image, 5, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn strokes_paint_over_background() {
        let mut surface = CanvasSurface::new(40, 40, WHITE, false).unwrap();
        let mut history = StrokeHistory::new();
        commit_line(&mut history, RED, 10.0);
        let mut image = surface.snapshot(&history).unwrap();
        assert_eq!(pixel(&mut image, 20, 10), [255, 0, 0, 255]);
        assert_eq!(pixel(&mut image, 20, 30), [255, 255, 255, 255]);
    }

    #[test]
    fn flattening_bakes_committed_strokes() {
        let mut surface = CanvasSurface::new(40, 40, WHITE, true).unwrap();
        let mut history = StrokeHistory::new();
        commit_line(&mut history, RED, 10.0);
        commit_line(&mut history, BLACK, 30.0);

        let mut image = surface.snapshot(&history).unwrap();
        assert_eq!(surface.flattened_count(), 2);
        assert_eq!(pixel(&mut image, 20, 10), [255, 0, 0, 255]);
        assert_eq!(pixel(&mut image, 20, 30), [0, 0, 0, 255]);
    }

    #[test]
    fn undo_of_flattened_stroke_rebuilds_raster() {
        let mut surface = CanvasSurface::new(40, 40, WHITE, true).unwrap();
        let mut history = StrokeHistory::new();
        commit_line(&mut history, RED, 10.0);
        commit_line(&mut history, BLACK, 30.0);
        surface.sync(&history);

        history.undo();
        let mut image = surface.snapshot(&history).unwrap();
        assert_eq!(surface.flattened_count(), 1);
        assert_eq!(pixel(&mut image, 20, 10), [255, 0, 0, 255]);
        assert_eq!(pixel(&mut image, 20, 30), [255, 255, 255, 255]);
    }

    #[test]
    fn resize_drops_flattened_content() {
        let mut surface = CanvasSurface::new(40, 40, WHITE, true).unwrap();
        let mut history = StrokeHistory::new();
        commit_line(&mut history, RED, 10.0);
        surface.sync(&history);

        surface.resize(60, 60).unwrap();
        let mut image = surface.snapshot(&history).unwrap();
        assert_eq!((image.width(), image.height()), (60, 60));
        assert_eq!(pixel(&mut image, 20, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn undo_after_resize_does_not_restore_dropped_strokes() {
        let mut surface = CanvasSurface::new(40, 40, WHITE, true).unwrap();
        let mut history = StrokeHistory::new();
        commit_line(&mut history, RED, 10.0);
        surface.sync(&history);
        surface.resize(60, 60).unwrap();
        commit_line(&mut history, BLACK, 30.0);
        surface.sync(&history);
        assert_eq!(surface.flattened_count(), 2);

        history.undo();
        let mut image = surface.snapshot(&history).unwrap();

        assert_eq!(surface.flattened_count(), 1);
        assert_eq!(pixel(&mut image, 20, 10), [255, 255, 255, 255]);
        assert_eq!(pixel(&mut image, 20, 30), [255, 255, 255, 255]);
    }

    #[test]
    fn strokes_flattened_after_resize_survive_rebuild() {
        let mut surface = CanvasSurface::new(40, 40, WHITE, true).unwrap();
        let mut history = StrokeHistory::new();
        commit_line(&mut history, RED, 5.0);
        surface.sync(&history);
        surface.resize(50, 50).unwrap();
        commit_line(&mut history, BLACK, 20.0);
        commit_line(&mut history, RED, 35.0);
        surface.sync(&history);

        history.undo();
        let mut image = surface.snapshot(&history).unwrap();

        assert_eq!(pixel(&mut image, 20, 5), [255, 255, 255, 255]);
        assert_eq!(pixel(&mut image, 20, 20), [0, 0, 0, 255]);
        assert_eq!(pixel(&mut image, 20, 35), [255, 255, 255, 255]);
    }

    #[test]
    fn resize_keeps_unflattened_strokes() {
        let mut surface = CanvasSurface::new(40, 40, WHITE, false).unwrap();
        let mut history = StrokeHistory::new();
        commit_line(&mut history, RED, 10.0);

        surface.resize(50, 50).unwrap();
        let mut image = surface.snapshot(&history).unwrap();
        assert_eq!(pixel(&mut image, 20, 10), [255, 0, 0, 255]);
    }
}
