//! Cairo-based rendering functions for strokes.
//!
//! These functions hold no state: they paint whatever history they are given, so
//! input handling and drawing stay decoupled.

use super::color::Color;
use super::stroke::Stroke;

/// Renders a sequence of strokes to a Cairo context, in the order given.
///
/// The first stroke ends up at the bottom; later strokes paint over earlier ones.
pub fn render_strokes<'a>(ctx: &cairo::Context, strokes: impl IntoIterator<Item = &'a Stroke>) {
    for stroke in strokes {
        render_stroke(ctx, stroke);
    }
}

/// Renders a single freehand stroke as a polyline with round caps and joins.
///
/// Empty strokes draw nothing. A stroke with a single point draws a round dot
/// of the stroke's thickness.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke) {
    let Some((first, rest)) = stroke.points().split_first() else {
        return;
    };

    stroke.color().apply(ctx);
    ctx.set_line_width(stroke.thickness());
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    if rest.is_empty() {
        // Degenerate segment: Cairo draws it as a dot with round caps
        ctx.line_to(first.x, first.y);
    }
    for point in rest {
        ctx.line_to(point.x, point.y);
    }

    if let Err(err) = ctx.stroke() {
        log::warn!("Failed to stroke path: {err}");
    }
}

/// Fills the whole target with a solid color, replacing whatever was there.
pub fn fill_background(ctx: &cairo::Context, color: Color) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    color.apply(ctx);
    let _ = ctx.paint(); // Ignore errors - a failed paint leaves the previous content
    let _ = ctx.restore();
}

/// Clears the target to fully transparent pixels.
pub fn clear(ctx: &cairo::Context) {
    fill_background(ctx, super::color::TRANSPARENT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED};
    use crate::draw::stroke::Point;
    use cairo::{Context, Format, ImageSurface};

    fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> [u8; 4] {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
    }

    #[test]
    fn empty_stroke_draws_nothing() {
        let mut surface = ImageSurface::create(Format::ARgb32, 20, 20).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            render_stroke(&ctx, &Stroke::new(BLACK, 5.0));
        }
        surface.flush();
        let data = surface.data().unwrap();
        assert!(data.iter().all(|b| *b == 0));
    }

    #[test]
    fn single_point_stroke_draws_dot() {
        let mut surface = ImageSurface::create(Format::ARgb32, 20, 20).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            let stroke = Stroke::with_points(BLACK, 8.0, vec![Point::new(10.0, 10.0)]);
            render_stroke(&ctx, &stroke);
        }
        surface.flush();
        assert_eq!(pixel(&mut surface, 10, 10)[3], 255);
        assert_eq!(pixel(&mut surface, 0, 0)[3], 0);
    }

    #[test]
    fn later_strokes_paint_over_earlier_ones() {
        let mut surface = ImageSurface::create(Format::ARgb32, 20, 20).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            let line = vec![Point::new(0.0, 10.0), Point::new(20.0, 10.0)];
            let strokes = [
                Stroke::with_points(BLACK, 6.0, line.clone()),
                Stroke::with_points(RED, 6.0, line),
            ];
            render_strokes(&ctx, &strokes);
        }
        surface.flush();
        let [b, g, r, a] = pixel(&mut surface, 10, 10);
        assert_eq!((r, g, b, a), (255, 0, 0, 255));
    }

    #[test]
    fn fill_background_replaces_content() {
        let mut surface = ImageSurface::create(Format::ARgb32, 4, 4).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            fill_background(&ctx, RED);
            clear(&ctx);
        }
        surface.flush();
        assert_eq!(pixel(&mut surface, 1, 1), [0, 0, 0, 0]);
    }
}
