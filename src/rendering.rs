//! Drawing backends for plots.

use crate::data_types::{Brush, Pen};
use crate::transform::PlotTransform;
use crate::utils::PixelsExt;
use gpui::*;

/// The drawing operations a plot needs. Coordinates are in plot space;
/// backends project them to their own surface.
pub trait DrawContext {
    fn apply_pen(&mut self, pen: &Pen);

    fn apply_brush(&mut self, brush: &Brush);

    /// Fills the strip whose quads are `(p[2i], p[2i+1], p[2i+3], p[2i+2])`.
    fn draw_quad_strip(&mut self, points: &[glam::Vec2]);

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}

/// Paints into a GPUI window.
pub struct GpuiPainter<'a> {
    window: &'a mut Window,
    transform: PlotTransform,
    pen: Pen,
    brush: Brush,
}

impl<'a> GpuiPainter<'a> {
    pub fn new(window: &'a mut Window, transform: PlotTransform) -> Self {
        Self {
            window,
            transform,
            pen: Pen::default(),
            brush: Brush::default(),
        }
    }

    fn to_screen(&self, p: glam::Vec2) -> Point<Pixels> {
        self.transform
            .data_to_screen(Point::new(p.x as f64, p.y as f64))
    }
}

impl DrawContext for GpuiPainter<'_> {
    fn apply_pen(&mut self, pen: &Pen) {
        self.pen = *pen;
    }

    fn apply_brush(&mut self, brush: &Brush) {
        self.brush = *brush;
    }

    fn draw_quad_strip(&mut self, points: &[glam::Vec2]) {
        if points.len() < 4 {
            return;
        }
        for quad in points.windows(4).step_by(2) {
            let mut builder = PathBuilder::fill();
            builder.move_to(self.to_screen(quad[0]));
            builder.line_to(self.to_screen(quad[1]));
            builder.line_to(self.to_screen(quad[3]));
            builder.line_to(self.to_screen(quad[2]));
            builder.line_to(self.to_screen(quad[0]));

            if let Ok(path) = builder.build() {
                self.window.paint_path(path, self.brush.color);
            }
        }
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let a = self.to_screen(glam::Vec2::new(x, y));
        let b = self.to_screen(glam::Vec2::new(x + width, y + height));
        let (ax, ay) = (a.x.as_f32(), a.y.as_f32());
        let (bx, by) = (b.x.as_f32(), b.y.as_f32());
        // Screen Y grows downwards, so the corners may come out swapped.
        let rect = Bounds::new(
            Point::new(px(ax.min(bx)), px(ay.min(by))),
            Size::new(px((bx - ax).abs()), px((by - ay).abs())),
        );
        self.window.paint_quad(fill(rect, self.brush.color));
        self.window
            .paint_quad(outline(rect, self.pen.color, BorderStyle::Solid));
    }
}
