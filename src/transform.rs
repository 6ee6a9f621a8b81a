//! Data-space to plot-space conversion and plot-space to pixel projection.

use crate::range::DataRange;
use crate::scales::ChartScale;
use crate::utils::PixelsExt;
use gpui::*;

/// Affine pre-transform applied to raw values before plotting:
/// `plot = (value + shift) * scale`, per axis.
///
/// Axes pick it so that plotted values stay within single-precision range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShiftScale {
    pub shift_x: f64,
    pub shift_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for ShiftScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ShiftScale {
    pub const IDENTITY: Self = Self {
        shift_x: 0.0,
        shift_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    pub fn new(shift_x: f64, shift_y: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            shift_x,
            shift_y,
            scale_x,
            scale_y,
        }
    }

    /// Shift that moves the data minimum to the origin, leaving the scale
    /// at 1. Empty ranges get no shift.
    pub fn fit(x: DataRange, y: DataRange) -> Self {
        let shift = |r: DataRange| if r.is_empty() { 0.0 } else { -r.min };
        Self::new(shift(x), shift(y), 1.0, 1.0)
    }

    pub fn x_pair(&self) -> (f64, f64) {
        (self.shift_x, self.scale_x)
    }

    pub fn y_pair(&self) -> (f64, f64) {
        (self.shift_y, self.scale_y)
    }

    pub fn apply_x(&self, value: f64) -> f64 {
        (value + self.shift_x) * self.scale_x
    }

    pub fn apply_y(&self, value: f64) -> f64 {
        (value + self.shift_y) * self.scale_y
    }

    pub fn invert_x(&self, value: f64) -> f64 {
        value / self.scale_x - self.shift_x
    }

    pub fn invert_y(&self, value: f64) -> f64 {
        value / self.scale_y - self.shift_y
    }
}

/// Writes `(value + shift) * scale`, or its base-10 logarithm in log mode,
/// into every `stride`-th slot of `dest`.
///
/// No domain check is made in log mode: non-positive inputs produce NaN or
/// -inf, which callers treat as bad points. Writing stops at whichever of
/// `dest` or `values` runs out first.
pub fn copy_to_points(
    dest: &mut [f32],
    stride: usize,
    values: impl Iterator<Item = f64>,
    (shift, scale): (f64, f64),
    use_log: bool,
) {
    let slots = dest.iter_mut().step_by(stride).zip(values);
    if use_log {
        for (slot, v) in slots {
            *slot = (((v + shift) * scale) as f32).log10();
        }
    } else {
        for (slot, v) in slots {
            *slot = ((v + shift) * scale) as f32;
        }
    }
}

/// `0, 1, .., n-1` as doubles, the implicit X column of index-based plots.
pub fn index_sequence(n: usize) -> impl Iterator<Item = f64> {
    (0..n).map(|i| i as f64)
}

/// Projects plot-space coordinates into window pixels.
#[derive(Clone)]
pub struct PlotTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    pub bounds: Bounds<Pixels>,
}

impl PlotTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, bounds: Bounds<Pixels>) -> Self {
        Self {
            x_scale,
            y_scale,
            bounds,
        }
    }

    /// Transform filling `bounds` with the given plot-space extents, Y up.
    pub fn fit(x_domain: (f64, f64), y_domain: (f64, f64), bounds: Bounds<Pixels>) -> Self {
        let width = bounds.size.width.as_f32();
        let height = bounds.size.height.as_f32();
        Self::new(
            ChartScale::new_linear(x_domain, (0.0, width)),
            ChartScale::new_linear(y_domain, (height, 0.0)),
            bounds,
        )
    }

    pub fn data_to_screen(&self, point: Point<f64>) -> Point<Pixels> {
        Point::new(
            self.bounds.origin.x + px(self.x_scale.map(point.x)),
            self.bounds.origin.y + px(self.y_scale.map(point.y)),
        )
    }

    pub fn screen_to_data(&self, point: Point<Pixels>) -> Point<f64> {
        Point::new(
            self.x_scale
                .invert((point.x - self.bounds.origin.x).as_f32()),
            self.y_scale
                .invert((point.y - self.bounds.origin.y).as_f32()),
        )
    }

    /// Plot-space extent of one pixel in each direction, the usual
    /// hit-test tolerance.
    pub fn pixel_tolerance(&self, pixels: f32) -> glam::Vec2 {
        let origin = self.screen_to_data(self.bounds.origin);
        let offset = self.screen_to_data(Point::new(
            self.bounds.origin.x + px(pixels),
            self.bounds.origin.y + px(pixels),
        ));
        glam::Vec2::new(
            (offset.x - origin.x).abs() as f32,
            (offset.y - origin.y).abs() as f32,
        )
    }
}
