//! Plot types and the common tooltip formatting.

pub mod area;

pub use area::AreaPlot;

use crate::data_types::PlotAxis;
use crate::geometry_cache::DataBounds;
use crate::rendering::DrawContext;
use crate::spatial_index::NearestPoint;
use glam::{DVec2, Vec2};

/// Legend swatch rectangle, `[x, y, width, height]` in legend space.
pub type LegendRect = [f32; 4];

/// A chart item that is refreshed from its input table, then painted and
/// hit-tested.
pub trait PlotRenderer: Send + Sync {
    /// Re-reads the input table if it, or the plot configuration, changed.
    fn update(&mut self);

    /// Paints the plot. Returns `false` when there was nothing to draw.
    fn paint(&mut self, painter: &mut dyn DrawContext) -> bool;

    fn paint_legend(&mut self, painter: &mut dyn DrawContext, rect: LegendRect, legend_index: usize) -> bool;

    /// Unscaled data bounds for auto-fitting axes.
    fn bounds(&mut self) -> Option<DataBounds>;

    /// Hit-test in plot space, see [`crate::spatial_index::SortedPoints::nearest`].
    fn nearest_point(&mut self, point: Vec2, tolerance: Vec2) -> Option<NearestPoint>;

    /// Tooltip text for a hit at `plot_pos` (raw data coordinates).
    fn tooltip_label(&mut self, plot_pos: DVec2, series_index: usize, segment_index: Option<usize>) -> String;
}

/// Formats `value` the way `axis` labels its ticks, or with two decimals
/// when there is no axis.
pub fn format_number(axis: Option<&PlotAxis>, value: f64) -> String {
    match axis {
        Some(axis) => axis.format_number(value),
        None => format!("{:.2}", value),
    }
}

/// What the common tooltip tokens expand to.
pub struct TooltipContext<'a> {
    pub label: &'a str,
    pub indexed_labels: &'a [String],
    pub x_axis: Option<&'a PlotAxis>,
    pub y_axis: Option<&'a PlotAxis>,
}

/// Expands `%x`, `%y`, `%l`, `%i` and `%s` in `format`.
///
/// Any other `%c` is copied through unchanged so that plot types can expand
/// their own tokens afterwards.
pub fn format_tooltip(
    format: &str,
    ctx: &TooltipContext<'_>,
    plot_pos: DVec2,
    series_index: usize,
    segment_index: Option<usize>,
) -> String {
    substitute_tokens(format, |token, out| match token {
        'x' => {
            out.push_str(&format_number(ctx.x_axis, plot_pos.x));
            true
        }
        'y' => {
            out.push_str(&format_number(ctx.y_axis, plot_pos.y));
            true
        }
        'l' => {
            out.push_str(ctx.label);
            true
        }
        'i' => {
            if let Some(label) = ctx.indexed_labels.get(series_index) {
                out.push_str(label);
            }
            true
        }
        's' => {
            if let Some(segment) = segment_index {
                out.push_str(&segment.to_string());
            }
            true
        }
        _ => false,
    })
}

/// Walks `format`, handing the character after each `%` to `expand`. When
/// `expand` returns `false` the `%` and the character are kept verbatim.
pub(crate) fn substitute_tokens(format: &str, mut expand: impl FnMut(char, &mut String) -> bool) -> String {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        // A trailing '%' has nothing to escape and is dropped.
        if let Some(token) = chars.next() {
            if !expand(token, &mut out) {
                out.push('%');
                out.push(token);
            }
        }
    }
    out
}
