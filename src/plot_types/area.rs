//! Area plot: a filled band between two curves.

use crate::data_types::{
    AreaPlotConfig, ArrayRole, AxisState, ModifiedStamp, SharedAxis, SharedColumn, SharedTable,
    Table, WeakAxis, WeakTable,
};
use crate::geometry_cache::{DataBounds, GeometryCache};
use crate::rendering::DrawContext;
use crate::spatial_index::NearestPoint;
use crate::transform::ShiftScale;
use glam::{DVec2, Vec2};
use gpui::Hsla;
use std::ops::Range;
use std::sync::{Arc, Weak};
use tracing::debug;

use super::{format_number, format_tooltip, substitute_tokens, LegendRect, PlotRenderer, TooltipContext};

/// Filled band between two curves, `y_low(x)` and `y_high(x)`.
///
/// The plot reads three columns from its input table and draws the band as
/// quad strips, skipping rows that are masked out or not finite. Geometry is
/// rebuilt lazily: [`AreaPlot::update`] rebinds columns when the table or the
/// configuration changed, and painting or hit-testing recomputes points only
/// when the data, an axis or the shift/scale moved on.
pub struct AreaPlot {
    config: AreaPlotConfig,
    input: Option<WeakTable>,
    x_axis: Option<WeakAxis>,
    y_axis: Option<WeakAxis>,
    shift_scale: ShiftScale,
    cache: GeometryCache,
    stamp: ModifiedStamp,
    update_time: ModifiedStamp,
}

impl Default for AreaPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaPlot {
    pub fn new() -> Self {
        Self::with_config(AreaPlotConfig::default())
    }

    pub fn with_config(config: AreaPlotConfig) -> Self {
        let mut stamp = ModifiedStamp::new();
        stamp.modified();
        Self {
            config,
            input: None,
            x_axis: None,
            y_axis: None,
            shift_scale: ShiftScale::IDENTITY,
            cache: GeometryCache::new(),
            stamp,
            update_time: ModifiedStamp::new(),
        }
    }

    /// Convenience for the common case of named columns.
    pub fn with_columns(mut self, x: Option<&str>, y_low: &str, y_high: &str) -> Self {
        self.config.x_column = x.map(str::to_string);
        self.config.y_low_column = Some(y_low.to_string());
        self.config.y_high_column = Some(y_high.to_string());
        self.stamp.modified();
        self
    }

    pub fn config(&self) -> &AreaPlotConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AreaPlotConfig) {
        if self.config != config {
            self.config = config;
            self.stamp.modified();
        }
    }

    /// The table is held weakly; dropping it empties the plot on the next
    /// [`AreaPlot::update`].
    pub fn set_input(&mut self, table: &SharedTable) {
        self.input = Some(Arc::downgrade(table));
        self.stamp.modified();
    }

    /// Binds the axes. Switching to other axis objects invalidates the
    /// points, since the new axes may be older than the cached geometry.
    pub fn set_axes(&mut self, x_axis: &SharedAxis, y_axis: &SharedAxis) {
        let x_axis = Arc::downgrade(x_axis);
        let y_axis = Arc::downgrade(y_axis);
        let same = |old: &Option<WeakAxis>, new: &WeakAxis| old.as_ref().is_some_and(|o| o.ptr_eq(new));
        if same(&self.x_axis, &x_axis) && same(&self.y_axis, &y_axis) {
            return;
        }
        self.x_axis = Some(x_axis);
        self.y_axis = Some(y_axis);
        self.cache.invalidate_points();
        self.stamp.modified();
    }

    pub fn shift_scale(&self) -> ShiftScale {
        self.shift_scale
    }

    pub fn set_shift_scale(&mut self, shift_scale: ShiftScale) {
        self.shift_scale = shift_scale;
    }

    pub fn set_input_array(&mut self, role: ArrayRole, name: impl Into<String>) {
        let name = Some(name.into());
        if self.config.column(role) != name.as_deref() {
            self.config.set_column(role, name);
            self.stamp.modified();
        }
    }

    pub fn set_use_index_for_x_series(&mut self, use_index: bool) {
        if self.config.use_index_for_x_series != use_index {
            self.config.use_index_for_x_series = use_index;
            self.stamp.modified();
        }
    }

    pub fn set_valid_point_mask_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.config.valid_point_mask_name != name {
            self.config.valid_point_mask_name = name;
            self.stamp.modified();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.config.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.config.visible = visible;
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.config.label = label.into();
    }

    pub fn set_tooltip_label_format(&mut self, format: impl Into<String>) {
        self.config.tooltip_label_format = format.into();
    }

    /// Sets both the fill and the outline color.
    pub fn set_color(&mut self, color: Hsla) {
        self.config.brush.color = color;
        self.config.pen.color = color;
    }

    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    /// Recomputes plot-space points if the data, an axis or the shift/scale
    /// changed since the last call.
    pub fn update_cache(&mut self) {
        if !self.config.visible || !self.cache.is_input_data_valid() {
            return;
        }
        let x_axis = axis_state(&self.x_axis);
        let y_axis = axis_state(&self.y_axis);
        self.cache.update_cache(self.shift_scale, x_axis, y_axis);
    }

    fn has_geometry(&self) -> bool {
        self.config.visible && self.cache.is_input_data_valid() && self.cache.num_points() > 0
    }

    fn input_array(&self, table: &Table, role: ArrayRole) -> Option<SharedColumn> {
        let name = self.config.column(role)?;
        let column = table.column_by_name(name);
        if column.is_none() {
            debug!(column = name, ?role, "area plot input column not found");
        }
        column
    }

    fn valid_point_mask(&self, table: &Table) -> Option<SharedColumn> {
        let name = &self.config.valid_point_mask_name;
        if name.is_empty() {
            return None;
        }
        let mask = table.column_by_name(name).filter(|c| c.read().is_mask());
        if mask.is_none() {
            debug!(column = %name, "valid point mask missing or not an 8-bit column");
        }
        mask
    }

    /// Raw Y value of a stored plot-space coordinate.
    fn raw_y(&self, plot_y: f32, log_scale: bool) -> f64 {
        let v = if log_scale {
            10f64.powf(plot_y as f64)
        } else {
            plot_y as f64
        };
        self.cache
            .shift_scale()
            .unwrap_or(self.shift_scale)
            .invert_y(v)
    }
}

fn axis_state(axis: &Option<WeakAxis>) -> AxisState {
    match axis {
        Some(axis) => AxisState::of(axis),
        None => AxisState::default(),
    }
}

fn upgrade_axis(axis: &Option<WeakAxis>) -> Option<SharedAxis> {
    axis.as_ref().and_then(Weak::upgrade)
}

/// Row ranges of the quad strips drawn for `rows` rows with the given
/// ascending bad rows: every maximal run of good rows at least two rows long.
/// Without any bad row the whole buffer needs more than two rows.
pub fn strip_runs(bad_points: &[usize], rows: usize) -> Vec<Range<usize>> {
    let mut runs = Vec::with_capacity(bad_points.len() + 1);
    let mut start = 0;
    for &end in bad_points {
        if end >= start + 2 {
            runs.push(start..end);
        }
        start = end + 1;
    }
    let trailing_min = if bad_points.is_empty() { 3 } else { 2 };
    if rows >= start + trailing_min {
        runs.push(start..rows);
    }
    runs
}

impl PlotRenderer for AreaPlot {
    fn update(&mut self) {
        if !self.config.visible {
            return;
        }

        let Some(table) = self.input.as_ref().and_then(Weak::upgrade) else {
            debug!("area plot update called with no input table set");
            self.cache.reset();
            return;
        };
        let table = table.read();

        let last_update = self.update_time.get();
        if table.modified() > last_update || self.stamp.get() > last_update {
            self.cache.reset();
            let mask = self.valid_point_mask(&table);
            self.cache.set_valid_point_mask(mask.as_ref());

            let x = if self.config.use_index_for_x_series {
                None
            } else {
                self.input_array(&table, ArrayRole::X)
            };
            let y_low = self.input_array(&table, ArrayRole::YLow);
            let y_high = self.input_array(&table, ArrayRole::YHigh);
            self.cache
                .set_points(x.as_ref(), y_low.as_ref(), y_high.as_ref());
            self.update_time.modified();
        }
    }

    fn paint(&mut self, painter: &mut dyn DrawContext) -> bool {
        self.update_cache();
        if !self.has_geometry() {
            return false;
        }
        painter.apply_pen(&self.config.pen);
        painter.apply_brush(&self.config.brush);

        let points = self.cache.points();
        for run in strip_runs(self.cache.bad_points(), points.len() / 2) {
            painter.draw_quad_strip(&points[run.start * 2..run.end * 2]);
        }
        true
    }

    fn paint_legend(&mut self, painter: &mut dyn DrawContext, rect: LegendRect, _legend_index: usize) -> bool {
        painter.apply_pen(&self.config.pen);
        painter.apply_brush(&self.config.brush);
        painter.draw_rect(rect[0], rect[1], rect[2], rect[3]);
        true
    }

    fn bounds(&mut self) -> Option<DataBounds> {
        self.update_cache();
        if !self.config.visible || !self.cache.is_input_data_valid() {
            return None;
        }
        Some(self.cache.data_bounds())
    }

    fn nearest_point(&mut self, point: Vec2, tolerance: Vec2) -> Option<NearestPoint> {
        self.update_cache();
        if !self.has_geometry() {
            return None;
        }
        self.cache.nearest_point(point, tolerance)
    }

    fn tooltip_label(&mut self, plot_pos: DVec2, series_index: usize, segment_index: Option<usize>) -> String {
        self.update_cache();

        let x_axis = upgrade_axis(&self.x_axis);
        let y_axis = upgrade_axis(&self.y_axis);
        let x_axis = x_axis.as_ref().map(|a| a.read());
        let y_axis = y_axis.as_ref().map(|a| a.read());
        let y_log = y_axis.as_ref().is_some_and(|a| a.log_scale_active());

        let ctx = TooltipContext {
            label: &self.config.label,
            indexed_labels: &self.config.indexed_labels,
            x_axis: x_axis.as_deref(),
            y_axis: y_axis.as_deref(),
        };
        let format = format_tooltip(
            &self.config.tooltip_label_format,
            &ctx,
            plot_pos,
            series_index,
            segment_index,
        );

        // Both slots of the hit row: low sample, then high sample.
        let idx = (series_index / 2) * 2;
        let points = self.cache.points();
        let low_high = points.get(idx).zip(points.get(idx + 1)).map(|(low, high)| {
            (
                format_number(y_axis.as_deref(), self.raw_y(low.y, y_log)),
                format_number(y_axis.as_deref(), self.raw_y(high.y, y_log)),
            )
        });

        substitute_tokens(&format, |token, out| match (token, &low_high) {
            ('a', Some((low, _))) => {
                out.push_str(low);
                true
            }
            ('b', Some((_, high))) => {
                out.push_str(high);
                true
            }
            _ => false,
        })
    }
}
