use glam::{DVec2, Vec2};
use gpui_area_chart::data_types::{
    AreaPlotConfig, ArrayRole, Brush, Column, Notation, Pen, PlotAxis, SharedAxis, SharedTable,
    Table,
};
use gpui_area_chart::plot_types::area::strip_runs;
use gpui_area_chart::plot_types::{AreaPlot, PlotRenderer};
use gpui_area_chart::rendering::DrawContext;
use gpui_area_chart::transform::ShiftScale;

/// Records draw calls instead of painting.
#[derive(Default)]
struct RecordingPainter {
    pens: Vec<Pen>,
    brushes: Vec<Brush>,
    strips: Vec<Vec<Vec2>>,
    rects: Vec<[f32; 4]>,
}

impl DrawContext for RecordingPainter {
    fn apply_pen(&mut self, pen: &Pen) {
        self.pens.push(*pen);
    }

    fn apply_brush(&mut self, brush: &Brush) {
        self.brushes.push(*brush);
    }

    fn draw_quad_strip(&mut self, points: &[Vec2]) {
        self.strips.push(points.to_vec());
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.rects.push([x, y, width, height]);
    }
}

fn band_table(y_high: Vec<f64>) -> SharedTable {
    let n = y_high.len();
    Table::new()
        .with_column(Column::new("x", (0..n).map(|i| i as f64).collect::<Vec<_>>()))
        .with_column(Column::new("low", vec![0.0; n]))
        .with_column(Column::new("high", y_high))
        .into_shared()
}

fn axes() -> (SharedAxis, SharedAxis) {
    (
        PlotAxis::new(0.0, 10.0).into_shared(),
        PlotAxis::new(0.0, 10.0).into_shared(),
    )
}

fn band_plot(table: &SharedTable, x_axis: &SharedAxis, y_axis: &SharedAxis) -> AreaPlot {
    let mut plot = AreaPlot::new().with_columns(Some("x"), "low", "high");
    plot.set_input(table);
    plot.set_axes(x_axis, y_axis);
    plot.update();
    plot
}

#[test]
fn test_strip_runs_chunking() {
    assert_eq!(strip_runs(&[], 5), vec![0..5]);
    assert_eq!(strip_runs(&[2], 5), vec![0..2, 3..5]);
    assert_eq!(strip_runs(&[1], 5), vec![2..5]);
    assert_eq!(strip_runs(&[3], 5), vec![0..3]);
    assert!(strip_runs(&[0, 1, 2], 3).is_empty());
    assert!(strip_runs(&[], 1).is_empty());
    assert_eq!(strip_runs(&[2, 5], 8), vec![0..2, 3..5, 6..8]);

    // Without bad rows the buffer needs more than two rows.
    assert!(strip_runs(&[], 2).is_empty());
    assert_eq!(strip_runs(&[], 3), vec![0..3]);
    assert!(strip_runs(&[], 0).is_empty());
}

#[test]
fn test_two_clean_rows_draw_nothing() {
    let table = band_table(vec![1.0, 2.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);

    let mut painter = RecordingPainter::default();
    assert!(plot.paint(&mut painter));
    assert!(painter.strips.is_empty());
}

#[test]
fn test_empty_columns_degrade_to_no_result() {
    let table = band_table(Vec::new());
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    assert!(plot.cache().is_input_data_valid());

    let mut painter = RecordingPainter::default();
    assert!(!plot.paint(&mut painter));
    assert!(painter.strips.is_empty());
    assert!(plot.bounds().expect("bound columns").is_empty());
    assert!(plot.nearest_point(Vec2::ZERO, Vec2::splat(10.0)).is_none());
    // No point pair to read, so the area tokens stay as written.
    assert_eq!(plot.tooltip_label(DVec2::ZERO, 0, None), ": 0.00:(%a, %b)");
}

#[test]
fn test_swapping_in_an_older_log_axis_recomputes() {
    let log_y = PlotAxis::new(1.0, 1000.0).into_shared();
    log_y.write().set_log_scale(true);

    let table = Table::new()
        .with_column(Column::new("x", vec![0.0, 1.0, 2.0]))
        .with_column(Column::new("low", vec![1.0, 1.0, 1.0]))
        .with_column(Column::new("high", vec![10.0, 100.0, 1000.0]))
        .into_shared();
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    plot.update_cache();
    assert_eq!(plot.cache().points()[1].y, 10.0);

    // Without update(): the cached points must still be rebuilt.
    plot.set_axes(&x_axis, &log_y);
    plot.update_cache();
    assert!((plot.cache().points()[1].y - 1.0).abs() < 1e-5);

    plot.set_axes(&x_axis, &y_axis);
    plot.update();
    plot.update_cache();
    assert_eq!(plot.cache().points()[1].y, 10.0);
}

#[test]
fn test_paint_splits_strip_around_bad_row() {
    let table = band_table(vec![1.0, 2.0, f64::NAN, 2.0, 1.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);

    let mut painter = RecordingPainter::default();
    assert!(plot.paint(&mut painter));

    assert_eq!(plot.cache().bad_points(), &[2]);
    assert_eq!(painter.strips.len(), 2);
    assert_eq!(
        painter.strips[0],
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 2.0),
        ]
    );
    assert_eq!(
        painter.strips[1],
        vec![
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 2.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 1.0),
        ]
    );
    assert_eq!(painter.pens.len(), 1);
    assert_eq!(painter.brushes.len(), 1);
    for strip in &painter.strips {
        assert!(strip.iter().all(|p| p.is_finite()), "Strips never contain bad points");
    }
}

#[test]
fn test_paint_without_input_draws_nothing() {
    let mut plot = AreaPlot::new().with_columns(None, "low", "high");
    plot.update();
    let mut painter = RecordingPainter::default();
    assert!(!plot.paint(&mut painter));
    assert!(painter.strips.is_empty());
    assert!(plot.bounds().is_none());
    assert!(plot.nearest_point(Vec2::ZERO, Vec2::ONE).is_none());
}

#[test]
fn test_missing_y_column_is_not_an_error() {
    let table = band_table(vec![1.0, 2.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = AreaPlot::new().with_columns(Some("x"), "low", "nope");
    plot.set_input(&table);
    plot.set_axes(&x_axis, &y_axis);
    plot.update();

    assert!(!plot.cache().is_input_data_valid());
    assert!(!plot.paint(&mut RecordingPainter::default()));
}

#[test]
fn test_invisible_plot_is_inert() {
    let table = band_table(vec![1.0, 2.0, 3.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    plot.set_visible(false);

    assert!(!plot.paint(&mut RecordingPainter::default()));
    assert!(plot.bounds().is_none());
    assert!(plot.nearest_point(Vec2::new(1.0, 0.0), Vec2::ONE).is_none());
}

#[test]
fn test_dropping_table_resets_on_update() {
    let table = band_table(vec![1.0, 2.0, 3.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    assert!(plot.cache().is_input_data_valid());

    drop(table);
    plot.update();
    assert!(!plot.cache().is_input_data_valid());
    assert_eq!(plot.cache().num_points(), 0);
}

#[test]
fn test_update_follows_table_changes() {
    let table = band_table(vec![1.0, 2.0, 3.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    assert_eq!(plot.bounds().map(|b| b.y.max), Some(3.0));

    table
        .read()
        .column_by_name("high")
        .expect("high column")
        .write()
        .set_values(vec![1.0, 20.0, 3.0]);

    plot.update();
    assert_eq!(plot.bounds().map(|b| b.y.max), Some(20.0));
}

#[test]
fn test_update_is_skipped_when_nothing_changed() {
    let table = band_table(vec![1.0, 2.0, 3.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    plot.update_cache();
    let stamp = plot.cache().points_modified();

    plot.update();
    plot.update_cache();
    assert_eq!(plot.cache().points_modified(), stamp);
}

#[test]
fn test_axis_log_change_recomputes() {
    let table = band_table(vec![10.0, 100.0, 1000.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    plot.update_cache();
    assert_eq!(plot.cache().points()[3].y, 100.0);

    {
        let mut y = y_axis.write();
        y.set_range(1.0, 1000.0);
        y.set_log_scale(true);
    }
    plot.update_cache();

    // Every low sample is 0, so log10 turns every row bad.
    assert_eq!(plot.cache().bad_points(), &[0, 1, 2]);
    let mut painter = RecordingPainter::default();
    assert!(plot.paint(&mut painter));
    assert!(painter.strips.is_empty());
}

#[test]
fn test_use_index_for_x_series() {
    let table = Table::new()
        .with_column(Column::new("x", vec![100.0, 200.0, 300.0]))
        .with_column(Column::new("low", vec![0.0, 0.0, 0.0]))
        .with_column(Column::new("high", vec![1.0, 1.0, 1.0]))
        .into_shared();
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    assert_eq!(plot.bounds().map(|b| b.x.max), Some(300.0));

    plot.set_use_index_for_x_series(true);
    plot.update();
    let bounds = plot.bounds().expect("bounds");
    assert_eq!((bounds.x.min, bounds.x.max), (0.0, 2.0));
}

#[test]
fn test_valid_point_mask_from_table() {
    let table = band_table(vec![1.0, 2.0, 3.0, 4.0]);
    table
        .write()
        .add_column(Column::new("valid", vec![1u8, 1, 0, 1]));
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    plot.set_valid_point_mask_name("valid");
    plot.update();

    let mut painter = RecordingPainter::default();
    assert!(plot.paint(&mut painter));
    assert_eq!(plot.cache().bad_points(), &[2]);
    assert_eq!(painter.strips.len(), 1);
    assert_eq!(painter.strips[0].len(), 4);
    assert_eq!(plot.bounds().map(|b| b.y.max), Some(4.0));
}

#[test]
fn test_nearest_point_through_facade() {
    let table = band_table(vec![1.0, 2.0, 3.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);

    let hit = plot
        .nearest_point(Vec2::new(2.0, 3.0), Vec2::splat(0.25))
        .expect("high point of row 2");
    assert_eq!(hit.index, 5);
    assert_eq!(hit.location, Vec2::new(2.0, 3.0));
}

#[test]
fn test_tooltip_substitutes_low_and_high() {
    let table = band_table(vec![1.5, 2.25, 3.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    plot.set_label("band");

    let text = plot.tooltip_label(DVec2::new(1.0, 2.25), 3, None);
    assert_eq!(text, "band: 1.00:(0.00, 2.25)");

    // Series index 2 addresses the same row as 3.
    assert_eq!(plot.tooltip_label(DVec2::new(1.0, 0.0), 2, None), text);
}

#[test]
fn test_tooltip_unknown_tokens_pass_through() {
    let table = band_table(vec![1.0, 2.0]);
    let (x_axis, y_axis) = axes();
    let mut plot = band_plot(&table, &x_axis, &y_axis);
    plot.set_tooltip_label_format("%q %a-%b %s %z");

    let text = plot.tooltip_label(DVec2::ZERO, 0, Some(7));
    assert_eq!(text, "%q 0.00-1.00 7 %z");
}

#[test]
fn test_tooltip_undoes_shift_scale_and_log() {
    let table = Table::new()
        .with_column(Column::new("low", vec![10.0, 100.0]))
        .with_column(Column::new("high", vec![1000.0, 1000.0]))
        .into_shared();
    let x_axis = PlotAxis::new(0.0, 1.0).into_shared();
    let y_axis = PlotAxis::new(1.0, 1000.0).into_shared();
    {
        let mut y = y_axis.write();
        y.set_log_scale(true);
        y.set_precision(1);
    }

    let mut plot = AreaPlot::new().with_columns(None, "low", "high");
    plot.set_input(&table);
    plot.set_axes(&x_axis, &y_axis);
    plot.set_shift_scale(ShiftScale::new(0.0, 0.0, 1.0, 0.5));
    plot.set_tooltip_label_format("%a/%b");
    plot.update();

    assert_eq!(plot.tooltip_label(DVec2::ZERO, 1, None), "10.0/1000.0");

    y_axis.write().set_notation(Notation::Scientific);
    assert_eq!(plot.tooltip_label(DVec2::ZERO, 2, None), "1.0e2/1.0e3");
}

#[test]
fn test_paint_legend_draws_one_rect() {
    let mut plot = AreaPlot::new();
    let mut painter = RecordingPainter::default();
    assert!(plot.paint_legend(&mut painter, [0.0, 0.0, 10.0, 5.0], 0));
    assert_eq!(painter.rects, vec![[0.0, 0.0, 10.0, 5.0]]);
    assert_eq!(painter.pens.len(), 1);
    assert_eq!(painter.brushes.len(), 1);
}

#[test]
fn test_set_input_array_rebinds_columns() {
    let table = Table::new()
        .with_column(Column::new("a", vec![0.0, 0.0]))
        .with_column(Column::new("b", vec![1.0, 1.0]))
        .with_column(Column::new("c", vec![5.0, 5.0]))
        .into_shared();
    let (x_axis, y_axis) = axes();
    let mut plot = AreaPlot::new();
    plot.set_input(&table);
    plot.set_axes(&x_axis, &y_axis);
    plot.set_input_array(ArrayRole::YLow, "a");
    plot.set_input_array(ArrayRole::YHigh, "b");
    plot.update();
    assert_eq!(plot.bounds().map(|b| b.y.max), Some(1.0));

    plot.set_input_array(ArrayRole::YHigh, "c");
    plot.update();
    assert_eq!(plot.bounds().map(|b| b.y.max), Some(5.0));
}

#[test]
fn test_config_json_roundtrip() {
    let mut config = AreaPlotConfig::default();
    config.label = "range".to_string();
    config.y_low_column = Some("min".to_string());
    config.y_high_column = Some("max".to_string());
    config.brush.color = gpui::rgba(0x336699ff).into();

    let json = config.to_json().expect("serialize");
    let parsed = AreaPlotConfig::from_json(&json).expect("parse");
    assert_eq!(parsed.label, "range");
    assert_eq!(parsed.y_high_column.as_deref(), Some("max"));
    assert_eq!(parsed.tooltip_label_format, "%l: %x:(%a, %b)");
    assert!(json.contains("\"#"), "colors are stored as hex: {json}");

    let partial = AreaPlotConfig::from_json(r#"{ "use_index_for_x_series": true }"#).expect("parse");
    assert!(partial.use_index_for_x_series);
    assert!(partial.visible);

    assert!(AreaPlotConfig::from_json(r##"{ "pen": { "color": "#xyz", "width": 1.0 } }"##).is_err());
}
