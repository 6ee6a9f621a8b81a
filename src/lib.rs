//! gpui_area_chart: filled band plots ("area between two curves") for GPUI charts
//!
//! An [`AreaPlot`] reads X, Y-low and Y-high columns from a [`Table`], turns
//! them into a quad strip in plot space, skips masked or non-finite rows, and
//! answers bounds and nearest-point queries for axis fitting and tooltips.

pub mod data_types;
pub mod geometry_cache;
pub mod plot_types;
pub mod polars_source;
pub mod range;
pub mod rendering;
pub mod scales;
pub mod spatial_index;
pub mod transform;
pub mod utils;

pub use data_types::{
    AreaPlotConfig, ArrayRole, Column, PlotAxis, SharedAxis, SharedColumn, SharedTable, Table,
};
pub use geometry_cache::{DataBounds, GeometryCache};
pub use plot_types::{AreaPlot, PlotRenderer};
pub use rendering::{DrawContext, GpuiPainter};
pub use spatial_index::NearestPoint;
pub use transform::ShiftScale;
