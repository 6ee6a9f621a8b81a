//! Derived quad-strip geometry of an area plot.
//!
//! The cache turns three columns (X, Y-low, Y-high) into a buffer of `2 * N`
//! plot-space points, two per row (low sample, then high sample), so that
//! consecutive rows form the quads of a strip. Rows that are masked out or
//! that produce NaN/infinite coordinates are *bad*: both of their points are
//! overwritten with NaN and the row is listed in [`GeometryCache::bad_points`].
//!
//! Columns and the mask are held weakly. A column dropped by its table reads
//! as absent, which turns every query into "no result".

use crate::data_types::{AxisState, Column, ModifiedStamp, SharedColumn, WeakColumn};
use crate::range::{column_range, DataRange};
use crate::spatial_index::{NearestPoint, SortedPoints};
use crate::transform::{copy_to_points, index_sequence, ShiftScale};
use glam::Vec2;
use parking_lot::RwLockReadGuard;
use tracing::{debug, trace};

// Float offsets of each component inside one row (two Vec2 = 4 floats).
const ROW_STRIDE: usize = 4;
const X_LOW: usize = 0;
const Y_LOW: usize = 1;
const X_HIGH: usize = 2;
const Y_HIGH: usize = 3;

/// Axis-aligned box over raw (untransformed) data values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataBounds {
    pub x: DataRange,
    pub y: DataRange,
}

impl Default for DataBounds {
    fn default() -> Self {
        Self {
            x: DataRange::EMPTY,
            y: DataRange::EMPTY,
        }
    }
}

impl DataBounds {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }

    /// `[x_min, x_max, y_min, y_max]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.x.min, self.x.max, self.y.min, self.y.max]
    }
}

/// Plot-space points of an area plot, their bad rows, data bounds and a
/// lazily built hit-test index.
#[derive(Debug, Default)]
pub struct GeometryCache {
    valid_point_mask: Option<WeakColumn>,
    x: Option<WeakColumn>,
    y_low: Option<WeakColumn>,
    y_high: Option<WeakColumn>,

    points: Vec<Vec2>,
    points_stamp: ModifiedStamp,
    bad_points: Vec<usize>,

    data_stamp: ModifiedStamp,
    bounds_stamp: ModifiedStamp,
    bounds: DataBounds,

    shift_scale: Option<ShiftScale>,
    sorted_points: SortedPoints,
}

fn upgrade(column: &Option<WeakColumn>) -> Option<SharedColumn> {
    column.as_ref().and_then(|c| c.upgrade())
}

fn is_bad_point(p: Vec2) -> bool {
    !p.is_finite()
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the empty state: drops the column and mask handles, the point
    /// buffer, the bad-point list and the hit-test index.
    pub fn reset(&mut self) {
        self.valid_point_mask = None;
        self.x = None;
        self.y_low = None;
        self.y_high = None;
        self.points.clear();
        self.bad_points.clear();
        self.sorted_points.clear();
        self.shift_scale = None;
        self.data_stamp.modified();
    }

    /// Sets the mask used by the next recompute. It must have one entry per
    /// row; `None` marks every row valid.
    pub fn set_valid_point_mask(&mut self, mask: Option<&SharedColumn>) {
        self.valid_point_mask = mask.map(std::sync::Arc::downgrade);
    }

    /// True while both Y columns are set and still alive.
    pub fn is_input_data_valid(&self) -> bool {
        upgrade(&self.y_low).is_some() && upgrade(&self.y_high).is_some()
    }

    /// Binds the source columns. `x` may be `None` to plot against the row
    /// index. Returns `false`, changing nothing, unless both Y columns are
    /// given.
    ///
    /// # Panics
    ///
    /// If the given columns do not all have the same length.
    pub fn set_points(
        &mut self,
        x: Option<&SharedColumn>,
        y_low: Option<&SharedColumn>,
        y_high: Option<&SharedColumn>,
    ) -> bool {
        let (Some(y_low), Some(y_high)) = (y_low, y_high) else {
            debug!("area geometry needs both Y columns, ignoring input");
            return false;
        };

        let rows = y_low.read().len();
        assert!(
            x.is_none_or(|x| x.read().len() == rows) && y_high.read().len() == rows,
            "area plot columns must have the same length"
        );

        self.x = x.map(std::sync::Arc::downgrade);
        self.y_low = Some(std::sync::Arc::downgrade(y_low));
        self.y_high = Some(std::sync::Arc::downgrade(y_high));
        self.points.resize(rows * 2, Vec2::ZERO);
        self.sorted_points.clear();
        self.data_stamp.modified();
        true
    }

    /// Recomputes the point buffer unless it is already newer than the data
    /// and both axes and was built with the same shift/scale.
    pub fn update_cache(&mut self, shift_scale: ShiftScale, x_axis: AxisState, y_axis: AxisState) {
        let stamp = self.points_stamp.get();
        if stamp > self.data_stamp.get()
            && stamp > x_axis.modified
            && stamp > y_axis.modified
            && self.shift_scale == Some(shift_scale)
        {
            return;
        }

        let (Some(y_low), Some(y_high)) = (upgrade(&self.y_low), upgrade(&self.y_high)) else {
            debug!("area geometry source columns were dropped");
            return;
        };
        let x = upgrade(&self.x);
        let mask = upgrade(&self.valid_point_mask);

        let y_low = y_low.read();
        let y_high = y_high.read();
        let x = x.as_ref().map(|c| c.read());
        let rows = y_low.len();
        assert!(
            x.as_ref().is_none_or(|x| x.len() == rows) && y_high.len() == rows,
            "area plot columns must have the same length"
        );

        self.points.resize(rows * 2, Vec2::ZERO);
        if rows == 0 {
            self.bad_points.clear();
        } else {
            self.fill_points(x.as_deref(), &y_low, &y_high, shift_scale, x_axis, y_axis);
            self.mark_bad_points(mask.as_ref().map(|m| m.read()));
        }

        trace!(
            rows,
            bad_points = self.bad_points.len(),
            "area geometry recomputed"
        );

        self.shift_scale = Some(shift_scale);
        self.points_stamp.modified();
        self.sorted_points.clear();
    }

    /// Forces the next [`GeometryCache::update_cache`] to recompute, for
    /// changes the stamps cannot see (such as a different axis object).
    pub fn invalidate_points(&mut self) {
        self.shift_scale = None;
    }

    fn fill_points(
        &mut self,
        x: Option<&Column>,
        y_low: &Column,
        y_high: &Column,
        ss: ShiftScale,
        x_axis: AxisState,
        y_axis: AxisState,
    ) {
        let rows = y_low.len();
        let data: &mut [f32] = bytemuck::cast_slice_mut(self.points.as_mut_slice());

        // Both points of a row share the row's X value.
        for offset in [X_LOW, X_HIGH] {
            let dest = &mut data[offset..];
            match x {
                Some(x) => copy_to_points(dest, ROW_STRIDE, x.values(), ss.x_pair(), x_axis.log_scale),
                None => copy_to_points(
                    dest,
                    ROW_STRIDE,
                    index_sequence(rows),
                    ss.x_pair(),
                    x_axis.log_scale,
                ),
            }
        }
        copy_to_points(&mut data[Y_LOW..], ROW_STRIDE, y_low.values(), ss.y_pair(), y_axis.log_scale);
        copy_to_points(&mut data[Y_HIGH..], ROW_STRIDE, y_high.values(), ss.y_pair(), y_axis.log_scale);
    }

    fn mark_bad_points(&mut self, mask: Option<RwLockReadGuard<'_, Column>>) {
        self.bad_points.clear();
        let mut mask = mask.as_ref().and_then(|m| m.mask_values());

        for (row, pair) in self.points.chunks_exact_mut(2).enumerate() {
            // Rows past the end of a short mask count as masked out.
            let masked = mask
                .as_mut()
                .is_some_and(|m| !m.next().unwrap_or(false));
            if masked || is_bad_point(pair[0]) || is_bad_point(pair[1]) {
                // NaN keeps hit-testing away from this row.
                pair[0] = Vec2::NAN;
                pair[1] = Vec2::NAN;
                self.bad_points.push(row);
            }
        }
    }

    /// Raw data extent: X range (or `[0, N-1]` without an X column) by the
    /// union of both Y ranges. Masked rows are excluded. Recomputed only
    /// after `set_points`.
    pub fn data_bounds(&mut self) -> DataBounds {
        if self.data_stamp > self.bounds_stamp {
            let mask = upgrade(&self.valid_point_mask);
            let mask = mask.as_ref().map(|m| m.read());
            let mask = mask.as_deref();

            let x = upgrade(&self.x);
            let x_range = match &x {
                Some(x) => column_range(Some(&*x.read()), mask),
                None => DataRange::new(0.0, (self.points.len() / 2) as f64 - 1.0),
            };
            let y_low = upgrade(&self.y_low);
            let y_high = upgrade(&self.y_high);
            let y_low = column_range(y_low.as_ref().map(|c| c.read()).as_deref(), mask);
            let y_high = column_range(y_high.as_ref().map(|c| c.read()).as_deref(), mask);

            self.bounds = DataBounds {
                x: x_range,
                y: y_low.union(y_high),
            };
            self.bounds_stamp.modified();
        }
        self.bounds
    }

    /// See [`SortedPoints::nearest`]. The sorted index is built on first
    /// use after every recompute.
    pub fn nearest_point(&mut self, target: Vec2, tolerance: Vec2) -> Option<NearestPoint> {
        if self.points.is_empty() {
            return None;
        }
        if self.sorted_points.is_empty() {
            self.sorted_points = SortedPoints::build(&self.points);
        }
        self.sorted_points.nearest(target, tolerance)
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Ascending indices of bad rows.
    pub fn bad_points(&self) -> &[usize] {
        &self.bad_points
    }

    pub fn points_modified(&self) -> u64 {
        self.points_stamp.get()
    }

    pub fn data_modified(&self) -> u64 {
        self.data_stamp.get()
    }

    /// Shift/scale the current points were built with.
    pub fn shift_scale(&self) -> Option<ShiftScale> {
        self.shift_scale
    }
}
