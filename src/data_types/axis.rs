use super::stamp::ModifiedStamp;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};

pub type SharedAxis = Arc<RwLock<PlotAxis>>;
pub type WeakAxis = Weak<RwLock<PlotAxis>>;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    pub fn to_seconds(self, value: f64) -> f64 {
        match self {
            Self::Seconds => value,
            Self::Milliseconds => value / 1000.0,
            Self::Microseconds => value / 1_000_000.0,
            Self::Nanoseconds => value / 1_000_000_000.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum AxisFormat {
    #[default]
    Numeric,
    Time(TimeUnit),
}

/// Number notation for labels printed against an axis.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Notation {
    #[default]
    Standard,
    Scientific,
    Fixed,
}

/// Axis state consumed by plots: log-scale mode, label formatting and a
/// modification stamp that invalidates plot geometry when any of it changes.
#[derive(Clone, Debug)]
pub struct PlotAxis {
    min: f64,
    max: f64,
    log_scale: bool,
    notation: Notation,
    precision: usize,
    format: AxisFormat,
    time_zone: Option<chrono_tz::Tz>,
    stamp: ModifiedStamp,
}

impl Default for PlotAxis {
    fn default() -> Self {
        Self::new(0.0, 10.0)
    }
}

impl PlotAxis {
    pub fn new(min: f64, max: f64) -> Self {
        let mut stamp = ModifiedStamp::new();
        stamp.modified();
        Self {
            min,
            max,
            log_scale: false,
            notation: Notation::Standard,
            precision: 2,
            format: AxisFormat::Numeric,
            time_zone: None,
            stamp,
        }
    }

    pub fn into_shared(self) -> SharedAxis {
        Arc::new(RwLock::new(self))
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn set_range(&mut self, min: f64, max: f64) {
        if (min, max) != (self.min, self.max) {
            self.min = min;
            self.max = max;
            self.stamp.modified();
        }
    }

    pub fn log_scale(&self) -> bool {
        self.log_scale
    }

    /// Requests a log scale. It only becomes active for a strictly positive
    /// range, see [`PlotAxis::log_scale_active`].
    pub fn set_log_scale(&mut self, log_scale: bool) {
        if self.log_scale != log_scale {
            self.log_scale = log_scale;
            self.stamp.modified();
        }
    }

    pub fn log_scale_active(&self) -> bool {
        self.log_scale && self.min > 0.0 && self.max > 0.0
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn set_notation(&mut self, notation: Notation) {
        if self.notation != notation {
            self.notation = notation;
            self.stamp.modified();
        }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn set_precision(&mut self, precision: usize) {
        if self.precision != precision {
            self.precision = precision;
            self.stamp.modified();
        }
    }

    pub fn format(&self) -> AxisFormat {
        self.format
    }

    pub fn set_format(&mut self, format: AxisFormat) {
        if self.format != format {
            self.format = format;
            self.stamp.modified();
        }
    }

    pub fn set_time_zone(&mut self, tz: Option<chrono_tz::Tz>) {
        if self.time_zone != tz {
            self.time_zone = tz;
            self.stamp.modified();
        }
    }

    pub fn modified(&self) -> u64 {
        self.stamp.get()
    }

    /// Formats a raw data value for labels and tooltips.
    pub fn format_number(&self, value: f64) -> String {
        match self.format {
            AxisFormat::Time(unit) => {
                let span = unit.to_seconds((self.max - self.min).abs());
                let fmt = crate::utils::date_formatter::determine_date_format(span);
                crate::utils::date_formatter::format_timestamp(value, fmt, unit, self.time_zone)
            }
            AxisFormat::Numeric => match self.notation {
                Notation::Scientific => format!("{:.*e}", self.precision, value),
                Notation::Standard | Notation::Fixed => format!("{:.*}", self.precision, value),
            },
        }
    }
}

/// Log flag and stamp of one axis, as seen by a geometry cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisState {
    pub log_scale: bool,
    pub modified: u64,
}

impl AxisState {
    /// Snapshot of a weakly held axis. A dropped axis reads as linear and
    /// never modified.
    pub fn of(axis: &WeakAxis) -> Self {
        match axis.upgrade() {
            Some(axis) => {
                let axis = axis.read();
                Self {
                    log_scale: axis.log_scale_active(),
                    modified: axis.modified(),
                }
            }
            None => {
                tracing::debug!("axis dropped, treating it as linear");
                Self::default()
            }
        }
    }
}
