//! Extent of numeric columns.

/// Closed `[min, max]` interval. An empty range has `min > max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataRange {
    pub min: f64,
    pub max: f64,
}

impl Default for DataRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl DataRange {
    pub const EMPTY: Self = Self {
        min: f64::MAX,
        max: f64::MIN,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    #[inline]
    pub fn include(&mut self, value: f64) {
        // f64::min/max skip NaN, so missing samples never poison the range.
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Range of every value in the stream.
pub fn data_range(values: impl Iterator<Item = f64>) -> DataRange {
    values.fold(DataRange::EMPTY, |mut range, v| {
        range.include(v);
        range
    })
}

/// Range of the values whose mask entry is set. Rows past the end of the
/// shorter stream are ignored.
pub fn masked_data_range(
    values: impl Iterator<Item = f64>,
    mask: impl Iterator<Item = bool>,
) -> DataRange {
    values
        .zip(mask)
        .filter(|&(_, valid)| valid)
        .fold(DataRange::EMPTY, |mut range, (v, _)| {
            range.include(v);
            range
        })
}

/// Range of a column, honouring the validity mask when one is given.
/// An absent column yields [`DataRange::EMPTY`].
pub fn column_range(
    column: Option<&crate::data_types::Column>,
    mask: Option<&crate::data_types::Column>,
) -> DataRange {
    let Some(column) = column else {
        return DataRange::EMPTY;
    };
    match mask.and_then(|m| m.mask_values()) {
        Some(mask) => masked_data_range(column.values(), mask),
        None => data_range(column.values()),
    }
}
