use super::stamp::ModifiedStamp;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// A column shared between a table and the plots reading it.
pub type SharedColumn = Arc<RwLock<Column>>;

/// Non-owning handle held by plot caches. Upgrading fails once the table
/// dropped the column, which readers treat as "no column".
pub type WeakColumn = Weak<RwLock<Column>>;

/// Typed storage of a column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Element types a column can be built from.
pub trait Sample: Copy {
    fn to_f64(self) -> f64;
    fn into_data(values: Vec<Self>) -> ColumnData;
}

macro_rules! impl_sample {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Sample for $ty {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn into_data(values: Vec<Self>) -> ColumnData {
                    ColumnData::$variant(values)
                }
            }
        )*
    };
}

impl_sample!(
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

fn stream<T: Sample>(values: &[T]) -> Box<dyn Iterator<Item = f64> + '_> {
    Box::new(values.iter().map(|v| v.to_f64()))
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::I8(v) => v.len(),
            Self::U8(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::U64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the column as a stream of doubles, whatever the element type.
    pub fn values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Self::I8(v) => stream(v),
            Self::U8(v) => stream(v),
            Self::I16(v) => stream(v),
            Self::U16(v) => stream(v),
            Self::I32(v) => stream(v),
            Self::U32(v) => stream(v),
            Self::I64(v) => stream(v),
            Self::U64(v) => stream(v),
            Self::F32(v) => stream(v),
            Self::F64(v) => stream(v),
        }
    }
}

/// A named numeric array with its own modification stamp.
#[derive(Clone, Debug)]
pub struct Column {
    name: String,
    data: ColumnData,
    stamp: ModifiedStamp,
}

impl Column {
    pub fn new<T: Sample>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::from_data(name, T::into_data(values))
    }

    pub fn from_data(name: impl Into<String>, data: ColumnData) -> Self {
        let mut stamp = ModifiedStamp::new();
        stamp.modified();
        Self {
            name: name.into(),
            data,
            stamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        self.data.values()
    }

    /// Validity flags (nonzero = valid) for 8-bit columns. Wider columns
    /// cannot serve as a point mask and yield `None`.
    pub fn mask_values(&self) -> Option<Box<dyn Iterator<Item = bool> + '_>> {
        match &self.data {
            ColumnData::I8(v) => Some(Box::new(v.iter().map(|&m| m != 0))),
            ColumnData::U8(v) => Some(Box::new(v.iter().map(|&m| m != 0))),
            _ => None,
        }
    }

    pub fn is_mask(&self) -> bool {
        matches!(self.data, ColumnData::I8(_) | ColumnData::U8(_))
    }

    /// Replaces the contents and marks the column modified.
    pub fn set_values<T: Sample>(&mut self, values: Vec<T>) {
        self.data = T::into_data(values);
        self.stamp.modified();
    }

    pub fn modified(&self) -> u64 {
        self.stamp.get()
    }

    pub fn into_shared(self) -> SharedColumn {
        Arc::new(RwLock::new(self))
    }
}
