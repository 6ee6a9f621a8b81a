use super::column::{Column, SharedColumn};
use super::stamp::ModifiedStamp;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// A table shared with the plots that read it.
pub type SharedTable = Arc<RwLock<Table>>;
pub type WeakTable = Weak<RwLock<Table>>;

/// Ordered set of named columns feeding one or more plots.
#[derive(Debug, Default)]
pub struct Table {
    columns: Vec<SharedColumn>,
    stamp: ModifiedStamp,
}

impl Table {
    pub fn new() -> Self {
        let mut stamp = ModifiedStamp::new();
        stamp.modified();
        Self {
            columns: Vec::new(),
            stamp,
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    /// Appends a column, replacing any existing column with the same name.
    /// Plots holding the replaced column see it disappear.
    pub fn add_column(&mut self, column: Column) -> SharedColumn {
        let shared = column.into_shared();
        let name = shared.read().name().to_string();
        match self.position(&name) {
            Some(idx) => self.columns[idx] = shared.clone(),
            None => self.columns.push(shared.clone()),
        }
        self.stamp.modified();
        shared
    }

    pub fn remove_column(&mut self, name: &str) -> Option<SharedColumn> {
        let idx = self.position(name)?;
        self.stamp.modified();
        Some(self.columns.remove(idx))
    }

    pub fn column_by_name(&self, name: &str) -> Option<SharedColumn> {
        self.position(name).map(|idx| self.columns[idx].clone())
    }

    pub fn column(&self, index: usize) -> Option<SharedColumn> {
        self.columns.get(index).cloned()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Row count of the first column, 0 for an empty table.
    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.read().len()).unwrap_or(0)
    }

    pub fn into_shared(self) -> SharedTable {
        Arc::new(RwLock::new(self))
    }

    /// Latest modification of the table or any of its columns.
    pub fn modified(&self) -> u64 {
        self.columns
            .iter()
            .map(|c| c.read().modified())
            .fold(self.stamp.get(), u64::max)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.read().name() == name)
    }
}
