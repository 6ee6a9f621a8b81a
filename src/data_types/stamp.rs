use std::sync::atomic::{AtomicU64, Ordering};

static CLOCK: AtomicU64 = AtomicU64::new(0);

/// Logical modification time.
///
/// Every call to [`ModifiedStamp::modified`] takes the next tick of a single
/// process-wide counter, so stamps of unrelated objects (columns, tables,
/// axes, caches) can be compared directly to decide which one changed last.
/// A stamp that was never modified reads `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModifiedStamp(u64);

impl ModifiedStamp {
    pub fn new() -> Self {
        Self(0)
    }

    /// Marks the owner as changed now.
    pub fn modified(&mut self) {
        self.0 = CLOCK.fetch_add(1, Ordering::Relaxed) + 1;
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}
