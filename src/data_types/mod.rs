pub mod axis;
pub mod column;
pub mod plot_configs;
pub mod stamp;
pub mod table;

// Re-export everything for convenience
pub use axis::*;
pub use column::*;
pub use plot_configs::*;
pub use stamp::*;
pub use table::*;
