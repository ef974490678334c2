//! Data models for the function row and the generated remap layers.
//!
//! Models are independent of platform probing and output formatting.

pub mod function_row;
pub mod layer;

// Re-export all model types
pub use function_row::{FunctionRow, RowKey};
pub use layer::{Binding, Layer};
