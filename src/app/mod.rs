//! Application orchestration layer
//!
//! Coordinates platform probing, translation, generation and the output
//! write without containing any of their logic.

pub mod generate;

pub use generate::{generate, write_atomic, GenerateOptions, GenerateReport};
