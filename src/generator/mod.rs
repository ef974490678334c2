//! keyd configuration generation.
//!
//! This module turns a translated function row into the layered remap table
//! keyd reads: `[main]` and `[meta]` sections derived from the row, wrapped in
//! a fixed device id list and fixed shortcut sections.

pub mod assembler;
pub mod synthesizer;

pub use assembler::{assemble, build_config, GeneratedConfig, Section};
pub use synthesizer::{lock_bindings, synthesize_layer};
