//! cros-keymap library
//!
//! This library reads the physical function row layout of a Chromebook,
//! translates it into key names and generates a keyd configuration that makes
//! the row act as media keys or function keys depending on whether `meta` is
//! held.

// Module declarations
pub mod app;
pub mod config;
pub mod constants;
pub mod generator;
pub mod keycode_db;
pub mod models;
pub mod platform;
