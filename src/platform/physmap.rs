//! Physical function row discovery.
//!
//! PC-style Chromebooks list the function row scancodes left to right in a
//! single sysfs line. ARM Chromebooks describe the whole keyboard matrix in the
//! device tree; the function row is whatever part of the `linux,keymap`
//! property the ARM scancode table recognises.

use super::{Architecture, Platform};
use crate::keycode_db::{ScancodeDb, ScancodeTable};
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Device tree node holding the keyboard matrix.
pub const KEYBOARD_CONTROLLER_NODE: &str = "keyboard-controller";

/// Property listing the matrix keycodes.
pub const KEYMAP_PROPERTY: &str = "linux,keymap";

/// Where the layout handed to the generator came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSource {
    /// Read from the platform
    Platform,
    /// Built-in default for the architecture
    Fallback,
}

/// Scancodes of the function row, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    /// Raw scancodes
    pub scancodes: Vec<String>,
    /// Origin of the scancodes
    pub source: LayoutSource,
}

/// Reads the raw function row scancodes described by the platform.
///
/// Returns an empty list when the platform does not describe its function row
/// (missing sysfs file, missing device tree, or a device tree without a
/// keyboard controller keymap).
pub fn read_layout(platform: &Platform, db: &ScancodeDb) -> Result<Vec<String>> {
    match platform.architecture {
        Architecture::Pc => read_physmap(&platform.physmap_path),
        Architecture::Arm => {
            read_device_tree(&platform.device_tree_path, db.table(Architecture::Arm))
        }
    }
}

/// Reads the platform layout, substituting the architecture's default layout
/// when nothing is discoverable.
pub fn resolve_layout(platform: &Platform, db: &ScancodeDb) -> Result<ResolvedLayout> {
    let scancodes = read_layout(platform, db)?;
    Ok(with_fallback(scancodes, db.table(platform.architecture)))
}

/// Substitutes the table's default layout for an empty one.
pub fn with_fallback(scancodes: Vec<String>, table: &ScancodeTable) -> ResolvedLayout {
    if scancodes.is_empty() {
        warn!(
            "no function row mapping found for {}, using default layout",
            table.architecture()
        );
        ResolvedLayout {
            scancodes: table.fallback_layout().to_vec(),
            source: LayoutSource::Fallback,
        }
    } else {
        info!("found {} function row keys", scancodes.len());
        ResolvedLayout {
            scancodes,
            source: LayoutSource::Platform,
        }
    }
}

/// Reads a file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist", path.display());
            Ok(None)
        }
        Err(e) => Err(e).context(format!("Failed to read {}", path.display())),
    }
}

fn read_physmap(path: &Path) -> Result<Vec<String>> {
    let Some(bytes) = read_optional(path)? else {
        return Ok(Vec::new());
    };

    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_physmap(&text))
}

/// Splits a physmap line into upper-case scancodes.
pub fn parse_physmap(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect()
}

fn read_device_tree(path: &Path, table: &ScancodeTable) -> Result<Vec<String>> {
    let Some(blob) = read_optional(path)? else {
        return Ok(Vec::new());
    };

    parse_device_tree(&blob, table)
        .context(format!("Failed to parse device tree {}", path.display()))
}

/// Extracts the function row from a flattened device tree blob.
pub fn parse_device_tree(blob: &[u8], table: &ScancodeTable) -> Result<Vec<String>> {
    let fdt = fdt::Fdt::new(blob).map_err(|e| anyhow::anyhow!("invalid blob: {e:?}"))?;

    let keymap = fdt
        .all_nodes()
        .filter(|node| is_keyboard_controller(node.name))
        .find_map(|node| node.property(KEYMAP_PROPERTY));

    match keymap {
        Some(property) => Ok(keycodes_from_keymap(property.value, table)),
        None => {
            debug!("no {KEYBOARD_CONTROLLER_NODE} node with {KEYMAP_PROPERTY} in device tree");
            Ok(Vec::new())
        }
    }
}

fn is_keyboard_controller(name: &str) -> bool {
    let base = name.split_once('@').map_or(name, |(base, _)| base);
    base == KEYBOARD_CONTROLLER_NODE
}

/// Decodes `linux,keymap` entries and keeps the keycodes the table knows.
///
/// Each entry is a big-endian `u32` packing row and column into the high half
/// and the keycode into the low 16 bits.
pub fn keycodes_from_keymap(value: &[u8], table: &ScancodeTable) -> Vec<String> {
    value
        .chunks_exact(4)
        .map(|entry| u32::from_be_bytes([entry[0], entry[1], entry[2], entry[3]]) & 0xFFFF)
        .map(|keycode| keycode.to_string())
        .filter(|keycode| table.contains(keycode))
        .collect()
}
