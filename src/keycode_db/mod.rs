//! Scancode tables for the function row.
//!
//! Each supported architecture reports function-row keys in its own encoding:
//! two-digit hex i8042 scancodes on PC-style Chromebooks, decimal linux input
//! keycodes from the device tree on ARM. The tables are embedded in the binary
//! and map each raw code to the key name keyd uses for it.

use crate::platform::Architecture;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

/// Semantic name of the key whose vivaldi action is remapped on output.
pub const ZOOM: &str = "zoom";

/// Key presented in place of [`ZOOM`] when the vivaldi action is emitted.
pub const ZOOM_ALIAS: &str = "f11";

/// Returns the key name a vivaldi action is presented as.
///
/// Most applications never bind anything to the generic `zoom` key, so it is
/// emitted as `f11` instead. Every other name is returned unchanged.
#[must_use]
pub fn vivaldi_alias(semantic: &str) -> &str {
    if semantic == ZOOM {
        ZOOM_ALIAS
    } else {
        semantic
    }
}

/// Failure to translate a raw scancode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Scancode is well formed but absent from the architecture's table
    UnknownScancode {
        /// Architecture whose table was consulted
        architecture: Architecture,
        /// Raw scancode as read from the platform
        scancode: String,
        /// 1-based position in the function row
        position: usize,
    },
    /// Scancode does not match the architecture's code alphabet
    MalformedScancode {
        /// Architecture whose table was consulted
        architecture: Architecture,
        /// Raw scancode as read from the platform
        scancode: String,
        /// 1-based position in the function row
        position: usize,
    },
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownScancode {
                architecture,
                scancode,
                position,
            } => write!(
                f,
                "unknown {} scancode '{}' at function row position {}",
                architecture, scancode, position
            ),
            Self::MalformedScancode {
                architecture,
                scancode,
                position,
            } => write!(
                f,
                "malformed {} scancode '{}' at function row position {}",
                architecture, scancode, position
            ),
        }
    }
}

impl std::error::Error for TranslateError {}

#[derive(Debug, Deserialize)]
struct ScancodeEntry {
    code: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    architecture: Architecture,
    #[allow(dead_code)]
    description: String,
    pattern: String,
    fallback: Vec<String>,
    scancodes: Vec<ScancodeEntry>,
}

/// Database schema from scancodes.json.
#[derive(Debug, Deserialize)]
struct ScancodeDatabase {
    #[allow(dead_code)]
    version: String,
    tables: Vec<TableSchema>,
}

/// Immutable scancode-to-name table for one architecture.
#[derive(Debug, Clone)]
pub struct ScancodeTable {
    architecture: Architecture,
    alphabet: Regex,
    names: HashMap<String, String>,
    fallback: Vec<String>,
}

impl ScancodeTable {
    fn from_schema(schema: TableSchema) -> Result<Self> {
        let alphabet = Regex::new(&schema.pattern).context(format!(
            "Invalid scancode pattern for {} table",
            schema.architecture
        ))?;

        let mut names = HashMap::with_capacity(schema.scancodes.len());
        for entry in schema.scancodes {
            if !alphabet.is_match(&entry.code) {
                anyhow::bail!(
                    "Scancode '{}' in {} table does not match pattern {}",
                    entry.code,
                    schema.architecture,
                    schema.pattern
                );
            }
            if names.insert(entry.code.clone(), entry.name).is_some() {
                anyhow::bail!(
                    "Duplicate scancode '{}' in {} table",
                    entry.code,
                    schema.architecture
                );
            }
        }

        for code in &schema.fallback {
            if !names.contains_key(code) {
                anyhow::bail!(
                    "Fallback scancode '{}' is missing from the {} table",
                    code,
                    schema.architecture
                );
            }
        }

        Ok(Self {
            architecture: schema.architecture,
            alphabet,
            names,
            fallback: schema.fallback,
        })
    }

    /// Architecture this table belongs to.
    #[must_use]
    pub const fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Looks up the semantic name for a raw scancode.
    #[must_use]
    pub fn get(&self, scancode: &str) -> Option<&str> {
        self.names.get(scancode).map(String::as_str)
    }

    /// Returns true if the table has an entry for `scancode`.
    #[must_use]
    pub fn contains(&self, scancode: &str) -> bool {
        self.names.contains_key(scancode)
    }

    /// Returns true if `scancode` is written in this architecture's alphabet.
    #[must_use]
    pub fn is_well_formed(&self, scancode: &str) -> bool {
        self.alphabet.is_match(scancode)
    }

    /// Translates the scancode found at `position` (1-based) into a key name.
    pub fn translate(&self, scancode: &str, position: usize) -> Result<&str, TranslateError> {
        if let Some(name) = self.get(scancode) {
            return Ok(name);
        }

        let architecture = self.architecture;
        let scancode = scancode.to_string();
        if self.is_well_formed(&scancode) {
            Err(TranslateError::UnknownScancode {
                architecture,
                scancode,
                position,
            })
        } else {
            Err(TranslateError::MalformedScancode {
                architecture,
                scancode,
                position,
            })
        }
    }

    /// Layout used when the platform does not describe its function row.
    #[must_use]
    pub fn fallback_layout(&self) -> &[String] {
        &self.fallback
    }

    /// Number of scancodes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Scancode tables for every supported architecture.
///
/// Loaded from the JSON embedded at compile time. The tables are never
/// merged: a PC scancode is never looked up in the ARM table or vice versa.
#[derive(Debug, Clone)]
pub struct ScancodeDb {
    pc: ScancodeTable,
    arm: ScancodeTable,
}

impl ScancodeDb {
    /// Loads the scancode database from the embedded JSON file.
    pub fn load() -> Result<Self> {
        Self::from_json(include_str!("scancodes.json"))
    }

    fn from_json(json_data: &str) -> Result<Self> {
        let db: ScancodeDatabase =
            serde_json::from_str(json_data).context("Failed to parse embedded scancodes.json")?;

        let mut pc = None;
        let mut arm = None;
        for schema in db.tables {
            let slot = match schema.architecture {
                Architecture::Pc => &mut pc,
                Architecture::Arm => &mut arm,
            };
            if slot.is_some() {
                anyhow::bail!("Duplicate {} table in scancodes.json", schema.architecture);
            }
            *slot = Some(ScancodeTable::from_schema(schema)?);
        }

        Ok(Self {
            pc: pc.context("scancodes.json has no pc table")?,
            arm: arm.context("scancodes.json has no arm table")?,
        })
    }

    /// Gets the table for an architecture.
    #[must_use]
    pub const fn table(&self, architecture: Architecture) -> &ScancodeTable {
        match architecture {
            Architecture::Pc => &self.pc,
            Architecture::Arm => &self.arm,
        }
    }
}
