//! keyd configuration assembly.

use super::synthesizer::{lock_bindings, synthesize_layer};
use crate::models::{Binding, FunctionRow, Layer};
use std::fmt;

/// keyd device ids the generated configuration applies to.
///
/// The internal AT keyboard plus Google's detachable and USB keyboards.
pub const DEVICE_IDS: &[&str] = &[
    "k:0000:0000",
    "k:0001:0001",
    "k:18d1:502b",
    "k:18d1:5030",
    "k:18d1:503c",
    "k:18d1:503d",
    "k:18d1:5044",
    "k:18d1:504c",
    "k:18d1:5050",
    "k:18d1:5052",
    "k:18d1:5057",
    "k:18d1:505b",
    "k:18d1:5061",
];

/// Section for the unmodified layer.
pub const MAIN_SECTION: &str = "main";

/// Section active while `meta` (the search key) is held.
pub const META_SECTION: &str = "meta";

/// Shortcuts unrelated to the function row layout.
const SHORTCUT_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "alt",
        &[
            ("backspace", "delete"),
            ("meta", "capslock"),
            ("brightnessdown", "kbdillumdown"),
            ("brightnessup", "kbdillumup"),
            ("f6", "kbdillumdown"),
            ("f7", "kbdillumup"),
        ],
    ),
    ("control", &[("f5", "print"), ("scale", "print")]),
    ("control+alt", &[("backspace", "C-A-delete")]),
];

/// A `[name]` section made of blank-line separated blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section name without brackets
    pub name: String,
    /// Binding blocks in output order
    pub blocks: Vec<Layer>,
}

impl Section {
    fn new(name: impl Into<String>, blocks: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            blocks,
        }
    }

    /// Total number of bindings across all blocks.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.blocks.iter().map(Layer::len).sum()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        let mut blocks = self.blocks.iter().filter(|block| !block.is_empty());
        if let Some(first) = blocks.next() {
            write!(f, "{first}")?;
        }
        for block in blocks {
            write!(f, "\n{block}")?;
        }
        Ok(())
    }
}

/// A complete keyd configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedConfig {
    /// Entries of the `[ids]` section, written verbatim
    pub ids: Vec<String>,
    /// Remap sections in output order
    pub sections: Vec<Section>,
}

impl GeneratedConfig {
    /// Finds a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }
}

impl fmt::Display for GeneratedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[ids]")?;
        for id in &self.ids {
            writeln!(f, "{id}")?;
        }
        for section in &self.sections {
            write!(f, "\n{section}")?;
        }
        Ok(())
    }
}

/// Builds the `[main]` or `[meta]` section for a modifier state.
fn modifier_section(
    name: &str,
    row: &FunctionRow,
    modifier_held: bool,
    inverted: bool,
) -> Section {
    Section::new(
        name,
        vec![
            synthesize_layer(row, false, modifier_held, inverted),
            synthesize_layer(row, true, modifier_held, inverted),
            lock_bindings(modifier_held, inverted),
        ],
    )
}

fn shortcut_sections() -> impl Iterator<Item = Section> {
    SHORTCUT_SECTIONS.iter().map(|(name, bindings)| {
        let block: Layer = bindings
            .iter()
            .map(|(trigger, action)| Binding::new(*trigger, *action))
            .collect();
        Section::new(*name, vec![block])
    })
}

/// Builds the structured configuration for a translated function row.
pub fn build_config(row: &FunctionRow, inverted: bool) -> GeneratedConfig {
    let mut sections = vec![
        modifier_section(MAIN_SECTION, row, false, inverted),
        modifier_section(META_SECTION, row, true, inverted),
    ];
    sections.extend(shortcut_sections());

    GeneratedConfig {
        ids: DEVICE_IDS.iter().map(ToString::to_string).collect(),
        sections,
    }
}

/// Renders the keyd configuration text for a translated function row.
pub fn assemble(row: &FunctionRow, inverted: bool) -> String {
    build_config(row, inverted).to_string()
}
