//! Platform detection.
//!
//! The key encoding of the function row depends on the machine type, and the
//! place the function row is described depends on the encoding. Both are
//! resolved once at startup into a [`Platform`] value that is passed to the
//! reader explicitly.

pub mod physmap;

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub use physmap::read_layout;

/// Machine type reported by PC-style Chromebooks.
pub const PC_MACHINE: &str = "x86_64";

/// Hardware key encoding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// i8042 scancodes listed in sysfs as two-digit hex
    Pc,
    /// Linux keycodes from the device tree `linux,keymap` property
    Arm,
}

impl Architecture {
    /// Maps a `uname -m` machine string to an encoding scheme.
    ///
    /// Only [`PC_MACHINE`] selects the PC scheme; every other machine type is
    /// treated as ARM.
    #[must_use]
    pub fn from_machine(machine: &str) -> Self {
        if machine == PC_MACHINE {
            Self::Pc
        } else {
            Self::Arm
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pc => write!(f, "pc"),
            Self::Arm => write!(f, "arm"),
        }
    }
}

/// Returns the machine type of the running kernel.
///
/// Falls back to the architecture this binary was compiled for if `uname`
/// fails.
fn machine_type() -> String {
    match nix::sys::utsname::uname() {
        Ok(uts) => uts.machine().to_string_lossy().into_owned(),
        Err(e) => {
            debug!("uname failed ({e}), using compile-time architecture");
            std::env::consts::ARCH.to_string()
        }
    }
}

/// Detects the key encoding scheme of the running machine.
#[must_use]
pub fn detect_architecture() -> Architecture {
    Architecture::from_machine(&machine_type())
}

/// Everything the layout reader needs to know about the running platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Key encoding scheme in effect
    pub architecture: Architecture,
    /// Text file holding PC-style scancodes
    pub physmap_path: PathBuf,
    /// Flattened device tree blob
    pub device_tree_path: PathBuf,
}

impl Platform {
    /// Resolves the platform from configuration, detecting the architecture
    /// unless the configuration forces one.
    #[must_use]
    pub fn detect(config: &Config) -> Self {
        let architecture = config.platform.architecture.map_or_else(
            detect_architecture,
            |forced| {
                debug!("architecture forced to {forced} by configuration");
                forced
            },
        );

        Self::new(architecture, config)
    }

    /// Builds a platform for a known architecture.
    #[must_use]
    pub fn new(architecture: Architecture, config: &Config) -> Self {
        Self {
            architecture,
            physmap_path: config.platform.physmap.clone(),
            device_tree_path: config.platform.device_tree.clone(),
        }
    }
}
