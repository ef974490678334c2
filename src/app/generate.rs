//! End-to-end generation of the keyd configuration file.

use crate::generator;
use crate::keycode_db::ScancodeDb;
use crate::models::FunctionRow;
use crate::platform::physmap::{resolve_layout, LayoutSource};
use crate::platform::{Architecture, Platform};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What to generate and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Output file, replaced if it exists
    pub output: PathBuf,
    /// Make function keys the default and vivaldi actions the `meta` layer
    pub inverted: bool,
}

/// Summary of a completed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Architecture whose table was used
    pub architecture: Architecture,
    /// Whether the layout came from the platform or the built-in default
    pub source: LayoutSource,
    /// Number of function row keys mapped
    pub key_count: usize,
    /// File that was written
    pub output: PathBuf,
}

/// Reads the function row, builds the keyd configuration and writes it.
///
/// Nothing is written if any scancode fails to translate.
pub fn generate(
    platform: &Platform,
    db: &ScancodeDb,
    options: &GenerateOptions,
) -> Result<GenerateReport> {
    let layout = resolve_layout(platform, db)?;
    debug!("function row scancodes: {:?}", layout.scancodes);

    let table = db.table(platform.architecture);
    let row = FunctionRow::translate(layout.scancodes.as_slice(), table)?;
    let text = generator::assemble(&row, options.inverted);

    write_atomic(&options.output, &text)?;
    info!(
        "wrote {} ({} keys, inverted: {})",
        options.output.display(),
        row.len(),
        options.inverted
    );

    Ok(GenerateReport {
        architecture: platform.architecture,
        source: layout.source,
        key_count: row.len(),
        output: options.output.clone(),
    })
}

/// Writes `content` to `path` using a temp file + rename.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let mut temp_name = path
        .file_name()
        .context(format!("Output path has no file name: {}", path.display()))?
        .to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content).context(format!(
        "Failed to write temp output file: {}",
        temp_path.display()
    ))?;

    fs::rename(&temp_path, path).context(format!(
        "Failed to rename temp output file to: {}",
        path.display()
    ))?;

    Ok(())
}
