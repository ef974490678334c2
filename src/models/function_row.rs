//! Translated function row.

use crate::keycode_db::{ScancodeTable, TranslateError};

/// One physical key of the function row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowKey {
    /// 1-based position, left to right
    pub position: usize,
    /// Raw scancode reported by the platform
    pub scancode: String,
    /// keyd name of the key's vivaldi action (e.g. "volumeup")
    pub semantic: String,
}

impl RowKey {
    /// Function key label for this position (`f1`, `f2`, ...).
    #[must_use]
    pub fn function_key(&self) -> String {
        format!("f{}", self.position)
    }
}

/// The function row with every scancode resolved to a key name.
///
/// Translation happens up front so an unrecognised scancode is reported
/// before any output is produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionRow {
    keys: Vec<RowKey>,
}

impl FunctionRow {
    /// Translates raw scancodes with the architecture's table.
    ///
    /// Fails on the first scancode the table does not know.
    pub fn translate<S: AsRef<str>>(
        scancodes: &[S],
        table: &ScancodeTable,
    ) -> Result<Self, TranslateError> {
        let keys = scancodes
            .iter()
            .enumerate()
            .map(|(idx, scancode)| -> Result<RowKey, TranslateError> {
                let position = idx + 1;
                let scancode = scancode.as_ref();
                let semantic = table.translate(scancode, position)?;
                Ok(RowKey {
                    position,
                    scancode: scancode.to_string(),
                    semantic: semantic.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { keys })
    }

    /// Keys in left-to-right order.
    #[must_use]
    pub fn keys(&self) -> &[RowKey] {
        &self.keys
    }

    /// Number of keys in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the row has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
