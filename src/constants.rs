//! Application-wide constants.

/// Output file written when no path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "cros.conf";

/// Notice printed when the platform does not describe its function row.
pub const FALLBACK_NOTICE: &str = "no function row mapping found, using default mapping";
