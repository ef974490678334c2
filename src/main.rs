//! cros-keymap - keyd function row configuration generator
//!
//! Reads the function row layout of the running Chromebook and writes a keyd
//! configuration that maps it to media keys, with `meta` giving access to the
//! function keys (or the other way around with `--inverted`).

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cros_keymap::app::{self, GenerateOptions};
use cros_keymap::config::Config;
use cros_keymap::constants::{DEFAULT_OUTPUT_FILE, FALLBACK_NOTICE};
use cros_keymap::keycode_db::ScancodeDb;
use cros_keymap::platform::physmap::LayoutSource;
use cros_keymap::platform::Platform;

/// Generate a keyd config for the Chromebook function row
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to write the keyd config to
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    file: PathBuf,

    /// Make the function row act as F1-F12 by default, media keys with meta held
    #[arg(short, long)]
    inverted: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for user-facing notices
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let platform = Platform::detect(&config);
    tracing::debug!("platform: {:?}", platform);

    let db = ScancodeDb::load()?;
    let options = GenerateOptions {
        output: cli.file,
        inverted: cli.inverted,
    };

    let report = app::generate(&platform, &db, &options)?;
    if report.source == LayoutSource::Fallback {
        println!("{FALLBACK_NOTICE}");
    }

    Ok(())
}
