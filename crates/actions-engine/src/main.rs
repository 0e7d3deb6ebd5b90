//! actions-replay — entry point.
//!
//! Replays WebDriver perform-actions payloads against a headless surface and
//! prints every synthesized event as one JSON line.  All payload files share
//! one session, so a key held at the end of the first file is still held
//! when the second one starts, exactly as with consecutive commands against
//! a browser.
//!
//! # Usage
//!
//! ```text
//! actions-replay [OPTIONS] <FILES>...
//!
//! Options:
//!   --config <PATH>   Engine configuration (viewport, platform, elements)
//!   --output <PATH>   Write events to a file instead of stdout
//!   --release         Run release-actions after the last payload
//!   --init-config     Write a default configuration to --config and exit
//! ```
//!
//! Each payload file holds either the bare `actions` array or the full
//! command body `{"actions": [...]}`.
//!
//! # Environment variable overrides
//!
//! | Variable          | Description                              |
//! |-------------------|------------------------------------------|
//! | `ACTIONS_CONFIG`  | Same as `--config`                       |
//! | `RUST_LOG`        | Log filter; overrides the configured level |
//!
//! Logs go to stderr so they never interleave with the event stream.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use actions_engine::infrastructure::storage::config::{load_config, save_config, EngineConfig};
use actions_engine::infrastructure::surface::headless::HeadlessSurface;
use actions_engine::ActionState;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Replays WebDriver input action payloads against a headless surface.
#[derive(Debug, Parser)]
#[command(
    name = "actions-replay",
    about = "Replay WebDriver input action payloads and print the synthesized events",
    version
)]
struct Cli {
    /// TOML configuration file.  Defaults apply when absent.
    #[arg(long, env = "ACTIONS_CONFIG")]
    config: Option<PathBuf>,

    /// File to write events to.  Defaults to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Release every held key and button after the last payload.
    #[arg(long)]
    release: bool,

    /// Write the default configuration to `--config` and exit.
    #[arg(long)]
    init_config: bool,

    /// Payload files, dispatched in order within one session.
    #[arg(required_unless_present = "init_config")]
    files: Vec<PathBuf>,
}

// ── Payload loading ───────────────────────────────────────────────────────────

/// Reads a payload file and returns its `actions` array.
///
/// # Errors
///
/// Fails when the file cannot be read or is not JSON.  Shape errors inside
/// the array are left to the action parser.
fn load_payload(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read payload {}", path.display()))?;
    let payload: Value = serde_json::from_str(&content)
        .with_context(|| format!("payload {} is not valid JSON", path.display()))?;

    Ok(match payload {
        Value::Object(mut body) if body.contains_key("actions") => {
            body.remove("actions").unwrap_or(Value::Null)
        }
        other => other,
    })
}

async fn replay(
    state: &ActionState,
    surface: &HeadlessSurface,
    files: &[PathBuf],
) -> anyhow::Result<()> {
    for file in files {
        let actions = load_payload(file)?;
        info!("Replaying {}", file.display());
        state
            .perform_actions(surface, &actions)
            .await
            .with_context(|| format!("failed to perform actions from {}", file.display()))?;
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins over the configured level when it is set and valid.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    if cli.init_config {
        let path = cli
            .config
            .as_deref()
            .context("--init-config needs a --config path to write to")?;
        save_config(&EngineConfig::default(), path)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        info!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let sink: Box<dyn Write + Send> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create output file {}", path.display())
        })?)),
        None => Box::new(std::io::stdout()),
    };
    let surface = HeadlessSurface::new(&config, sink);
    let state = ActionState::new();

    let outcome = replay(&state, &surface, &cli.files).await;
    if let Err(e) = &outcome {
        warn!("{e:#}");
    }

    if cli.release {
        state
            .release_actions(&surface)
            .await
            .context("failed to release actions")?;
    }
    surface.flush().context("failed to flush event output")?;

    outcome
}

// ── Tests ─────────────────────────────────────────────────────────────────────
