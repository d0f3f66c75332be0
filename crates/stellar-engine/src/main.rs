//! Host binary for the Stellar Blocks minigame.
//!
//! Wires the game core to a renderer over stdio: input events arrive as
//! JSON lines on stdin, view snapshots leave as JSON lines on stdout, logs
//! go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `stellar-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Create the screen navigator on the home screen
//! 4. Spawn the stdin reader
//! 5. Run the host loop until stdin closes
//! 6. Log the result

mod error;
mod stdio;

use std::path::Path;
use std::time::Duration;

use stellar_core::config::GameConfig;
use stellar_core::navigator::ScreenNavigator;
use stellar_core::runner;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::stdio::JsonLinesRenderer;

/// Buffered input events between the stdin reader and the host loop.
const INPUT_BUFFER: usize = 64;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration fails to load or the host loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging on stderr.
    let fallback = config.host.log_level.clone();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("stellar-engine starting");
    info!(
        frame_interval_ms = config.host.frame_interval_ms,
        node_count = config.board.node_count,
        initial_score = config.scoring.initial_score,
        seeded = config.decoration.seed.is_some(),
        "Configuration loaded"
    );

    // 3. Create the navigator.
    let frame_interval = Duration::from_millis(config.host.frame_interval_ms);
    let mut navigator = ScreenNavigator::new(config);

    // 4. Spawn the stdin reader.
    let (tx, mut rx) = mpsc::channel(INPUT_BUFFER);
    let reader = tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        stdio::forward_input_lines(stdin, tx).await
    });

    // 5. Run the host loop.
    let mut renderer = JsonLinesRenderer::new(std::io::stdout());
    let summary = runner::run_host(&mut navigator, &mut rx, frame_interval, &mut renderer)
        .await
        .map_err(EngineError::from)?;

    // 6. Log results.
    runner::log_host_end(&summary);
    match reader.await {
        Ok(Ok(stats)) => info!(
            forwarded = stats.forwarded,
            rejected = stats.rejected,
            "Input stream closed"
        ),
        Ok(Err(e)) => warn!(error = %e, "Input stream failed"),
        Err(e) => warn!(error = %e, "Input reader task panicked"),
    }

    info!(final_screen = %summary.final_screen, "stellar-engine shutdown complete");
    Ok(())
}

/// Load configuration from `stellar-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<GameConfig, EngineError> {
    let config_path = Path::new("stellar-config.yaml");
    if config_path.exists() {
        let config = GameConfig::from_file(config_path)?;
        Ok(config)
    } else {
        let mut config = GameConfig::default();
        config.host.apply_env_overrides();
        Ok(config)
    }
}
