//! JSON-lines bridge between the host loop and the process's stdio.
//!
//! Input: one [`InputEvent`] per line on stdin. Blank lines are skipped and
//! malformed lines are logged and dropped, so a renderer bug never takes
//! the game down.
//!
//! Output: one [`ScreenView`] per line on stdout, written after every state
//! change. Logs go to stderr so stdout stays a clean frame stream.

use std::io::Write;

use stellar_core::navigator::Transition;
use stellar_core::runner::{HostError, RenderCallback};
use stellar_types::{InputEvent, ScreenView};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::EngineError;

/// Counts from one pass over the input stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputStats {
    /// Events forwarded to the host.
    pub forwarded: u64,
    /// Lines that failed to parse.
    pub rejected: u64,
}

/// Forward every parseable line of `reader` to `tx` until end of input.
///
/// Stops early if the host has gone away.
pub async fn forward_input_lines<R>(
    reader: R,
    tx: mpsc::Sender<InputEvent>,
) -> Result<InputStats, EngineError>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = InputStats::default();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<InputEvent>(line) {
            Ok(event) => {
                debug!(event = ?event, "Input received");
                if tx.send(event).await.is_err() {
                    break;
                }
                stats.forwarded = stats.forwarded.saturating_add(1);
            }
            Err(e) => {
                warn!(error = %e, line, "Malformed input line dropped");
                stats.rejected = stats.rejected.saturating_add(1);
            }
        }
    }
    Ok(stats)
}

/// Render callback writing each view as a JSON line.
pub struct JsonLinesRenderer<W> {
    out: W,
}

impl<W: Write + Send> JsonLinesRenderer<W> {
    /// Wrap a writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> RenderCallback for JsonLinesRenderer<W> {
    fn on_render(&mut self, transition: Transition, view: &ScreenView) -> Result<(), HostError> {
        serde_json::to_writer(&mut self.out, view).map_err(|e| HostError::Render {
            message: format!("failed to encode view: {e}"),
        })?;
        self.out
            .write_all(b"\n")
            .and_then(|()| self.out.flush())
            .map_err(|e| HostError::Render {
                message: format!("failed to write view: {e}"),
            })?;
        debug!(transition = ?transition, screen = %view.screen(), "View rendered");
        Ok(())
    }
}
