//! Host loop driving a [`ScreenNavigator`] in real time.
//!
//! This module provides [`run_host`], the async function that connects the
//! navigator to the outside world:
//!
//! - **Input**: events arrive on an mpsc channel and are dispatched as soon
//!   as they are received.
//! - **Frames**: a fixed-interval tokio timer advances the active screen's
//!   virtual clock by the real elapsed milliseconds.
//! - **Render**: after every change the callback receives a fresh
//!   [`ScreenView`].
//! - **Shutdown**: the loop ends cleanly when every input sender is dropped.

use std::time::Duration;

use stellar_types::{InputEvent, Screen, ScreenView};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

use crate::navigator::{ScreenNavigator, Transition};

/// Errors that can occur while hosting the game.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The render callback could not deliver a view.
    #[error("render failed: {message}")]
    Render {
        /// Description of the render failure.
        message: String,
    },
}

/// Result of a host run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSummary {
    /// Frames advanced.
    pub frames: u64,
    /// Input events received.
    pub inputs: u64,
    /// Input events that changed nothing.
    pub ignored_inputs: u64,
    /// Views delivered to the renderer.
    pub renders: u64,
    /// Screen active when the loop ended.
    pub final_screen: Screen,
}

/// Callback invoked whenever the view changes.
pub trait RenderCallback: Send {
    /// Deliver a fresh view. `transition` says what caused it.
    fn on_render(&mut self, transition: Transition, view: &ScreenView) -> Result<(), HostError>;
}

/// A render callback that discards every view.
pub struct NoOpRenderer;

impl RenderCallback for NoOpRenderer {
    fn on_render(&mut self, _transition: Transition, _view: &ScreenView) -> Result<(), HostError> {
        Ok(())
    }
}

/// Run the game until the input channel closes.
///
/// The initial view is rendered before the first input is read.
///
/// # Errors
///
/// Returns [`HostError`] if the render callback fails.
pub async fn run_host(
    navigator: &mut ScreenNavigator,
    inputs: &mut mpsc::Receiver<InputEvent>,
    frame_interval: Duration,
    renderer: &mut dyn RenderCallback,
) -> Result<HostSummary, HostError> {
    let mut summary = HostSummary {
        frames: 0,
        inputs: 0,
        ignored_inputs: 0,
        renders: 0,
        final_screen: navigator.screen(),
    };

    info!(
        frame_interval_ms = u64::try_from(frame_interval.as_millis()).unwrap_or(u64::MAX),
        screen = %navigator.screen(),
        "Host starting"
    );

    renderer.on_render(Transition::Changed(navigator.screen()), &navigator.view())?;
    summary.renders = summary.renders.saturating_add(1);

    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    frames.tick().await;
    let mut clock = Instant::now();

    loop {
        let transition = tokio::select! {
            biased;

            received = inputs.recv() => {
                let Some(input) = received else {
                    break;
                };
                summary.inputs = summary.inputs.saturating_add(1);
                let transition = navigator.handle(input);
                if !transition.needs_render() {
                    summary.ignored_inputs = summary.ignored_inputs.saturating_add(1);
                }
                transition
            }

            now = frames.tick() => {
                // Advance by whole milliseconds and carry the remainder.
                let elapsed_ms =
                    u64::try_from(now.saturating_duration_since(clock).as_millis()).unwrap_or(u64::MAX);
                clock = clock
                    .checked_add(Duration::from_millis(elapsed_ms))
                    .unwrap_or(now);
                summary.frames = summary.frames.saturating_add(1);
                navigator.advance(elapsed_ms)
            }
        };

        if transition.needs_render() {
            renderer.on_render(transition, &navigator.view())?;
            summary.renders = summary.renders.saturating_add(1);
        }
    }

    summary.final_screen = navigator.screen();
    Ok(summary)
}

/// Log the end of a host run.
pub fn log_host_end(summary: &HostSummary) {
    info!(
        frames = summary.frames,
        inputs = summary.inputs,
        ignored_inputs = summary.ignored_inputs,
        renders = summary.renders,
        final_screen = %summary.final_screen,
        "Host stopped"
    );
}
