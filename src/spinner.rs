//! A minimal terminal spinner for visual feedback during an evaluation.

use std::io::Write;
use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::events::{Event, Stage};

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// A terminal spinner that runs in a background task.
///
/// The spinner writes to stderr so it doesn't interfere with stdout output.
/// Its label follows the status carried by stage events.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: tokio::sync::watch::Sender<bool>,
}

impl Spinner {
    /// Start a spinner labelled `message` that relabels itself on every
    /// stage event received from `events`.
    pub fn start(message: &str, mut events: broadcast::Receiver<Event>) -> Self {
        let (cancel_tx, mut cancel_rx) = tokio::sync::watch::channel(false);
        let mut message = message.to_string();

        let handle = tokio::spawn(async move {
            let mut i = 0;
            let mut listening = true;
            loop {
                let frame = FRAMES[i % FRAMES.len()];
                // \r moves to start of line, \x1b[2K clears the line
                eprint!("\x1b[2K\r{frame} {message}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancel_rx.changed() => break,
                    event = events.recv(), if listening => match event {
                        Ok(event) => {
                            if let Some(label) = label_for(&event) {
                                message = label;
                            }
                        }
                        Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => listening = false,
                    },
                }
                i += 1;
            }
            // Clear the spinner line
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}

/// New label for an event, if it should change the spinner text.
fn label_for(event: &Event) -> Option<String> {
    match event {
        Event::Stage {
            stage: Stage::Idle, ..
        } => None,
        Event::Stage { status, .. } if !status.is_empty() => Some(status.clone()),
        Event::Stage { .. } => None,
    }
}
