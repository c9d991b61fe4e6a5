//! Progress indicator shown while waiting on the migration service

use is_terminal::IsTerminal;
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::oneshot;

const FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Animated spinner on stderr. Stops and clears its line when dropped.
///
/// When stderr is not a terminal the message is printed once instead.
pub struct Spinner {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();

        if !io::stderr().is_terminal() {
            eprintln!("{}", message);
            return Self {
                stop_tx: None,
                handle: None,
            };
        }

        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(Self::animate(message, stop_rx));

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    fn halt(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
            Self::clear_line();
        }
    }

    async fn animate(message: String, mut stop_rx: oneshot::Receiver<()>) {
        let mut stderr = io::stderr();
        let mut frame = 0usize;

        loop {
            let _ = write!(stderr, "\r{} {}", FRAMES[frame % FRAMES.len()], message);
            let _ = stderr.flush();
            frame += 1;

            tokio::select! {
                _ = tokio::time::sleep(FRAME_INTERVAL) => {},
                _ = &mut stop_rx => break,
            }
        }

        Self::clear_line();
    }

    fn clear_line() {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "\r\x1b[K");
        let _ = stderr.flush();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.halt();
    }
}
