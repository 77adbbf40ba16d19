//! Logging key sink, used for dry runs and builds without the
//! `media-keys` feature.
//!
//! Presses are reported through tracing and counted, nothing is injected.

use tracing::info;

use super::{KeySink, MediaCommand, SinkError};

#[derive(Debug, Default)]
pub struct LogSink {
    presses: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of presses seen so far.
    pub fn presses(&self) -> usize {
        self.presses
    }
}

impl KeySink for LogSink {
    fn press(&mut self, command: MediaCommand) -> Result<(), SinkError> {
        self.presses += 1;
        info!("key press (not injected): {}", command.as_str());
        Ok(())
    }
}
