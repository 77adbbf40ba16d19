//! Media command output: the key sink seam and its backends.
//!
//! Provides:
//! - `MediaCommand`: the abstract commands the interpreter can emit
//! - `KeySink`: anything that can press a media key
//! - `dispatcher`: per-command cooldown gate in front of a sink
//! - `EnigoSink`: OS key injection (gated behind `media-keys` feature)
//! - `LogSink`: logging stand-in for dry runs and builds without `media-keys`

use thiserror::Error;

pub mod dispatcher;

pub use dispatcher::{CommandDescriptor, CommandDispatcher};

#[cfg(feature = "media-keys")]
pub mod enigo_sink;

#[cfg(feature = "media-keys")]
pub use enigo_sink::EnigoSink;

pub mod stub;

pub use stub::LogSink;

// ── Commands ───────────────────────────────────────────────

/// Abstract media control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCommand {
    VolumeUp,
    VolumeDown,
    PlayPause,
    NextTrack,
    PreviousTrack,
}

impl MediaCommand {
    /// Symbol handed to the key sink and used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VolumeUp => "VOLUME_UP",
            Self::VolumeDown => "VOLUME_DOWN",
            Self::PlayPause => "PLAY_PAUSE",
            Self::NextTrack => "NEXT_TRACK",
            Self::PreviousTrack => "PREVIOUS_TRACK",
        }
    }
}

// ── Sink ───────────────────────────────────────────────────

/// Key injection failed. Reported, never fatal.
#[derive(Debug, Error)]
#[error("failed to press {command}: {reason}")]
pub struct SinkError {
    pub command: &'static str,
    pub reason: String,
}

/// Destination for media key presses.
pub trait KeySink {
    fn press(&mut self, command: MediaCommand) -> Result<(), SinkError>;
}

impl<S: KeySink + ?Sized> KeySink for Box<S> {
    fn press(&mut self, command: MediaCommand) -> Result<(), SinkError> {
        (**self).press(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_symbols() {
        assert_eq!(MediaCommand::VolumeUp.as_str(), "VOLUME_UP");
        assert_eq!(MediaCommand::VolumeDown.as_str(), "VOLUME_DOWN");
        assert_eq!(MediaCommand::PlayPause.as_str(), "PLAY_PAUSE");
        assert_eq!(MediaCommand::NextTrack.as_str(), "NEXT_TRACK");
        assert_eq!(MediaCommand::PreviousTrack.as_str(), "PREVIOUS_TRACK");
    }

    #[test]
    fn test_sink_error_message() {
        let err = SinkError {
            command: MediaCommand::PlayPause.as_str(),
            reason: "no display".into(),
        };
        assert_eq!(err.to_string(), "failed to press PLAY_PAUSE: no display");
    }
}
