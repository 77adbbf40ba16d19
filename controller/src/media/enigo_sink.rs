//! OS-level media key injection through enigo.

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use tracing::{debug, info};

use super::{KeySink, MediaCommand, SinkError};

pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    pub fn new() -> anyhow::Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow::anyhow!("enigo init failed: {:?}", e))?;
        info!("media key injection enabled");
        Ok(Self { enigo })
    }
}

fn media_key(command: MediaCommand) -> Key {
    match command {
        MediaCommand::VolumeUp => Key::VolumeUp,
        MediaCommand::VolumeDown => Key::VolumeDown,
        MediaCommand::PlayPause => Key::MediaPlayPause,
        MediaCommand::NextTrack => Key::MediaNextTrack,
        MediaCommand::PreviousTrack => Key::MediaPrevTrack,
    }
}

impl KeySink for EnigoSink {
    fn press(&mut self, command: MediaCommand) -> Result<(), SinkError> {
        debug!("injecting {}", command.as_str());
        self.enigo
            .key(media_key(command), Direction::Click)
            .map_err(|e| SinkError {
                command: command.as_str(),
                reason: format!("{:?}", e),
            })
    }
}
