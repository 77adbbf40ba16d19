//! Cooldown-gated command dispatch.
//!
//! Every command carries a bucket name and a cooldown.  A press goes to the
//! sink only if the bucket has not fired within its cooldown.  This is the
//! only place the key sink is called.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::{KeySink, MediaCommand};

/// A command request produced by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandDescriptor {
    pub command: MediaCommand,
    /// Cooldown bucket ("up", "down", "pp", "next", "prev").
    pub name: &'static str,
    /// Minimum seconds between two presses in this bucket.
    pub cooldown_s: f64,
    /// Human-readable line logged when the press goes through.
    pub log_message: Option<&'static str>,
}

impl CommandDescriptor {
    pub fn new(command: MediaCommand, name: &'static str, cooldown_s: f64) -> Self {
        Self {
            command,
            name,
            cooldown_s,
            log_message: None,
        }
    }

    pub fn with_log(mut self, message: &'static str) -> Self {
        self.log_message = Some(message);
        self
    }
}

/// Per-bucket cooldown table in front of a [`KeySink`].
pub struct CommandDispatcher<S: KeySink> {
    sink: S,
    /// Last press time per bucket, in session seconds.
    last_dispatch: HashMap<&'static str, f64>,
}

impl<S: KeySink> CommandDispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            last_dispatch: HashMap::new(),
        }
    }

    /// Press the command unless its bucket is cooling down.
    ///
    /// Returns whether the sink was called.  A failed press still counts
    /// against the cooldown.
    pub fn dispatch(&mut self, descriptor: &CommandDescriptor, now_s: f64) -> bool {
        if let Some(&last) = self.last_dispatch.get(descriptor.name) {
            if now_s - last <= descriptor.cooldown_s {
                debug!(
                    "{} suppressed, bucket {:?} cooling down ({:.3}s since last)",
                    descriptor.command.as_str(),
                    descriptor.name,
                    now_s - last
                );
                return false;
            }
        }

        if let Err(e) = self.sink.press(descriptor.command) {
            warn!("{}", e);
        }
        self.last_dispatch.insert(descriptor.name, now_s);

        if let Some(msg) = descriptor.log_message {
            info!("{}", msg);
        }
        true
    }

    /// Last press time for a bucket, if it ever fired.
    pub fn last_dispatch(&self, name: &str) -> Option<f64> {
        self.last_dispatch.get(name).copied()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
