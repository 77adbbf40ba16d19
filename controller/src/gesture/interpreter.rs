//! Temporal gesture interpreter: turns per-frame poses into debounced
//! media commands.
//!
//! A session starts locked.  A two-handed OK sign toggles between locked
//! and active.  While active, an open palm held high or low drives the
//! volume, a held GUN pose toggles playback, and a held two/three finger
//! pose skips tracks.  Losing the hand for too long locks the session
//! again.

use tracing::{debug, info};

use super::landmarks::{FrameError, HandFrame, HandLandmark, Landmark};
use super::pose::{classify_static_pose, is_gun_gesture, is_ok_gesture, Pose};
use crate::config::GestureConfig;
use crate::media::{CommandDescriptor, MediaCommand};

// ── Mode ───────────────────────────────────────────────────

/// Top-level gate: commands are only produced while active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Locked,
    Active,
}

impl Mode {
    /// Label shown to the user.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "LOCKED",
            Self::Active => "ACTIVE",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Locked => Self::Active,
            Self::Active => Self::Locked,
        }
    }
}

/// Continuous volume control sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeState {
    Idle,
    Increasing,
    Decreasing,
}

impl VolumeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Increasing => "INCREASING",
            Self::Decreasing => "DECREASING",
        }
    }
}

// ── State ──────────────────────────────────────────────────

/// Per-session interpreter state.
///
/// Timestamps are session seconds from a monotonic clock.  `None` means
/// the event never happened, which always satisfies a cooldown.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpreterState {
    mode: Mode,
    volume_state: VolumeState,
    /// Two-hand OK seen on the previous frame (for edge detection).
    prev_ok_state: bool,
    last_toggle_s: Option<f64>,
    gun_frames: u32,
    stable_frames: u32,
    prev_gesture_pose: Option<Pose>,
    /// Last frame with at least one hand.
    last_seen_s: f64,
    /// Last play/pause or track command.
    last_cmd_s: Option<f64>,
}

impl InterpreterState {
    /// Fresh locked session starting at `start_s`.
    pub fn new(start_s: f64) -> Self {
        Self {
            mode: Mode::Locked,
            volume_state: VolumeState::Idle,
            prev_ok_state: false,
            last_toggle_s: None,
            gun_frames: 0,
            stable_frames: 0,
            prev_gesture_pose: None,
            last_seen_s: start_s,
            last_cmd_s: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.mode == Mode::Locked
    }

    pub fn volume_state(&self) -> VolumeState {
        self.volume_state
    }

    pub fn gun_frames(&self) -> u32 {
        self.gun_frames
    }

    pub fn stable_frames(&self) -> u32 {
        self.stable_frames
    }

    pub fn last_seen_s(&self) -> f64 {
        self.last_seen_s
    }

    /// Interpret one frame.
    ///
    /// Returns at most one command.  A frame that violates the detector
    /// contract is rejected before any state changes.
    pub fn process_frame(
        &mut self,
        config: &GestureConfig,
        frame: &HandFrame,
        now_s: f64,
    ) -> Result<Option<CommandDescriptor>, FrameError> {
        frame.validate()?;
        let t = &config.thresholds;

        // Mode toggle on the rising edge of a two-handed OK.
        let two_hand_ok =
            frame.hand_count() == 2 && frame.hands.iter().all(|hand| is_ok_gesture(hand, t));
        let toggle_ready = self
            .last_toggle_s
            .map_or(true, |last| now_s - last > config.toggle_cooldown_s);
        if two_hand_ok && !self.prev_ok_state && toggle_ready {
            self.mode = self.mode.toggled();
            self.last_toggle_s = Some(now_s);
            self.gun_frames = 0;
            self.stable_frames = 0;
            info!("Mode: {}", self.mode.as_str());
        }
        self.prev_ok_state = two_hand_ok;

        if self.mode == Mode::Locked {
            self.volume_state = VolumeState::Idle;
            return Ok(None);
        }

        let Some(hand) = frame.primary() else {
            if now_s - self.last_seen_s > config.auto_lock_timeout_s {
                self.mode = Mode::Locked;
                self.volume_state = VolumeState::Idle;
                info!(
                    "Auto-locked after {:.2}s without a hand",
                    now_s - self.last_seen_s
                );
            }
            return Ok(None);
        };
        self.last_seen_s = now_s;

        let pose = classify_static_pose(hand, t);
        let volume = self.update_volume(config, hand, pose);

        // Volume is continuous and skips the global command gap.
        if let Some(last) = self.last_cmd_s {
            if now_s - last < config.discrete_cooldown_s {
                return Ok(volume);
            }
        }

        let discrete = self.update_discrete(config, hand, pose, now_s);
        Ok(discrete.or(volume))
    }

    /// Open palm above/below the dead band raises/lowers the volume.
    fn update_volume(
        &mut self,
        config: &GestureConfig,
        hand: &[Landmark],
        pose: Pose,
    ) -> Option<CommandDescriptor> {
        if pose != Pose::OpenHand {
            self.volume_state = VolumeState::Idle;
            return None;
        }

        let y = hand[HandLandmark::MiddleMcp.index()].y;
        let (next, command, name) = if y < config.volume_top_thresh {
            (VolumeState::Increasing, MediaCommand::VolumeUp, "up")
        } else if y > config.volume_bottom_thresh {
            (VolumeState::Decreasing, MediaCommand::VolumeDown, "down")
        } else {
            self.volume_state = VolumeState::Idle;
            return None;
        };

        if self.volume_state != next {
            match next {
                VolumeState::Increasing => info!("Volume Increasing..."),
                _ => info!("Volume Decreasing..."),
            }
            self.volume_state = next;
        }
        Some(CommandDescriptor::new(command, name, config.volume_cooldown_s))
    }

    /// GUN hold for play/pause, otherwise two/three finger hold for tracks.
    fn update_discrete(
        &mut self,
        config: &GestureConfig,
        hand: &[Landmark],
        pose: Pose,
        now_s: f64,
    ) -> Option<CommandDescriptor> {
        if is_gun_gesture(hand, &config.thresholds) {
            self.gun_frames += 1;
            debug!("gun frames: {}", self.gun_frames);
            if self.gun_frames < config.gun_frame_req {
                return None;
            }
            self.gun_frames = 0;
            self.last_cmd_s = Some(now_s);
            return Some(
                CommandDescriptor::new(MediaCommand::PlayPause, "pp", config.play_pause_cooldown_s)
                    .with_log("Action: Play / Pause"),
            );
        }

        self.gun_frames = 0;

        let (command, name, message) = match pose {
            Pose::TwoFingers => (MediaCommand::NextTrack, "next", "Action: Next Track"),
            Pose::ThreeFingers => (MediaCommand::PreviousTrack, "prev", "Action: Previous Track"),
            _ => return None,
        };

        if self.prev_gesture_pose == Some(pose) {
            self.stable_frames += 1;
        } else {
            self.stable_frames = 0;
            self.prev_gesture_pose = Some(pose);
        }
        debug!("{} stable frames: {}", pose.as_str(), self.stable_frames);

        if self.stable_frames < config.gesture_stable_req {
            return None;
        }
        self.stable_frames = 0;
        self.last_cmd_s = Some(now_s);
        Some(CommandDescriptor::new(command, name, config.track_cooldown_s).with_log(message))
    }

    /// The frame stream ended (camera stopped).
    pub fn stream_stopped(&mut self) {
        self.volume_state = VolumeState::Idle;
        info!("Frame stream stopped");
    }

    /// One-line summary for diagnostics.
    pub fn status_line(&self) -> String {
        format!(
            "mode={} volume={} gun_frames={} stable_frames={} last_pose={}",
            self.mode.as_str(),
            self.volume_state.as_str(),
            self.gun_frames,
            self.stable_frames,
            self.prev_gesture_pose.map_or("none", |p| p.as_str()),
        )
    }
}

// ── Tests ──────────────────────────────────────────────────
