//! Gesture subsystem: hand landmarks in, media commands out.
//!
//! Provides:
//! - `landmarks`: 21-point hand model and frame validation
//! - `geometry`: distance, vector angle and finger curl primitives
//! - `pose`: stateless pose classification (OK, GUN, static poses)
//! - `interpreter`: lock/unlock state machine with debouncing and cooldowns

pub mod geometry;
pub mod interpreter;
pub mod landmarks;
pub mod pose;

pub use interpreter::{InterpreterState, Mode, VolumeState};
pub use landmarks::{FrameError, HandFrame, Landmark};
pub use pose::{Pose, PoseThresholds};
