//! Touchless media controller - hand-landmark gestures to media keys.
//!
//! Part of the gesture pipeline: an external detector supplies 21-point hand
//! landmarks per camera frame; this crate classifies poses, runs the
//! lock/unlock and debounce state machine, and presses media keys.

pub mod config;
pub mod gesture;
pub mod media;
pub mod replay;
