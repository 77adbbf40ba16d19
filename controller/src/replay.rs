//! Frame source: newline-delimited JSON landmark frames.
//!
//! Each line is one detector frame:
//!
//! ```text
//! {"t": 12.345, "hands": [[[x, y, z], ...21 points], ...]}
//! ```
//!
//! `t` is monotonic session time in seconds.  Blank lines are skipped.
//! [`drive`] runs a whole stream through the interpreter and dispatcher.

use std::io::BufRead;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::GestureConfig;
use crate::gesture::{pose, HandFrame, InterpreterState, Landmark};
use crate::media::{CommandDispatcher, KeySink};

/// One decoded line of the stream.
#[derive(Debug, Clone, Deserialize)]
struct RawFrame {
    t: f64,
    #[serde(default)]
    hands: Vec<Vec<[f32; 3]>>,
}

/// A frame and its capture timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedFrame {
    pub t: f64,
    pub frame: HandFrame,
}

/// Iterator over the frames of a JSON-lines stream.
pub struct FrameReader<R: BufRead> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Read the next frame, or `None` at end of input.
    pub fn next_frame(&mut self) -> anyhow::Result<Option<TimedFrame>> {
        loop {
            self.buf.clear();
            let n = self
                .reader
                .read_line(&mut self.buf)
                .with_context(|| format!("failed to read line {}", self.line_no + 1))?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }

            let raw: RawFrame = serde_json::from_str(line)
                .with_context(|| format!("invalid frame on line {}", self.line_no))?;
            let hands = raw
                .hands
                .into_iter()
                .map(|hand| hand.into_iter().map(Landmark::from).collect())
                .collect();
            return Ok(Some(TimedFrame {
                t: raw.t,
                frame: HandFrame::new(hands),
            }));
        }
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = anyhow::Result<TimedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

// ── Driver ─────────────────────────────────────────────────

/// Outcome of one [`drive`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveReport {
    /// Frames handed to the interpreter.
    pub accepted: usize,
    /// Frames dropped for a non-finite or decreasing timestamp.
    pub dropped: usize,
    /// Frames the interpreter rejected as malformed.
    pub rejected: usize,
    /// Final interpreter state, `None` if no frame was accepted.
    pub state: Option<InterpreterState>,
}

/// Feed every frame to a session until the stream ends.
///
/// The session clock starts at the first accepted frame.  Malformed frames
/// are logged and skipped; a read or decode error ends the run.
pub fn drive<R: BufRead, S: KeySink>(
    config: &GestureConfig,
    frames: FrameReader<R>,
    dispatcher: &mut CommandDispatcher<S>,
) -> anyhow::Result<DriveReport> {
    let mut state: Option<InterpreterState> = None;
    let mut last_t = f64::NEG_INFINITY;
    let mut report = DriveReport {
        accepted: 0,
        dropped: 0,
        rejected: 0,
        state: None,
    };

    for timed in frames {
        let timed = timed?;
        if !timed.t.is_finite() || timed.t < last_t {
            warn!("dropping frame with non-monotonic timestamp {}", timed.t);
            report.dropped += 1;
            continue;
        }
        last_t = timed.t;
        report.accepted += 1;

        let state = state.get_or_insert_with(|| InterpreterState::new(timed.t));
        match state.process_frame(config, &timed.frame, timed.t) {
            Ok(command) => {
                if let Some(hand) = timed.frame.primary() {
                    debug!(
                        "{:.3}s hands={} pose={}",
                        timed.t,
                        timed.frame.hand_count(),
                        pose::classify(hand, &config.thresholds).as_str()
                    );
                }
                if let Some(command) = command {
                    dispatcher.dispatch(&command, timed.t);
                }
            }
            Err(e) => {
                warn!("rejected frame at {:.3}s: {}", timed.t, e);
                report.rejected += 1;
            }
        }
    }

    if let Some(state) = state.as_mut() {
        state.stream_stopped();
        info!("{}", state.status_line());
    }
    report.state = state;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::gesture::pose::{make_gun_hand, make_hand, make_ok_hand};
    use crate::gesture::{Mode, VolumeState};
    use crate::media::dispatcher::tests::RecordingSink;
    use crate::media::MediaCommand;

    fn frame_line(t: f64, hands: &[Vec<Landmark>]) -> String {
        let hands: Vec<String> = hands
            .iter()
            .map(|hand| {
                let points: Vec<String> = hand
                    .iter()
                    .map(|lm| format!("[{},{},{}]", lm.x, lm.y, lm.z))
                    .collect();
                format!("[{}]", points.join(","))
            })
            .collect();
        format!("{{\"t\": {t}, \"hands\": [{}]}}\n", hands.join(","))
    }

    fn run(input: String) -> (DriveReport, Vec<MediaCommand>) {
        let mut dispatcher = CommandDispatcher::new(RecordingSink::default());
        let report = drive(
            &GestureConfig::default(),
            FrameReader::new(Cursor::new(input)),
            &mut dispatcher,
        )
        .unwrap();
        (report, dispatcher.sink().pressed.clone())
    }

    fn hand_json(y: f32) -> String {
        let points: Vec<String> = (0..21).map(|_| format!("[0.5,{y},0.0]")).collect();
        format!("[{}]", points.join(","))
    }

    #[test]
    fn test_reads_frames_and_skips_blank_lines() {
        let input = format!(
            "{{\"t\": 0.0, \"hands\": []}}\n\n{{\"t\": 0.033, \"hands\": [{}]}}\n",
            hand_json(0.25)
        );
        let frames: Vec<TimedFrame> = FrameReader::new(Cursor::new(input))
            .collect::<anyhow::Result<_>>()
            .unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].frame.is_empty());
        assert_eq!(frames[1].t, 0.033);
        assert_eq!(frames[1].frame.hand_count(), 1);
        assert_eq!(frames[1].frame.hands[0].len(), 21);
        assert_eq!(frames[1].frame.hands[0][9].y, 0.25);
    }

    #[test]
    fn test_missing_hands_means_empty_frame() {
        let mut reader = FrameReader::new(Cursor::new("{\"t\": 1.5}\n"));
        let f = reader.next_frame().unwrap().unwrap();
        assert_eq!(f.t, 1.5);
        assert!(f.frame.is_empty());
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_reports_bad_line_number() {
        let input = "{\"t\": 0.0}\nnot json\n";
        let mut reader = FrameReader::new(Cursor::new(input));
        assert!(reader.next_frame().unwrap().is_some());
        let err = reader.next_frame().unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[test]
    fn test_short_hand_is_passed_through_for_validation() {
        let input = "{\"t\": 0.0, \"hands\": [[[0.1,0.2,0.3]]]}\n";
        let mut reader = FrameReader::new(Cursor::new(input));
        let f = reader.next_frame().unwrap().unwrap();
        assert!(f.frame.validate().is_err());
    }

    #[test]
    fn test_drive_skips_bad_frames() {
        let ok = vec![make_ok_hand(0.02), make_ok_hand(0.02)];
        let gun = vec![make_gun_hand()];
        let mut short = make_gun_hand();
        short.pop();

        let clean = [
            frame_line(0.0, &ok),
            frame_line(0.1, &gun),
            frame_line(0.3, &gun),
            frame_line(0.4, &gun),
        ]
        .concat();
        let noisy = [
            frame_line(0.0, &ok),
            frame_line(0.1, &gun),
            frame_line(0.05, &gun),
            frame_line(0.2, &[short]),
            frame_line(0.3, &gun),
            frame_line(0.4, &gun),
        ]
        .concat();

        let (clean_report, clean_pressed) = run(clean);
        let (report, pressed) = run(noisy);

        assert_eq!(pressed, vec![MediaCommand::PlayPause]);
        assert_eq!(pressed, clean_pressed);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.accepted, 5);
        assert_eq!(report.state, clean_report.state);
    }

    #[test]
    fn test_drive_seeds_clock_from_first_frame() {
        let input = [frame_line(50.0, &[]), frame_line(50.5, &[])].concat();
        let (report, pressed) = run(input);
        let state = report.state.expect("session started");
        assert_eq!(state.last_seen_s(), 50.0);
        assert!(state.is_locked());
        assert!(pressed.is_empty());
    }

    #[test]
    fn test_drive_stops_stream_at_end() {
        let ok = vec![make_ok_hand(0.02), make_ok_hand(0.02)];
        let input = [
            frame_line(0.0, &ok),
            frame_line(0.1, &[make_hand([10.0; 5], 0.2)]),
        ]
        .concat();
        let (report, pressed) = run(input);
        assert_eq!(pressed, vec![MediaCommand::VolumeUp]);
        let state = report.state.expect("session started");
        assert_eq!(state.mode(), Mode::Active);
        assert_eq!(state.volume_state(), VolumeState::Idle);
    }

    #[test]
    fn test_drive_empty_stream() {
        let (report, pressed) = run(String::new());
        assert_eq!(report.accepted, 0);
        assert!(report.state.is_none());
        assert!(pressed.is_empty());
    }
}
