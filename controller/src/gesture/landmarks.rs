//! Hand landmark data structures as delivered by the external detector.
//!
//! Models the 21-point hand skeleton (wrist, four joints per finger) in
//! normalized image coordinates, plus per-frame validation.

use thiserror::Error;

// ── Joint definitions ──────────────────────────────────────

/// The 21 hand landmarks in anatomical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Maximum number of hands the detector reports per frame.
pub const MAX_HANDS: usize = 2;

impl HandLandmark {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

// ── Fingers ────────────────────────────────────────────────

/// The five digits, in the order curl angles are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Joint triple (base, middle, tip) used to measure curl.
    ///
    /// The thumb is measured from its MCP, the other fingers skip the DIP
    /// and measure MCP→PIP against PIP→tip.
    pub fn curl_joints(&self) -> (HandLandmark, HandLandmark, HandLandmark) {
        match self {
            Self::Thumb => (HandLandmark::ThumbMcp, HandLandmark::ThumbIp, HandLandmark::ThumbTip),
            Self::Index => (HandLandmark::IndexMcp, HandLandmark::IndexPip, HandLandmark::IndexTip),
            Self::Middle => (
                HandLandmark::MiddleMcp,
                HandLandmark::MiddlePip,
                HandLandmark::MiddleTip,
            ),
            Self::Ring => (HandLandmark::RingMcp, HandLandmark::RingPip, HandLandmark::RingTip),
            Self::Pinky => (HandLandmark::PinkyMcp, HandLandmark::PinkyPip, HandLandmark::PinkyTip),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }
}

// ── Landmark ───────────────────────────────────────────────

/// A single tracked point: x/y normalized to [0,1], z relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Landmark {
    fn from(p: [f32; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

// ── Hand frame ─────────────────────────────────────────────

/// All hands reported by the detector for one camera frame.
///
/// Each hand is a slice of landmarks indexed by [`HandLandmark`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandFrame {
    pub hands: Vec<Vec<Landmark>>,
}

impl HandFrame {
    pub fn new(hands: Vec<Vec<Landmark>>) -> Self {
        Self { hands }
    }

    /// A frame in which the detector found nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// The first (primary) hand, used for single-hand gestures.
    pub fn primary(&self) -> Option<&[Landmark]> {
        self.hands.first().map(Vec::as_slice)
    }

    /// Reject frames that break the detector contract.
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.hands.len() > MAX_HANDS {
            return Err(FrameError::TooManyHands(self.hands.len()));
        }
        for (hand, landmarks) in self.hands.iter().enumerate() {
            if landmarks.len() != LANDMARK_COUNT {
                return Err(FrameError::WrongLandmarkCount {
                    hand,
                    count: landmarks.len(),
                });
            }
            if let Some(index) = landmarks.iter().position(|lm| !lm.is_finite()) {
                return Err(FrameError::NonFiniteCoordinate { hand, index });
            }
        }
        Ok(())
    }
}

/// Detector contract violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame has {0} hands, at most {} supported", MAX_HANDS)]
    TooManyHands(usize),

    #[error("hand {hand} has {count} landmarks, expected {}", LANDMARK_COUNT)]
    WrongLandmarkCount { hand: usize, count: usize },

    #[error("hand {hand} landmark {index} has a non-finite coordinate")]
    NonFiniteCoordinate { hand: usize, index: usize },
}

// ── Tests ──────────────────────────────────────────────────
