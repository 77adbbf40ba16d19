//! Static pose classification from a single hand's landmarks.
//!
//! Every finger is reduced to a curl angle; poses are then simple
//! open/closed patterns over the five curls.  Open and closed limits are
//! separate, so an angle between them is neither and the pose falls
//! through to `Unknown`.

use serde::Deserialize;

use super::geometry::{distance, finger_curl_angle};
use super::landmarks::{Finger, HandLandmark, Landmark};

// ── Pose ───────────────────────────────────────────────────

/// Discrete hand pose recognized in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    /// Thumb and index tips touching, middle finger and thumb not folded.
    Ok,
    /// Thumb and index extended, other three curled.
    Gun,
    /// All five fingers extended.
    OpenHand,
    /// Index and middle extended, ring and pinky curled.
    TwoFingers,
    /// Index, middle and ring extended, pinky curled.
    ThreeFingers,
    Unknown,
}

impl Pose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Gun => "GUN",
            Self::OpenHand => "OPEN_HAND",
            Self::TwoFingers => "TWO_FINGERS",
            Self::ThreeFingers => "THREE_FINGERS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

// ── Thresholds ─────────────────────────────────────────────

/// Angle and distance limits for pose recognition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoseThresholds {
    /// Maximum thumb-tip to index-tip distance (normalized units) for OK.
    pub ok_pinch_distance: f32,
    /// Maximum middle finger curl (degrees) for OK.
    pub ok_middle_max_curl: f32,
    /// Maximum thumb curl (degrees) for OK.
    pub ok_thumb_max_curl: f32,
    /// A finger is open for GUN below this curl (degrees).
    pub gun_open_below: f32,
    /// A finger is closed for GUN above this curl (degrees).
    pub gun_closed_above: f32,
    /// A finger is open for static poses below this curl (degrees).
    pub static_open_below: f32,
    /// A finger is closed for static poses above this curl (degrees).
    pub static_closed_above: f32,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        Self {
            ok_pinch_distance: 0.045,
            ok_middle_max_curl: 70.0,
            ok_thumb_max_curl: 80.0,
            gun_open_below: 60.0,
            gun_closed_above: 115.0,
            static_open_below: 75.0,
            static_closed_above: 115.0,
        }
    }
}

// ── Finger curls ───────────────────────────────────────────

/// Curl angle of each finger, indexed by [`Finger`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerCurls([f32; 5]);

impl FingerCurls {
    /// Measure all five curls. `hand` must hold a full landmark set.
    pub fn measure(hand: &[Landmark]) -> Self {
        let mut curls = [0.0; 5];
        for finger in Finger::ALL {
            let (mcp, pip, tip) = finger.curl_joints();
            curls[finger.index()] = finger_curl_angle(hand, mcp.index(), pip.index(), tip.index());
        }
        Self(curls)
    }

    pub fn get(&self, finger: Finger) -> f32 {
        self.0[finger.index()]
    }

    fn open(&self, finger: Finger, below: f32) -> bool {
        self.get(finger) < below
    }

    fn closed(&self, finger: Finger, above: f32) -> bool {
        self.get(finger) > above
    }
}

// ── Predicates ─────────────────────────────────────────────

/// OK sign on a single hand. `hand` must hold a full landmark set.
pub fn is_ok_gesture(hand: &[Landmark], t: &PoseThresholds) -> bool {
    let pinch = distance(
        &hand[HandLandmark::ThumbTip.index()],
        &hand[HandLandmark::IndexTip.index()],
    );
    if pinch > t.ok_pinch_distance {
        return false;
    }

    let curls = FingerCurls::measure(hand);
    if curls.get(Finger::Middle) > t.ok_middle_max_curl {
        return false;
    }
    curls.get(Finger::Thumb) <= t.ok_thumb_max_curl
}

/// Gun pose: thumb and index open, middle/ring/pinky closed.
///
/// `hand` must hold a full landmark set.
pub fn is_gun_gesture(hand: &[Landmark], t: &PoseThresholds) -> bool {
    let curls = FingerCurls::measure(hand);
    let open = |f| curls.open(f, t.gun_open_below);
    let closed = |f| curls.closed(f, t.gun_closed_above);

    open(Finger::Thumb)
        && open(Finger::Index)
        && closed(Finger::Middle)
        && closed(Finger::Ring)
        && closed(Finger::Pinky)
}

/// Priority-ordered static pose: OpenHand, TwoFingers, ThreeFingers.
///
/// The thumb only matters for OpenHand.  `hand` must hold a full
/// landmark set.
pub fn classify_static_pose(hand: &[Landmark], t: &PoseThresholds) -> Pose {
    let curls = FingerCurls::measure(hand);
    let open = |f| curls.open(f, t.static_open_below);
    let closed = |f| curls.closed(f, t.static_closed_above);

    if Finger::ALL.iter().all(|&f| open(f)) {
        return Pose::OpenHand;
    }

    if open(Finger::Index) && open(Finger::Middle) && closed(Finger::Ring) && closed(Finger::Pinky)
    {
        return Pose::TwoFingers;
    }

    if open(Finger::Index) && open(Finger::Middle) && open(Finger::Ring) && closed(Finger::Pinky) {
        return Pose::ThreeFingers;
    }

    Pose::Unknown
}

/// Single label for display and logging: OK, then GUN, then static pose.
///
/// Panics if `hand` is shorter than a full landmark set.
pub fn classify(hand: &[Landmark], t: &PoseThresholds) -> Pose {
    if is_ok_gesture(hand, t) {
        Pose::Ok
    } else if is_gun_gesture(hand, t) {
        Pose::Gun
    } else {
        classify_static_pose(hand, t)
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Build a synthetic hand whose fingers have the given curl angles
/// (thumb, index, middle, ring, pinky) with the middle MCP at `palm_y`.
#[cfg(test)]
pub(crate) fn make_hand(curls: [f32; 5], palm_y: f32) -> Vec<Landmark> {
    use super::landmarks::LANDMARK_COUNT;

    const SEG: f32 = 0.05;
    let mut lm = vec![Landmark::new(0.5, palm_y + 0.15, 0.0); LANDMARK_COUNT];
    let base_x = [0.35, 0.45, 0.5, 0.55, 0.6];

    for finger in Finger::ALL {
        let (mcp, pip, tip) = finger.curl_joints();
        let theta = curls[finger.index()].to_radians();
        let base = Landmark::new(base_x[finger.index()], palm_y, 0.0);
        let mid = Landmark::new(base.x, base.y - SEG, 0.0);
        let end = Landmark::new(mid.x + SEG * theta.sin(), mid.y - SEG * theta.cos(), 0.0);
        lm[mcp.index()] = base;
        lm[pip.index()] = mid;
        lm[tip.index()] = end;
        // Unused intermediate joint sits between PIP and tip.
        if finger != Finger::Thumb {
            lm[tip.index() - 1] = Landmark::new((mid.x + end.x) / 2.0, (mid.y + end.y) / 2.0, 0.0);
        }
    }
    lm[HandLandmark::ThumbCmc.index()] = Landmark::new(0.33, palm_y + 0.05, 0.0);
    lm
}

/// An OK sign: thumb tip and index tip `gap` apart, other fingers relaxed.
#[cfg(test)]
pub(crate) fn make_ok_hand(gap: f32) -> Vec<Landmark> {
    let mut lm = make_hand([30.0, 100.0, 20.0, 20.0, 20.0], 0.5);
    let thumb_tip = lm[HandLandmark::ThumbTip.index()];
    lm[HandLandmark::IndexTip.index()] = Landmark::new(thumb_tip.x + gap, thumb_tip.y, 0.0);
    lm
}

/// Gun pose: thumb and index straight, the rest folded.
#[cfg(test)]
pub(crate) fn make_gun_hand() -> Vec<Landmark> {
    make_hand([10.0, 10.0, 150.0, 150.0, 150.0], 0.5)
}
