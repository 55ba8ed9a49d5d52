//! Sit-up repetition counting from the torso-flexion angle.
//!
//! The flexion angle sits at the left hip, between the left shoulder and the
//! left knee: values near 180° mean the body forms a straight line (extended),
//! small values mean the torso is folded towards the knees. A two-state
//! machine with hysteresis turns that continuous signal into a repetition
//! count.

use std::fmt;

use crate::angle::interior_angle;
use crate::landmark::{Landmark, LandmarkIdx, PoseFrame};

/// The landmarks the flexion measurement reads, in probe order.
pub const REQUIRED_LANDMARKS: [LandmarkIdx; 3] = [
    LandmarkIdx::LeftShoulder,
    LandmarkIdx::LeftHip,
    LandmarkIdx::LeftKnee,
];

/// Measures the torso-flexion angle of one pose, in degrees.
///
/// Reads the left shoulder, hip and knee and computes the interior angle at
/// the hip. Fails with [`MissingLandmark`] naming the first absent landmark
/// (probed in [`REQUIRED_LANDMARKS`] order) when the frame is incomplete.
///
/// Visibility scores are not consulted here; a caller that wants to reject
/// low-confidence landmarks gates them separately (see
/// [`SessionOptions::min_visibility`][crate::session::SessionOptions::min_visibility]).
pub fn torso_flexion(frame: &PoseFrame) -> Result<f32, MissingLandmark> {
    let shoulder = required(frame, LandmarkIdx::LeftShoulder)?;
    let hip = required(frame, LandmarkIdx::LeftHip)?;
    let knee = required(frame, LandmarkIdx::LeftKnee)?;

    Ok(interior_angle(
        shoulder.position(),
        hip.position(),
        knee.position(),
    ))
}

fn required(frame: &PoseFrame, idx: LandmarkIdx) -> Result<Landmark, MissingLandmark> {
    frame.get(idx).ok_or(MissingLandmark(idx))
}

/// A required landmark was absent from a [`PoseFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingLandmark(pub LandmarkIdx);

impl fmt::Display for MissingLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "landmark {:?} missing from pose frame", self.0)
    }
}

impl std::error::Error for MissingLandmark {}

/// Hysteresis thresholds of the repetition state machine, in degrees.
///
/// The gap between `fold_below` and `extend_above` is a dead zone: angles
/// inside it never change state, so a measurement oscillating near either
/// cutoff cannot produce spurious transitions. Both thresholds apply to the
/// flexion angle produced by [`torso_flexion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    fold_below: f32,
    extend_above: f32,
}

impl Thresholds {
    /// Flexion angle below which an extended body counts as folded.
    pub const DEFAULT_FOLD_BELOW: f32 = 55.0;

    /// Flexion angle above which a folded body counts as extended again.
    pub const DEFAULT_EXTEND_ABOVE: f32 = 105.0;

    /// Creates a threshold pair.
    ///
    /// # Panics
    ///
    /// This method panics unless `fold_below < extend_above`: an empty or
    /// inverted dead zone re-enables the rapid toggling the hysteresis exists
    /// to prevent.
    pub fn new(fold_below: f32, extend_above: f32) -> Self {
        assert!(
            fold_below < extend_above,
            "fold threshold ({fold_below}°) must lie below extend threshold ({extend_above}°)",
        );
        Self {
            fold_below,
            extend_above,
        }
    }

    #[inline]
    pub fn fold_below(&self) -> f32 {
        self.fold_below
    }

    #[inline]
    pub fn extend_above(&self) -> f32 {
        self.extend_above
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FOLD_BELOW, Self::DEFAULT_EXTEND_ABOVE)
    }
}

/// The two positions of a sit-up in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    /// Extended starting position, awaiting a fold to complete a repetition.
    #[default]
    Up,
    /// Folded position, awaiting re-extension to arm the next repetition.
    Down,
}

impl MotionState {
    /// Applies one flexion measurement, yielding the follow-up state.
    ///
    /// A repetition completes on the `Up -> Down` edge only: folding below
    /// `thresholds.fold_below()` counts the sit-up, extending back above
    /// `thresholds.extend_above()` merely re-arms the machine. Angles inside
    /// the dead zone leave the state as it is.
    pub fn step(self, angle: f32, thresholds: &Thresholds) -> Transition {
        match self {
            MotionState::Up if angle < thresholds.fold_below() => Transition {
                next: MotionState::Down,
                repetition: true,
            },
            MotionState::Down if angle > thresholds.extend_above() => Transition {
                next: MotionState::Up,
                repetition: false,
            },
            unchanged => Transition {
                next: unchanged,
                repetition: false,
            },
        }
    }
}

/// Result of a single [`MotionState::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The state to carry into the next frame.
    pub next: MotionState,
    /// `true` when this step completed a repetition.
    pub repetition: bool,
}

/// Running repetition counter for one tracking session.
///
/// Owns the [`MotionState`] and the count and advances both together, once per
/// measured frame. The count never decreases and grows by at most 1 per call;
/// there is no reset, a new session starts a new counter.
#[derive(Debug, Clone)]
pub struct RepCounter {
    thresholds: Thresholds,
    state: MotionState,
    reps: u32,
}

impl RepCounter {
    /// Creates a counter with [`Thresholds::default`], starting `Up` at 0.
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    /// Creates a counter with custom thresholds.
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            state: MotionState::default(),
            reps: 0,
        }
    }

    /// Feeds one flexion measurement, returning `true` when it completed a
    /// repetition.
    pub fn advance(&mut self, angle: f32) -> bool {
        let transition = self.state.step(angle, &self.thresholds);
        if transition.repetition {
            self.reps += 1;
            log::debug!("repetition {} completed at {:.1}°", self.reps, angle);
        } else if transition.next != self.state {
            log::debug!("re-armed at {:.1}°", angle);
        }
        self.state = transition.next;
        transition.repetition
    }

    #[inline]
    pub fn reps(&self) -> u32 {
        self.reps
    }

    #[inline]
    pub fn state(&self) -> MotionState {
        self.state
    }

    #[inline]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new()
    }
}
