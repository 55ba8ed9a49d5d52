//! Tracking sessions: the frame loop's view of the counter.
//!
//! A [`Session`] owns the external estimator handle and the running counter
//! for the whole exercise, and turns each raw input frame into one [`Tick`].
//! All per-frame failures are contained in the tick; the frame loop never has
//! to unwind.

use std::fmt;

use crate::landmark::{LandmarkIdx, PoseFrame};
use crate::situp::{self, MotionState, RepCounter, Thresholds, REQUIRED_LANDMARKS};

/// The external pose estimation collaborator.
///
/// Implementations wrap whatever produces landmarks: a neural network, a
/// remote service, a replayed recording. The raw frame type stays opaque to
/// this crate, since frame acquisition and decoding are the caller's concern.
pub trait PoseEstimator {
    /// The raw frame type the estimator consumes.
    type Input;

    /// Estimates the pose visible in `input`.
    ///
    /// Produces at most one [`PoseFrame`] per input; [`None`] means no person
    /// was detected, which a [`Session`] treats as a no-op tick.
    fn estimate(&mut self, input: &Self::Input) -> Option<PoseFrame>;
}

/// Session configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    thresholds: Thresholds,
    min_visibility: Option<f32>,
}

impl SessionOptions {
    /// Replaces the default state machine thresholds.
    #[inline]
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Requires a minimum visibility score on the three measured landmarks.
    ///
    /// Off by default; the measurement then never consults visibility. When
    /// set, a frame whose shoulder, hip or knee scores below `min` (or
    /// carries no score at all) is skipped with [`SkipReason::LowVisibility`]
    /// instead of being measured — the same no-op policy as a missing
    /// landmark.
    #[inline]
    pub fn min_visibility(mut self, min: f32) -> Self {
        self.min_visibility = Some(min);
        self
    }
}

/// Outcome of processing one input frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// A flexion angle was measured and the counter advanced.
    Measured {
        /// The torso-flexion angle, in degrees.
        angle: f32,
        /// `true` when this frame completed a repetition.
        repetition: bool,
    },
    /// The frame was skipped; count and state are exactly as before.
    Skipped(SkipReason),
}

impl Tick {
    /// Returns `true` when this tick completed a repetition.
    pub fn repetition(&self) -> bool {
        matches!(
            self,
            Tick::Measured {
                repetition: true,
                ..
            }
        )
    }
}

/// Why a frame did not advance the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The estimator produced no pose at all.
    NoPersonDetected,
    /// The pose lacked this required landmark.
    MissingLandmark(LandmarkIdx),
    /// This landmark's visibility fell below the configured minimum.
    ///
    /// Only produced when [`SessionOptions::min_visibility`] is set.
    LowVisibility(LandmarkIdx),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoPersonDetected => f.write_str("no person detected"),
            SkipReason::MissingLandmark(idx) => write!(f, "landmark {idx:?} missing"),
            SkipReason::LowVisibility(idx) => {
                write!(f, "landmark {idx:?} below minimum visibility")
            }
        }
    }
}

/// A sit-up tracking session.
///
/// The session owns the estimator handle for its whole lifetime: acquired
/// when the session starts, released when the session value is dropped or
/// consumed by [`Session::finish`] — on every exit path out of the frame
/// loop, early termination included.
///
/// Sessions are frame-synchronous. The thread that owns the capture loop
/// calls [`Session::process`] once per frame; state and count are mutated
/// only by that sequential stream, so nothing here is shared or locked.
pub struct Session<E: PoseEstimator> {
    estimator: E,
    counter: RepCounter,
    min_visibility: Option<f32>,
    frames: u64,
    skipped: u64,
}

impl<E: PoseEstimator> Session<E> {
    /// Starts a session with default options.
    pub fn new(estimator: E) -> Self {
        Self::with_options(estimator, SessionOptions::default())
    }

    /// Starts a session with the given options.
    pub fn with_options(estimator: E, options: SessionOptions) -> Self {
        Self {
            estimator,
            counter: RepCounter::with_thresholds(options.thresholds),
            min_visibility: options.min_visibility,
            frames: 0,
            skipped: 0,
        }
    }

    /// Processes one raw input frame.
    ///
    /// Runs the estimator, measures the flexion angle, and advances state and
    /// count together. A skipped frame leaves both exactly as they were; the
    /// reason is reported in the returned [`Tick`] rather than raised, so the
    /// frame loop keeps running.
    pub fn process(&mut self, input: &E::Input) -> Tick {
        self.frames += 1;

        match self.measure(input) {
            Ok(angle) => Tick::Measured {
                angle,
                repetition: self.counter.advance(angle),
            },
            Err(reason) => {
                self.skipped += 1;
                log::trace!("frame {} skipped: {}", self.frames, reason);
                Tick::Skipped(reason)
            }
        }
    }

    fn measure(&mut self, input: &E::Input) -> Result<f32, SkipReason> {
        let frame = match self.estimator.estimate(input) {
            Some(frame) => frame,
            None => return Err(SkipReason::NoPersonDetected),
        };

        if let Some(min) = self.min_visibility {
            for idx in REQUIRED_LANDMARKS {
                let landmark = frame.get(idx).ok_or(SkipReason::MissingLandmark(idx))?;
                if landmark.visibility().map_or(true, |vis| vis < min) {
                    return Err(SkipReason::LowVisibility(idx));
                }
            }
        }

        situp::torso_flexion(&frame).map_err(|missing| SkipReason::MissingLandmark(missing.0))
    }

    /// The number of repetitions completed so far.
    #[inline]
    pub fn reps(&self) -> u32 {
        self.counter.reps()
    }

    /// The current motion state.
    #[inline]
    pub fn state(&self) -> MotionState {
        self.counter.state()
    }

    /// Returns a reference to the estimator owned by this session.
    #[inline]
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Ends the session, dropping the estimator handle and returning the
    /// session's final values.
    pub fn finish(self) -> SessionSummary {
        let summary = SessionSummary {
            reps: self.counter.reps(),
            final_state: self.counter.state(),
            frames: self.frames,
            skipped: self.skipped,
        };
        log::info!(
            "session finished: {} reps over {} frames ({} skipped)",
            summary.reps,
            summary.frames,
            summary.skipped,
        );
        summary
    }
}

/// Final values of a finished [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reps: u32,
    pub final_state: MotionState,
    /// Total frames processed, skipped ones included.
    pub frames: u64,
    pub skipped: u64,
}
