//! Sit-up repetition counting driven by body pose landmarks.
//!
//! The hard part, estimating the pose, is deliberately left to an external
//! collaborator behind the [`session::PoseEstimator`] trait. This crate turns
//! whatever that collaborator produces into an exercise count: [`situp`]
//! measures the torso-flexion angle of a [`landmark::PoseFrame`] and folds it
//! through a two-state machine, and a [`session::Session`] drives both from a
//! frame loop, one tick per input frame.
//!
//! # Image Coordinates
//!
//! Landmark positions are 2D image coordinates: X points to the right, Y
//! points *down*. Angles are measured in the image plane and do not depend on
//! the unit of the coordinates, so normalized ([0, 1]) and pixel positions
//! both work, as long as a pose sticks to one of them.

use log::LevelFilter;

pub mod angle;
pub mod landmark;
pub mod session;
pub mod situp;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and this library
/// will log at *trace* level. Otherwise, they will log at *debug* level.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
