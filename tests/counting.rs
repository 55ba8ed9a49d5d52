use situp_counter::{
    landmark::{Landmark, LandmarkIdx, PoseFrame},
    session::{PoseEstimator, Session, SessionSummary, SkipReason, Tick},
    situp::MotionState,
};

/// Hands its input through, so tests can script arbitrary frame sequences.
struct Replay;

impl PoseEstimator for Replay {
    type Input = Option<PoseFrame>;

    fn estimate(&mut self, input: &Option<PoseFrame>) -> Option<PoseFrame> {
        input.clone()
    }
}

/// Builds a pose whose torso-flexion angle is `angle_deg`.
fn pose_at(angle_deg: f32) -> PoseFrame {
    let hip = [0.5, 0.5];
    let knee = [0.7, 0.5];
    let rad = angle_deg.to_radians();
    let shoulder = [hip[0] + 0.3 * rad.cos(), hip[1] - 0.3 * rad.sin()];

    [
        (LandmarkIdx::LeftShoulder, shoulder),
        (LandmarkIdx::LeftHip, hip),
        (LandmarkIdx::LeftKnee, knee),
    ]
    .into_iter()
    .map(|(idx, pos)| (idx, Landmark::new(pos)))
    .collect()
}

#[test]
fn counts_the_reference_sequence() {
    let mut session = Session::new(Replay);

    let expected = [
        (120.0, MotionState::Up, 0),
        (40.0, MotionState::Down, 1),
        (40.0, MotionState::Down, 1),
        (120.0, MotionState::Up, 1),
        (40.0, MotionState::Down, 2),
    ];
    for (angle, state, reps) in expected {
        session.process(&Some(pose_at(angle)));
        assert_eq!(session.state(), state, "after {angle}°");
        assert_eq!(session.reps(), reps, "after {angle}°");
    }
}

#[test]
fn counts_every_cycle_of_a_sweep() {
    let mut session = Session::new(Replay);

    let mut frames = Vec::new();
    for _ in 0..5 {
        frames.extend((0..=13).map(|i| 170.0 - i as f32 * 10.0));
        frames.extend((1..=13).map(|i| 40.0 + i as f32 * 10.0));
    }
    for angle in frames {
        session.process(&Some(pose_at(angle)));
    }

    assert_eq!(session.reps(), 5);
    assert_eq!(session.state(), MotionState::Up);
}

#[test]
fn dead_zone_alternation_never_counts() {
    let mut session = Session::new(Replay);
    for i in 0..1_000 {
        let angle = if i % 2 == 0 { 60.0 } else { 100.0 };
        session.process(&Some(pose_at(angle)));
    }
    assert_eq!(session.reps(), 0);
    assert_eq!(session.state(), MotionState::Up);
}

#[test]
fn unusable_frames_change_nothing() {
    let mut session = Session::new(Replay);
    session.process(&Some(pose_at(40.0)));
    assert_eq!((session.reps(), session.state()), (1, MotionState::Down));

    let headless: PoseFrame = [
        (LandmarkIdx::LeftHip, Landmark::new([0.5, 0.5])),
        (LandmarkIdx::LeftKnee, Landmark::new([0.7, 0.5])),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        session.process(&None),
        Tick::Skipped(SkipReason::NoPersonDetected)
    );
    assert_eq!(
        session.process(&Some(headless)),
        Tick::Skipped(SkipReason::MissingLandmark(LandmarkIdx::LeftShoulder))
    );
    assert_eq!((session.reps(), session.state()), (1, MotionState::Down));

    // The machine still picks up where it left off.
    session.process(&Some(pose_at(120.0)));
    assert_eq!((session.reps(), session.state()), (1, MotionState::Up));
}

#[test]
fn reps_never_jump_by_more_than_one() {
    let mut session = Session::new(Replay);
    let mut seed = 0x2545f4914f6cdd1d_u64;
    let mut previous = 0;

    for _ in 0..2_000 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let angle = (seed % 181) as f32;

        session.process(&Some(pose_at(angle)));
        let reps = session.reps();
        assert!(reps >= previous);
        assert!(reps - previous <= 1);
        previous = reps;
    }
}

#[test]
fn summary_accounts_for_every_frame() {
    let mut session = Session::new(Replay);
    session.process(&Some(pose_at(170.0)));
    session.process(&None);
    session.process(&Some(pose_at(40.0)));
    session.process(&None);

    assert_eq!(
        session.finish(),
        SessionSummary {
            reps: 1,
            final_state: MotionState::Down,
            frames: 4,
            skipped: 2,
        }
    );
}
