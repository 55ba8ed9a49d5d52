use situp_counter::{
    landmark::{Landmark, LandmarkIdx, PoseFrame},
    session::{PoseEstimator, Session, SessionOptions, Tick},
};

const REPS_TO_SIMULATE: u32 = 3;

/// Stands in for a decoded camera frame: the flexion angle the synthetic
/// person holds in this frame, or `None` for a frame with nobody in it.
type Frame = Option<f32>;

/// Renders landmarks for the scripted person instead of running a real pose
/// estimation network.
#[derive(Default)]
struct ScriptedEstimator {
    frames: u32,
}

impl PoseEstimator for ScriptedEstimator {
    type Input = Frame;

    fn estimate(&mut self, input: &Frame) -> Option<PoseFrame> {
        self.frames += 1;
        // Every so often the estimator loses sight of the knee.
        let occlude_knee = self.frames % 23 == 0;
        input.map(|angle| synthesize_pose(angle, occlude_knee))
    }
}

/// Side view of a person whose torso-flexion angle is `angle`: hip fixed,
/// thigh along +X, shoulder rotated `angle` degrees off the thigh.
fn synthesize_pose(angle: f32, occlude_knee: bool) -> PoseFrame {
    let hip = [0.5, 0.6];
    let knee = [0.68, 0.6];
    let rad = angle.to_radians();
    let shoulder = [hip[0] + 0.3 * rad.cos(), hip[1] - 0.3 * rad.sin()];

    let mut pose: PoseFrame = [
        (LandmarkIdx::LeftShoulder, shoulder),
        (LandmarkIdx::LeftHip, hip),
    ]
    .into_iter()
    .map(|(idx, pos)| (idx, Landmark::new(pos).with_visibility(0.95)))
    .collect();
    if !occlude_knee {
        pose.set(LandmarkIdx::LeftKnee, Landmark::new(knee).with_visibility(0.95));
    }
    pose
}

fn script(reps: u32) -> Vec<Frame> {
    let mut frames = Vec::new();
    frames.extend([None, None]); // camera warm-up, nobody in frame yet
    for _ in 0..reps {
        // Fold down from lying flat, then sit back up, in 10° steps.
        frames.extend((0..=13).map(|i| Some(170.0 - i as f32 * 10.0)));
        frames.extend((1..=13).map(|i| Some(40.0 + i as f32 * 10.0)));
    }
    frames.push(None); // person leaves
    frames
}

fn main() -> anyhow::Result<()> {
    situp_counter::init_logger!();

    let options = SessionOptions::default().min_visibility(0.5);
    let mut session = Session::with_options(ScriptedEstimator::default(), options);

    for frame in script(REPS_TO_SIMULATE) {
        match session.process(&frame) {
            Tick::Measured { angle, repetition } => {
                if repetition {
                    println!("rep {:>2} done (folded to {:.0}°)", session.reps(), angle);
                }
            }
            Tick::Skipped(reason) => log::debug!("skipped frame: {reason}"),
        }
    }

    let summary = session.finish();
    println!(
        "{} sit-ups over {} frames ({} without a usable pose)",
        summary.reps, summary.frames, summary.skipped
    );

    Ok(())
}
