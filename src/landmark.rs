//! Body pose landmarks as produced by the external estimator.
//!
//! Coordinates are normalized image-plane coordinates: `x` and `y` each range
//! over `0.0..=1.0` within the source frame, with `y` growing downwards. This
//! crate never rescales them; the flexion angle is scale-free.

/// A single detected anatomical point.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Landmark {
    pos: [f32; 2],
    visibility: Option<f32>,
}

impl Landmark {
    /// Creates a landmark at `position`, without a visibility score.
    pub fn new(position: [f32; 2]) -> Self {
        Self {
            pos: position,
            visibility: None,
        }
    }

    /// Attaches the estimator's visibility score (typically `0.0..=1.0`).
    pub fn with_visibility(self, visibility: f32) -> Self {
        Self {
            visibility: Some(visibility),
            ..self
        }
    }

    #[inline]
    pub fn position(&self) -> [f32; 2] {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    /// Returns the detection-confidence score, if the estimator reported one.
    #[inline]
    pub fn visibility(&self) -> Option<f32> {
        self.visibility
    }
}

/// Identifies an anatomical point within a [`PoseFrame`].
///
/// This is the landmark set of the external pose estimator; the repetition
/// counter only ever reads [`LeftShoulder`], [`LeftHip`] and [`LeftKnee`], but
/// frames carry whatever the estimator produced.
///
/// [`LeftShoulder`]: LandmarkIdx::LeftShoulder
/// [`LeftHip`]: LandmarkIdx::LeftHip
/// [`LeftKnee`]: LandmarkIdx::LeftKnee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIdx {
    /// The number of distinct landmarks in a full pose.
    pub const COUNT: usize = 33;

    /// Every landmark, in index order.
    pub const ALL: [LandmarkIdx; Self::COUNT] = {
        use LandmarkIdx::*;
        [
            Nose,
            LeftEyeInner,
            LeftEye,
            LeftEyeOuter,
            RightEyeInner,
            RightEye,
            RightEyeOuter,
            LeftEar,
            RightEar,
            MouthLeft,
            MouthRight,
            LeftShoulder,
            RightShoulder,
            LeftElbow,
            RightElbow,
            LeftWrist,
            RightWrist,
            LeftPinky,
            RightPinky,
            LeftIndex,
            RightIndex,
            LeftThumb,
            RightThumb,
            LeftHip,
            RightHip,
            LeftKnee,
            RightKnee,
            LeftAnkle,
            RightAnkle,
            LeftHeel,
            RightHeel,
            LeftFootIndex,
            RightFootIndex,
        ]
    };
}

/// The set of landmarks estimated for one video frame.
///
/// A [`PoseFrame`] has one preallocated slot per [`LandmarkIdx`]; slots the
/// estimator produced nothing for stay empty, and reading them yields [`None`]
/// rather than a placeholder position. Frames are produced fresh each video
/// frame and never mutated by the counter.
#[derive(Debug, Clone)]
pub struct PoseFrame {
    slots: [Option<Landmark>; LandmarkIdx::COUNT],
}

impl PoseFrame {
    /// Creates a frame with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: [None; LandmarkIdx::COUNT],
        }
    }

    /// Returns the landmark stored for `idx`, if the estimator produced one.
    pub fn get(&self, idx: LandmarkIdx) -> Option<Landmark> {
        self.slots[idx as usize]
    }

    /// Stores `landmark` under `idx`, replacing any previous entry.
    pub fn set(&mut self, idx: LandmarkIdx, landmark: Landmark) {
        self.slots[idx as usize] = Some(landmark);
    }

    /// Returns the number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Iterates over the filled slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (LandmarkIdx, Landmark)> + '_ {
        LandmarkIdx::ALL
            .iter()
            .filter_map(|&idx| self.slots[idx as usize].map(|lm| (idx, lm)))
    }
}

impl Default for PoseFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(LandmarkIdx, Landmark)> for PoseFrame {
    fn from_iter<I: IntoIterator<Item = (LandmarkIdx, Landmark)>>(iter: I) -> Self {
        let mut frame = Self::new();
        for (idx, lm) in iter {
            frame.set(idx, lm);
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame_has_no_landmarks() {
        let frame = PoseFrame::new();
        assert!(frame.is_empty());
        assert_eq!(frame.len(), 0);
        for idx in LandmarkIdx::ALL {
            assert_eq!(frame.get(idx), None);
        }
    }

    #[test]
    fn set_then_get() {
        let mut frame = PoseFrame::new();
        frame.set(LandmarkIdx::LeftHip, Landmark::new([0.5, 0.6]));

        let hip = frame.get(LandmarkIdx::LeftHip).unwrap();
        assert_eq!(hip.position(), [0.5, 0.6]);
        assert_eq!(hip.visibility(), None);
        assert_eq!(frame.get(LandmarkIdx::RightHip), None);
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn visibility_is_carried() {
        let lm = Landmark::new([0.1, 0.2]).with_visibility(0.75);
        assert_eq!(lm.visibility(), Some(0.75));
        assert_eq!(lm.x(), 0.1);
        assert_eq!(lm.y(), 0.2);
    }

    #[test]
    fn all_table_matches_discriminants() {
        for (i, idx) in LandmarkIdx::ALL.iter().enumerate() {
            assert_eq!(*idx as usize, i);
        }
    }

    #[test]
    fn iter_yields_filled_slots_in_order() {
        let frame: PoseFrame = [
            (LandmarkIdx::LeftKnee, Landmark::new([0.3, 0.8])),
            (LandmarkIdx::Nose, Landmark::new([0.5, 0.1])),
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = frame.iter().map(|(idx, _)| idx).collect();
        assert_eq!(order, [LandmarkIdx::Nose, LandmarkIdx::LeftKnee]);
    }
}
