use posecam_base::{Rect, Vec2};

/// Number of keypoints in the COCO layout shared by MoveNet and YOLO pose.
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// One body landmark in the pixel space of the frame it was estimated on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub position: Vec2<f32>,
    /// Confidence in [0.0, 1.0].
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            score,
        }
    }
}

/// One detected person.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    /// Indexed by [`KeypointIndex`].
    pub keypoints: Vec<Keypoint>,
    pub score: f32,
    /// Detection box, for models that report one.
    pub bbox: Option<Rect>,
}

impl Pose {
    pub fn new(keypoints: Vec<Keypoint>, score: f32) -> Self {
        Self {
            keypoints,
            score,
            bbox: None,
        }
    }

    pub fn keypoint(&self, index: KeypointIndex) -> Option<&Keypoint> {
        self.keypoints.get(usize::from(index))
    }
}

/// A connection between two keypoints, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkeletonEdge {
    pub from: usize,
    pub to: usize,
}

impl SkeletonEdge {
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// COCO keypoint indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const ALL: [KeypointIndex; COCO_KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];

    /// snake_case label, as pose libraries name keypoints.
    pub fn label(self) -> &'static str {
        match self {
            KeypointIndex::Nose => "nose",
            KeypointIndex::LeftEye => "left_eye",
            KeypointIndex::RightEye => "right_eye",
            KeypointIndex::LeftEar => "left_ear",
            KeypointIndex::RightEar => "right_ear",
            KeypointIndex::LeftShoulder => "left_shoulder",
            KeypointIndex::RightShoulder => "right_shoulder",
            KeypointIndex::LeftElbow => "left_elbow",
            KeypointIndex::RightElbow => "right_elbow",
            KeypointIndex::LeftWrist => "left_wrist",
            KeypointIndex::RightWrist => "right_wrist",
            KeypointIndex::LeftHip => "left_hip",
            KeypointIndex::RightHip => "right_hip",
            KeypointIndex::LeftKnee => "left_knee",
            KeypointIndex::RightKnee => "right_knee",
            KeypointIndex::LeftAnkle => "left_ankle",
            KeypointIndex::RightAnkle => "right_ankle",
        }
    }
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for KeypointIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        KeypointIndex::ALL
            .get(value)
            .copied()
            .ok_or_else(|| format!("invalid keypoint index {value}, must be below {COCO_KEYPOINT_COUNT}"))
    }
}

/// Parameters of the aspect-preserving resize into a square model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    /// Model input side in pixels.
    pub target: usize,
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl LetterboxInfo {
    /// Map a point in model input pixels back to the source frame.
    pub fn unmap(&self, x: f32, y: f32) -> Vec2<f32> {
        Vec2::new((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}
