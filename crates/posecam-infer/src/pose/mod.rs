mod estimator;
pub mod movenet;
pub mod preprocess;
mod skeleton;
mod types;
pub mod yolo;

pub use estimator::{OnnxPoseEstimator, PoseEstimator};
pub use skeleton::{COCO_EDGES, MOVENET_EDGES, ModelKind};
pub use types::{
    COCO_KEYPOINT_COUNT, Keypoint, KeypointIndex, LetterboxInfo, Pose, SkeletonEdge,
};
