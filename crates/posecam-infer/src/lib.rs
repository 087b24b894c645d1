//! Pose inference for posecam.
//!
//! A [`Backend`] loads a model into a [`Session`]; [`OnnxPoseEstimator`] wraps
//! a session with the pre- and post-processing of one [`ModelKind`] and
//! exposes it through the async [`PoseEstimator`] trait.

mod backend;
pub mod backends;
mod device;
mod error;
mod modelsource;
pub mod pose;
mod session;

pub use backend::Backend;
pub use backends::{OnnxBackend, OnnxSession};
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use pose::{
    COCO_EDGES, COCO_KEYPOINT_COUNT, Keypoint, KeypointIndex, MOVENET_EDGES, ModelKind,
    OnnxPoseEstimator, Pose, PoseEstimator, SkeletonEdge,
};
pub use session::Session;
