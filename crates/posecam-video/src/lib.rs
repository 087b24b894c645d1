//! Video sources for posecam: a webcam or a looping media file, both exposed
//! as a latest-frame [`VideoSource`].

pub mod camera;
pub mod config;
pub mod device;
pub mod error;
pub mod file;
pub mod source;

pub use camera::camera_device;
pub use config::CameraConfig;
pub use device::{StreamInfo, VideoDevice};
pub use error::CaptureError;
pub use file::FileDevice;
pub use source::{SourceKind, VideoSource};

#[cfg(feature = "v4l2")]
pub use camera::V4l2Camera;
