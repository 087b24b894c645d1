//! Recording of the annotated surface into a downloadable WebM clip.

mod artifact;
mod capture;
mod config;
mod controller;
mod encoder;
mod error;
mod ffmpeg;
mod state;

pub use artifact::{Artifact, DOWNLOAD_FILENAME};
pub use capture::SurfaceCapture;
pub use config::{EncoderConfig, RECORD_FRAME_RATE, WEBM_MIME};
pub use controller::{RecordNotice, RecordingController};
pub use encoder::{ChunkSink, Encoder, EncoderEvent, MakeEncoder};
pub use error::RecordError;
pub use ffmpeg::FfmpegEncoder;
pub use state::{RecordAffordance, RecorderState, START_LABEL, STOP_LABEL};
