//! posecam: live pose overlay on camera or file video, with clip recording.
//!
//! [`AppContext`] owns the whole session: the video source, the estimation
//! loop that paints the shared surface, and the recorder that captures it.

pub mod config;
pub mod context;
pub mod error;
pub mod estimation;
pub mod render;
pub mod selector;
pub mod ui;

pub use config::AppConfig;
pub use context::AppContext;
pub use error::{AppError, ConfigError};
pub use estimation::{EstimationLoop, EstimatorSlot, FrameClock, Iteration, LoopState, run_iteration};
pub use render::{MIN_CONFIDENCE, render};
pub use ui::UiState;
