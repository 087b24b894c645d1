use std::path::PathBuf;

pub const RECORD_FRAME_RATE: f32 = 30.0;
pub const WEBM_MIME: &str = "video/webm";

/// Encoder settings. Frame rate and container are fixed by the artifact
/// format; the rest is tunable.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderConfig {
    pub frame_rate: f32,
    pub mime: &'static str,
    pub codec: String,
    pub bitrate: u32,
    /// ffmpeg executable.
    pub program: PathBuf,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            frame_rate: RECORD_FRAME_RATE,
            mime: WEBM_MIME,
            codec: "libvpx".to_string(),
            bitrate: 2_500_000,
            program: PathBuf::from("ffmpeg"),
        }
    }
}

impl EncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = bitrate;
        self
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}
