use {posecam_base::Vec2, std::path::PathBuf};

/// Camera request. The device may negotiate a different size or rate;
/// the values actually in effect are reported by [`crate::StreamInfo`].
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// `None` selects the first video device.
    pub device: Option<PathBuf>,
    pub size: Vec2<usize>,
    pub frame_rate: f32,
    pub buffer_count: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: None,
            size: Vec2::new(640, 480),
            frame_rate: 30.0,
            buffer_count: 4,
        }
    }
}

impl CameraConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: impl Into<PathBuf>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_buffer_count(mut self, count: u32) -> Self {
        self.buffer_count = count;
        self
    }
}
