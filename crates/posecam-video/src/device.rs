use {crate::CaptureError, posecam_base::Vec2, posecam_image::Image};

/// What an opened device actually delivers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamInfo {
    pub size: Vec2<usize>,
    pub frame_rate: f32,
}

/// A blocking frame producer.
///
/// `open`, `blocking_capture` and `close` are all called from the same worker
/// thread. Frames may come back in any [`posecam_image::PixelFormat`]; the
/// worker converts them to RGB8.
pub trait VideoDevice: Send + 'static {
    fn open(&mut self) -> Result<StreamInfo, CaptureError>;
    fn close(&mut self);
    fn blocking_capture(&mut self) -> Result<Image, CaptureError>;
}
