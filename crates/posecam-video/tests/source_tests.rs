use {
    posecam_base::Vec2,
    posecam_image::{Image, PixelFormat, Rgb},
    posecam_video::{CaptureError, SourceKind, StreamInfo, VideoDevice, VideoSource},
    std::{
        sync::{
            Arc,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
        time::Duration,
    },
};

/// Produces solid frames, optionally failing to open or running dry.
struct SyntheticDevice {
    size: Vec2<usize>,
    format: PixelFormat,
    open_error: Option<fn() -> CaptureError>,
    remaining: Option<usize>,
    closed: Arc<AtomicBool>,
    captured: Arc<AtomicUsize>,
}

impl SyntheticDevice {
    fn new(size: Vec2<usize>) -> Self {
        Self {
            size,
            format: PixelFormat::Rgb8,
            open_error: None,
            remaining: None,
            closed: Arc::new(AtomicBool::new(false)),
            captured: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl VideoDevice for SyntheticDevice {
    fn open(&mut self) -> Result<StreamInfo, CaptureError> {
        if let Some(error) = self.open_error {
            return Err(error());
        }
        Ok(StreamInfo {
            size: self.size,
            frame_rate: 30.0,
        })
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn blocking_capture(&mut self) -> Result<Image, CaptureError> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Err(CaptureError::Stream("end".to_string()));
            }
            *remaining -= 1;
        }
        std::thread::sleep(Duration::from_millis(2));
        self.captured.fetch_add(1, Ordering::SeqCst);
        Ok(match self.format {
            PixelFormat::Yuyv => Image::new(self.size, vec![128; self.size.area() * 2], PixelFormat::Yuyv),
            _ => Image::filled(self.size, Rgb::WHITE),
        })
    }
}

#[tokio::test]
async fn test_ready_delivers_first_frame() {
    let device = SyntheticDevice::new(Vec2::new(4, 3));
    let mut source = VideoSource::start(Box::new(device)).await.unwrap();
    assert_eq!(source.size(), Vec2::new(4, 3));

    let frame = source.ready().await.unwrap();
    assert_eq!(frame.size, Vec2::new(4, 3));
    assert_eq!(frame.format, PixelFormat::Rgb8);
    assert!(source.latest().is_some());
    source.stop().await;
}

#[tokio::test]
async fn test_packed_frames_are_converted() {
    let mut device = SyntheticDevice::new(Vec2::new(2, 2));
    device.format = PixelFormat::Yuyv;
    let mut source = VideoSource::start(Box::new(device)).await.unwrap();
    let frame = source.ready().await.unwrap();
    assert_eq!(frame.format, PixelFormat::Rgb8);
    assert_eq!(frame.pixel(0, 0), Some([128, 128, 128]));
    source.stop().await;
}

fn denied() -> CaptureError {
    CaptureError::PermissionDenied("camera".to_string())
}

#[tokio::test]
async fn test_open_errors_propagate() {
    let mut device = SyntheticDevice::new(Vec2::new(4, 3));
    device.open_error = Some(denied);
    let result = VideoSource::start(Box::new(device)).await;
    assert!(matches!(result, Err(CaptureError::PermissionDenied(_))));
}

#[tokio::test]
async fn test_source_without_frames_is_not_ready() {
    let mut device = SyntheticDevice::new(Vec2::new(4, 3));
    device.remaining = Some(0);
    let mut source = VideoSource::start(Box::new(device)).await.unwrap();
    assert!(matches!(source.ready().await, Err(CaptureError::Stream(_))));
}

#[tokio::test]
async fn test_stop_closes_device() {
    let device = SyntheticDevice::new(Vec2::new(4, 3));
    let closed = Arc::clone(&device.closed);
    let captured = Arc::clone(&device.captured);
    let mut source = VideoSource::start(Box::new(device)).await.unwrap();
    source.ready().await.unwrap();
    source.stop().await;

    assert!(closed.load(Ordering::SeqCst));
    let after_stop = captured.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(captured.load(Ordering::SeqCst), after_stop);
}

#[tokio::test]
async fn test_missing_file_is_a_device_error() {
    let kind = SourceKind::File("/definitely/not/here.mp4".into());
    assert!(matches!(
        VideoSource::open(&kind).await,
        Err(CaptureError::Device(_))
    ));
}

#[test]
fn test_permission_denied_mapping() {
    let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
    assert!(matches!(CaptureError::from(io), CaptureError::PermissionDenied(_)));
    let io = std::io::Error::from(std::io::ErrorKind::NotFound);
    assert!(matches!(CaptureError::from(io), CaptureError::Device(_)));
}
