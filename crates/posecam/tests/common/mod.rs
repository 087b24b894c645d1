#![allow(dead_code)]

use {
    posecam_base::Vec2,
    posecam_image::{Canvas, Image, PixelFormat, Rgb},
    posecam_infer::{InferError, Keypoint, Pose, PoseEstimator, SkeletonEdge},
    posecam_record::{ChunkSink, Encoder, MakeEncoder, RecordError},
    posecam_video::{CaptureError, StreamInfo, VideoDevice},
    std::{
        future::Future,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    },
};

pub const EDGES: [SkeletonEdge; 2] = [SkeletonEdge::new(0, 1), SkeletonEdge::new(0, 2)];

/// Scripted estimator: always returns `poses`, after `delay`.
pub struct MockEstimator {
    pub poses: Vec<Pose>,
    pub delay: Duration,
    pub fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl MockEstimator {
    pub fn new(poses: Vec<Pose>) -> Self {
        Self {
            poses,
            delay: Duration::ZERO,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl PoseEstimator for MockEstimator {
    fn estimate(&self, _frame: Arc<Image>) -> impl Future<Output = Result<Vec<Pose>, InferError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (poses, delay, fail) = (self.poses.clone(), self.delay, self.fail);
        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if fail {
                return Err(InferError::Backend("model crashed".to_string()));
            }
            Ok(poses)
        }
    }

    fn skeleton(&self) -> &[SkeletonEdge] {
        &EDGES
    }
}

/// Pose with keypoints A, B, C scoring .5, .2, .4.
pub fn abc_pose() -> Pose {
    Pose::new(
        vec![
            Keypoint::new(2.0, 2.0, 0.5),
            Keypoint::new(8.0, 2.0, 0.2),
            Keypoint::new(2.0, 8.0, 0.4),
        ],
        0.9,
    )
}

/// Canvas that only records what was asked of it.
#[derive(Default)]
pub struct CallCanvas {
    pub lines: Vec<(Vec2<f32>, Vec2<f32>, u32, Rgb)>,
    pub circles: Vec<(Vec2<f32>, u32, Rgb)>,
}

impl Canvas for CallCanvas {
    fn stroke_line(&mut self, from: Vec2<f32>, to: Vec2<f32>, width: u32, color: Rgb) {
        self.lines.push((from, to, width, color));
    }

    fn fill_circle(&mut self, center: Vec2<f32>, radius: u32, color: Rgb) {
        self.circles.push((center, radius, color));
    }
}

/// Solid-color frames at a fixed size.
pub struct ColorDevice {
    pub size: Vec2<usize>,
    pub color: Rgb,
    pub deny: bool,
}

impl ColorDevice {
    pub fn new(size: Vec2<usize>, color: Rgb) -> Self {
        Self {
            size,
            color,
            deny: false,
        }
    }
}

impl VideoDevice for ColorDevice {
    fn open(&mut self) -> Result<StreamInfo, CaptureError> {
        if self.deny {
            return Err(CaptureError::PermissionDenied("not allowed".to_string()));
        }
        Ok(StreamInfo {
            size: self.size,
            frame_rate: 30.0,
        })
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<Image, CaptureError> {
        std::thread::sleep(Duration::from_millis(5));
        Ok(Image::filled(self.size, self.color))
    }
}

/// Opens fine but only ever yields undecodable frames, so the source never
/// becomes ready. Still honours cancellation between captures.
pub struct StalledDevice;

impl VideoDevice for StalledDevice {
    fn open(&mut self) -> Result<StreamInfo, CaptureError> {
        Ok(StreamInfo {
            size: Vec2::new(32, 24),
            frame_rate: 30.0,
        })
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<Image, CaptureError> {
        std::thread::sleep(Duration::from_millis(5));
        // truncated YUYV fails conversion and is skipped
        Ok(Image::new(Vec2::new(32, 24), vec![0; 7], PixelFormat::Yuyv))
    }
}

/// Encoder that emits one chunk per frame and finalizes on finish.
pub struct CountingEncoder {
    sink: Option<ChunkSink>,
}

impl Encoder for CountingEncoder {
    fn start(&mut self, _size: Vec2<usize>, sink: ChunkSink) -> Result<(), RecordError> {
        self.sink = Some(sink);
        Ok(())
    }

    fn write_frame(&mut self, _frame: &Image) -> Result<(), RecordError> {
        if let Some(sink) = &self.sink {
            sink.chunk(vec![0xAB; 16]);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RecordError> {
        let sink = self.sink.take().ok_or(RecordError::NotRecording)?;
        sink.finalized();
        Ok(())
    }
}

pub fn counting_encoder() -> MakeEncoder {
    Box::new(|| -> Box<dyn Encoder> { Box::new(CountingEncoder { sink: None }) })
}
