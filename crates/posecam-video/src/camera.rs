use crate::{CameraConfig, CaptureError, VideoDevice};

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;

/// The platform camera for `config`.
#[cfg(feature = "v4l2")]
pub fn camera_device(config: &CameraConfig) -> Result<Box<dyn VideoDevice>, CaptureError> {
    Ok(Box::new(V4l2Camera::new(config.clone())))
}

#[cfg(not(feature = "v4l2"))]
pub fn camera_device(_config: &CameraConfig) -> Result<Box<dyn VideoDevice>, CaptureError> {
    Err(CaptureError::Device(
        "no camera backend compiled in".to_string(),
    ))
}

#[cfg(feature = "v4l2")]
mod v4l2 {
    use {
        crate::{CameraConfig, CaptureError, StreamInfo, VideoDevice},
        posecam_base::Vec2,
        posecam_image::{Image, PixelFormat},
        v4l::{
            Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
            io::traits::CaptureStream, video::Capture, video::capture::Parameters,
        },
    };

    /// V4L2 webcam. Asks for MJPEG and accepts YUYV when the device insists.
    pub struct V4l2Camera {
        config: CameraConfig,
        stream: Option<MmapStream<'static>>,
        size: Vec2<usize>,
        format: PixelFormat,
    }

    impl V4l2Camera {
        pub fn new(config: CameraConfig) -> Self {
            Self {
                config,
                stream: None,
                size: Vec2::zero(),
                format: PixelFormat::Jpeg,
            }
        }
    }

    impl VideoDevice for V4l2Camera {
        fn open(&mut self) -> Result<StreamInfo, CaptureError> {
            self.stream.take();

            let device = match &self.config.device {
                Some(path) => Device::with_path(path)?,
                None => Device::new(0)?,
            };

            let requested = Format::new(
                self.config.size.x as u32,
                self.config.size.y as u32,
                FourCC::new(b"MJPG"),
            );
            let mut actual = Capture::set_format(&device, &requested)?;
            if &actual.fourcc.repr != b"MJPG" {
                actual = Capture::set_format(
                    &device,
                    &Format::new(actual.width, actual.height, FourCC::new(b"YUYV")),
                )?;
            }

            self.size = Vec2::new(actual.width as usize, actual.height as usize);
            self.format = match &actual.fourcc.repr {
                b"MJPG" => PixelFormat::Jpeg,
                b"YUYV" => PixelFormat::Yuyv,
                _ => {
                    return Err(CaptureError::Device(format!(
                        "unsupported pixel format {}",
                        actual.fourcc
                    )));
                }
            };

            let params = Capture::set_params(
                &device,
                &Parameters::with_fps(self.config.frame_rate.round() as u32),
            )?;
            let frame_rate = if params.interval.numerator == 0 {
                self.config.frame_rate
            } else {
                params.interval.denominator as f32 / params.interval.numerator as f32
            };

            let stream = MmapStream::with_buffers(&device, Type::VideoCapture, self.config.buffer_count)
                .map_err(|e| CaptureError::Stream(e.to_string()))?;
            self.stream = Some(stream);

            log::info!(
                "camera {:?}: {}x{} {:?} @ {} fps",
                self.config.device,
                self.size.x,
                self.size.y,
                self.format,
                frame_rate
            );
            Ok(StreamInfo {
                size: self.size,
                frame_rate,
            })
        }

        fn close(&mut self) {
            self.stream.take();
        }

        fn blocking_capture(&mut self) -> Result<Image, CaptureError> {
            let stream = self
                .stream
                .as_mut()
                .ok_or_else(|| CaptureError::Stream("camera not open".to_string()))?;
            let (data, metadata) =
                CaptureStream::next(stream).map_err(|e| CaptureError::Stream(e.to_string()))?;
            // MJPEG buffers are only partly filled
            let used = match metadata.bytesused as usize {
                0 => data.len(),
                n => n.min(data.len()),
            };
            Ok(Image::new(self.size, data[..used].to_vec(), self.format))
        }
    }
}
