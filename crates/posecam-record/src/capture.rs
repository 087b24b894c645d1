use {
    crate::{ChunkSink, Encoder},
    posecam_base::Vec2,
    posecam_image::SharedSurface,
    std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        thread::JoinHandle,
        time::{Duration, Instant},
    },
};

/// Real-time capture of the drawing surface into an encoder.
///
/// A dedicated thread snapshots the surface at a fixed rate, independent of
/// how fast the estimation loop redraws it. Frames whose size differs from the
/// session size are resampled to it.
pub struct SurfaceCapture {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SurfaceCapture {
    /// `encoder` must already be started with `sink`.
    pub fn spawn(
        surface: SharedSurface,
        mut encoder: Box<dyn Encoder>,
        size: Vec2<usize>,
        frame_rate: f32,
        sink: ChunkSink,
    ) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let period = Duration::from_secs_f32(1.0 / frame_rate.max(1.0));

        let handle = std::thread::Builder::new()
            .name("surface-capture".to_string())
            .spawn({
                let stop = Arc::clone(&stop);
                move || {
                    let mut frames = 0u64;
                    let mut next = Instant::now();
                    while !stop.load(Ordering::Acquire) {
                        let frame = match surface.lock() {
                            Ok(surface) => surface.snapshot(),
                            Err(_) => {
                                sink.failed("surface lock poisoned");
                                return;
                            }
                        };
                        let written = if frame.size == size {
                            encoder.write_frame(&frame)
                        } else {
                            frame
                                .resize_nearest(size)
                                .map_err(Into::into)
                                .and_then(|frame| encoder.write_frame(&frame))
                        };
                        if let Err(error) = written {
                            log::error!("capture: {}", error);
                            sink.failed(error.to_string());
                            return;
                        }
                        frames += 1;

                        next += period;
                        let now = Instant::now();
                        if next > now {
                            std::thread::sleep(next - now);
                        } else {
                            // fell behind, do not try to catch up
                            next = now;
                        }
                    }

                    log::debug!("capture: {} frames, finishing encoder", frames);
                    if let Err(error) = encoder.finish() {
                        sink.failed(error.to_string());
                    }
                }
            })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Ask the thread to stop; the encoder is finished on its way out.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for SurfaceCapture {
    fn drop(&mut self) {
        self.request_stop();
        // only join a thread that is already done, never block the caller
        if let Some(handle) = self.handle.take().filter(JoinHandle::is_finished) {
            if handle.join().is_err() {
                log::error!("capture thread panicked");
            }
        }
    }
}
