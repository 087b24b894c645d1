use {
    crate::{CameraConfig, CaptureError, StreamInfo, VideoDevice, file::FileDevice},
    posecam_base::Vec2,
    posecam_image::Image,
    std::{
        path::PathBuf,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    },
    tokio::{
        sync::{oneshot, watch},
        task::{JoinHandle, spawn_blocking},
    },
};

/// The two kinds of playable input.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceKind {
    Camera(CameraConfig),
    File(PathBuf),
}

impl SourceKind {
    /// Create the device for this source without opening it.
    pub fn device(&self) -> Result<Box<dyn VideoDevice>, CaptureError> {
        match self {
            SourceKind::Camera(config) => crate::camera::camera_device(config),
            SourceKind::File(path) => {
                // the local playback location
                let path = std::fs::canonicalize(path).map_err(|e| {
                    CaptureError::Device(format!("cannot open {}: {e}", path.display()))
                })?;
                Ok(Box::new(FileDevice::new(path)))
            }
        }
    }
}

/// A running video source.
///
/// A blocking worker pulls frames from the device and publishes the most
/// recent one, converted to RGB8. Consumers always see the latest frame;
/// frames nobody looked at are overwritten.
pub struct VideoSource {
    frames: watch::Receiver<Option<Arc<Image>>>,
    cancel: Arc<AtomicBool>,
    info: StreamInfo,
    join_handle: Option<JoinHandle<()>>,
}

impl VideoSource {
    pub async fn open(kind: &SourceKind) -> Result<Self, CaptureError> {
        log::info!("opening source {:?}", kind);
        Self::start(kind.device()?).await
    }

    /// Open `device` on a worker thread and start pumping frames.
    ///
    /// Returns once the device is open, not once the first frame arrived; see
    /// [`VideoSource::ready`].
    pub async fn start(mut device: Box<dyn VideoDevice>) -> Result<Self, CaptureError> {
        let (sender, frames) = watch::channel::<Option<Arc<Image>>>(None);
        let cancel = Arc::new(AtomicBool::new(false));

        // open() must run on the capture thread, report the outcome back
        let (init_tx, init_rx) = oneshot::channel::<Result<StreamInfo, CaptureError>>();

        let join_handle = spawn_blocking({
            let cancel = Arc::clone(&cancel);
            move || {
                match device.open() {
                    Ok(info) => {
                        let _ = init_tx.send(Ok(info));
                    }
                    Err(error) => {
                        let _ = init_tx.send(Err(error));
                        return;
                    }
                }

                log::debug!("video worker: capture loop started");
                while !cancel.load(Ordering::Relaxed) {
                    let frame = match device.blocking_capture() {
                        Ok(frame) => frame,
                        Err(error) => {
                            log::error!("video worker: capture failed: {}", error);
                            break;
                        }
                    };
                    let frame = match frame.into_rgb() {
                        Ok(frame) => frame,
                        Err(error) => {
                            log::warn!("video worker: dropping undecodable frame: {}", error);
                            continue;
                        }
                    };
                    if sender.send(Some(Arc::new(frame))).is_err() {
                        // every receiver is gone
                        break;
                    }
                }
                device.close();
                log::debug!("video worker: capture loop ended");
            }
        });

        let info = init_rx
            .await
            .map_err(|_| CaptureError::Channel("video worker died during open".to_string()))??;
        log::info!(
            "source open: {}x{} @ {} fps",
            info.size.x,
            info.size.y,
            info.frame_rate
        );

        Ok(Self {
            frames,
            cancel,
            info,
            join_handle: Some(join_handle),
        })
    }

    pub fn info(&self) -> StreamInfo {
        self.info
    }

    pub fn size(&self) -> Vec2<usize> {
        self.info.size
    }

    /// Wait for the first decoded frame.
    pub async fn ready(&mut self) -> Result<Arc<Image>, CaptureError> {
        let frame = self
            .frames
            .wait_for(Option::is_some)
            .await
            .map_err(|_| CaptureError::Stream("source ended before the first frame".to_string()))?;
        (*frame)
            .clone()
            .ok_or_else(|| CaptureError::Stream("no frame".to_string()))
    }

    /// The most recent frame, if any arrived yet.
    pub fn latest(&self) -> Option<Arc<Image>> {
        self.frames.borrow().clone()
    }

    /// A receiver of the latest-frame slot, for consumers living elsewhere.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Image>>> {
        self.frames.clone()
    }

    /// Whether the worker is still producing frames.
    pub fn is_live(&self) -> bool {
        self.join_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the worker and wait for the device to be closed.
    pub async fn stop(mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join_handle.take() {
            if let Err(error) = handle.await {
                log::warn!("video worker join failed: {}", error);
            }
        }
    }
}

impl Drop for VideoSource {
    fn drop(&mut self) {
        // blocking tasks cannot be aborted, the flag ends the loop after the current read
        self.cancel.store(true, Ordering::Relaxed);
    }
}
