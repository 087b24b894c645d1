use {
    crate::{
        AppConfig, AppError,
        estimation::{EstimationLoop, EstimatorSlot, LoopState},
        selector,
        ui::{self, UiState},
    },
    posecam_base::Vec2,
    posecam_image::{Image, SharedSurface, Surface},
    posecam_infer::{InferError, PoseEstimator},
    posecam_record::{
        MakeEncoder, RecordError, RecordNotice, RecorderState, RecordingController,
    },
    posecam_video::{CaptureError, SourceKind, VideoSource},
    std::{
        path::PathBuf,
        sync::{Arc, OnceLock},
    },
    tokio::{
        sync::oneshot::{self, error::TryRecvError},
        task::JoinHandle,
    },
};

/// A source waiting for its first frame.
type PendingSource = JoinHandle<Result<(VideoSource, Arc<Image>), CaptureError>>;

/// All mutable state of one host session.
///
/// The host forwards its four triggers here and calls [`AppContext::tick`]
/// once per refresh to pick up background results.
pub struct AppContext<E: PoseEstimator> {
    config: AppConfig,
    ui: UiState,
    surface: SharedSurface,
    estimator: EstimatorSlot<E>,
    model: Option<oneshot::Receiver<Result<E, InferError>>>,
    source: Option<VideoSource>,
    pending: Option<PendingSource>,
    estimation: EstimationLoop,
    recorder: RecordingController,
    loop_failure_shown: bool,
}

impl<E: PoseEstimator> AppContext<E> {
    pub fn new(config: AppConfig, make_encoder: MakeEncoder) -> Self {
        let surface = Surface::shared(Vec2::zero());
        let recorder =
            RecordingController::new(surface.clone(), config.encoder_config(), make_encoder);
        Self {
            estimation: EstimationLoop::new(config.refresh_rate),
            config,
            ui: UiState::default(),
            surface,
            estimator: Arc::new(OnceLock::new()),
            model: None,
            source: None,
            pending: None,
            recorder,
            loop_failure_shown: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    pub fn recorder(&self) -> &RecordingController {
        &self.recorder
    }

    pub fn estimation(&self) -> &EstimationLoop {
        &self.estimation
    }

    pub fn model_ready(&self) -> bool {
        self.estimator.get().is_some()
    }

    /// Whether a selected source is still waiting for its first frame.
    pub fn source_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Load the estimator on the blocking pool. The outcome shows up in the
    /// status text on a later [`AppContext::tick`].
    pub fn load_model(&mut self, load: impl FnOnce() -> Result<E, InferError> + Send + 'static) {
        let (sender, receiver) = oneshot::channel();
        tokio::task::spawn_blocking(move || {
            let _ = sender.send(load());
        });
        self.model = Some(receiver);
        self.ui.set_status(ui::STATUS_LOADING);
    }

    /// Install an already loaded estimator.
    pub fn set_estimator(&mut self, estimator: E) {
        self.model = None;
        self.install(estimator);
    }

    fn install(&mut self, estimator: E) {
        if self.estimator.set(Arc::new(estimator)).is_err() {
            log::warn!("estimator already installed, keeping the first one");
            return;
        }
        // a running loop picks the estimator up on its next iteration
        if !self.estimation.is_running() {
            self.ui.set_status(ui::STATUS_MODEL_READY);
        }
    }

    /// Trigger: use the camera.
    pub async fn choose_camera(&mut self) -> Result<(), AppError> {
        let kind = SourceKind::Camera(self.config.camera_config());
        self.select(kind).await
    }

    /// Trigger: use a media file. `None` means the chooser was dismissed.
    pub async fn choose_file(&mut self, path: Option<PathBuf>) -> Result<(), AppError> {
        let path = path.ok_or(AppError::NoFile)?;
        self.select(SourceKind::File(path)).await
    }

    /// Replace the current source with `kind`.
    ///
    /// Returns once the device is created; opening it and waiting for the
    /// first frame happen in the background and complete on a later
    /// [`AppContext::tick`]. A new selection abandons a pending one.
    pub async fn select(&mut self, kind: SourceKind) -> Result<(), AppError> {
        self.release_source().await;
        let device = match kind.device() {
            Ok(device) => device,
            Err(error) => return Err(self.device_error(error)),
        };
        log::info!("opening source {:?}", kind);
        self.pending = Some(tokio::spawn(async move {
            let source = VideoSource::start(device).await?;
            selector::wait_ready(source).await
        }));
        Ok(())
    }

    /// Track `source`, which is already open, once its first frame arrives.
    pub async fn attach(&mut self, source: VideoSource) {
        self.release_source().await;
        self.pending = Some(tokio::spawn(selector::wait_ready(source)));
    }

    async fn start_tracking(&mut self, source: VideoSource, first: Arc<Image>) {
        // size the surface to the video and show the first frame right away
        let mut surface = self.surface.lock().unwrap_or_else(|p| p.into_inner());
        if let Err(error) = surface.draw_image(&first) {
            log::warn!("cannot show first frame: {}", error);
            surface.resize(first.size);
        }
        drop(surface);

        self.estimation
            .start(
                Arc::clone(&self.estimator),
                source.subscribe(),
                self.surface.clone(),
            )
            .await;
        self.source = Some(source);
        self.loop_failure_shown = false;
        self.ui.record_enabled = true;
        self.ui.set_status(if self.recorder.state().is_recording() {
            ui::STATUS_RECORDING
        } else {
            ui::STATUS_TRACKING
        });
    }

    /// Trigger: start or stop recording.
    pub fn toggle_record(&mut self) -> Result<RecorderState, AppError> {
        if !self.ui.record_enabled {
            return Err(AppError::TrackingInactive);
        }
        let state = match self.recorder.toggle() {
            Ok(state) => state,
            Err(error) => {
                log::warn!("record toggle rejected: {}", error);
                self.sync_ui();
                return Err(error.into());
            }
        };
        match state {
            RecorderState::Recording => self.ui.set_status(ui::STATUS_RECORDING),
            _ if self.estimation.is_running() => self.ui.set_status(ui::STATUS_TRACKING),
            _ => {}
        }
        self.sync_ui();
        Ok(state)
    }

    /// Trigger: save the finished clip into the output directory.
    pub fn download(&mut self) -> Result<PathBuf, AppError> {
        let artifact = self.recorder.artifact().ok_or(RecordError::NoArtifact)?;
        Ok(artifact.save(&self.config.output_dir)?)
    }

    /// Apply results that arrived in the background.
    pub async fn tick(&mut self) {
        self.poll_model();
        self.poll_source().await;

        for notice in self.recorder.poll() {
            match notice {
                RecordNotice::Finalized { bytes } => {
                    log::info!("clip ready for download ({} bytes)", bytes)
                }
                RecordNotice::Failed(message) => {
                    self.ui.alert(format!("Recording failed: {message}"));
                }
            }
        }

        if let LoopState::Failed(message) = self.estimation.state() {
            if !self.loop_failure_shown {
                self.ui.set_status(ui::status_tracking_stopped(&message));
                self.loop_failure_shown = true;
            }
        }

        self.sync_ui();
    }

    /// Stop everything, letting an open recording finalize.
    pub async fn shutdown(&mut self) {
        self.estimation.cancel().await;
        if self.recorder.state().is_recording() {
            if let Err(error) = self.recorder.stop() {
                log::warn!("stopping recording: {}", error);
            }
        }
        if self.recorder.state().accepts_chunks() {
            if let Err(error) = self.recorder.finalized().await {
                log::warn!("recording did not finalize: {}", error);
            }
        }
        self.release_source().await;
        self.sync_ui();
    }

    fn poll_model(&mut self) {
        let Some(receiver) = self.model.as_mut() else {
            return;
        };
        let result = match receiver.try_recv() {
            Err(TryRecvError::Empty) => return,
            Ok(result) => result,
            Err(TryRecvError::Closed) => Err(InferError::ModelLoad("loader exited".to_string())),
        };
        self.model = None;
        match result {
            Ok(estimator) => self.install(estimator),
            Err(error) => {
                log::error!("model load failed: {}", error);
                self.ui.set_status(ui::status_model_error(&error.to_string()));
            }
        }
    }

    async fn poll_source(&mut self) {
        if !self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending.await {
            Ok(Ok((source, first))) => self.start_tracking(source, first).await,
            Ok(Err(error)) => {
                self.device_error(error);
            }
            Err(error) => log::warn!("source task ended: {}", error),
        }
    }

    async fn release_source(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
            // an aborted wait drops its source, which stops the worker
            let _ = pending.await;
        }
        self.estimation.cancel().await;
        if let Some(source) = self.source.take() {
            source.stop().await;
        }
    }

    fn device_error(&mut self, error: CaptureError) -> AppError {
        self.ui.alert(ui::alert_device(&error.to_string()));
        AppError::DeviceAccess(error)
    }

    fn sync_ui(&mut self) {
        self.ui.record = self.recorder.affordance();
        self.ui.download_enabled = self.recorder.download_enabled();
    }
}
