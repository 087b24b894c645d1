use {
    crate::{
        Artifact, ChunkSink, EncoderConfig, EncoderEvent, MakeEncoder, RecordAffordance,
        RecordError, RecorderState, SurfaceCapture,
    },
    posecam_base::{Epoch, Stamped},
    posecam_image::SharedSurface,
    tokio::sync::mpsc,
};

/// Something the host should tell the user about.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordNotice {
    /// The clip is ready for download.
    Finalized { bytes: usize },
    Failed(String),
}

/// Idle / recording toggle over the drawing surface.
///
/// Owns the encoder session and the chunk buffer. Encoder output comes back
/// over a channel stamped with the session it belongs to; output from any
/// other session is ignored, and so is output arriving while idle.
pub struct RecordingController {
    surface: SharedSurface,
    config: EncoderConfig,
    make_encoder: MakeEncoder,
    state: RecorderState,
    sessions: Epoch,
    session: u64,
    chunks: Vec<Vec<u8>>,
    artifact: Option<Artifact>,
    capture: Option<SurfaceCapture>,
    sender: mpsc::UnboundedSender<Stamped<EncoderEvent>>,
    receiver: mpsc::UnboundedReceiver<Stamped<EncoderEvent>>,
}

impl RecordingController {
    pub fn new(surface: SharedSurface, config: EncoderConfig, make_encoder: MakeEncoder) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let sessions = Epoch::new();
        Self {
            surface,
            config,
            make_encoder,
            state: RecorderState::Idle,
            session: sessions.current(),
            sessions,
            chunks: Vec::new(),
            artifact: None,
            capture: None,
            sender,
            receiver,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn affordance(&self) -> RecordAffordance {
        self.state.affordance()
    }

    /// The finished clip; present only between finalize and the next start.
    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    pub fn download_enabled(&self) -> bool {
        self.artifact.is_some()
    }

    /// Number of chunks stored in the current session.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Open a new session over the surface as it is now.
    pub fn start(&mut self) -> Result<(), RecordError> {
        match self.state {
            RecorderState::Recording => return Err(RecordError::AlreadyRecording),
            RecorderState::Stopping => return Err(RecordError::Finalizing),
            RecorderState::Idle => {}
        }

        let size = self
            .surface
            .lock()
            .map_err(|_| RecordError::Encoder("surface lock poisoned".to_string()))?
            .size();
        if size.area() == 0 {
            return Err(RecordError::Encoder("nothing to record yet".to_string()));
        }

        let session = self.sessions.advance();
        let sink = ChunkSink::new(session, self.sender.clone());
        let mut encoder = (self.make_encoder)();
        encoder.start(size, sink.clone())?;
        let capture = SurfaceCapture::spawn(
            self.surface.clone(),
            encoder,
            size,
            self.config.frame_rate,
            sink,
        )?;

        self.session = session;
        self.chunks.clear();
        self.artifact = None;
        self.capture = Some(capture);
        self.state = RecorderState::Recording;
        log::info!("recording session {} started at {}x{}", session, size.x, size.y);
        Ok(())
    }

    /// Ask the encoder to finalize. The artifact appears once it did.
    pub fn stop(&mut self) -> Result<(), RecordError> {
        if self.state != RecorderState::Recording {
            return Err(RecordError::NotRecording);
        }
        if let Some(capture) = &self.capture {
            capture.request_stop();
        }
        self.state = RecorderState::Stopping;
        log::info!("recording session {} stopping", self.session);
        Ok(())
    }

    /// Start when idle, stop when recording.
    pub fn toggle(&mut self) -> Result<RecorderState, RecordError> {
        match self.state {
            RecorderState::Recording => self.stop()?,
            _ => self.start()?,
        }
        Ok(self.state)
    }

    /// Apply one encoder event.
    pub fn handle_event(&mut self, event: Stamped<EncoderEvent>) -> Option<RecordNotice> {
        if event.epoch != self.session || !self.state.accepts_chunks() {
            log::debug!("dropping encoder event from session {}", event.epoch);
            return None;
        }
        match event.inner {
            EncoderEvent::Chunk(bytes) => {
                if !bytes.is_empty() {
                    self.chunks.push(bytes);
                }
                None
            }
            EncoderEvent::Finalized => {
                if self.state != RecorderState::Stopping {
                    log::warn!("encoder finalized before stop was requested");
                }
                let artifact = Artifact::from_chunks(&self.chunks);
                let bytes = artifact.len();
                log::info!(
                    "recording session {} finalized: {} chunks, {} bytes",
                    self.session,
                    self.chunks.len(),
                    bytes
                );
                self.chunks.clear();
                self.artifact = Some(artifact);
                self.finish_session();
                Some(RecordNotice::Finalized { bytes })
            }
            EncoderEvent::Failed(message) => {
                log::error!("recording session {} failed: {}", self.session, message);
                self.chunks.clear();
                self.finish_session();
                Some(RecordNotice::Failed(message))
            }
        }
    }

    /// Apply every event that already arrived, without waiting.
    pub fn poll(&mut self) -> Vec<RecordNotice> {
        let mut notices = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            notices.extend(self.handle_event(event));
        }
        notices
    }

    /// Wait until the current session ends, after `stop`.
    pub async fn finalized(&mut self) -> Result<&Artifact, RecordError> {
        while self.state.accepts_chunks() {
            let Some(event) = self.receiver.recv().await else {
                return Err(RecordError::Encoder("encoder channel closed".to_string()));
            };
            if let Some(RecordNotice::Failed(message)) = self.handle_event(event) {
                return Err(RecordError::Encoder(message));
            }
        }
        self.artifact.as_ref().ok_or(RecordError::NoArtifact)
    }

    fn finish_session(&mut self) {
        if let Some(capture) = self.capture.take() {
            capture.request_stop();
        }
        self.state = RecorderState::Idle;
    }
}

impl Drop for RecordingController {
    fn drop(&mut self) {
        if let Some(capture) = &self.capture {
            capture.request_stop();
        }
    }
}
