use {posecam_image::ImageError, std::fmt};

#[derive(Debug)]
pub enum RecordError {
    /// `start` while a session is open.
    AlreadyRecording,
    /// `start` while the previous session is still being finalized.
    Finalizing,
    /// `stop` with no open session.
    NotRecording,
    /// Download requested before a clip was finalized.
    NoArtifact,
    Encoder(String),
    Image(ImageError),
    Io(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::AlreadyRecording => write!(f, "already recording"),
            RecordError::Finalizing => write!(f, "previous recording is still being finalized"),
            RecordError::NotRecording => write!(f, "not recording"),
            RecordError::NoArtifact => write!(f, "no finished recording to download"),
            RecordError::Encoder(msg) => write!(f, "encoder error: {msg}"),
            RecordError::Image(err) => write!(f, "image error: {err}"),
            RecordError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        RecordError::Io(err.to_string())
    }
}

impl From<ImageError> for RecordError {
    fn from(err: ImageError) -> Self {
        RecordError::Image(err)
    }
}
