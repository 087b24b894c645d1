use {
    posecam_infer::InferError,
    posecam_record::RecordError,
    posecam_video::CaptureError,
    std::fmt,
};

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "cannot read config: {msg}"),
            ConfigError::Parse(msg) => write!(f, "invalid config: {msg}"),
            ConfigError::Invalid { key, message } => write!(f, "invalid {key}: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Failures as the user sees them.
#[derive(Debug)]
pub enum AppError {
    ModelLoad(InferError),
    /// Camera refused, missing, or a file that cannot be played.
    DeviceAccess(CaptureError),
    Record(RecordError),
    Config(ConfigError),
    /// The file chooser came back empty.
    NoFile,
    /// Recording needs tracking to have started at least once.
    TrackingInactive,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ModelLoad(err) => write!(f, "{err}"),
            AppError::DeviceAccess(err) => write!(f, "{err}"),
            AppError::Record(err) => write!(f, "{err}"),
            AppError::Config(err) => write!(f, "{err}"),
            AppError::NoFile => write!(f, "no file selected"),
            AppError::TrackingInactive => write!(f, "start tracking before recording"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::ModelLoad(err) => Some(err),
            AppError::DeviceAccess(err) => Some(err),
            AppError::Record(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::NoFile | AppError::TrackingInactive => None,
        }
    }
}

impl From<InferError> for AppError {
    fn from(err: InferError) -> Self {
        AppError::ModelLoad(err)
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::DeviceAccess(err)
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        AppError::Record(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}
