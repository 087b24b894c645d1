use {posecam_image::ImageError, std::fmt};

#[derive(Debug)]
pub enum CaptureError {
    /// The user or the OS refused access to the device.
    PermissionDenied(String),
    /// Missing or unusable hardware, or a file that cannot be played.
    Device(String),
    Stream(String),
    Decode(ImageError),
    Channel(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::PermissionDenied(msg) => write!(f, "permission denied: {msg}"),
            CaptureError::Device(msg) => write!(f, "device error: {msg}"),
            CaptureError::Stream(msg) => write!(f, "stream error: {msg}"),
            CaptureError::Decode(err) => write!(f, "decode error: {err}"),
            CaptureError::Channel(msg) => write!(f, "channel error: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => CaptureError::PermissionDenied(err.to_string()),
            _ => CaptureError::Device(err.to_string()),
        }
    }
}

impl From<ImageError> for CaptureError {
    fn from(err: ImageError) -> Self {
        CaptureError::Decode(err)
    }
}
