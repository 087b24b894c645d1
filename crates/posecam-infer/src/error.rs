use {crate::Device, posecam_base::TensorError, posecam_image::ImageError, std::fmt};

#[derive(Debug)]
pub enum InferError {
    /// The model could not be read or compiled.
    ModelLoad(String),
    Backend(String),
    Shape { expected: String, got: String },
    UnsupportedDevice(Device),
    UnsupportedDtype(String),
    InvalidInput { name: String, expected_names: Vec<String> },
    Image(ImageError),
    Io(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::Shape { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(f, "invalid input {name:?}, model takes {expected_names:?}"),
            InferError::Image(err) => write!(f, "image error: {err}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::Backend(err.to_string())
    }
}

impl From<ImageError> for InferError {
    fn from(err: ImageError) -> Self {
        InferError::Image(err)
    }
}
