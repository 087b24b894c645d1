use {
    crate::ConfigError,
    posecam_infer::{Device, ModelKind},
    posecam_record::EncoderConfig,
    posecam_video::CameraConfig,
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

pub const ENV_MODEL_PATH: &str = "POSECAM_MODEL_PATH";
pub const ENV_MODEL_KIND: &str = "POSECAM_MODEL_KIND";
pub const ENV_CAMERA: &str = "POSECAM_CAMERA";
pub const ENV_OUTPUT_DIR: &str = "POSECAM_OUTPUT_DIR";
pub const ENV_LOG_DIR: &str = "POSECAM_LOG_DIR";

/// Session settings: JSON file first, environment on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub model_kind: ModelKind,
    pub device: Device,
    /// Camera device node; `None` picks the first one.
    pub camera: Option<PathBuf>,
    /// Rate of the estimation clock, like a display refresh.
    pub refresh_rate: f32,
    /// Where downloads are written.
    pub output_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/movenet-singlepose-lightning.onnx"),
            model_kind: ModelKind::default(),
            device: Device::Cpu,
            camera: None,
            refresh_rate: 60.0,
            output_dir: PathBuf::from("."),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `lookup`, which maps variable names to values.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(path) = lookup(ENV_MODEL_PATH) {
            self.model_path = path.into();
        }
        if let Some(kind) = lookup(ENV_MODEL_KIND) {
            self.model_kind = kind.parse().map_err(|message| ConfigError::Invalid {
                key: ENV_MODEL_KIND.to_string(),
                message,
            })?;
        }
        if let Some(camera) = lookup(ENV_CAMERA) {
            self.camera = Some(camera.into());
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = dir.into();
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.log_dir = Some(dir.into());
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.refresh_rate.is_finite() && self.refresh_rate > 0.0) {
            return Err(ConfigError::Invalid {
                key: "refresh_rate".to_string(),
                message: format!("{} is not a positive rate", self.refresh_rate),
            });
        }
        Ok(())
    }

    /// The user-facing camera at 640x480.
    pub fn camera_config(&self) -> CameraConfig {
        let config = CameraConfig::default();
        match &self.camera {
            Some(device) => config.with_device(device.clone()),
            None => config,
        }
    }

    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig::default()
    }
}
