use {
    posecam_record::{RecordAffordance, RecorderState},
    std::collections::VecDeque,
};

pub const STATUS_LOADING: &str = "Loading model...";
pub const STATUS_MODEL_READY: &str = "Model Ready. Select input source.";
pub const STATUS_TRACKING: &str = "Tracking active...";
pub const STATUS_RECORDING: &str = "Recording...";

pub fn status_model_error(message: &str) -> String {
    format!("Error loading model: {message}")
}

pub fn status_tracking_stopped(message: &str) -> String {
    format!("Tracking stopped: {message}")
}

pub fn alert_device(message: &str) -> String {
    format!("Camera access denied or error: {message}")
}

/// Everything the host window shows. Written by the app context only; the
/// host renders it and never writes back.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub status: String,
    alerts: VecDeque<String>,
    /// The record toggle stays disabled until tracking first starts.
    pub record_enabled: bool,
    pub download_enabled: bool,
    pub record: RecordAffordance,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: STATUS_LOADING.to_string(),
            alerts: VecDeque::new(),
            record_enabled: false,
            download_enabled: false,
            record: RecorderState::Idle.affordance(),
        }
    }
}

impl UiState {
    pub fn set_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        log::info!("status: {}", status);
        self.status = status;
    }

    /// Queue a blocking message for the user.
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("alert: {}", message);
        self.alerts.push_back(message);
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alerts.pop_front()
    }

    pub fn pending_alerts(&self) -> usize {
        self.alerts.len()
    }
}
