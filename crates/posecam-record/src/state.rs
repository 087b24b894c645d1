use posecam_image::Rgb;

/// Lifecycle of a recording session.
///
/// `Stopping` covers the gap between the stop request and the encoder's
/// finalize notification; chunks still arrive in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Stopping,
}

pub const START_LABEL: &str = "Start Recording Analysis";
pub const STOP_LABEL: &str = "Stop Recording";

/// How the record control presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordAffordance {
    pub label: &'static str,
    /// `None` is the default look.
    pub color: Option<Rgb>,
}

impl RecorderState {
    pub fn is_recording(self) -> bool {
        self == RecorderState::Recording
    }

    /// Whether encoder output still belongs to the open session.
    pub fn accepts_chunks(self) -> bool {
        matches!(self, RecorderState::Recording | RecorderState::Stopping)
    }

    pub fn affordance(self) -> RecordAffordance {
        match self {
            RecorderState::Recording => RecordAffordance {
                label: STOP_LABEL,
                color: Some(Rgb::RED),
            },
            // the control resets as soon as stop is requested
            RecorderState::Idle | RecorderState::Stopping => RecordAffordance {
                label: START_LABEL,
                color: None,
            },
        }
    }
}
