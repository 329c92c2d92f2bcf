use thiserror::Error;
use waypoint_layout::LayoutError;
use waypoint_runtime::ConfigError;
use waypoint_tutorial::{TutorialError, TutorialStep};

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("tutorial error: {0}")]
    Tutorial(#[from] TutorialError),

    #[error("logging already initialised: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("walkthrough stalled at step {step}")]
    Stalled { step: TutorialStep },
}

impl DemoError {
    /// 2 for bad input, 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::Layout(_) | Self::Config(_) => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
