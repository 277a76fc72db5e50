use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (HTTP {status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DashboardError {
    /// Text shown to the user in the error panel.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::InvalidInput(msg)
            | DashboardError::NotFound(msg)
            | DashboardError::ServiceUnavailable(msg) => msg.clone(),
            DashboardError::Api { detail, .. } => detail.clone(),
            DashboardError::Network(msg) => format!("Network failure ({})", msg),
            DashboardError::Decode(msg) => format!("Unexpected response from the API ({})", msg),
            DashboardError::Storage(msg) => format!("Local storage failure ({})", msg),
        }
    }

    /// HTTP status a dashboard surface should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            DashboardError::InvalidInput(_) => 400,
            DashboardError::NotFound(_) => 404,
            DashboardError::Api { status, .. } if *status >= 400 => *status,
            DashboardError::ServiceUnavailable(_) => 503,
            DashboardError::Network(_) | DashboardError::Decode(_) | DashboardError::Api { .. } => 502,
            DashboardError::Storage(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
