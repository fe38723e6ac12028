use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

/// Failures that can happen while building a response.
///
/// None of these ever reach the client: the renderers catch them, log
/// them and degrade (drop the header, fall back to a minimal body).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid header name: {name}")]
    InvalidHeaderName { name: String },

    #[error("Invalid value for header {name}")]
    InvalidHeaderValue { name: String },

    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RenderError {
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidHeaderName { name: name.into() }
    }

    pub fn invalid_value(name: impl Into<String>) -> Self {
        Self::InvalidHeaderValue { name: name.into() }
    }
}
