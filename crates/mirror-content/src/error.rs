//! Error types for mirror-content

/// Result type for mirror-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to render {format} content: {message}")]
    RenderError { format: String, message: String },
}

impl Error {
    pub fn render(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderError {
            format: format.into(),
            message: message.into(),
        }
    }
}
