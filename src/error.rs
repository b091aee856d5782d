//! Error type shared by the API client, the platform seams and the service.

/// Errors produced while talking to the backend or the browser.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The HTTP request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The response body or persisted identity is not valid JSON
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A URL returned by the backend or built from config is malformed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An expected field is absent from a response
    #[error("Missing field '{0}' in response")]
    MissingField(&'static str),

    /// Browser storage rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// The browser refused to navigate
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// The desktop shell window manager reported a failure
    #[error("Window manager error: {0}")]
    WindowManager(String),

    /// A browser-only capability was used outside the browser
    #[error("{0} is not available outside the browser")]
    Unavailable(&'static str),
}
