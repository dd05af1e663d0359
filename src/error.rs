use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("transport error: {message}")]
    Transport { message: String, details: Value },
    #[error("upstream returned an error status: {message}")]
    UpstreamStatus { message: String, details: Value },
    #[error("malformed payload: {message}")]
    Malformed { message: String, details: Value },
    #[error("feed rendering failed: {message}")]
    Render { message: String, details: Value },
    #[error("i/o error: {message}")]
    Io { message: String, details: Value },
}

impl AppError {
    pub fn transport(message: impl Into<String>, details: Value) -> Self {
        Self::Transport {
            message: message.into(),
            details,
        }
    }
    pub fn upstream_status(message: impl Into<String>, details: Value) -> Self {
        Self::UpstreamStatus {
            message: message.into(),
            details,
        }
    }
    pub fn malformed(message: impl Into<String>, details: Value) -> Self {
        Self::Malformed {
            message: message.into(),
            details,
        }
    }
    pub fn render(message: impl Into<String>, details: Value) -> Self {
        Self::Render {
            message: message.into(),
            details,
        }
    }
    pub fn io(message: impl Into<String>, details: Value) -> Self {
        Self::Io {
            message: message.into(),
            details,
        }
    }

    /// Short machine-readable error code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Transport { .. } => "transport_error",
            AppError::UpstreamStatus { .. } => "upstream_status",
            AppError::Malformed { .. } => "malformed_payload",
            AppError::Render { .. } => "render_error",
            AppError::Io { .. } => "io_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Transport { details, .. }
            | AppError::UpstreamStatus { details, .. }
            | AppError::Malformed { details, .. }
            | AppError::Render { details, .. }
            | AppError::Io { details, .. } => details,
        }
    }
}

pub fn map_reqwest_error(e: reqwest::Error) -> AppError {
    let url = e.url().map(|u| u.to_string());

    if e.is_decode() {
        return AppError::malformed(
            "Response body is not valid JSON",
            json!({ "url": url, "reason": e.to_string() }),
        );
    }

    if let Some(status) = e.status() {
        return AppError::upstream_status(
            format!("HTTP {}", status.as_u16()),
            json!({ "url": url, "status": status.as_u16() }),
        );
    }

    AppError::transport(
        if e.is_timeout() {
            "Request timed out"
        } else {
            "Request failed"
        },
        json!({ "url": url, "reason": e.to_string() }),
    )
}

pub fn map_io_error(e: std::io::Error, path: &str) -> AppError {
    AppError::io(
        "Failed to write feed document",
        json!({ "path": path, "reason": e.to_string() }),
    )
}
