use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid server URL \"{input}\" (expected http:// or https://)")]
    InvalidServer { input: String },

    #[error("Aborted")]
    Aborted,

    #[error("Failed to read confirmation: {0}")]
    Prompt(std::io::Error),

    #[error("{0}")]
    Api(#[from] ApiError),
}

/// Errors surfaced by dashboard actions (scan, cancel, delete, listings)
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("Network error or server unreachable: {0}")]
    Transport(String),

    #[error("Error ({status}): {detail}")]
    Status { status: u16, detail: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

/// Errors from a single update check. The poller logs and swallows both kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum PollError {
    #[error("status check failed: {0}")]
    Transport(String),

    #[error("status check returned HTTP {status}")]
    Server { status: u16 },
}

impl From<ApiError> for PollError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, .. } => PollError::Server { status },
            ApiError::Transport(msg) | ApiError::Decode(msg) => PollError::Transport(msg),
        }
    }
}
