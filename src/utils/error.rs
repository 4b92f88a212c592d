use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Login rejected with status {status}")]
    LoginRejected { status: u16 },

    #[error("Login response carried no token")]
    MissingToken,

    #[error("Avatar upload failed: {message}")]
    UploadError { message: String },

    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },
}

impl SmokeError {
    /// Exit code used by the binary when this error aborts the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            SmokeError::ConfigError { .. } | SmokeError::InvalidConfigValueError { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SmokeError>;
