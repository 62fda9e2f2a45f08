use thiserror::Error;

/// Failure of a single backend call. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client-side constraint failures. These block submission before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("{0} must be a valid email address.")]
    InvalidEmail(&'static str),
    #[error("{0} must be a date and time like 2030-01-01T09:00.")]
    InvalidDateTime(&'static str),
    #[error("Start date must be {min} or later.")]
    StartInPast { min: String },
    #[error("End date must be {min} or later.")]
    EndBeforeStart { min: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("The panel is not open.")]
    NotOpen,
    #[error("A submission is already in progress.")]
    InFlight,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config line {line}: {content}")]
    Parse { line: usize, content: String },
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
