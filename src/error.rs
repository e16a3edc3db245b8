use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the client
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(text2ics::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(text2ics::config))]
    Config(String),

    /// The backend answered with a non-success status
    #[error("Request failed with status code {status}")]
    #[diagnostic(code(text2ics::backend_status))]
    Status { status: u16, detail: Option<String> },

    /// The request never produced a response
    #[error("{0}")]
    #[diagnostic(code(text2ics::transport))]
    Transport(String),

    /// The backend answered, but not with what the endpoint promises
    #[error("{0}")]
    #[diagnostic(code(text2ics::contract))]
    Contract(String),

    #[error("Platform error: {0}")]
    #[diagnostic(code(text2ics::platform))]
    Platform(String),

    #[error(transparent)]
    #[diagnostic(code(text2ics::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(text2ics::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(text2ics::other))]
    Other(String),
}

impl Error {
    /// Detail message supplied by the server, if any
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Error::Status {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }

    /// Message shown to the user: server detail, then the error itself, then `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(detail) = self.server_detail() {
            return detail.to_string();
        }
        self.message_or(fallback)
    }

    /// The error's own message, or `fallback` when it has none
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ClientResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create contract violation errors
pub fn contract_error(message: &str) -> Error {
    Error::Contract(message.to_string())
}

/// Helper to create platform errors
pub fn platform_error(message: &str) -> Error {
    Error::Platform(message.to_string())
}
