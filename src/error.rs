use thiserror::Error;

/// Errors that abort a reconstruction before anything is printed.
#[derive(Debug, Error)]
pub enum RunlikeError {
    /// The docker executable could not be run, or reported a failure.
    #[error("failed to inspect {what}: {message}")]
    Fetch { what: String, message: String },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Usage(String),
}

impl RunlikeError {
    pub fn fetch(what: impl Into<String>, message: impl Into<String>) -> Self {
        RunlikeError::Fetch {
            what: what.into(),
            message: message.into(),
        }
    }

    pub fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        RunlikeError::Decode { what: what.into(), source }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        RunlikeError::Usage(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RunlikeError>;
