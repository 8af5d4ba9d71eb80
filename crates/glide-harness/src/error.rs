use std::path::PathBuf;

use glide_core::config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("unknown storm pattern: {name}")]
    UnknownPattern { name: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("config file does not exist: {path}")]
    MissingConfig { path: PathBuf },

    #[error("storm violated {count} invariant(s); first: {first}")]
    Violations { count: usize, first: String },
}

impl HarnessError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Violations { .. } => 3,
            Self::UnknownPattern { .. } | Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
