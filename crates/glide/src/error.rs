#![forbid(unsafe_code)]

//! Glide error model.
//!
//! The engine itself never fails at runtime: bad indices are sanitized, bad
//! pointer samples are dropped, and an empty item list yields an inert
//! carousel. Errors only arise while assembling one, from configuration
//! loading or from a caller that opted into [`require_items`].
//!
//! [`require_items`]: crate::CarouselBuilder::require_items

use std::fmt;

use glide_core::config::ConfigError;

/// Top-level error type for Glide.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// Raw I/O error (convenience variant for `?` on io::Result).
    Io(std::io::Error),
    /// The builder was told to reject an empty item list.
    NoItems,
}

impl Error {
    /// Validation messages, if this is a validation failure.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::Config(ConfigError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
            Self::NoItems => write!(f, "carousel has no items"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::NoItems => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Glide APIs.
pub type Result<T> = std::result::Result<T, Error>;
