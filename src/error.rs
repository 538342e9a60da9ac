//! Error types for the submission path.

use std::error;
use std::io;
use thiserror::Error;
use toml;
use ureq;

/// The ways a submission can fail.
///
/// Unsupported metric kinds at the line protocol backend are deliberately
/// not represented here: the backend recovers from those locally by
/// dropping the one offending series and carrying on, so they never
/// surface to the caller as an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    /// A dynamically supplied measurement had a shape we do not accept.
    /// Raised before any network activity happens.
    #[error("invalid measurement input: {0}")]
    InvalidInput(&'static str),
    /// The configuration file could not be parsed.
    #[error("unable to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// An opaque failure from the HTTP or datagram collaborator. Never
    /// retried, never partially reported: the whole batch failed.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn error::Error + Send + Sync>),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Transport(Box::new(e))
    }
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Error {
        Error::Transport(Box::new(e))
    }
}
