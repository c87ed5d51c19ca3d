//! Error definitions.

use std::error::Error;
use std::fmt;

use serde_json;
use thiserror;

/// A specialized Result type for this crate.
pub type Result<T, E = UdmorphError> = std::result::Result<T, E>;

/// The error type for treebank reading, dictionary handling and vectorization.
#[derive(Debug, thiserror::Error)]
pub enum UdmorphError {
    /// The error variant for [`InvalidFormatError`].
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// The error variant for [`InvalidArgumentError`].
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`std::io::Error`].
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The error variant for [`serde_json::Error`].
    ///
    /// Persisted dictionaries that do not deserialize into the expected
    /// four-part layout surface here at load time.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl UdmorphError {
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        UdmorphError::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        UdmorphError::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

/// Used when an input does not follow the expected format.
#[derive(Debug)]
pub struct InvalidFormatError {
    /// The name of the input.
    pub(crate) arg: &'static str,

    /// The error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// Used when an argument value cannot be satisfied.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// The name of the argument.
    pub(crate) arg: &'static str,

    /// The error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}
