//! Error type for the HTTP client.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use core::fmt::{Display, Formatter};

/// Error type for the HTTP client.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A request was started while another one was in progress.
    AlreadyActive,

    /// The transport could not connect to the server.
    ConnectionFailed,

    /// An operation was called in the wrong phase of the exchange.
    ApiMisuse,

    /// The response did not arrive in time.
    TimedOut,

    /// The response status line is malformed.
    InvalidResponse,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        match self {
            Error::AlreadyActive => write!(f, "request already in progress"),
            Error::ConnectionFailed => {
                write!(f, "failed to connect to server")
            }
            Error::ApiMisuse => {
                write!(f, "operation not allowed in current phase")
            }
            Error::TimedOut => write!(f, "timeout waiting for response"),
            Error::InvalidResponse => write!(f, "invalid response"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
