//! Error types for the stub resolver.

use crate::base::iana::Rcode;
use crate::base::name::NameError;
use core::fmt;

//------------ Error ---------------------------------------------------------

/// Resolving a host name failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The host name looks like an address literal but isn’t a valid one.
    BadAddress,

    /// The transport has no endpoint available.
    NoSocketAvailable,

    /// The query could not be built.
    BuildFailed(NameError),

    /// The transport failed to send the query.
    SendFailed,

    /// No reply arrived in time.
    TimedOut,

    /// The reply came from an unexpected address or port.
    WrongServer,

    /// The reply is too short to contain a DNS header.
    Truncated,

    /// The reply is not an acceptable answer to the query.
    InvalidResponse(InvalidResponse),
}

impl From<InvalidResponse> for Error {
    fn from(err: InvalidResponse) -> Self {
        Error::InvalidResponse(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::BadAddress => f.write_str("invalid address literal"),
            Error::NoSocketAvailable => f.write_str("no socket available"),
            Error::BuildFailed(ref err) => {
                write!(f, "failed to build query: {}", err)
            }
            Error::SendFailed => f.write_str("failed to send query"),
            Error::TimedOut => f.write_str("timeout waiting for reply"),
            Error::WrongServer => f.write_str("reply from wrong server"),
            Error::Truncated => f.write_str("truncated reply"),
            Error::InvalidResponse(ref err) => {
                write!(f, "invalid response: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

//------------ InvalidResponse -----------------------------------------------

/// The reason why a reply was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvalidResponse {
    /// The QR bit is not set.
    NotAResponse,

    /// The message ID differs from that of the query.
    IdMismatch,

    /// The TC bit is set.
    TruncatedFlag,

    /// The response code is not NOERROR.
    Rcode(Rcode),

    /// The answer section is empty.
    NoAnswers,

    /// An A record doesn’t have four octets of data.
    BadRdataLength,

    /// None of the answers is an A record.
    NoAddressRecord,

    /// The message is malformed or ends prematurely.
    Malformed,
}

impl fmt::Display for InvalidResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InvalidResponse::NotAResponse => f.write_str("not a response"),
            InvalidResponse::IdMismatch => f.write_str("message ID mismatch"),
            InvalidResponse::TruncatedFlag => f.write_str("TC bit set"),
            InvalidResponse::Rcode(rcode) => {
                write!(f, "response code {}", rcode)
            }
            InvalidResponse::NoAnswers => f.write_str("no answers"),
            InvalidResponse::BadRdataLength => {
                f.write_str("bad A record data length")
            }
            InvalidResponse::NoAddressRecord => {
                f.write_str("no A record in answer")
            }
            InvalidResponse::Malformed => f.write_str("malformed message"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidResponse {}
