//! A minimal HTTP/1.0 client.
//!
//! The client in this module is built for devices that cannot afford to
//! buffer a response. It sends a `GET` request and then walks the status
//! line and header section octet by octet as the data trickles in from a
//! [`StreamTransport`][crate::net::transport::StreamTransport], keeping
//! only the status code and the value of the `Content-Length` header.
//!
//! Persistent connections, chunked transfer encoding, and redirects are
//! not supported. Each exchange uses its own connection.
//!
//! See [`HttpClient`] for how to use it.

pub use self::client::{Config, HttpClient, Phase, DEFAULT_USER_AGENT};
pub use self::error::Error;

pub mod client;
pub mod error;
pub mod matcher;
