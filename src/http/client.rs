//! An HTTP/1.0 client over a byte stream.
//!
//! The [`HttpClient`] sends a `GET` request over a [`StreamTransport`] and
//! then parses the response incrementally, one octet at a time, as it
//! arrives. Only as much of the response is looked at as is necessary to
//! learn the status code and the `Content-Length` header. The body is left
//! in the transport for the caller to read.
//!
//! A typical exchange looks like this:
//!
//! ```no_run
//! # use tinynet::http::{Error, HttpClient};
//! # use tinynet::net::clock::SystemClock;
//! # use tinynet::net::transport::StreamTransport;
//! # fn fetch(transport: impl StreamTransport) -> Result<(), Error> {
//! let mut client = HttpClient::new(
//!     transport, SystemClock::new(), "www.example.com", 80
//! );
//! client.start_request(Some("www.example.com"), "/", None, None)?;
//! client.send_header("Accept-Language", "en");
//! client.finish_request();
//! let status = client.response_status_code()?;
//! client.skip_response_headers()?;
//! let mut buf = [0u8; 64];
//! while !client.end_of_body_reached() {
//!     let len = client.read_body(&mut buf)?;
//!     // Do something with &buf[..len].
//! #   break
//! }
//! client.stop();
//! # Ok(())
//! # }
//! ```
//!
//! Every wait for response data polls the transport and sleeps for the
//! configured poll interval when nothing is ready. A wait never lasts longer
//! than the response timeout measured from the start of the call.

use super::error::Error;
use super::matcher::{LiteralMatcher, Match};
use crate::net::clock::{Clock, Elapsed};
use crate::net::transport::StreamTransport;
use crate::utils::base64;
use crate::utils::config::DefMinMax;
use core::time::Duration;
use tracing::{debug, trace, warn};

//------------ Configuration Constants ----------------------------------------

/// Configuration limits for the response timeout.
const RESPONSE_TIMEOUT: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(30),
    Duration::from_millis(1),
    Duration::from_secs(600),
);

/// Configuration limits for the interval between polls for data.
const POLL_INTERVAL: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(1),
    Duration::from_millis(1),
    Duration::from_secs(10),
);

/// The user agent sent if none is given.
pub const DEFAULT_USER_AGENT: &str = "tinynet/0.1";

/// The pattern the status line has to start with.
const STATUS_PREFIX: &[u8] = b"HTTP/*.* ";

/// The wildcard character in [`STATUS_PREFIX`].
const STATUS_WILDCARD: u8 = b'*';

/// The start of the one header line we are interested in.
const CONTENT_LENGTH_PREFIX: &[u8] = b"Content-Length: ";

//------------ Config ---------------------------------------------------------

/// Configuration for an HTTP client.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// The maximum time a single call waits for response data.
    response_timeout: Duration,

    /// How long to sleep when no data is available.
    poll_interval: Duration,

    /// The user agent sent when the caller doesn’t provide one.
    #[cfg_attr(
        feature = "serde",
        serde(skip, default = "Config::default_user_agent")
    )]
    user_agent: &'static str,
}

impl Config {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the response timeout.
    ///
    /// This is the maximum time [`HttpClient::response_status_code`] and
    /// [`HttpClient::skip_response_headers`] wait for the data they need,
    /// measured from the start of the call.
    pub fn response_timeout(&self) -> Duration {
        self.response_timeout
    }

    /// Sets the response timeout.
    ///
    /// If this value is too small or too large, it will be caped.
    pub fn set_response_timeout(&mut self, value: Duration) {
        self.response_timeout = RESPONSE_TIMEOUT.limit(value)
    }

    /// Returns the poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Sets the poll interval.
    ///
    /// If this value is too small or too large, it will be caped.
    pub fn set_poll_interval(&mut self, value: Duration) {
        self.poll_interval = POLL_INTERVAL.limit(value)
    }

    /// Returns the default user agent.
    pub fn user_agent(&self) -> &'static str {
        self.user_agent
    }

    /// Sets the default user agent.
    pub fn set_user_agent(&mut self, value: &'static str) {
        self.user_agent = value
    }

    /// Returns the user agent used when none is configured.
    #[cfg(feature = "serde")]
    fn default_user_agent() -> &'static str {
        DEFAULT_USER_AGENT
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            response_timeout: RESPONSE_TIMEOUT.default(),
            poll_interval: POLL_INTERVAL.default(),
            user_agent: DEFAULT_USER_AGENT,
        }
    }
}

//------------ Phase ----------------------------------------------------------

/// The phase of an HTTP exchange.
///
/// Phases are ordered. An exchange moves forward through them, except for
/// the header phases which return to [`StatusCodeRead`][Self::StatusCodeRead]
/// at the start of every header line.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Phase {
    /// No request is in progress.
    Idle,

    /// The request line has been sent, headers may follow.
    RequestStarted,

    /// The complete request has been sent.
    RequestSent,

    /// The status line prefix was matched and digits are being read.
    ReadingStatusCode,

    /// The status code is known. Between header lines.
    StatusCodeRead,

    /// Reading the digits of a `Content-Length` header.
    ReadingContentLength,

    /// Skipping the rest of a header line.
    SkipToEndOfHeader,

    /// A line started with a carriage return.
    LineStartCrFound,

    /// The headers have ended. Anything else is body.
    ReadingBody,
}

//------------ HttpClient -----------------------------------------------------

/// An HTTP/1.0 client for a single server.
///
/// The client owns its transport and its clock. It performs one exchange
/// at a time. After an exchange, or after any failure, [`stop`][Self::stop]
/// closes the connection and makes the client ready for the next request.
#[derive(Debug)]
pub struct HttpClient<'a, T, C> {
    /// The transport used to talk to the server.
    transport: T,

    /// The clock for timeouts and polling.
    clock: C,

    /// The server to connect to.
    server: &'a str,

    /// The port to connect to.
    port: u16,

    /// The configuration.
    config: Config,

    /// The current phase of the exchange.
    phase: Phase,

    /// The status code, valid from `Phase::StatusCodeRead` on.
    status_code: u16,

    /// Whether any digit of the status code has been read.
    status_digits: bool,

    /// The value of the last `Content-Length` header.
    content_length: u64,

    /// Whether a `Content-Length` header has been seen.
    content_length_seen: bool,

    /// The number of body octets handed out so far.
    body_consumed: u64,

    /// Matcher for the start of the status line.
    status_matcher: LiteralMatcher,

    /// Matcher for the start of the content length header.
    length_matcher: LiteralMatcher,
}

impl<'a, T: StreamTransport, C: Clock> HttpClient<'a, T, C> {
    /// Creates a new client using the default configuration.
    pub fn new(transport: T, clock: C, server: &'a str, port: u16) -> Self {
        Self::with_config(transport, clock, server, port, Default::default())
    }

    /// Creates a new client with the given configuration.
    pub fn with_config(
        transport: T,
        clock: C,
        server: &'a str,
        port: u16,
        config: Config,
    ) -> Self {
        HttpClient {
            transport,
            clock,
            server,
            port,
            config,
            phase: Phase::Idle,
            status_code: 0,
            status_digits: false,
            content_length: 0,
            content_length_seen: false,
            body_consumed: 0,
            status_matcher: LiteralMatcher::with_wildcard(
                STATUS_PREFIX,
                STATUS_WILDCARD,
            ),
            length_matcher: LiteralMatcher::new(CONTENT_LENGTH_PREFIX),
        }
    }

    /// Returns the configuration of the client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the current phase of the exchange.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the status code if it has been read.
    pub fn status_code(&self) -> Option<u16> {
        if self.phase >= Phase::StatusCodeRead {
            Some(self.status_code)
        } else {
            None
        }
    }

    //--- Sending the request

    /// Connects to the server and starts a `GET` request for `path`.
    ///
    /// A `Host:` header is sent if `host` is given and an `Accept:` header
    /// if `accept` is. If `user_agent` is `None`, the configured default is
    /// sent instead.
    pub fn start_request(
        &mut self,
        host: Option<&str>,
        path: &str,
        user_agent: Option<&str>,
        accept: Option<&str>,
    ) -> Result<(), Error> {
        if self.phase != Phase::Idle {
            return Err(Error::AlreadyActive);
        }
        if let Err(err) = self.transport.open(self.server, self.port) {
            warn!(
                "Connecting to {}:{} failed: {err:?}",
                self.server, self.port
            );
            return Err(Error::ConnectionFailed);
        }
        debug!(
            "Connected to {}:{}, requesting {path}",
            self.server, self.port
        );

        self.transport.write(b"GET ");
        self.transport.write(path.as_bytes());
        self.transport.write(b" HTTP/1.0\r\n");
        if let Some(host) = host {
            self.send_header("Host", host);
        }
        let user_agent = user_agent.unwrap_or(self.config.user_agent);
        self.send_header("User-Agent", user_agent);
        if let Some(accept) = accept {
            self.send_header("Accept", accept);
        }
        self.phase = Phase::RequestStarted;
        Ok(())
    }

    /// Sends a complete `GET` request with default headers.
    pub fn get(&mut self, host: &str, path: &str) -> Result<(), Error> {
        self.start_request(Some(host), path, None, None)?;
        self.finish_request();
        Ok(())
    }

    /// Sends a header line made of `name` and `value`.
    ///
    /// This must only be called between
    /// [`start_request`][Self::start_request] and
    /// [`finish_request`][Self::finish_request].
    pub fn send_header(&mut self, name: &str, value: &str) {
        self.transport.write(name.as_bytes());
        self.transport.write(b": ");
        self.transport.write(value.as_bytes());
        self.transport.write(b"\r\n");
    }

    /// Sends a complete header line given without its line ending.
    ///
    /// The same restrictions as for [`send_header`][Self::send_header]
    /// apply.
    pub fn send_header_line(&mut self, line: &str) {
        self.transport.write(line.as_bytes());
        self.transport.write(b"\r\n");
    }

    /// Sends an `Authorization` header for basic authentication.
    ///
    /// The credentials are encoded and sent in groups of four characters
    /// so that they never have to be assembled in a buffer.
    pub fn send_basic_auth(&mut self, user: &str, password: &str) {
        self.transport.write(b"Authorization: Basic ");
        let mut encoder = base64::Encoder::new();
        let credentials = user
            .bytes()
            .chain(Some(b':'))
            .chain(password.bytes());
        for octet in credentials {
            if let Some(group) = encoder.push(octet) {
                self.transport.write(&group);
            }
        }
        if let Some(group) = encoder.finalize() {
            self.transport.write(&group);
        }
        self.transport.write(b"\r\n");
    }

    /// Ends the request by sending the empty line.
    pub fn finish_request(&mut self) {
        self.transport.write(b"\r\n");
        self.phase = Phase::RequestSent;
        trace!("Request sent");
    }

    //--- Reading the response

    /// Reads the status line of the response and returns the status code.
    ///
    /// Interim responses with a status code below 200 are skipped. Fails
    /// with [`Error::ApiMisuse`] if the request hasn’t been sent yet, with
    /// [`Error::InvalidResponse`] if a line doesn’t start like a status
    /// line, and with [`Error::TimedOut`] if no complete status line
    /// arrived within the response timeout.
    pub fn response_status_code(&mut self) -> Result<u16, Error> {
        if self.phase < Phase::RequestSent {
            return Err(Error::ApiMisuse);
        }
        let start = self.clock.now();
        loop {
            self.phase = Phase::RequestSent;
            self.status_code = 0;
            self.status_digits = false;
            self.status_matcher.reset();
            loop {
                let octet = self.wait_for_octet(&start)?;
                self.feed_status_line(octet)?;
                if octet == b'\n' && self.phase == Phase::StatusCodeRead {
                    break;
                }
            }
            if self.status_code >= 200 {
                debug!("Received status code {}", self.status_code);
                self.length_matcher.reset();
                return Ok(self.status_code);
            }
            trace!("Skipping interim response {}", self.status_code);
        }
    }

    /// Processes one octet of the status line.
    fn feed_status_line(&mut self, octet: u8) -> Result<(), Error> {
        match self.phase {
            Phase::RequestSent => {
                // Interim responses end with an empty line.
                if self.status_matcher.at_start()
                    && (octet == b'\r' || octet == b'\n')
                {
                    return Ok(());
                }
                match self.status_matcher.push(octet) {
                    Match::Partial => {}
                    Match::Complete => self.phase = Phase::ReadingStatusCode,
                    Match::Mismatch => {
                        warn!("Invalid status line: unexpected {octet:#04x}");
                        return Err(Error::InvalidResponse);
                    }
                }
            }
            Phase::ReadingStatusCode => {
                if octet.is_ascii_digit() {
                    self.status_code = self
                        .status_code
                        .checked_mul(10)
                        .and_then(|code| {
                            code.checked_add(u16::from(octet - b'0'))
                        })
                        .ok_or_else(|| {
                            warn!("Invalid status line: status code overflow");
                            Error::InvalidResponse
                        })?;
                    self.status_digits = true;
                } else if self.status_digits {
                    self.phase = Phase::StatusCodeRead;
                } else {
                    warn!("Invalid status line: missing status code");
                    return Err(Error::InvalidResponse);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Reads a single octet of the header section if one is available.
    ///
    /// Returns `Ok(None)` if no data is ready. Once the end of the header
    /// section has been reached, this continues to hand out octets of the
    /// body.
    pub fn read_header(&mut self) -> Result<Option<u8>, Error> {
        if self.phase < Phase::StatusCodeRead {
            return Err(Error::ApiMisuse);
        }
        let octet = match self.transport.read_byte() {
            Some(octet) => octet,
            None => return Ok(None),
        };
        self.feed_header(octet);
        Ok(Some(octet))
    }

    /// Reads and discards the rest of the header section.
    pub fn skip_response_headers(&mut self) -> Result<(), Error> {
        if self.phase < Phase::StatusCodeRead {
            return Err(Error::ApiMisuse);
        }
        let start = self.clock.now();
        while !self.end_of_headers_reached() {
            let octet = self.wait_for_octet(&start)?;
            self.feed_header(octet);
        }
        Ok(())
    }

    /// Processes one octet of the header section.
    fn feed_header(&mut self, octet: u8) {
        match self.phase {
            Phase::ReadingBody => {
                self.body_consumed += 1;
                return;
            }
            Phase::StatusCodeRead => {
                if self.length_matcher.at_start() && octet == b'\r' {
                    self.phase = Phase::LineStartCrFound;
                } else {
                    match self.length_matcher.push(octet) {
                        Match::Partial => {}
                        Match::Complete => {
                            // The last of several headers wins.
                            self.content_length = 0;
                            self.content_length_seen = true;
                            self.phase = Phase::ReadingContentLength;
                        }
                        Match::Mismatch => {
                            self.phase = Phase::SkipToEndOfHeader
                        }
                    }
                }
            }
            Phase::ReadingContentLength => {
                if octet.is_ascii_digit() {
                    self.content_length = self
                        .content_length
                        .saturating_mul(10)
                        .saturating_add(u64::from(octet - b'0'));
                } else {
                    trace!("Content length {}", self.content_length);
                    self.phase = Phase::SkipToEndOfHeader;
                }
            }
            Phase::LineStartCrFound => {
                if octet == b'\n' {
                    debug!("End of headers reached");
                    self.phase = Phase::ReadingBody;
                    return;
                }
                self.phase = Phase::SkipToEndOfHeader;
            }
            _ => {}
        }
        if octet == b'\n' {
            self.phase = Phase::StatusCodeRead;
            self.length_matcher.reset();
        }
    }

    /// Returns whether the end of the header section has been reached.
    pub fn end_of_headers_reached(&self) -> bool {
        self.phase == Phase::ReadingBody
    }

    /// Returns the value of the last `Content-Length` header.
    ///
    /// Returns zero if there was no such header.
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Reads as much of the body as is available into `buf`.
    ///
    /// Never blocks and never reads beyond the content length if one was
    /// given. Returns the number of octets read.
    pub fn read_body(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if self.phase != Phase::ReadingBody {
            return Err(Error::ApiMisuse);
        }
        let mut len = 0;
        while len < buf.len() && !self.end_of_body_reached() {
            match self.transport.read_byte() {
                Some(octet) => {
                    buf[len] = octet;
                    len += 1;
                    self.body_consumed += 1;
                }
                None => break,
            }
        }
        Ok(len)
    }

    /// Returns the number of body octets read so far.
    pub fn body_consumed(&self) -> u64 {
        self.body_consumed
    }

    /// Returns whether the complete body has been read.
    ///
    /// This can only be known if the response had a content length.
    pub fn end_of_body_reached(&self) -> bool {
        self.end_of_headers_reached()
            && self.content_length_seen
            && self.body_consumed >= self.content_length
    }

    /// Closes the connection and returns the client to idle.
    pub fn stop(&mut self) {
        self.transport.close();
        self.phase = Phase::Idle;
        self.status_code = 0;
        self.status_digits = false;
        self.content_length = 0;
        self.content_length_seen = false;
        self.body_consumed = 0;
        self.status_matcher.reset();
        self.length_matcher.reset();
        trace!("Connection closed");
    }

    /// Waits for the next octet until the timeout counted from `start`.
    fn wait_for_octet(&mut self, start: &C::Instant) -> Result<u8, Error> {
        loop {
            if start.elapsed() >= self.config.response_timeout {
                warn!(
                    "Timeout waiting for response in phase {:?}",
                    self.phase
                );
                return Err(Error::TimedOut);
            }
            if self.transport.data_available() {
                if let Some(octet) = self.transport.read_byte() {
                    return Ok(octet);
                }
            }
            self.clock.sleep(self.config.poll_interval);
        }
    }
}

//============ Test ==========================================================
