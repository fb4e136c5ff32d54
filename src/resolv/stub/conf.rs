//! Resolver configuration.

use crate::base::net::Ipv4Addr;
use crate::utils::config::DefMinMax;
use core::time::Duration;

//------------ Configuration Constants ----------------------------------------

/// The port DNS servers listen on.
pub const DNS_PORT: u16 = 53;

/// Configuration limits for the time to wait for a reply.
const TIMEOUT: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(5),
    Duration::from_millis(1),
    Duration::from_secs(60),
);

/// Configuration limits for the number of times to wait for a reply.
const ATTEMPTS: DefMinMax<u8> = DefMinMax::new(3, 1, 10);

/// Configuration limits for the interval between polls for a reply.
const POLL_INTERVAL: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_millis(10),
    Duration::from_millis(1),
    Duration::from_secs(1),
);

//------------ ResolvConf -----------------------------------------------------

/// Resolver configuration.
///
/// The stub resolver talks to exactly one server. A query is sent once.
/// The resolver then waits up to `timeout` for a reply and repeats the
/// wait, but not the query, until it has waited `attempts` times.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvConf {
    /// The address of the server.
    server: Ipv4Addr,

    /// The port of the server.
    port: u16,

    /// How long to wait for a reply each time.
    timeout: Duration,

    /// How many times to wait for a reply.
    attempts: u8,

    /// How long to sleep while no reply is available.
    poll_interval: Duration,
}

impl ResolvConf {
    /// Creates a new configuration for the given server.
    pub fn new(server: Ipv4Addr) -> Self {
        ResolvConf {
            server,
            port: DNS_PORT,
            timeout: TIMEOUT.default(),
            attempts: ATTEMPTS.default(),
            poll_interval: POLL_INTERVAL.default(),
        }
    }

    /// Returns the server address.
    pub fn server(&self) -> Ipv4Addr {
        self.server
    }

    /// Sets the server address.
    pub fn set_server(&mut self, server: Ipv4Addr) {
        self.server = server
    }

    /// Returns the server port.
    ///
    /// Replies are only accepted if they come from this port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Sets the server port.
    pub fn set_port(&mut self, port: u16) {
        self.port = port
    }

    /// Returns the time to wait for a reply.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets the time to wait for a reply.
    ///
    /// If this value is too small or too large, it will be caped.
    pub fn set_timeout(&mut self, value: Duration) {
        self.timeout = TIMEOUT.limit(value)
    }

    /// Returns how many times to wait for a reply.
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    /// Sets how many times to wait for a reply.
    ///
    /// If this value is too small or too large, it will be caped.
    pub fn set_attempts(&mut self, value: u8) {
        self.attempts = ATTEMPTS.limit(value)
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
}

impl Default for ResolvConf {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED)
    }
}

//============ Test ==========================================================
