//! A stub resolver for IPv4 addresses.
//!
//! The most simple resolver possible simply relays all messages to one
//! upstream server and takes whatever it returns. This resolver does even
//! less: it only ever asks for the A records of a host name and only ever
//! returns the first address it finds.
//!
//! The resolver is built atop a [`DgramTransport`] and a [`Clock`]. It
//! sends the query once and then polls the transport for a reply. If no
//! reply arrives within the timeout configured in [`ResolvConf`], it keeps
//! waiting for as many more rounds as configured. The query is never sent
//! again.
//!
//! ```no_run
//! # use tinynet::base::net::Ipv4Addr;
//! # use tinynet::net::clock::SystemClock;
//! # use tinynet::net::transport::DgramTransport;
//! # use tinynet::resolv::stub::{Error, StubResolver};
//! # use tinynet::resolv::stub::conf::ResolvConf;
//! # fn lookup(transport: impl DgramTransport) -> Result<(), Error> {
//! let conf = ResolvConf::new(Ipv4Addr::new(192, 0, 2, 53));
//! let mut resolver = StubResolver::new(transport, SystemClock::new(), conf);
//! let addr = resolver.resolve("www.example.com")?;
//! # Ok(())
//! # }
//! ```

use self::conf::ResolvConf;
use self::query::Query;
use crate::base::net::{inet_aton, is_address_literal, Ipv4Addr};
use crate::net::clock::{Clock, Elapsed};
use crate::net::transport::DgramTransport;
use tracing::{debug, trace, warn};

pub use self::error::{Error, InvalidResponse};

pub mod conf;
pub mod error;
pub mod query;
pub mod reply;

//------------ StubResolver --------------------------------------------------

/// A DNS stub resolver.
///
/// The resolver owns its transport and clock. It resolves one name at a
/// time and uses a fresh endpoint of the transport for each name.
#[derive(Debug)]
pub struct StubResolver<T, C> {
    /// The transport to send queries over.
    transport: T,

    /// The clock for timeouts and polling.
    clock: C,

    /// The configuration.
    conf: ResolvConf,

    /// The message ID of the last query.
    request_id: u16,
}

impl<T: DgramTransport, C: Clock> StubResolver<T, C> {
    /// Creates a new resolver.
    pub fn new(transport: T, clock: C, conf: ResolvConf) -> Self {
        StubResolver {
            transport,
            clock,
            conf,
            request_id: 0,
        }
    }

    /// Switches to a different server and resets the resolver state.
    pub fn begin(&mut self, server: Ipv4Addr) {
        self.conf.set_server(server);
        self.request_id = 0;
    }

    /// Returns the configuration.
    pub fn conf(&self) -> &ResolvConf {
        &self.conf
    }

    /// Returns a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the message ID of the last query sent.
    pub fn request_id(&self) -> u16 {
        self.request_id
    }

    /// Resolves a host name into an IPv4 address.
    ///
    /// If `host` consists of only digits and dots, it is taken as an
    /// address literal and converted without asking the server. If it
    /// isn’t a valid literal, [`Error::BadAddress`] is returned.
    pub fn resolve(&mut self, host: &str) -> Result<Ipv4Addr, Error> {
        if is_address_literal(host) {
            return inet_aton(host).map_err(|_| {
                warn!("Invalid address literal {host}");
                Error::BadAddress
            });
        }
        let handle = match self.transport.open_ephemeral() {
            Some(handle) => handle,
            None => {
                warn!("No endpoint available for resolving {host}");
                return Err(Error::NoSocketAvailable);
            }
        };
        trace!("Opened endpoint {handle:?}");
        let res = self.query(handle, host);
        self.transport.close(handle);
        res
    }

    /// Sends the query and waits for the reply.
    fn query(
        &mut self,
        handle: T::Handle,
        host: &str,
    ) -> Result<Ipv4Addr, Error> {
        self.request_id = self.next_id();
        let query = Query::new(self.request_id, host).map_err(|err| {
            warn!("Failed to build query for {host}: {err}");
            Error::BuildFailed(err)
        })?;
        self.transport
            .send(
                handle,
                self.conf.server(),
                self.conf.port(),
                query.as_slice(),
            )
            .map_err(|err| {
                warn!("Failed to send query: {err:?}");
                Error::SendFailed
            })?;
        debug!(
            "Sent query {} for {host} to {}:{}",
            self.request_id,
            self.conf.server(),
            self.conf.port()
        );

        let mut attempt = 1;
        loop {
            match self.wait_for_reply(handle) {
                Err(Error::TimedOut) if attempt < self.conf.attempts() => {
                    debug!("No reply after wait {attempt}, waiting again");
                    attempt += 1;
                }
                res => return res,
            }
        }
    }

    /// Waits once for a reply and decodes it.
    fn wait_for_reply(
        &mut self,
        handle: T::Handle,
    ) -> Result<Ipv4Addr, Error> {
        let start = self.clock.now();
        loop {
            if self.transport.data_available(handle) {
                return reply::read_reply(
                    &mut self.transport,
                    handle,
                    &self.conf,
                    self.request_id,
                );
            }
            if start.elapsed() >= self.conf.timeout() {
                warn!(
                    "Timeout waiting for reply to query {}",
                    self.request_id
                );
                return Err(Error::TimedOut);
            }
            self.clock.sleep(self.conf.poll_interval());
        }
    }

    /// Returns the message ID for the next query.
    #[cfg(feature = "rand")]
    fn next_id(&self) -> u16 {
        ::rand::random()
    }

    /// Returns the message ID for the next query.
    #[cfg(not(feature = "rand"))]
    fn next_id(&self) -> u16 {
        self.clock.millis() as u16
    }
}
