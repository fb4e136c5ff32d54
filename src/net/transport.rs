//! The transports the protocol engines run over.
//!
//! Neither engine opens sockets itself. The HTTP client drives a
//! [`StreamTransport`], a reliable byte stream that is read one octet at a
//! time. The stub resolver drives a [`DgramTransport`] which hands out
//! received datagrams through a read cursor rather than as owned buffers.
//!
//! All operations are non-blocking. Waiting is done by the engines by
//! polling `data_available` and sleeping via their
//! [`Clock`][super::clock::Clock].

use crate::base::net::Ipv4Addr;
use crate::base::wire::{Compose, Parse, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ StreamTransport -----------------------------------------------

/// A duplex byte stream.
pub trait StreamTransport {
    /// The error returned when a connection cannot be opened.
    type Error: fmt::Debug;

    /// Opens a connection to `server` on `port`.
    ///
    /// The server may be given as a host name or as an address literal. It
    /// is up to the transport to resolve it.
    fn open(&mut self, server: &str, port: u16) -> Result<(), Self::Error>;

    /// Writes data to the stream.
    fn write(&mut self, data: &[u8]);

    /// Returns the next octet if one is ready.
    fn read_byte(&mut self) -> Option<u8>;

    /// Returns whether at least one octet is ready to be read.
    fn data_available(&mut self) -> bool;

    /// Closes the connection.
    fn close(&mut self);
}

impl<'a, T: StreamTransport + ?Sized> StreamTransport for &'a mut T {
    type Error = T::Error;

    fn open(&mut self, server: &str, port: u16) -> Result<(), Self::Error> {
        (**self).open(server, port)
    }

    fn write(&mut self, data: &[u8]) {
        (**self).write(data)
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn data_available(&mut self) -> bool {
        (**self).data_available()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

//------------ DgramTransport ------------------------------------------------

/// A datagram transport with a limited number of endpoints.
///
/// Received datagrams are queued per endpoint in a receive region. Each
/// datagram in the region starts with a [`RecvInfo`] block followed by the
/// payload. The region is read through [`read_at`][Self::read_at] with
/// offsets relative to the read cursor and consumed by moving the cursor
/// forward via [`advance_read_cursor`][Self::advance_read_cursor].
pub trait DgramTransport {
    /// The type identifying an endpoint.
    type Handle: Copy + fmt::Debug;

    /// The error returned when sending fails.
    type Error: fmt::Debug;

    /// Opens an endpoint bound to an ephemeral local port.
    ///
    /// Returns `None` if no endpoint is available.
    fn open_ephemeral(&mut self) -> Option<Self::Handle>;

    /// Sends a datagram with `data` to `addr` and `port`.
    fn send(
        &mut self,
        handle: Self::Handle,
        addr: Ipv4Addr,
        port: u16,
        data: &[u8],
    ) -> Result<(), Self::Error>;

    /// Returns whether a datagram has been received.
    fn data_available(&mut self, handle: Self::Handle) -> bool;

    /// Copies data from the receive region into `buf`.
    ///
    /// Copying starts `offset` octets after the read cursor. Returns the
    /// number of octets copied, which is less than the length of `buf` if
    /// the region ends early.
    fn read_at(
        &mut self,
        handle: Self::Handle,
        offset: usize,
        buf: &mut [u8],
    ) -> usize;

    /// Moves the read cursor forward by `len` octets.
    fn advance_read_cursor(&mut self, handle: Self::Handle, len: usize);

    /// Closes the endpoint, discarding anything left in its region.
    fn close(&mut self, handle: Self::Handle);
}

impl<'a, T: DgramTransport + ?Sized> DgramTransport for &'a mut T {
    type Handle = T::Handle;
    type Error = T::Error;

    fn open_ephemeral(&mut self) -> Option<Self::Handle> {
        (**self).open_ephemeral()
    }

    fn send(
        &mut self,
        handle: Self::Handle,
        addr: Ipv4Addr,
        port: u16,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        (**self).send(handle, addr, port, data)
    }

    fn data_available(&mut self, handle: Self::Handle) -> bool {
        (**self).data_available(handle)
    }

    fn read_at(
        &mut self,
        handle: Self::Handle,
        offset: usize,
        buf: &mut [u8],
    ) -> usize {
        (**self).read_at(handle, offset, buf)
    }

    fn advance_read_cursor(&mut self, handle: Self::Handle, len: usize) {
        (**self).advance_read_cursor(handle, len)
    }

    fn close(&mut self, handle: Self::Handle) {
        (**self).close(handle)
    }
}

//------------ RecvInfo ------------------------------------------------------

/// The information block preceding each received datagram.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecvInfo {
    /// The source address of the datagram.
    pub source: Ipv4Addr,

    /// The source port of the datagram.
    pub port: u16,

    /// The length of the payload following the block.
    pub len: u16,
}

impl RecvInfo {
    /// The length of the block in octets.
    pub const LEN: usize = 8;

    /// Parses the block from its wire format.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        Ok(RecvInfo {
            source: Ipv4Addr::parse(parser)?,
            port: u16::parse(parser)?,
            len: u16::parse(parser)?,
        })
    }

    /// Appends the wire format of the block to `target`.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.source.octets())?;
        self.port.compose(target)?;
        self.len.compose(target)
    }
}

//============ Test ==========================================================
