//! Decoding the reply.
//!
//! The reply is never copied out of the transport as a whole. Instead, a
//! [`DgramReader`] walks the receive region with a cursor bounded by the
//! datagram length and copies out only the handful of fixed size pieces
//! that need looking at: the header, the fixed part of each answer, and
//! the address itself. Everything else is skipped.
//!
//! Whatever the outcome, the complete datagram is consumed from the
//! receive region afterwards so that the next read starts at the next
//! datagram.

use super::conf::ResolvConf;
use super::error::{Error, InvalidResponse};
use crate::base::header::HeaderSection;
use crate::base::iana::{Class, Rcode, Rtype};
use crate::base::name::skip_name;
use crate::base::net::Ipv4Addr;
use crate::base::wire::{ByteSource, Parse, ParseError};
use crate::net::transport::{DgramTransport, RecvInfo};
use octseq::parse::Parser;
use tracing::{debug, trace, warn};

//------------ read_reply ----------------------------------------------------

/// Reads the next datagram from `handle` as a reply to the query `id`.
///
/// Returns the address of the first A record in the answer section.
pub fn read_reply<T: DgramTransport>(
    transport: &mut T,
    handle: T::Handle,
    conf: &ResolvConf,
    id: u16,
) -> Result<Ipv4Addr, Error> {
    let mut info = [0u8; RecvInfo::LEN];
    let read = transport.read_at(handle, 0, &mut info);
    if read < info.len() {
        warn!("Short datagram info block");
        transport.advance_read_cursor(handle, read);
        return Err(InvalidResponse::Malformed.into());
    }
    let info = RecvInfo::parse(&mut Parser::from_ref(info.as_ref()))
        .map_err(|_| InvalidResponse::Malformed)?;
    trace!(
        "Received {} octets from {}:{}",
        info.len,
        info.source,
        info.port
    );

    let mut reader = DgramReader::new(transport, handle, info.len);
    let res = check_source(&info, conf)
        .and_then(|()| decode_reply(&mut reader, id));
    reader.consume();
    res
}

fn check_source(info: &RecvInfo, conf: &ResolvConf) -> Result<(), Error> {
    if info.source != conf.server() || info.port != conf.port() {
        warn!(
            "Reply from {}:{}, expected {}:{}",
            info.source,
            info.port,
            conf.server(),
            conf.port()
        );
        return Err(Error::WrongServer);
    }
    Ok(())
}

fn decode_reply<T: DgramTransport>(
    reader: &mut DgramReader<'_, T>,
    id: u16,
) -> Result<Ipv4Addr, Error> {
    if reader.remaining() < HeaderSection::LEN {
        warn!("Reply shorter than a DNS header");
        return Err(Error::Truncated);
    }
    let mut buf = [0u8; HeaderSection::LEN];
    reader.read_exact(&mut buf).map_err(malformed)?;
    let section = HeaderSection::parse(&mut Parser::from_ref(buf.as_ref()))
        .map_err(malformed)?;
    check_header(&section, id)?;

    for _ in 0..section.counts().qdcount() {
        skip_name(reader).map_err(malformed)?;
        reader.skip(4).map_err(malformed)?;
    }

    for _ in 0..section.counts().ancount() {
        skip_name(reader).map_err(malformed)?;
        let mut fixed = [0u8; 10];
        reader.read_exact(&mut fixed).map_err(malformed)?;
        let mut parser = Parser::from_ref(fixed.as_ref());
        let rtype = Rtype::parse(&mut parser).map_err(malformed)?;
        let class = Class::parse(&mut parser).map_err(malformed)?;
        u32::skip(&mut parser).map_err(malformed)?;
        let rdlen = u16::parse(&mut parser).map_err(malformed)?;

        if rtype == Rtype::A && class == Class::IN {
            if rdlen != 4 {
                warn!("A record with {rdlen} octets of data");
                return Err(InvalidResponse::BadRdataLength.into());
            }
            let mut octets = [0u8; 4];
            reader.read_exact(&mut octets).map_err(malformed)?;
            let addr = Ipv4Addr::from(octets);
            debug!("Found address {addr}");
            return Ok(addr);
        }
        trace!("Skipping {rtype} {class} record");
        reader.skip(rdlen.into()).map_err(malformed)?;
    }

    warn!("No A record in answer section");
    Err(InvalidResponse::NoAddressRecord.into())
}

fn check_header(section: &HeaderSection, id: u16) -> Result<(), Error> {
    let header = section.header();
    if header.id() != id {
        warn!("Reply ID {} does not match query ID {id}", header.id());
        return Err(InvalidResponse::IdMismatch.into());
    }
    if !header.qr() {
        warn!("Reply is not a response");
        return Err(InvalidResponse::NotAResponse.into());
    }
    if header.tc() {
        warn!("Reply is truncated");
        return Err(InvalidResponse::TruncatedFlag.into());
    }
    if header.rcode() != Rcode::NOERROR {
        warn!("Reply has response code {}", header.rcode());
        return Err(InvalidResponse::Rcode(header.rcode()).into());
    }
    if section.counts().ancount() == 0 {
        warn!("Reply has no answers");
        return Err(InvalidResponse::NoAnswers.into());
    }
    Ok(())
}

fn malformed(err: ParseError) -> Error {
    warn!("Malformed reply: {err}");
    InvalidResponse::Malformed.into()
}

//------------ DgramReader ---------------------------------------------------

/// A cursor over one datagram in a transport’s receive region.
///
/// The cursor never moves past the end of the datagram as given by its
/// info block, regardless of what the transport holds beyond it.
pub struct DgramReader<'a, T: DgramTransport> {
    /// The transport holding the datagram.
    transport: &'a mut T,

    /// The endpoint the datagram was received on.
    handle: T::Handle,

    /// The current position relative to the read cursor.
    pos: usize,

    /// The end of the datagram relative to the read cursor.
    end: usize,
}

impl<'a, T: DgramTransport> DgramReader<'a, T> {
    /// Creates a reader for a payload of `len` octets.
    ///
    /// The read cursor of the transport must point to the info block of
    /// the datagram.
    pub fn new(transport: &'a mut T, handle: T::Handle, len: u16) -> Self {
        DgramReader {
            transport,
            handle,
            pos: RecvInfo::LEN,
            end: RecvInfo::LEN + usize::from(len),
        }
    }

    /// Returns the number of payload octets left.
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Fills `buf` from the datagram.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ParseError> {
        if buf.len() > self.remaining() {
            return Err(ParseError::ShortInput);
        }
        let read = self.transport.read_at(self.handle, self.pos, buf);
        if read < buf.len() {
            return Err(ParseError::ShortInput);
        }
        self.pos += read;
        Ok(())
    }

    /// Consumes the complete datagram from the receive region.
    pub fn consume(self) {
        self.transport.advance_read_cursor(self.handle, self.end)
    }
}

impl<'a, T: DgramTransport> ByteSource for DgramReader<'a, T> {
    fn take_u8(&mut self) -> Result<u8, ParseError> {
        let mut buf = [0u8];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn skip(&mut self, len: usize) -> Result<(), ParseError> {
        if len > self.remaining() {
            return Err(ParseError::ShortInput);
        }
        self.pos += len;
        Ok(())
    }
}
