//! Building the query message.

use crate::base::header::HeaderSection;
use crate::base::iana::{Class, Opcode, Rtype};
use crate::base::name::{compose_name, NameError};
use octseq::array::Array;

/// The largest message that is sent over UDP without EDNS.
pub const MAX_QUERY_LEN: usize = 512;

//------------ Query ---------------------------------------------------------

/// A query for the IPv4 addresses of a host.
///
/// The message is composed into a fixed size buffer. It has a single
/// question for the A records of the host in class IN and asks for
/// recursion.
pub struct Query {
    /// The wire format of the message.
    buf: Array<MAX_QUERY_LEN>,
}

impl Query {
    /// Builds a query with message ID `id` for `host`.
    pub fn new(id: u16, host: &str) -> Result<Self, NameError> {
        let mut section = HeaderSection::new();
        section.header_mut().set_id(id);
        section.header_mut().set_opcode(Opcode::QUERY);
        section.header_mut().set_rd(true);
        section.counts_mut().set_qdcount(1);

        let mut buf = Array::new();
        section.compose(&mut buf)?;
        compose_name(host, &mut buf)?;
        Rtype::A.compose(&mut buf)?;
        Class::IN.compose(&mut buf)?;
        Ok(Query { buf })
    }

    /// Returns the wire format of the message.
    pub fn as_slice(&self) -> &[u8] {
        self.buf.as_ref()
    }
}

//============ Test ==========================================================
