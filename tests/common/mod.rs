//! In-memory transports for driving the protocol engines in tests.
//!
//! Both mocks take their notion of time from a shared [`FakeClock`]. Data
//! scheduled for a point in time only becomes visible once the engine under
//! test has slept long enough.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;
use std::vec::Vec;

use tinynet::base::net::Ipv4Addr;
use tinynet::net::clock::FakeClock;
use tinynet::net::transport::{DgramTransport, RecvInfo, StreamTransport};
use tracing_subscriber::EnvFilter;

/// Sets up logging of the events reported by the engines.
///
/// Use the RUST_LOG environment variable to enable it, e.g. RUST_LOG=trace.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

//------------ MockStream ----------------------------------------------------

/// A byte stream replaying a scripted response.
#[derive(Debug)]
pub struct MockStream {
    clock: FakeClock,

    /// Chunks of the response with the time they arrive at.
    script: VecDeque<(Duration, Vec<u8>)>,

    /// Octets that have arrived but haven’t been read.
    incoming: VecDeque<u8>,

    /// Everything written by the client.
    pub written: Vec<u8>,

    /// Whether `open` should succeed.
    pub accept: bool,

    pub open_calls: usize,
    pub close_calls: usize,
}

impl MockStream {
    pub fn new(clock: &FakeClock) -> Self {
        MockStream {
            clock: clock.clone(),
            script: VecDeque::new(),
            incoming: VecDeque::new(),
            written: Vec::new(),
            accept: true,
            open_calls: 0,
            close_calls: 0,
        }
    }

    /// Creates a stream that has `data` ready right away.
    pub fn with_response(clock: &FakeClock, data: &[u8]) -> Self {
        let mut res = Self::new(clock);
        res.push_at(Duration::ZERO, data);
        res
    }

    /// Schedules `data` to arrive at `at`.
    pub fn push_at(&mut self, at: Duration, data: &[u8]) {
        self.script.push_back((at, data.into()));
    }

    pub fn written_str(&self) -> &str {
        std::str::from_utf8(&self.written).unwrap()
    }

    fn deliver(&mut self) {
        let now = self.clock.curr_time();
        while let Some((at, _)) = self.script.front() {
            if *at > now {
                break;
            }
            if let Some((_, data)) = self.script.pop_front() {
                self.incoming.extend(data);
            }
        }
    }
}

impl StreamTransport for MockStream {
    type Error = &'static str;

    fn open(&mut self, _server: &str, _port: u16) -> Result<(), Self::Error> {
        self.open_calls += 1;
        if self.accept {
            Ok(())
        } else {
            Err("connection refused")
        }
    }

    fn write(&mut self, data: &[u8]) {
        self.written.extend_from_slice(data)
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.deliver();
        self.incoming.pop_front()
    }

    fn data_available(&mut self) -> bool {
        self.deliver();
        !self.incoming.is_empty()
    }

    fn close(&mut self) {
        self.close_calls += 1;
    }
}

//------------ MockDgram -----------------------------------------------------

/// Produces the receive region content for a query with the given ID.
pub type Responder = Box<dyn FnMut(u16) -> Vec<u8>>;

/// A datagram transport with a single endpoint.
pub struct MockDgram {
    clock: FakeClock,

    /// How many endpoints can be opened.
    pub endpoints: usize,

    /// Whether sending succeeds.
    pub send_ok: bool,

    /// Creates the reply when a query is sent.
    responder: Option<Responder>,

    /// How long after the query the reply arrives.
    pub delay: Duration,

    /// The receive region and the time it becomes visible.
    region: Vec<u8>,
    ready_at: Duration,

    pub opened: Vec<u8>,
    pub closed: Vec<u8>,
    pub sent: Vec<(Ipv4Addr, u16, Vec<u8>)>,
}

impl MockDgram {
    pub fn new(clock: &FakeClock) -> Self {
        MockDgram {
            clock: clock.clone(),
            endpoints: 1,
            send_ok: true,
            responder: None,
            delay: Duration::ZERO,
            region: Vec::new(),
            ready_at: Duration::ZERO,
            opened: Vec::new(),
            closed: Vec::new(),
            sent: Vec::new(),
        }
    }

    /// Creates a transport answering each query via `responder`.
    pub fn with_responder(
        clock: &FakeClock,
        responder: impl FnMut(u16) -> Vec<u8> + 'static,
    ) -> Self {
        let mut res = Self::new(clock);
        res.responder = Some(Box::new(responder));
        res
    }

    /// Returns what is left in the receive region.
    pub fn region(&self) -> &[u8] {
        &self.region
    }

    /// Returns whether every endpoint opened has been closed again.
    pub fn all_closed(&self) -> bool {
        self.opened == self.closed
    }
}

impl DgramTransport for MockDgram {
    type Handle = u8;
    type Error = &'static str;

    fn open_ephemeral(&mut self) -> Option<u8> {
        if self.opened.len() - self.closed.len() >= self.endpoints {
            return None;
        }
        let handle = self.opened.len() as u8;
        self.opened.push(handle);
        Some(handle)
    }

    fn send(
        &mut self,
        handle: u8,
        addr: Ipv4Addr,
        port: u16,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        assert!(!self.closed.contains(&handle));
        if !self.send_ok {
            return Err("send failed");
        }
        self.sent.push((addr, port, data.into()));
        if let Some(responder) = self.responder.as_mut() {
            let id = u16::from_be_bytes([data[0], data[1]]);
            self.region.extend(responder(id));
            self.ready_at = self.clock.curr_time() + self.delay;
        }
        Ok(())
    }

    fn data_available(&mut self, _handle: u8) -> bool {
        self.clock.curr_time() >= self.ready_at && !self.region.is_empty()
    }

    fn read_at(&mut self, _handle: u8, offset: usize, buf: &mut [u8]) -> usize {
        let start = offset.min(self.region.len());
        let end = (offset + buf.len()).min(self.region.len());
        buf[..end - start].copy_from_slice(&self.region[start..end]);
        end - start
    }

    fn advance_read_cursor(&mut self, _handle: u8, len: usize) {
        let len = len.min(self.region.len());
        self.region.drain(..len);
    }

    fn close(&mut self, handle: u8) {
        self.closed.push(handle);
    }
}

//------------ Building replies ----------------------------------------------

/// The address of the server used in the resolver tests.
pub const SERVER: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 53);

/// Wraps a payload into a receive region entry.
pub fn datagram(source: Ipv4Addr, port: u16, payload: &[u8]) -> Vec<u8> {
    let mut res = Vec::new();
    RecvInfo {
        source,
        port,
        len: payload.len() as u16,
    }
    .compose(&mut res)
    .unwrap();
    res.extend_from_slice(payload);
    res
}

/// A DNS reply under construction.
#[derive(Clone, Debug)]
pub struct Reply {
    id: u16,
    flags: u16,
    qdcount: u16,
    ancount: Option<u16>,
    questions: Vec<u8>,
    answers: Vec<u8>,
    answer_count: u16,
}

impl Reply {
    /// A NOERROR response to a question for example.com IN A.
    pub fn to(id: u16) -> Self {
        Reply {
            id,
            flags: 0x8180,
            qdcount: 1,
            ancount: None,
            questions: b"\x07example\x03com\x00\x00\x01\x00\x01".to_vec(),
            answers: Vec::new(),
            answer_count: 0,
        }
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    /// Overrides the ANCOUNT field.
    pub fn ancount(mut self, ancount: u16) -> Self {
        self.ancount = Some(ancount);
        self
    }

    /// Adds an answer with an owner of `name` in wire format.
    pub fn answer(
        mut self,
        name: &[u8],
        rtype: u16,
        class: u16,
        rdata: &[u8],
    ) -> Self {
        self.answers.extend_from_slice(name);
        self.answers.extend_from_slice(&rtype.to_be_bytes());
        self.answers.extend_from_slice(&class.to_be_bytes());
        self.answers.extend_from_slice(&3600u32.to_be_bytes());
        self.answers
            .extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.answers.extend_from_slice(rdata);
        self.answer_count += 1;
        self
    }

    /// Adds an A record for the question name via a compression pointer.
    pub fn a(self, addr: [u8; 4]) -> Self {
        self.answer(b"\xc0\x0c", 1, 1, &addr)
    }

    pub fn payload(&self) -> Vec<u8> {
        let mut res = Vec::new();
        res.extend_from_slice(&self.id.to_be_bytes());
        res.extend_from_slice(&self.flags.to_be_bytes());
        res.extend_from_slice(&self.qdcount.to_be_bytes());
        res.extend_from_slice(
            &self.ancount.unwrap_or(self.answer_count).to_be_bytes(),
        );
        res.extend_from_slice(&[0, 0, 0, 0]);
        res.extend_from_slice(&self.questions);
        res.extend_from_slice(&self.answers);
        res
    }

    /// Returns the reply as coming from the server.
    pub fn from_server(&self) -> Vec<u8> {
        datagram(SERVER, 53, &self.payload())
    }
}
