mod common;

use std::time::Duration;

use common::{datagram, init_logging, MockDgram, Reply, SERVER};
use rstest::rstest;
use tinynet::base::iana::Rcode;
use tinynet::base::name::NameError;
use tinynet::base::net::Ipv4Addr;
use tinynet::net::clock::FakeClock;
use tinynet::resolv::stub::conf::ResolvConf;
use tinynet::resolv::stub::{Error, InvalidResponse, StubResolver};

const EXAMPLE_ADDR: [u8; 4] = [93, 184, 216, 34];

fn resolve_with(
    clock: &FakeClock,
    transport: &mut MockDgram,
    host: &str,
) -> Result<Ipv4Addr, Error> {
    init_logging();
    let mut resolver = StubResolver::new(
        transport,
        clock.clone(),
        ResolvConf::new(SERVER),
    );
    resolver.resolve(host)
}

/// Resolves example.com against a server answering with `reply`.
fn resolve_reply(
    reply: impl Fn(u16) -> Vec<u8> + 'static,
) -> (Result<Ipv4Addr, Error>, MockDgram) {
    let clock = FakeClock::new();
    let mut transport = MockDgram::with_responder(&clock, reply);
    let res = resolve_with(&clock, &mut transport, "example.com");
    (res, transport)
}

//------------ Address literals ----------------------------------------------

#[rstest]
#[case("192.168.1.1", [192, 168, 1, 1])]
#[case("10.1", [10, 1, 0, 0])]
fn literal_without_traffic(#[case] host: &str, #[case] addr: [u8; 4]) {
    let clock = FakeClock::new();
    let mut transport = MockDgram::new(&clock);
    assert_eq!(
        resolve_with(&clock, &mut transport, host),
        Ok(Ipv4Addr::from(addr))
    );
    assert!(transport.opened.is_empty());
    assert!(transport.sent.is_empty());
}

#[rstest]
#[case("192.168.1.999")]
#[case("1.2.3.4.5")]
#[case("1..2")]
fn bad_literal_not_forwarded(#[case] host: &str) {
    let clock = FakeClock::new();
    let mut transport = MockDgram::new(&clock);
    assert_eq!(
        resolve_with(&clock, &mut transport, host),
        Err(Error::BadAddress)
    );
    assert!(transport.opened.is_empty());
    assert!(transport.sent.is_empty());
}

//------------ Queries -------------------------------------------------------

#[test]
fn query_encoding() {
    let clock = FakeClock::new();
    let mut transport = MockDgram::new(&clock);
    let mut resolver = StubResolver::new(
        &mut transport,
        clock.clone(),
        ResolvConf::new(SERVER),
    );
    assert_eq!(resolver.resolve("example.com"), Err(Error::TimedOut));
    let id = resolver.request_id();
    drop(resolver);

    assert_eq!(transport.sent.len(), 1);
    let (addr, port, query) = &transport.sent[0];
    assert_eq!(*addr, SERVER);
    assert_eq!(*port, 53);
    let mut expected = id.to_be_bytes().to_vec();
    expected.extend_from_slice(
        b"\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
          \x07example\x03com\x00\x00\x01\x00\x01",
    );
    assert_eq!(query, &expected);
}

#[test]
fn bad_host_name() {
    let clock = FakeClock::new();
    let mut transport = MockDgram::new(&clock);
    let long = format!("{}.example.com", "a".repeat(64));
    assert_eq!(
        resolve_with(&clock, &mut transport, &long),
        Err(Error::BuildFailed(NameError::LongLabel))
    );
    assert!(transport.sent.is_empty());
    assert_eq!(transport.opened.len(), 1);
    assert!(transport.all_closed());
}

#[test]
fn no_socket_available() {
    let clock = FakeClock::new();
    let mut transport = MockDgram::new(&clock);
    transport.endpoints = 0;
    assert_eq!(
        resolve_with(&clock, &mut transport, "example.com"),
        Err(Error::NoSocketAvailable)
    );
    assert!(transport.sent.is_empty());
}

#[test]
fn send_failed() {
    let clock = FakeClock::new();
    let mut transport = MockDgram::new(&clock);
    transport.send_ok = false;
    assert_eq!(
        resolve_with(&clock, &mut transport, "example.com"),
        Err(Error::SendFailed)
    );
    assert!(transport.all_closed());
}

//------------ Successful replies --------------------------------------------

#[test]
fn single_answer() {
    let (res, transport) =
        resolve_reply(|id| Reply::to(id).a(EXAMPLE_ADDR).from_server());
    assert_eq!(res, Ok(Ipv4Addr::new(93, 184, 216, 34)));
    assert_eq!(transport.opened.len(), 1);
    assert!(transport.all_closed());
    assert!(transport.region().is_empty());
}

#[test]
fn uncompressed_owner() {
    let (res, _) = resolve_reply(|id| {
        Reply::to(id)
            .answer(b"\x07example\x03com\x00", 1, 1, &EXAMPLE_ADDR)
            .from_server()
    });
    assert_eq!(res, Ok(Ipv4Addr::from(EXAMPLE_ADDR)));
}

#[test]
fn pointer_not_followed() {
    // The pointer target lies far outside the message.
    let (res, transport) = resolve_reply(|id| {
        Reply::to(id)
            .answer(b"\xff\xff", 1, 1, &[1, 2, 3, 4])
            .from_server()
    });
    assert_eq!(res, Ok(Ipv4Addr::new(1, 2, 3, 4)));
    assert!(transport.region().is_empty());
}

#[test]
fn skips_other_records() {
    let (res, _) = resolve_reply(|id| {
        Reply::to(id)
            // CNAME www.example.com.
            .answer(b"\xc0\x0c", 5, 1, b"\x03www\xc0\x0c")
            // An A record in class CH.
            .answer(b"\x03www\xc0\x0c", 1, 3, &[10, 0, 0, 1])
            .answer(b"\x03www\xc0\x0c", 1, 1, &EXAMPLE_ADDR)
            .a([192, 0, 2, 1])
            .from_server()
    });
    assert_eq!(res, Ok(Ipv4Addr::from(EXAMPLE_ADDR)));
}

#[test]
fn only_current_datagram_consumed() {
    let (res, transport) = resolve_reply(|id| {
        let mut region = Reply::to(id).a(EXAMPLE_ADDR).from_server();
        region.extend(Reply::to(id).a([192, 0, 2, 1]).from_server());
        region
    });
    assert_eq!(res, Ok(Ipv4Addr::from(EXAMPLE_ADDR)));
    assert_eq!(transport.region().len(), 8 + 12 + 17 + 16);
}

//------------ Rejected replies ----------------------------------------------

#[rstest]
#[case::wrong_port(|id: u16| {
    datagram(SERVER, 5353, &Reply::to(id).a(EXAMPLE_ADDR).payload())
})]
#[case::wrong_addr(|id: u16| {
    let source = Ipv4Addr::new(192, 0, 2, 1);
    datagram(source, 53, &Reply::to(id).a(EXAMPLE_ADDR).payload())
})]
fn wrong_server(#[case] reply: fn(u16) -> Vec<u8>) {
    let (res, transport) = resolve_reply(reply);
    assert_eq!(res, Err(Error::WrongServer));
    assert!(transport.all_closed());
    assert!(transport.region().is_empty());
}

#[test]
fn short_payload_is_truncated() {
    let (res, transport) = resolve_reply(|id| {
        datagram(SERVER, 53, &Reply::to(id).payload()[..11])
    });
    assert_eq!(res, Err(Error::Truncated));
    assert!(transport.region().is_empty());
}

#[rstest]
#[case::wrong_id(
    |id: u16| Reply::to(id.wrapping_add(1)).a(EXAMPLE_ADDR).from_server(),
    InvalidResponse::IdMismatch
)]
#[case::query(
    |id: u16| Reply::to(id).flags(0x0100).a(EXAMPLE_ADDR).from_server(),
    InvalidResponse::NotAResponse
)]
#[case::tc_bit(
    |id: u16| Reply::to(id).flags(0x8380).a(EXAMPLE_ADDR).from_server(),
    InvalidResponse::TruncatedFlag
)]
#[case::nxdomain(
    |id: u16| Reply::to(id).flags(0x8183).from_server(),
    InvalidResponse::Rcode(Rcode::NXDOMAIN)
)]
#[case::no_answers(
    |id: u16| Reply::to(id).from_server(),
    InvalidResponse::NoAnswers
)]
#[case::bad_rdlen(
    |id: u16| Reply::to(id).answer(b"\xc0\x0c", 1, 1, &[1, 2, 3, 4, 5]).from_server(),
    InvalidResponse::BadRdataLength
)]
#[case::no_address(
    |id: u16| Reply::to(id).answer(b"\xc0\x0c", 5, 1, b"\x03www\xc0\x0c").from_server(),
    InvalidResponse::NoAddressRecord
)]
#[case::missing_answer(
    |id: u16| {
        Reply::to(id)
            .ancount(2)
            .answer(b"\xc0\x0c", 5, 1, b"\x03www\xc0\x0c")
            .from_server()
    },
    InvalidResponse::Malformed
)]
#[case::reserved_label(
    |id: u16| Reply::to(id).answer(b"\x40\x00", 1, 1, &EXAMPLE_ADDR).from_server(),
    InvalidResponse::Malformed
)]
#[case::rdata_beyond_end(
    |id: u16| {
        let mut payload = Reply::to(id)
            .answer(b"\xc0\x0c", 5, 1, b"\x03www\xc0\x0c")
            .payload();
        payload.truncate(payload.len() - 2);
        datagram(SERVER, 53, &payload)
    },
    InvalidResponse::Malformed
)]
fn invalid_response(
    #[case] reply: fn(u16) -> Vec<u8>,
    #[case] reason: InvalidResponse,
) {
    let (res, transport) = resolve_reply(reply);
    assert_eq!(res, Err(Error::InvalidResponse(reason)));
    assert!(transport.all_closed());
    assert!(transport.region().is_empty());
}

#[test]
fn invalid_response_not_retried() {
    let clock = FakeClock::new();
    let mut transport = MockDgram::with_responder(&clock, |id| {
        let mut region = Reply::to(id.wrapping_add(1)).from_server();
        region.extend(Reply::to(id).a(EXAMPLE_ADDR).from_server());
        region
    });
    assert_eq!(
        resolve_with(&clock, &mut transport, "example.com"),
        Err(Error::InvalidResponse(InvalidResponse::IdMismatch))
    );
    // The second datagram is still there, the first one is gone.
    assert_eq!(transport.region().len(), 8 + 12 + 17 + 16);
}

//------------ Timeouts ------------------------------------------------------

#[test]
fn times_out_after_three_waits() {
    let clock = FakeClock::new();
    let mut transport = MockDgram::new(&clock);
    assert_eq!(
        resolve_with(&clock, &mut transport, "example.com"),
        Err(Error::TimedOut)
    );
    assert_eq!(transport.sent.len(), 1);
    assert!(transport.all_closed());
    let elapsed = clock.curr_time();
    assert!(elapsed >= Duration::from_secs(15));
    assert!(elapsed <= Duration::from_millis(15_030));
}

#[test]
fn late_reply_caught_by_later_wait() {
    let clock = FakeClock::new();
    let mut transport = MockDgram::with_responder(&clock, |id| {
        Reply::to(id).a(EXAMPLE_ADDR).from_server()
    });
    transport.delay = Duration::from_secs(12);
    assert_eq!(
        resolve_with(&clock, &mut transport, "example.com"),
        Ok(Ipv4Addr::from(EXAMPLE_ADDR))
    );
    assert_eq!(transport.sent.len(), 1);
    assert!(clock.curr_time() >= Duration::from_secs(12));
    assert!(clock.curr_time() < Duration::from_secs(15));
}

#[test]
fn custom_attempts() {
    let clock = FakeClock::new();
    let mut transport = MockDgram::new(&clock);
    let mut conf = ResolvConf::new(SERVER);
    conf.set_attempts(1);
    conf.set_timeout(Duration::from_secs(2));
    conf.set_poll_interval(Duration::from_millis(100));
    let mut resolver = StubResolver::new(&mut transport, clock.clone(), conf);
    assert_eq!(resolver.resolve("example.com"), Err(Error::TimedOut));
    assert_eq!(clock.curr_time(), Duration::from_secs(2));
}

#[test]
fn begin_switches_server() {
    let clock = FakeClock::new();
    let other = Ipv4Addr::new(198, 51, 100, 53);
    let mut transport = MockDgram::with_responder(&clock, move |id| {
        datagram(other, 53, &Reply::to(id).a(EXAMPLE_ADDR).payload())
    });
    let mut resolver = StubResolver::new(
        &mut transport,
        clock.clone(),
        ResolvConf::new(SERVER),
    );
    assert_eq!(resolver.resolve("example.com"), Err(Error::WrongServer));
    resolver.begin(other);
    assert_eq!(resolver.conf().server(), other);
    assert_eq!(
        resolver.resolve("example.com"),
        Ok(Ipv4Addr::from(EXAMPLE_ADDR))
    );
    drop(resolver);
    assert_eq!(transport.sent[1].0, other);
    assert!(transport.all_closed());
}
