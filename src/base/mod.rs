//! Basics.
//!
//! This module provides the wire-format building blocks the protocol
//! engines of the crate are made from.
//!
//! Both parsing and composing work on the octet sequence types of the
//! [octseq] crate. Composing appends to anything implementing
//! [`OctetsBuilder`][octseq::builder::OctetsBuilder], typically a fixed
//! size [`Array`][octseq::array::Array] kept on the stack. Parsing either
//! uses a [`Parser`][octseq::parse::Parser] atop a complete buffer or walks
//! a [`ByteSource`][wire::ByteSource] that hands out data as it arrives.
//!
//! The submodules are:
//!
//! * [header] for the header section of DNS messages,
//! * [iana] for the IANA-registered values used in DNS messages,
//! * [name] for encoding host names and skipping over domain names,
//! * [net] for IPv4 addresses and address literals, and
//! * [wire] for the basic parsing and composing traits and errors.

pub use self::header::{Header, HeaderCounts, HeaderSection};
pub use self::iana::{Class, Opcode, Rcode, Rtype};
pub use self::name::NameError;
pub use self::wire::{ByteSource, Compose, FormError, Parse, ParseError};

pub mod header;
pub mod iana;
pub mod name;
pub mod net;
pub mod wire;
