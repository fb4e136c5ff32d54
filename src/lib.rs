//! Small network protocol engines for constrained devices.
//!
//! This crate provides two protocol engines meant for clients that have
//! little memory and talk to the network through a simple, externally
//! provided transport: an HTTP/1.0 client and a DNS stub resolver for IPv4
//! addresses. Both process their input incrementally with fixed size
//! buffers, never allocate, and bound every wait for data by a timeout.
//!
//! # Modules
//!
//! * [base] contains the wire-format building blocks for DNS messages,
//! * [http] contains the HTTP client,
//! * [net] contains the transport and clock traits the engines run on,
//! * [resolv] contains the stub resolver, and
//! * [utils] contains helpers such as the Base 64 encoder.
//!
//!
//! # Reference of Feature Flags
//!
//! The following is the complete list of the feature flags available.
//!
//! * `rand`: Draws DNS message IDs from the
//!   [rand](https://github.com/rust-random/rand) crate instead of deriving
//!   them from the clock. This requires the `std` feature.
//! * `serde`: Enables serde serialization for the configuration types.
//!   This requires the `std` feature.
//! * `std`: support for the Rust std library. This provides the system
//!   and fake clocks as well as implementations of `std::error::Error`.
//!   This feature is enabled by default.

#![no_std]
#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(any(feature = "std"))]
#[allow(unused_imports)] // Import macros even if unused.
#[macro_use]
extern crate std;

#[macro_use]
extern crate core;

pub mod base;
pub mod http;
pub mod net;
pub mod resolv;
pub mod utils;
