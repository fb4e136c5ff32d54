//! IANA Definitions for DNS.
//!
//! This module contains types for the parameters defined in IANA registries
//! that the stub resolver needs to look at. Each type wraps the raw integer
//! value and provides associated constants for the well-known values, so
//! values without a constant still round-trip unchanged.
//!
//! There are two methods `from_int()` and `to_int()` to convert from and
//! to raw integer values as well as implementations of the `From` trait
//! for these. Types also implement `parse()` and `compose()` for reading
//! from and writing to wire format.

pub use self::class::Class;
pub use self::opcode::Opcode;
pub use self::rcode::Rcode;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod opcode;
pub mod rcode;
pub mod rtype;
