//! Resolving host names.
//!
//! Currently, the module only provides a minimal [stub] resolver that asks
//! a single configured server for the IPv4 address of a host.

pub mod stub;
