//! Various utility modules.

pub mod base64;
pub mod config;
