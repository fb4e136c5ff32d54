//! The collaborators the protocol engines depend on.
//!
//! This module provides the traits through which the engines reach the
//! outside world: [`transport`] for moving data and [`clock`] for
//! measuring and spending time.

pub mod clock;
pub mod transport;
