//! Domain names in wire format.
//!
//! Only two things are ever done with names here: a host name given as a
//! dotted string is encoded into the uncompressed label sequence of a
//! question, and names inside a received message are skipped over. Neither
//! needs an owned name type, so the module works directly on strings and
//! on a [`ByteSource`].
//!
//! A name in wire format is a sequence of labels, each a length octet
//! followed by that many octets of content, ending with the empty root
//! label. Inside messages, a name can end in a compression pointer instead
//! which refers to the rest of the name elsewhere in the message.

use super::wire::{ByteSource, FormError, ParseError};
use core::fmt;
use octseq::builder::{OctetsBuilder, ShortBuf};

/// The maximum length of a single label in octets.
pub const MAX_LABEL_LEN: usize = 63;

/// The maximum length of a name in wire format in octets.
pub const MAX_NAME_LEN: usize = 255;

//------------ compose_name --------------------------------------------------

/// Appends the wire format of the dotted name `name` to `target`.
///
/// The name is split at dots. Empty labels, such as those produced by a
/// trailing dot or by consecutive dots, are dropped. The root label is
/// added at the end.
///
/// The name is checked in full before anything is appended, so on error
/// `target` only contains partial data if it ran out of space.
pub fn compose_name<Target: OctetsBuilder + ?Sized>(
    name: &str,
    target: &mut Target,
) -> Result<(), NameError> {
    let mut wire_len = 1;
    for label in labels(name) {
        if label.len() > MAX_LABEL_LEN {
            return Err(NameError::LongLabel);
        }
        wire_len += label.len() + 1;
    }
    if wire_len == 1 {
        return Err(NameError::EmptyName);
    }
    if wire_len > MAX_NAME_LEN {
        return Err(NameError::LongName);
    }
    for label in labels(name) {
        target
            .append_slice(&[label.len() as u8])
            .map_err(|_| NameError::ShortBuf)?;
        target
            .append_slice(label)
            .map_err(|_| NameError::ShortBuf)?;
    }
    target.append_slice(&[0]).map_err(|_| NameError::ShortBuf)
}

fn labels(name: &str) -> impl Iterator<Item = &[u8]> + '_ {
    name.as_bytes()
        .split(|&ch| ch == b'.')
        .filter(|label| !label.is_empty())
}

//------------ skip_name -----------------------------------------------------

/// Skips over a domain name at the beginning of `source`.
///
/// The walk ends at the root label or at a compression pointer. The pointer
/// is not followed: whatever comes after the name does not depend on what
/// the pointer refers to.
///
/// Fails if a label uses one of the reserved label types or if the
/// uncompressed part of the name is longer than 255 octets.
pub fn skip_name<Source: ByteSource + ?Sized>(
    source: &mut Source,
) -> Result<(), ParseError> {
    let mut len = 0;
    loop {
        match LabelType::parse(source)? {
            LabelType::Normal(0) => {
                len += 1;
                if len > MAX_NAME_LEN {
                    return Err(FormError::new("long domain name").into());
                }
                return Ok(());
            }
            LabelType::Normal(label_len) => {
                source.skip(label_len.into())?;
                len += usize::from(label_len) + 1;
                if len > MAX_NAME_LEN {
                    return Err(FormError::new("long domain name").into());
                }
            }
            LabelType::Compressed(_) => return Ok(()),
        }
    }
}

//------------ LabelType -----------------------------------------------------

/// The type of a label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelType {
    /// A normal label with its size in octets.
    Normal(u8),

    /// A compressed label with the position of where to continue.
    Compressed(u16),
}

impl LabelType {
    /// Attempts to take a label type from the beginning of `source`.
    pub fn parse<Source: ByteSource + ?Sized>(
        source: &mut Source,
    ) -> Result<Self, ParseError> {
        let ltype = source.take_u8()?;
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype)),
            0xC0..=0xFF => {
                let res = u16::from(source.take_u8()?);
                let res = res | ((u16::from(ltype) & 0x3F) << 8);
                Ok(LabelType::Compressed(res))
            }
            _ => Err(ParseError::Form(FormError::new("invalid label type"))),
        }
    }
}

//------------ NameError -----------------------------------------------------

/// A host name could not be encoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// The name has no labels.
    EmptyName,

    /// A label is longer than 63 octets.
    LongLabel,

    /// The encoded name is longer than 255 octets.
    LongName,

    /// The target buffer is too small.
    ShortBuf,
}

impl From<ShortBuf> for NameError {
    fn from(_: ShortBuf) -> Self {
        NameError::ShortBuf
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NameError::EmptyName => f.write_str("empty domain name"),
            NameError::LongLabel => f.write_str("long label"),
            NameError::LongName => f.write_str("long domain name"),
            NameError::ShortBuf => f.write_str("buffer size exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NameError {}

//============ Testing =======================================================
