//! Encoding of Base 64.
//!
//! The Base 64 encoding is defined in [RFC 4648]. There are two variants
//! defined in the RFC, dubbed *base64* and *base64url* which are
//! differenciated by the last two characters in the alphabet. Only the
//! original *base64* variant is needed for HTTP basic authentication, so
//! this is what is implemented by the module.
//!
//! The module defines the type [`Encoder`] which keeps the state necessary
//! for encoding data that arrives piece by piece. It never holds more than
//! one group of three input octets, so input of any length can be encoded
//! without a buffer for all of it.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

//------------ Encoder -------------------------------------------------------

/// An incremental *base64* encoder.
///
/// Octets are fed to the encoder one at a time via [`push`][Self::push].
/// Whenever three octets have been collected, the four characters encoding
/// them are returned. Once all input has been pushed,
/// [`finalize`][Self::finalize] returns the padded encoding of any octets
/// left over.
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder {
    /// The octets of the current group.
    group: [u8; 3],

    /// The number of octets in the current group.
    len: usize,
}

impl Encoder {
    /// Creates a new, empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an octet into the encoder.
    ///
    /// Returns the encoded characters if the octet completed a group.
    pub fn push(&mut self, octet: u8) -> Option<[u8; 4]> {
        self.group[self.len] = octet;
        self.len += 1;
        if self.len == 3 {
            self.len = 0;
            Some(encode_group(&self.group))
        } else {
            None
        }
    }

    /// Finishes encoding.
    ///
    /// Returns the padded characters for an incomplete last group or
    /// `None` if the input length was a multiple of three. The encoder is
    /// empty afterwards and can be reused.
    pub fn finalize(&mut self) -> Option<[u8; 4]> {
        let len = self.len;
        self.len = 0;
        match len {
            0 => None,
            1 => {
                let mut res = encode_group(&[self.group[0], 0, 0]);
                res[2] = PAD;
                res[3] = PAD;
                Some(res)
            }
            _ => {
                let mut res =
                    encode_group(&[self.group[0], self.group[1], 0]);
                res[3] = PAD;
                Some(res)
            }
        }
    }
}

/// Encodes a complete group of three octets.
fn encode_group(group: &[u8; 3]) -> [u8; 4] {
    [
        ch(group[0] >> 2),
        ch((group[0] & 0x03) << 4 | group[1] >> 4),
        ch((group[1] & 0x0F) << 2 | group[2] >> 6),
        ch(group[2] & 0x3F),
    ]
}

fn ch(i: u8) -> u8 {
    ENCODE_ALPHABET[usize::from(i)]
}

//------------ Constants -----------------------------------------------------

/// The alphabet used for encoding.
const ENCODE_ALPHABET: [u8; 64] = [
    b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', // 0x00 .. 0x07
    b'I', b'J', b'K', b'L', b'M', b'N', b'O', b'P', // 0x08 .. 0x0F
    b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', // 0x10 .. 0x17
    b'Y', b'Z', b'a', b'b', b'c', b'd', b'e', b'f', // 0x18 .. 0x1F
    b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', // 0x20 .. 0x27
    b'o', b'p', b'q', b'r', b's', b't', b'u', b'v', // 0x28 .. 0x2F
    b'w', b'x', b'y', b'z', b'0', b'1', b'2', b'3', // 0x30 .. 0x37
    b'4', b'5', b'6', b'7', b'8', b'9', b'+', b'/', // 0x38 .. 0x3F
];

/// The padding character
const PAD: u8 = b'=';

//============ Test ==========================================================
