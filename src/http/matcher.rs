//! Matching literal patterns one octet at a time.

//------------ LiteralMatcher ------------------------------------------------

/// A matcher for a constant pattern fed one octet at a time.
///
/// The matcher keeps a cursor into its pattern. Each pushed octet either
/// advances the cursor, completes the pattern, or breaks the match. A
/// pattern may contain wildcard positions that accept any octet.
///
/// The HTTP client uses one matcher for the `HTTP/*.* ` prefix of the
/// status line and one for the `Content-Length: ` header name, resetting
/// each at the start of every line.
#[derive(Clone, Copy, Debug)]
pub struct LiteralMatcher {
    /// The pattern to match.
    pattern: &'static [u8],

    /// The octet in the pattern that matches anything.
    wildcard: Option<u8>,

    /// The number of octets matched so far.
    cursor: usize,
}

/// The result of pushing an octet into a [`LiteralMatcher`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Match {
    /// The octet matched and more octets are needed.
    Partial,

    /// The octet matched and completed the pattern.
    Complete,

    /// The octet did not match.
    Mismatch,
}

impl LiteralMatcher {
    /// Creates a matcher for a pattern without wildcards.
    pub const fn new(pattern: &'static [u8]) -> Self {
        LiteralMatcher {
            pattern,
            wildcard: None,
            cursor: 0,
        }
    }

    /// Creates a matcher where `wildcard` in the pattern matches anything.
    pub const fn with_wildcard(pattern: &'static [u8], wildcard: u8) -> Self {
        LiteralMatcher {
            pattern,
            wildcard: Some(wildcard),
            cursor: 0,
        }
    }

    /// Feeds the next octet to the matcher.
    ///
    /// After a mismatch or a complete match, the matcher must be reset
    /// before it can be used again. Until then, every push is a mismatch.
    pub fn push(&mut self, octet: u8) -> Match {
        let expected = match self.pattern.get(self.cursor) {
            Some(&expected) => expected,
            None => return Match::Mismatch,
        };
        if Some(expected) != self.wildcard && expected != octet {
            self.cursor = self.pattern.len();
            return Match::Mismatch;
        }
        self.cursor += 1;
        if self.cursor == self.pattern.len() {
            Match::Complete
        } else {
            Match::Partial
        }
    }

    /// Returns the matcher to the start of its pattern.
    pub fn reset(&mut self) {
        self.cursor = 0
    }

    /// Returns whether no octet has been pushed since the last reset.
    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }
}

//============ Test ==========================================================
