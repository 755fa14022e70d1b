//! Splitting of URI references into components.
//!
//! Only the structural delimiters are examined; the characters between them
//! are accepted as they are.

use crate::imp::{AuthMeta, Constraints, Meta};
use core::{fmt, num::NonZeroUsize};

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// No colon is found in the input.
    ///
    /// The error index points to the end of input.
    NoScheme,
    /// The input starts with a dot, which can only begin a relative path.
    ///
    /// The error index is always zero.
    DotSegmentBeforeScheme,
    /// The input starts with a colon.
    ///
    /// The error index is always zero.
    EmptyScheme,
    /// Nothing follows `"//"` up to the next delimiter.
    ///
    /// The error index points to where the authority would have started.
    EmptyAuthority,
    /// A host starting with `'['` has no matching `']'` within the authority.
    ///
    /// The error index points to the left square bracket.
    UnmatchedBracket,
    /// The port text is not a decimal number in the range of `u16`.
    ///
    /// The error index points to the first byte of the port text.
    InvalidPort,
}

impl ParseErrorKind {
    /// Returns the static diagnostic message for this kind of error.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NoScheme => "scheme not found",
            Self::DotSegmentBeforeScheme => "dot-segment preceding a scheme",
            Self::EmptyScheme => "scheme is empty",
            Self::EmptyAuthority => "authority is empty",
            Self::UnmatchedBracket => "unmatched square bracket in IP-literal",
            Self::InvalidPort => "invalid port",
        }
    }
}

/// An error occurred when parsing a URI (reference).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the index at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at index {}", self.kind.message(), self.index)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for ParseError {}

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
        })
    };
}

pub(crate) fn parse(bytes: &[u8], constraints: Constraints) -> Result<Meta> {
    let mut parser = Parser {
        constraints,
        bytes,
        pos: 0,
        out: Meta::default(),
    };
    parser.parse_from_scheme()?;
    Ok(parser.out)
}

/// URI reference splitter.
///
/// # Invariants
///
/// `pos <= len` and `pos` is non-decreasing. `pos` only ever stops right after
/// an ASCII delimiter or at the end of input, so it always lies on the boundary
/// of a UTF-8 code point.
///
/// # Guarantees
///
/// When parsing succeeds, all output indexes are within bounds, correctly
/// ordered and on the boundary of a UTF-8 code point.
struct Parser<'a> {
    constraints: Constraints,
    bytes: &'a [u8],
    pos: usize,
    out: Meta,
}

impl Parser<'_> {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Finds the first byte in `start..end` that matches the predicate.
    fn find(&self, start: usize, end: usize, pred: impl Fn(u8) -> bool) -> Option<usize> {
        self.bytes[start..end]
            .iter()
            .position(|&x| pred(x))
            .map(|i| start + i)
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn parse_from_scheme(&mut self) -> Result<()> {
        self.read_scheme()?;
        if self.read_str("//") {
            self.read_authority()?;
        }
        self.read_tail();
        Ok(())
    }

    fn read_scheme(&mut self) -> Result<()> {
        let required = self.constraints.scheme_required;

        if self.bytes.first() == Some(&b'.') {
            // A dot can only begin a relative path.
            if required {
                err!(0, DotSegmentBeforeScheme);
            }
            return Ok(());
        }

        match self.find(0, self.len(), |x| x == b':') {
            Some(i) => {
                let Some(end) = NonZeroUsize::new(i) else {
                    err!(0, EmptyScheme);
                };
                self.out.scheme_end = Some(end);
                self.pos = i + 1;
                Ok(())
            }
            None => {
                if required {
                    err!(self.len(), NoScheme);
                }
                Ok(())
            }
        }
    }

    fn read_authority(&mut self) -> Result<()> {
        let start = self.pos;
        let end = self
            .find(start, self.len(), |x| matches!(x, b'/' | b'?' | b'#'))
            .unwrap_or(self.len());
        if start == end {
            err!(start, EmptyAuthority);
        }

        let host_start = match self.find(start, end, |x| x == b'@') {
            Some(i) => i + 1,
            None => start,
        };

        // The colon of an IP literal is searched from its closing bracket.
        let colon_from = if host_start < end && self.bytes[host_start] == b'[' {
            match self.find(host_start, end, |x| x == b']') {
                Some(i) => i,
                None => err!(host_start, UnmatchedBracket),
            }
        } else {
            host_start
        };

        let (host_end, port) = match self.find(colon_from, end, |x| x == b':') {
            Some(i) => (i, self.read_port(i + 1, end)?),
            None => (end, None),
        };

        self.out.auth_meta = Some(AuthMeta {
            host_bounds: (host_start, host_end),
            port,
        });
        self.pos = end;
        Ok(())
    }

    fn read_port(&self, start: usize, end: usize) -> Result<Option<u16>> {
        if start == end {
            return Ok(None);
        }
        let mut port: u16 = 0;
        for &x in &self.bytes[start..end] {
            let Some(digit) = (x as char).to_digit(10) else {
                err!(start, InvalidPort);
            };
            port = match port.checked_mul(10).and_then(|p| p.checked_add(digit as u16)) {
                Some(p) => p,
                None => err!(start, InvalidPort),
            };
        }
        Ok(Some(port))
    }

    fn read_tail(&mut self) {
        let start = self.pos;
        // A question mark after the number sign belongs to the fragment.
        let tail_end = self
            .find(start, self.len(), |x| x == b'#')
            .unwrap_or(self.len());
        let path_end = self
            .find(start, tail_end, |x| x == b'?')
            .unwrap_or(tail_end);

        self.out.path_bounds = (start, path_end);
        if path_end != tail_end {
            self.out.query_end = NonZeroUsize::new(tail_end);
        }
        self.pos = self.len();
    }
}
