//! Error types for UTF-8 validation and transcoding.

use core::fmt;

/// Why a byte span is not well-formed UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Byte cannot start any sequence.
    InvalidLeadByte,
    /// Continuation position is not `10xxxxxx`, or the span ends mid-sequence.
    InvalidTrailingByte,
    /// Scalar encoded with more bytes than required.
    OverlongEncoding,
    /// Scalar in the surrogate range `U+D800..=U+DFFF`.
    EncodedSurrogate,
    /// Scalar above `U+10FFFF`.
    OutOfRange,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLeadByte => write!(f, "invalid lead byte"),
            Self::InvalidTrailingByte => write!(f, "invalid or missing trailing byte"),
            Self::OverlongEncoding => write!(f, "overlong encoding"),
            Self::EncodedSurrogate => write!(f, "encoded surrogate"),
            Self::OutOfRange => write!(f, "scalar value out of range"),
        }
    }
}

/// First failure found in a byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utf8Error {
    offset: usize,
    valid_up_to: usize,
    kind: ErrorKind,
}

impl Utf8Error {
    /// Create a failure record for a sequence that fails at its lead byte.
    #[inline]
    pub const fn new(offset: usize, kind: ErrorKind) -> Self {
        Self::within_sequence(offset, offset, kind)
    }

    /// Create a failure record for the sequence starting at `start` that fails
    /// at `offset`.
    #[inline]
    pub const fn within_sequence(start: usize, offset: usize, kind: ErrorKind) -> Self {
        Self {
            offset,
            valid_up_to: start,
            kind,
        }
    }

    /// Byte offset of the first invalid byte.
    ///
    /// For a sequence truncated by the end of the span this is the span length.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the well-formed prefix, which is where the failing
    /// sequence starts.
    ///
    /// A failed transcode has written exactly the code units of
    /// `src[..valid_up_to]`; [`utf16_len`](crate::utf16_len) on that prefix
    /// gives their count.
    #[inline]
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Failure kind.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte offset {}", self.kind, self.offset)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf8Error {}

/// Result type for UTF-8 operations.
pub type Result<T> = core::result::Result<T, Utf8Error>;
