//! Core types for classification and transcoding.

/// Byte order used to load packs and arrange synthesized code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl ByteOrder {
    /// Byte order of the compilation target.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::Little;

    /// Byte order of the compilation target.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::Big;

    /// Returns true for [`ByteOrder::Little`].
    #[inline]
    pub const fn is_little(self) -> bool {
        matches!(self, Self::Little)
    }
}

/// What the leading byte of a pack declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceShape {
    /// Single ASCII byte.
    Ascii,
    /// Lead of a 2-byte sequence (`110xxxxx`).
    TwoByte,
    /// Lead of a 3-byte sequence (`1110xxxx`).
    ThreeByte,
    /// Lead of a 4-byte sequence (`11110xxx`).
    FourByte,
    /// Continuation byte or `11111xxx`.
    Invalid,
}

impl SequenceShape {
    /// Classify a single lead byte.
    #[inline]
    pub const fn of_lead(byte: u8) -> Self {
        match byte.leading_ones() {
            0 => Self::Ascii,
            2 => Self::TwoByte,
            3 => Self::ThreeByte,
            4 => Self::FourByte,
            _ => Self::Invalid,
        }
    }

    /// Number of bytes the shape spans, or `None` for [`SequenceShape::Invalid`].
    #[inline]
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::Ascii => Some(1),
            Self::TwoByte => Some(2),
            Self::ThreeByte => Some(3),
            Self::FourByte => Some(4),
            Self::Invalid => None,
        }
    }
}

/// Why a transcoding call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeStatus {
    /// All input was consumed.
    Complete,
    /// The output buffer cannot hold the next sequence.
    OutputFull,
}

/// Progress reported by a successful transcoding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transcoded {
    /// Input bytes consumed. Always a sequence boundary.
    pub read: usize,
    /// UTF-16 code units written.
    pub written: usize,
    /// Why the call returned.
    pub status: TranscodeStatus,
}

impl Transcoded {
    /// Returns true if all input was consumed.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self.status, TranscodeStatus::Complete)
    }
}
