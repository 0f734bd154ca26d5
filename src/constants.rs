//! Constants for UTF-8 classification and UTF-16 synthesis.

/// High bit of every byte in a 4-byte pack.
pub const ASCII_MASK_U32: u32 = 0x8080_8080;

/// High bit of every byte in an 8-byte pack.
pub const ASCII_MASK_U64: u64 = 0x8080_8080_8080_8080;

/// Mask selecting the two marker bits of a continuation byte.
pub const CONTINUATION_MASK: u8 = 0xC0;

/// Marker bits every continuation byte carries (`10xxxxxx`).
pub const CONTINUATION_MARKER: u8 = 0x80;

/// Payload bits of a continuation byte.
pub const CONTINUATION_PAYLOAD: u32 = 0x3F;

/// Payload bits of a 2-byte lead (`110xxxxx`).
pub const TWO_BYTE_LEAD_PAYLOAD: u32 = 0x1F;

/// Payload bits of a 3-byte lead (`1110xxxx`).
pub const THREE_BYTE_LEAD_PAYLOAD: u32 = 0x0F;

/// Payload bits of a 4-byte lead (`11110xxx`).
pub const FOUR_BYTE_LEAD_PAYLOAD: u32 = 0x07;

/// Smallest scalar a 2-byte sequence may encode.
pub const MIN_TWO_BYTE_SCALAR: u32 = 0x80;

/// Smallest scalar a 3-byte sequence may encode.
pub const MIN_THREE_BYTE_SCALAR: u32 = 0x800;

/// Smallest scalar a 4-byte sequence may encode.
pub const MIN_FOUR_BYTE_SCALAR: u32 = 0x1_0000;

/// Largest Unicode scalar value.
pub const MAX_SCALAR: u32 = 0x10_FFFF;

/// First surrogate code point.
pub const SURROGATE_START: u32 = 0xD800;

/// Last surrogate code point.
pub const SURROGATE_END: u32 = 0xDFFF;

/// Mask applied to a code unit before comparing with [`SURROGATE_START`].
pub const SURROGATE_MASK: u32 = 0xF800;

/// Base of the high (leading) surrogate range.
pub const HIGH_SURROGATE_BASE: u32 = 0xD800;

/// Base of the low (trailing) surrogate range.
pub const LOW_SURROGATE_BASE: u32 = 0xDC00;

/// Gathers the 21 scalar bits out of a big-endian 4-byte sequence pack.
pub const FOUR_BYTE_EXTRACT_MASK: u32 = 0x073F_3F3F;

/// Scatters a 21-bit scalar into `[ 00000uuuuuzzzzyy 000000yyyyxxxxxx ]`.
pub const SURROGATE_DEPOSIT_MASK: u32 = 0x07FF_03FF;

/// Spreads four bytes into the low byte of four 16-bit lanes.
pub const WIDEN_DEPOSIT_MASK: u64 = 0x00FF_00FF_00FF_00FF;

/// Lead bytes below this value can only start an overlong 2-byte sequence.
pub const MIN_TWO_BYTE_LEAD: u8 = 0xC2;

/// Lead bytes above this value can only start an out-of-range 4-byte sequence.
pub const MAX_FOUR_BYTE_LEAD: u8 = 0xF4;
