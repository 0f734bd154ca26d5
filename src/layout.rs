//! Byte-order specific formula sets.
//!
//! A pack loaded from memory holds its first byte in the least significant
//! position on [`LittleEndian`] and in the most significant position on
//! [`BigEndian`]. Every mask that looks at a particular byte therefore has
//! two spellings. Both sets are complete and can be used on any host: the
//! layout decides how bytes are loaded, so a big-endian layout on a
//! little-endian machine still classifies correctly.

use crate::types::ByteOrder;
use core::fmt::Debug;

/// A mask/comparand pair over a 4-byte pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// Bits that take part in the comparison.
    pub mask: u32,
    /// Required value of the masked bits.
    pub comparand: u32,
}

impl Pattern {
    /// Create a pattern.
    pub const fn new(mask: u32, comparand: u32) -> Self {
        Self { mask, comparand }
    }

    /// Returns true if `pack` matches.
    #[inline(always)]
    pub const fn matches(self, pack: u32) -> bool {
        (pack & self.mask) == self.comparand
    }
}

/// A mask/comparand pair over an 8-byte pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidePattern {
    /// Bits that take part in the comparison.
    pub mask: u64,
    /// Required value of the masked bits.
    pub comparand: u64,
}

impl WidePattern {
    /// Create a pattern.
    pub const fn new(mask: u64, comparand: u64) -> Self {
        Self { mask, comparand }
    }

    /// Returns true if `pack` matches.
    #[inline(always)]
    pub const fn matches(self, pack: u64) -> bool {
        (pack & self.mask) == self.comparand
    }
}

/// One complete byte-order formula set.
pub trait ByteLayout: Copy + Default + Debug + Send + Sync + 'static {
    /// Order this set is written for.
    const ORDER: ByteOrder;

    /// Bytes 0..2 are `110xxxxx 10xxxxxx`.
    const TWO_BYTE_HEAD: Pattern;
    /// Bytes 2..4 are `110xxxxx 10xxxxxx`.
    const TWO_BYTE_TAIL: Pattern;
    /// Both halves are 2-byte sequences.
    const TWO_BYTE_PAIR: Pattern;
    /// Bytes 0..3 are `1110xxxx 10xxxxxx 10xxxxxx`.
    const THREE_BYTE_HEAD: Pattern;
    /// Byte 3 is a 3-byte lead.
    const THREE_BYTE_LEAD_AT_END: Pattern;
    /// Bytes 0..4 are `11110xxx 10xxxxxx 10xxxxxx 10xxxxxx`.
    const FOUR_BYTE_HEAD: Pattern;
    /// Bytes 0..2 of the pack following a dual 3-byte head are continuations.
    const DUAL_THREE_BYTE_TRAIL: Pattern;
    /// All four byte pairs of an 8-byte pack are 2-byte sequences.
    const QUAD_TWO_BYTE: WidePattern;
    /// High bit of byte `n` is `BYTE_HIGH_BIT[n]`.
    const BYTE_HIGH_BIT: [u32; 4];

    /// Load a 4-byte pack.
    fn load(bytes: [u8; 4]) -> u32;

    /// Load an 8-byte pack.
    fn load_wide(bytes: [u8; 8]) -> u64;

    /// Byte `index` (memory order) of a 4-byte pack.
    fn byte(pack: u32, index: u32) -> u32;

    /// Byte `index` (memory order) of an 8-byte pack.
    fn byte_wide(pack: u64, index: u32) -> u32;

    /// Pack two code units so that storing the result in this order writes
    /// `first` before `second`.
    fn pack_units(first: u32, second: u32) -> u32;

    /// Split a value built by [`ByteLayout::pack_units`] back into code units.
    fn unpack_units(packed: u32) -> [u16; 2];

    /// Split a widened 8-byte value into four code units in memory order.
    fn unpack_widened(widened: u64) -> [u16; 4];
}

/// Formula set for little-endian packs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LittleEndian;

/// Formula set for big-endian packs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BigEndian;

impl ByteLayout for LittleEndian {
    const ORDER: ByteOrder = ByteOrder::Little;

    const TWO_BYTE_HEAD: Pattern = Pattern::new(0x0000_C0E0, 0x0000_80C0);
    const TWO_BYTE_TAIL: Pattern = Pattern::new(0xC0E0_0000, 0x80C0_0000);
    const TWO_BYTE_PAIR: Pattern = Pattern::new(0xC0E0_C0E0, 0x80C0_80C0);
    const THREE_BYTE_HEAD: Pattern = Pattern::new(0x00C0_C0F0, 0x0080_80E0);
    const THREE_BYTE_LEAD_AT_END: Pattern = Pattern::new(0xF000_0000, 0xE000_0000);
    const FOUR_BYTE_HEAD: Pattern = Pattern::new(0xC0C0_C0F8, 0x8080_80F0);
    const DUAL_THREE_BYTE_TRAIL: Pattern = Pattern::new(0x0000_C0C0, 0x0000_8080);
    const QUAD_TWO_BYTE: WidePattern =
        WidePattern::new(0xC0E0_C0E0_C0E0_C0E0, 0x80C0_80C0_80C0_80C0);
    const BYTE_HIGH_BIT: [u32; 4] = [0x0000_0080, 0x0000_8000, 0x0080_0000, 0x8000_0000];

    #[inline(always)]
    fn load(bytes: [u8; 4]) -> u32 {
        u32::from_le_bytes(bytes)
    }

    #[inline(always)]
    fn load_wide(bytes: [u8; 8]) -> u64 {
        u64::from_le_bytes(bytes)
    }

    #[inline(always)]
    fn byte(pack: u32, index: u32) -> u32 {
        (pack >> (index * 8)) & 0xFF
    }

    #[inline(always)]
    fn byte_wide(pack: u64, index: u32) -> u32 {
        ((pack >> (index * 8)) & 0xFF) as u32
    }

    #[inline(always)]
    fn pack_units(first: u32, second: u32) -> u32 {
        (second << 16) | first
    }

    #[inline(always)]
    fn unpack_units(packed: u32) -> [u16; 2] {
        [packed as u16, (packed >> 16) as u16]
    }

    #[inline(always)]
    fn unpack_widened(widened: u64) -> [u16; 4] {
        [
            widened as u16,
            (widened >> 16) as u16,
            (widened >> 32) as u16,
            (widened >> 48) as u16,
        ]
    }
}

impl ByteLayout for BigEndian {
    const ORDER: ByteOrder = ByteOrder::Big;

    const TWO_BYTE_HEAD: Pattern = Pattern::new(0xE0C0_0000, 0xC080_0000);
    const TWO_BYTE_TAIL: Pattern = Pattern::new(0x0000_E0C0, 0x0000_C080);
    const TWO_BYTE_PAIR: Pattern = Pattern::new(0xE0C0_E0C0, 0xC080_C080);
    const THREE_BYTE_HEAD: Pattern = Pattern::new(0xF0C0_C000, 0xE080_8000);
    const THREE_BYTE_LEAD_AT_END: Pattern = Pattern::new(0x0000_00F0, 0x0000_00E0);
    const FOUR_BYTE_HEAD: Pattern = Pattern::new(0xF8C0_C0C0, 0xF080_8080);
    const DUAL_THREE_BYTE_TRAIL: Pattern = Pattern::new(0xC0C0_0000, 0x8080_0000);
    const QUAD_TWO_BYTE: WidePattern =
        WidePattern::new(0xE0C0_E0C0_E0C0_E0C0, 0xC080_C080_C080_C080);
    const BYTE_HIGH_BIT: [u32; 4] = [0x8000_0000, 0x0080_0000, 0x0000_8000, 0x0000_0080];

    #[inline(always)]
    fn load(bytes: [u8; 4]) -> u32 {
        u32::from_be_bytes(bytes)
    }

    #[inline(always)]
    fn load_wide(bytes: [u8; 8]) -> u64 {
        u64::from_be_bytes(bytes)
    }

    #[inline(always)]
    fn byte(pack: u32, index: u32) -> u32 {
        (pack >> (24 - index * 8)) & 0xFF
    }

    #[inline(always)]
    fn byte_wide(pack: u64, index: u32) -> u32 {
        ((pack >> (56 - index * 8)) & 0xFF) as u32
    }

    #[inline(always)]
    fn pack_units(first: u32, second: u32) -> u32 {
        (first << 16) | second
    }

    #[inline(always)]
    fn unpack_units(packed: u32) -> [u16; 2] {
        [(packed >> 16) as u16, packed as u16]
    }

    #[inline(always)]
    fn unpack_widened(widened: u64) -> [u16; 4] {
        [
            (widened >> 48) as u16,
            (widened >> 32) as u16,
            (widened >> 16) as u16,
            widened as u16,
        ]
    }
}
