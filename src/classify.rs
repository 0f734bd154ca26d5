//! Byte-pattern classification over 4- and 8-byte packs.
//!
//! Every function here is a single mask-and-compare with no data-dependent
//! branches. Functions generic over [`ByteLayout`] read bytes in that
//! layout's memory order.

use crate::constants::{ASCII_MASK_U32, ASCII_MASK_U64, CONTINUATION_MARKER, CONTINUATION_MASK};
use crate::layout::ByteLayout;
use crate::types::SequenceShape;

/// Returns true if every byte of a 4-byte pack is ASCII.
#[inline(always)]
pub const fn all_ascii(pack: u32) -> bool {
    pack & ASCII_MASK_U32 == 0
}

/// Returns true if every byte of an 8-byte pack is ASCII.
#[inline(always)]
pub const fn all_ascii_wide(pack: u64) -> bool {
    pack & ASCII_MASK_U64 == 0
}

/// Returns true if byte `index` (memory order, `0..4`) is ASCII.
#[inline(always)]
pub fn byte_is_ascii<L: ByteLayout>(pack: u32, index: usize) -> bool {
    pack & L::BYTE_HIGH_BIT[index] == 0
}

/// Returns true if the first byte is ASCII.
#[inline(always)]
pub fn first_byte_is_ascii<L: ByteLayout>(pack: u32) -> bool {
    byte_is_ascii::<L>(pack, 0)
}

/// Returns true if the second byte is ASCII.
#[inline(always)]
pub fn second_byte_is_ascii<L: ByteLayout>(pack: u32) -> bool {
    byte_is_ascii::<L>(pack, 1)
}

/// Returns true if the third byte is ASCII.
#[inline(always)]
pub fn third_byte_is_ascii<L: ByteLayout>(pack: u32) -> bool {
    byte_is_ascii::<L>(pack, 2)
}

/// Returns true if the fourth byte is ASCII.
#[inline(always)]
pub fn fourth_byte_is_ascii<L: ByteLayout>(pack: u32) -> bool {
    byte_is_ascii::<L>(pack, 3)
}

/// Number of leading ASCII bytes in a 4-byte pack (`0..=4`).
#[inline(always)]
pub fn leading_ascii_bytes<L: ByteLayout>(pack: u32) -> usize {
    let high = pack & ASCII_MASK_U32;
    if L::ORDER.is_little() {
        (high.trailing_zeros() / 8) as usize
    } else {
        (high.leading_zeros() / 8) as usize
    }
}

/// Returns true if `byte` is a continuation byte (`10xxxxxx`).
#[inline(always)]
pub const fn is_trailing_byte(byte: u8) -> bool {
    byte & CONTINUATION_MASK == CONTINUATION_MARKER
}

/// Pack starts with `110xxxxx 10xxxxxx`.
#[inline(always)]
pub fn begins_with_two_byte_sequence<L: ByteLayout>(pack: u32) -> bool {
    L::TWO_BYTE_HEAD.matches(pack)
}

/// Pack ends with `110xxxxx 10xxxxxx`.
#[inline(always)]
pub fn ends_with_two_byte_sequence<L: ByteLayout>(pack: u32) -> bool {
    L::TWO_BYTE_TAIL.matches(pack)
}

/// Pack is two adjacent 2-byte sequences.
#[inline(always)]
pub fn begins_and_ends_with_two_byte_sequence<L: ByteLayout>(pack: u32) -> bool {
    L::TWO_BYTE_PAIR.matches(pack)
}

/// Pack starts with `1110xxxx 10xxxxxx 10xxxxxx`.
#[inline(always)]
pub fn begins_with_three_byte_sequence<L: ByteLayout>(pack: u32) -> bool {
    L::THREE_BYTE_HEAD.matches(pack)
}

/// Last byte of the pack is a 3-byte lead (`1110xxxx`).
#[inline(always)]
pub fn ends_with_three_byte_lead<L: ByteLayout>(pack: u32) -> bool {
    L::THREE_BYTE_LEAD_AT_END.matches(pack)
}

/// Pack is `11110xxx 10xxxxxx 10xxxxxx 10xxxxxx`.
#[inline(always)]
pub fn begins_with_four_byte_sequence<L: ByteLayout>(pack: u32) -> bool {
    L::FOUR_BYTE_HEAD.matches(pack)
}

/// 8-byte pack is four adjacent 2-byte sequences.
#[inline(always)]
pub fn is_quad_two_byte_sequence<L: ByteLayout>(pack: u64) -> bool {
    L::QUAD_TWO_BYTE.matches(pack)
}

/// Shape declared by the first byte of the pack.
///
/// Only inspects the lead; whether the continuation bytes are present is
/// answered by the `begins_with_*` recognizers.
#[inline]
pub fn leading_shape<L: ByteLayout>(pack: u32) -> SequenceShape {
    SequenceShape::of_lead(L::byte(pack, 0) as u8)
}
