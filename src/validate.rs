//! Sequence well-formedness checks.
//!
//! The batched checks rely on arithmetic underflow: subtracting the minimum
//! permitted value from a code-unit lane sets the lane's top bit exactly when
//! the unit was below the minimum. OR-ing several such differences and testing
//! the sign bit checks all lanes at once.
//!
//! [`check_sequence`] is the exact byte-wise check used to locate and
//! classify failures.

use crate::classify::is_trailing_byte;
use crate::constants::{
    MAX_FOUR_BYTE_LEAD, MAX_SCALAR, MIN_FOUR_BYTE_SCALAR, MIN_THREE_BYTE_SCALAR, MIN_TWO_BYTE_LEAD,
    MIN_TWO_BYTE_SCALAR,
};
use crate::error::ErrorKind;
use crate::layout::ByteLayout;
use crate::synth::{four_byte_scalar, is_surrogate, three_byte_unit};
use crate::types::SequenceShape;

/// Returns true if `lower <= value <= upper`, using one wrapping subtraction.
#[inline(always)]
pub const fn is_within_range_inclusive(value: u32, lower: u32, upper: u32) -> bool {
    value.wrapping_sub(lower) <= upper.wrapping_sub(lower)
}

/// A unit decoded from a 2-byte sequence is at least `U+0080`.
#[inline(always)]
pub const fn is_well_formed_two_byte_unit(unit: u32) -> bool {
    (unit.wrapping_sub(MIN_TWO_BYTE_SCALAR) as i32) >= 0
}

/// A unit decoded from a 3-byte sequence is at least `U+0800` and not a surrogate.
#[inline(always)]
pub const fn is_well_formed_three_byte_unit(unit: u32) -> bool {
    ((unit.wrapping_sub(MIN_THREE_BYTE_SCALAR) as i32) >= 0) & !is_surrogate(unit)
}

/// Both lanes of `[ AAAA BBBB ]` are at least `U+0080`.
///
/// Lanes are assumed below `U+0800`, which holds for any 2-byte decode.
#[inline(always)]
pub const fn is_well_formed_double_two_byte(units: u32) -> bool {
    let a = units.wrapping_sub(MIN_TWO_BYTE_SCALAR << 16);
    let b = (units & 0xFFFF).wrapping_sub(MIN_TWO_BYTE_SCALAR);
    ((a | b) as i32) >= 0
}

/// All lanes of `[ AAAA BBBB CCCC DDDD ]` are at least `U+0080`.
#[inline(always)]
pub const fn is_well_formed_quad_two_byte(units: u64) -> bool {
    let min = MIN_TWO_BYTE_SCALAR as u64;
    let a = units.wrapping_sub(min << 48);
    let b = (units & 0x0000_FFFF_0000_0000).wrapping_sub(min << 32);
    let c = (units & 0x0000_0000_FFFF_0000).wrapping_sub(min << 16);
    let d = (units & 0x0000_0000_0000_FFFF).wrapping_sub(min);
    ((a | b | c | d) as i64) >= 0
}

/// Two 3-byte sequences decoded into `[ AAAA BBBB ]` are well-formed.
///
/// `second` is the pack following the one that held `A1 A2 A3 B1`; its
/// first two bytes must be continuations. The caller has already matched
/// the first pack with `begins_with_three_byte_sequence` and
/// `ends_with_three_byte_lead`.
#[inline(always)]
pub fn is_well_formed_dual_three_byte<L: ByteLayout>(units: u32, second: u32) -> bool {
    (units >= (MIN_THREE_BYTE_SCALAR << 16))
        & ((units & 0xF800_0000) != 0xD800_0000)
        & ((units & 0x0000_F800) != 0)
        & ((units & 0x0000_F800) != 0x0000_D800)
        & L::DUAL_THREE_BYTE_TRAIL.matches(second)
}

/// Returns true if a 4-byte sequence led by `first` and `second` encodes a
/// scalar in `U+10000..=U+10FFFF`.
#[inline(always)]
pub const fn is_four_byte_in_range(first: u32, second: u32) -> bool {
    // uuuuu
    let plane = ((first & 0x07) << 2) | ((second >> 4) & 0x03);
    is_within_range_inclusive(plane, 1, 16)
}

/// [`is_four_byte_in_range`] on a pack.
#[inline(always)]
pub fn four_byte_pack_in_range<L: ByteLayout>(pack: u32) -> bool {
    is_four_byte_in_range(L::byte(pack, 0), L::byte(pack, 1))
}

/// Check the sequence at the start of `bytes` byte by byte.
///
/// Returns the sequence width, or the offset (relative to `bytes`) and kind
/// of the first failure. Trailing structure is checked before the decoded
/// value. Leads that match a sequence shape but can only encode invalid
/// values (`C0`, `C1`, `F5`..`F7`) fail at the lead with
/// [`ErrorKind::InvalidLeadByte`] when their trailing bytes are broken too.
pub fn check_sequence(bytes: &[u8]) -> Result<usize, (usize, ErrorKind)> {
    let Some(&lead) = bytes.first() else {
        return Ok(0);
    };
    let width = match SequenceShape::of_lead(lead) {
        SequenceShape::Ascii => return Ok(1),
        SequenceShape::TwoByte => 2,
        SequenceShape::ThreeByte => 3,
        SequenceShape::FourByte => 4,
        SequenceShape::Invalid => return Err((0, ErrorKind::InvalidLeadByte)),
    };
    let dead_lead = !(MIN_TWO_BYTE_LEAD..=MAX_FOUR_BYTE_LEAD).contains(&lead);

    for index in 1..width {
        match bytes.get(index) {
            Some(&byte) if is_trailing_byte(byte) => {}
            _ if dead_lead => return Err((0, ErrorKind::InvalidLeadByte)),
            _ => return Err((index, ErrorKind::InvalidTrailingByte)),
        }
    }

    let at = |index: usize| bytes[index] as u32;
    match width {
        2 => {
            if dead_lead {
                return Err((0, ErrorKind::OverlongEncoding));
            }
        }
        3 => {
            let unit = three_byte_unit(at(0), at(1), at(2));
            if unit < MIN_THREE_BYTE_SCALAR {
                return Err((0, ErrorKind::OverlongEncoding));
            }
            if is_surrogate(unit) {
                return Err((0, ErrorKind::EncodedSurrogate));
            }
        }
        _ => {
            let scalar = four_byte_scalar(at(0), at(1), at(2), at(3));
            if scalar < MIN_FOUR_BYTE_SCALAR {
                return Err((0, ErrorKind::OverlongEncoding));
            }
            if scalar > MAX_SCALAR {
                return Err((0, ErrorKind::OutOfRange));
            }
        }
    }
    Ok(width)
}
