//! UTF-16 code-unit synthesis from validated UTF-8 packs.
//!
//! Nothing in this module checks its input. Feeding it bytes that did not
//! pass [`validate`](crate::validate) produces meaningless code units.
//!
//! Layout of a 4-byte sequence and the surrogate pair it becomes:
//!
//! ```text
//! UTF-8   11110uuu 10uuzzzz 10yyyyyy 10xxxxxx
//! scalar  000uuuuu zzzzyyyy yyxxxxxx
//! UTF-16  110110ww wwzzzzyy 110111yy yyxxxxxx    (wwww = uuuuu - 1)
//! ```
//!
//! Batched helpers that return several code units in one integer put the
//! first unit in the most significant lane (`[ AAAA BBBB ]`), independent of
//! byte order. Surrogate pairs are returned arranged for the layout (see
//! [`ByteLayout::pack_units`]).

use core::marker::PhantomData;

use crate::bits::BitOps;
use crate::constants::{
    CONTINUATION_PAYLOAD, FOUR_BYTE_EXTRACT_MASK, FOUR_BYTE_LEAD_PAYLOAD, HIGH_SURROGATE_BASE,
    LOW_SURROGATE_BASE, SURROGATE_DEPOSIT_MASK, SURROGATE_MASK, SURROGATE_START,
    THREE_BYTE_LEAD_PAYLOAD, TWO_BYTE_LEAD_PAYLOAD, WIDEN_DEPOSIT_MASK,
};
use crate::layout::ByteLayout;
use crate::types::ByteOrder;

/// Returns true if `unit` is a surrogate code point.
#[inline(always)]
pub const fn is_surrogate(unit: u32) -> bool {
    unit & SURROGATE_MASK == SURROGATE_START
}

/// Code unit of a 2-byte sequence.
#[inline(always)]
pub const fn two_byte_unit(first: u32, second: u32) -> u32 {
    ((first & TWO_BYTE_LEAD_PAYLOAD) << 6) | (second & CONTINUATION_PAYLOAD)
}

/// Code unit of a 3-byte sequence.
#[inline(always)]
pub const fn three_byte_unit(first: u32, second: u32, third: u32) -> u32 {
    ((first & THREE_BYTE_LEAD_PAYLOAD) << 12)
        | ((second & CONTINUATION_PAYLOAD) << 6)
        | (third & CONTINUATION_PAYLOAD)
}

/// Surrogate pair of a 4-byte sequence, high surrogate in the upper half.
#[inline(always)]
pub const fn four_byte_units(first: u32, second: u32, third: u32, fourth: u32) -> u32 {
    let pair = ((first & FOUR_BYTE_LEAD_PAYLOAD) << 24)
        | ((second & CONTINUATION_PAYLOAD) << 18)
        | ((third & 0x30) << 12)
        | ((third & 0x0F) << 6)
        | (fourth & CONTINUATION_PAYLOAD);
    // uuuuu -> wwww, then the surrogate markers
    pair.wrapping_sub(0x0040_0000)
        .wrapping_add((HIGH_SURROGATE_BASE << 16) | LOW_SURROGATE_BASE)
}

/// Unicode scalar of a 4-byte sequence.
#[inline(always)]
pub const fn four_byte_scalar(first: u32, second: u32, third: u32, fourth: u32) -> u32 {
    ((first & FOUR_BYTE_LEAD_PAYLOAD) << 18)
        | ((second & CONTINUATION_PAYLOAD) << 12)
        | ((third & CONTINUATION_PAYLOAD) << 6)
        | (fourth & CONTINUATION_PAYLOAD)
}

/// Code unit of the 2-byte sequence at the start of a pack.
#[inline(always)]
pub fn two_byte_unit_from_pack<L: ByteLayout>(pack: u32) -> u32 {
    two_byte_unit(L::byte(pack, 0), L::byte(pack, 1))
}

/// Code unit of the 3-byte sequence at the start of a pack.
#[inline(always)]
pub fn three_byte_unit_from_pack<L: ByteLayout>(pack: u32) -> u32 {
    three_byte_unit(L::byte(pack, 0), L::byte(pack, 1), L::byte(pack, 2))
}

/// `[ AAAA BBBB ]` from a pack holding two 2-byte sequences.
#[inline(always)]
pub fn double_two_byte_units<L: ByteLayout>(pack: u32) -> u32 {
    let a = two_byte_unit(L::byte(pack, 0), L::byte(pack, 1));
    let b = two_byte_unit(L::byte(pack, 2), L::byte(pack, 3));
    (a << 16) | b
}

/// `[ AAAA BBBB CCCC DDDD ]` from an 8-byte pack holding four 2-byte sequences.
#[inline(always)]
pub fn quad_two_byte_units<L: ByteLayout>(pack: u64) -> u64 {
    let unit = |index: u32| {
        two_byte_unit(L::byte_wide(pack, index), L::byte_wide(pack, index + 1)) as u64
    };
    (unit(0) << 48) | (unit(2) << 32) | (unit(4) << 16) | unit(6)
}

/// `[ AAAA BBBB ]` from two 3-byte sequences spread over two packs.
///
/// `first` holds `A1 A2 A3 B1`, `second` starts with `B2 B3`.
#[inline(always)]
pub fn dual_three_byte_units<L: ByteLayout>(first: u32, second: u32) -> u32 {
    let a = three_byte_unit(L::byte(first, 0), L::byte(first, 1), L::byte(first, 2));
    let b = three_byte_unit(L::byte(first, 3), L::byte(second, 0), L::byte(second, 1));
    (a << 16) | b
}

/// Split `[ AAAA BBBB ]` into code units.
#[inline(always)]
pub const fn split_double(units: u32) -> [u16; 2] {
    [(units >> 16) as u16, units as u16]
}

/// Split `[ AAAA BBBB CCCC DDDD ]` into code units.
#[inline(always)]
pub const fn split_quad(units: u64) -> [u16; 4] {
    [
        (units >> 48) as u16,
        (units >> 32) as u16,
        (units >> 16) as u16,
        units as u16,
    ]
}

/// Surrogate pair of the 4-byte sequence in `pack`, by shifts and masks.
#[inline(always)]
pub fn four_byte_units_portable<L: ByteLayout>(pack: u32) -> u32 {
    match L::ORDER {
        ByteOrder::Little => four_byte_units_le(pack),
        ByteOrder::Big => four_byte_units_be(pack),
    }
}

// pack   [ 10xxxxxx 10yyyyyy 10uuzzzz 11110uuu ]
// result [ 110111yy yyxxxxxx 110110ww wwzzzzyy ]
#[inline(always)]
const fn four_byte_units_le(pack: u32) -> u32 {
    let mut units = (pack & 0x000F_0000) << 6; // [ 000000yy yy000000 00000000 00000000 ]
    units |= (pack & 0x3F00_0000) >> 8; //        [ 000000yy yyxxxxxx 00000000 00000000 ]
    units |= (pack & 0x0000_00FF) << 8; //        [ 000000yy yyxxxxxx 11110uuu 00000000 ]
    units |= (pack & 0x0000_3F00) >> 6; //        [ 000000yy yyxxxxxx 11110uuu uuzzzz00 ]
    units |= (pack & 0x0030_0000) >> 20; //       [ 000000yy yyxxxxxx 11110uuu uuzzzzyy ]
    units = units.wrapping_sub(0x40); //          [ 000000yy yyxxxxxx 111100ww wwzzzzyy ]
    units = units.wrapping_sub(0x2000); //        [ 000000yy yyxxxxxx 110100ww wwzzzzyy ]
    units = units.wrapping_add(0x0800); //        [ 000000yy yyxxxxxx 110110ww wwzzzzyy ]
    units.wrapping_add(LOW_SURROGATE_BASE << 16)
}

// pack   [ 11110uuu 10uuzzzz 10yyyyyy 10xxxxxx ]
// result [ 110110ww wwzzzzyy 110111yy yyxxxxxx ]
#[inline(always)]
const fn four_byte_units_be(pack: u32) -> u32 {
    let mut units = pack & 0xFF00_0000; //        [ 11110uuu 00000000 00000000 00000000 ]
    units |= (pack & 0x003F_0000) << 2; //        [ 11110uuu uuzzzz00 00000000 00000000 ]
    units |= (pack & 0x0000_3000) << 4; //        [ 11110uuu uuzzzzyy 00000000 00000000 ]
    units |= (pack & 0x0000_0F00) >> 2; //        [ 11110uuu uuzzzzyy 000000yy yy000000 ]
    units |= pack & 0x0000_003F; //               [ 11110uuu uuzzzzyy 000000yy yyxxxxxx ]
    units = units.wrapping_sub(0x2000_0000); //   [ 11010uuu uuzzzzyy 000000yy yyxxxxxx ]
    units = units.wrapping_sub(0x0040_0000); //   [ 110100ww wwzzzzyy 000000yy yyxxxxxx ]
    units = units.wrapping_add(LOW_SURROGATE_BASE);
    units.wrapping_add(0x0800_0000)
}

/// Surrogate pair of the 4-byte sequence in `pack`, by extract and deposit.
///
/// Bit-identical to [`four_byte_units_portable`] for every valid sequence.
#[inline(always)]
pub fn four_byte_units_deposit<L: ByteLayout, B: BitOps>(pack: u32) -> u32 {
    match L::ORDER {
        ByteOrder::Little => {
            let units = four_byte_units_deposit_be::<B>(pack.swap_bytes());
            units.rotate_left(16)
        }
        ByteOrder::Big => four_byte_units_deposit_be::<B>(pack),
    }
}

#[inline(always)]
fn four_byte_units_deposit_be<B: BitOps>(pack: u32) -> u32 {
    let payload = B::extract(pack, FOUR_BYTE_EXTRACT_MASK);
    // [ 00000uuuuuzzzzyy 000000yyyyxxxxxx ]
    let units = B::deposit(payload, SURROGATE_DEPOSIT_MASK);
    // [ 000000wwwwzzzzyy 000000yyyyxxxxxx ]
    let units = units.wrapping_sub(0x0040_0000);
    units.wrapping_add((HIGH_SURROGATE_BASE << 16) | LOW_SURROGATE_BASE)
}

/// Spread `[ AA BB CC DD ]` into `[ 00 AA 00 BB 00 CC 00 DD ]`.
#[inline(always)]
pub const fn widen(pack: u32) -> u64 {
    let wide = pack as u64;
    ((wide & 0xFF00_0000) << 24)
        | ((wide & 0x00FF_0000) << 16)
        | ((wide & 0x0000_FF00) << 8)
        | (wide & 0x0000_00FF)
}

/// [`widen`] by a single deposit.
#[inline(always)]
pub fn widen_deposit<B: BitOps>(pack: u32) -> u64 {
    B::deposit_wide(pack as u64, WIDEN_DEPOSIT_MASK)
}

/// Which formulas back the synthesizer.
pub trait Synthesis {
    /// Surrogate pair arranged per [`ByteLayout::pack_units`].
    fn four_byte_units<L: ByteLayout>(pack: u32) -> u32;

    /// Widen an all-ASCII pack into four code units.
    fn widen(pack: u32) -> u64;
}

/// Shift-and-mask formulas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Portable;

impl Synthesis for Portable {
    #[inline(always)]
    fn four_byte_units<L: ByteLayout>(pack: u32) -> u32 {
        four_byte_units_portable::<L>(pack)
    }

    #[inline(always)]
    fn widen(pack: u32) -> u64 {
        widen(pack)
    }
}

/// Extract/deposit formulas over a [`BitOps`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deposit<B>(PhantomData<B>);

impl<B: BitOps> Synthesis for Deposit<B> {
    #[inline(always)]
    fn four_byte_units<L: ByteLayout>(pack: u32) -> u32 {
        four_byte_units_deposit::<L, B>(pack)
    }

    #[inline(always)]
    fn widen(pack: u32) -> u64 {
        widen_deposit::<B>(pack)
    }
}
