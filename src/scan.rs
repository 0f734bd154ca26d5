//! The scanning loop shared by validation, counting and transcoding.
//!
//! The loop skips ASCII runs, then tries the batched recognizers widest
//! first: four 2-byte sequences in an 8-byte pack, two 2-byte sequences,
//! two 3-byte sequences across two packs, then single sequences. Anything a
//! batched path rejects falls through to [`check_sequence`], which either
//! decodes it or reports the exact failure.

use crate::ascii::{ascii_prefix_len, read_array};
use crate::classify::{
    begins_and_ends_with_two_byte_sequence, begins_with_four_byte_sequence,
    begins_with_three_byte_sequence, begins_with_two_byte_sequence, ends_with_three_byte_lead,
    is_quad_two_byte_sequence,
};
use crate::error::{Result, Utf8Error};
use crate::layout::ByteLayout;
use crate::synth::{
    Synthesis, double_two_byte_units, dual_three_byte_units, four_byte_units, quad_two_byte_units,
    split_double, split_quad, three_byte_unit, three_byte_unit_from_pack, two_byte_unit,
    two_byte_unit_from_pack,
};
use crate::validate::{
    check_sequence, four_byte_pack_in_range, is_well_formed_double_two_byte,
    is_well_formed_dual_three_byte, is_well_formed_quad_two_byte, is_well_formed_three_byte_unit,
    is_well_formed_two_byte_unit,
};

/// Destination for synthesized code units.
pub(crate) trait Sink {
    /// Code units that still fit.
    fn room(&self) -> usize;

    /// Emit one code unit per byte of an all-ASCII run.
    fn push_ascii<L: ByteLayout, S: Synthesis>(&mut self, bytes: &[u8]);

    /// Emit code units.
    fn push(&mut self, units: &[u16]);
}

/// Validation only.
pub(crate) struct Discard;

impl Sink for Discard {
    #[inline(always)]
    fn room(&self) -> usize {
        usize::MAX
    }

    #[inline(always)]
    fn push_ascii<L: ByteLayout, S: Synthesis>(&mut self, _bytes: &[u8]) {}

    #[inline(always)]
    fn push(&mut self, _units: &[u16]) {}
}

/// Counts code units without storing them.
#[derive(Default)]
pub(crate) struct Counter {
    pub(crate) count: usize,
}

impl Sink for Counter {
    #[inline(always)]
    fn room(&self) -> usize {
        usize::MAX
    }

    #[inline(always)]
    fn push_ascii<L: ByteLayout, S: Synthesis>(&mut self, bytes: &[u8]) {
        self.count += bytes.len();
    }

    #[inline(always)]
    fn push(&mut self, units: &[u16]) {
        self.count += units.len();
    }
}

/// Writes into a caller-provided buffer.
pub(crate) struct SliceSink<'a> {
    buf: &'a mut [u16],
    written: usize,
}

impl<'a> SliceSink<'a> {
    pub(crate) fn new(buf: &'a mut [u16]) -> Self {
        Self { buf, written: 0 }
    }

    pub(crate) fn written(&self) -> usize {
        self.written
    }
}

impl Sink for SliceSink<'_> {
    #[inline(always)]
    fn room(&self) -> usize {
        self.buf.len() - self.written
    }

    #[inline]
    fn push_ascii<L: ByteLayout, S: Synthesis>(&mut self, bytes: &[u8]) {
        let out = &mut self.buf[self.written..self.written + bytes.len()];
        let mut chunks = bytes.chunks_exact(4);
        let mut offset = 0;
        for chunk in &mut chunks {
            let pack = L::load(read_array(chunk, 0));
            out[offset..offset + 4].copy_from_slice(&L::unpack_widened(S::widen(pack)));
            offset += 4;
        }
        for &byte in chunks.remainder() {
            out[offset] = byte as u16;
            offset += 1;
        }
        self.written += bytes.len();
    }

    #[inline(always)]
    fn push(&mut self, units: &[u16]) {
        self.buf[self.written..self.written + units.len()].copy_from_slice(units);
        self.written += units.len();
    }
}

/// Scan `src`, feeding code units to `sink`.
///
/// Returns the number of bytes consumed, which is less than `src.len()` only
/// when the sink ran out of room before a complete sequence.
#[inline(always)]
pub(crate) fn scan<L: ByteLayout, S: Synthesis, K: Sink>(
    src: &[u8],
    sink: &mut K,
) -> Result<usize> {
    let len = src.len();
    let mut pos = 0;

    macro_rules! emit {
        ($units:expr, $width:expr) => {{
            let units = $units;
            if sink.room() < units.len() {
                return Ok(pos);
            }
            sink.push(&units);
            pos += $width;
            continue;
        }};
    }

    while pos < len {
        let rest = &src[pos..];

        let run = ascii_prefix_len(rest);
        if run != 0 {
            let take = run.min(sink.room());
            sink.push_ascii::<L, S>(&rest[..take]);
            pos += take;
            if take < run {
                return Ok(pos);
            }
            continue;
        }

        if rest.len() >= 8 {
            let wide = L::load_wide(read_array(rest, 0));
            if is_quad_two_byte_sequence::<L>(wide) {
                let units = quad_two_byte_units::<L>(wide);
                if is_well_formed_quad_two_byte(units) {
                    emit!(split_quad(units), 8);
                }
            }
        }

        if rest.len() >= 4 {
            let pack = L::load(read_array(rest, 0));

            if begins_and_ends_with_two_byte_sequence::<L>(pack) {
                let units = double_two_byte_units::<L>(pack);
                if is_well_formed_double_two_byte(units) {
                    emit!(split_double(units), 4);
                }
            } else if begins_with_two_byte_sequence::<L>(pack) {
                let unit = two_byte_unit_from_pack::<L>(pack);
                if is_well_formed_two_byte_unit(unit) {
                    emit!([unit as u16], 2);
                }
            } else if begins_with_three_byte_sequence::<L>(pack) {
                if rest.len() >= 8 && ends_with_three_byte_lead::<L>(pack) {
                    let second = L::load(read_array(rest, 4));
                    let units = dual_three_byte_units::<L>(pack, second);
                    if is_well_formed_dual_three_byte::<L>(units, second) {
                        emit!(split_double(units), 6);
                    }
                }
                let unit = three_byte_unit_from_pack::<L>(pack);
                if is_well_formed_three_byte_unit(unit) {
                    emit!([unit as u16], 3);
                }
            } else if begins_with_four_byte_sequence::<L>(pack)
                && four_byte_pack_in_range::<L>(pack)
            {
                emit!(L::unpack_units(S::four_byte_units::<L>(pack)), 4);
            }
        }

        let width = match check_sequence(rest) {
            Ok(width) => width,
            Err((offset, kind)) => return Err(Utf8Error::within_sequence(pos, pos + offset, kind)),
        };
        let at = |index: usize| rest[index] as u32;
        match width {
            2 => emit!([two_byte_unit(at(0), at(1)) as u16], 2),
            3 => emit!([three_byte_unit(at(0), at(1), at(2)) as u16], 3),
            _ => emit!(split_double(four_byte_units(at(0), at(1), at(2), at(3))), 4),
        }
    }

    Ok(pos)
}
