//! ASCII run detection.

use crate::classify::all_ascii_wide;
use crate::constants::ASCII_MASK_U64;

#[cfg(feature = "simd")]
use bytemuck::pod_read_unaligned;
#[cfg(feature = "simd")]
use wide::u64x4;

/// Copy `N` bytes starting at `offset` into an array.
#[inline(always)]
pub(crate) fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    core::array::from_fn(|i| bytes[offset + i])
}

/// Length of the all-ASCII prefix of `bytes`.
#[inline]
pub fn ascii_prefix_len(bytes: &[u8]) -> usize {
    #[cfg(feature = "simd")]
    {
        ascii_prefix_len_simd(bytes)
    }

    #[cfg(not(feature = "simd"))]
    {
        ascii_prefix_len_scalar(bytes, 0)
    }
}

/// Scalar implementation of ascii_prefix_len, resuming at `start`.
#[inline]
fn ascii_prefix_len_scalar(bytes: &[u8], start: usize) -> usize {
    let len = bytes.len();
    let mut offset = start;

    while offset + 8 <= len {
        let pack = u64::from_le_bytes(read_array(bytes, offset));
        if !all_ascii_wide(pack) {
            return offset + ((pack & ASCII_MASK_U64).trailing_zeros() / 8) as usize;
        }
        offset += 8;
    }

    while offset < len && bytes[offset] < 0x80 {
        offset += 1;
    }
    offset
}

/// SIMD-assisted implementation of ascii_prefix_len.
///
/// Tests 32-byte blocks as four 64-bit lanes, then finishes with the scalar
/// path from the first block that is not all ASCII.
#[cfg(feature = "simd")]
#[inline]
fn ascii_prefix_len_simd(bytes: &[u8]) -> usize {
    let high_bits = u64x4::splat(ASCII_MASK_U64);
    let mut offset = 0;

    while offset + 32 <= bytes.len() {
        let lanes: [u64; 4] = pod_read_unaligned(&bytes[offset..offset + 32]);
        let masked = u64x4::new(lanes) & high_bits;
        if masked.to_array() != [0; 4] {
            break;
        }
        offset += 32;
    }

    ascii_prefix_len_scalar(bytes, offset)
}
