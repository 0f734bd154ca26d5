//! Parallel bit extract/deposit.
//!
//! [`SoftBits`] is a portable implementation that runs anywhere and is used
//! to check the deposit formulas on hosts without BMI2. The hardware
//! implementation is only reachable through an [`Engine`](crate::Engine)
//! built from [`Capabilities`](crate::Capabilities) that vouch for BMI2.

/// Parallel bit extract/deposit primitives.
pub trait BitOps {
    /// Gather the bits of `value` selected by `mask` into the low bits.
    fn extract(value: u32, mask: u32) -> u32;

    /// Scatter the low bits of `value` to the positions set in `mask`.
    fn deposit(value: u32, mask: u32) -> u32;

    /// 64-bit [`BitOps::deposit`].
    fn deposit_wide(value: u64, mask: u64) -> u64;
}

/// Bit-by-bit implementation of [`BitOps`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftBits;

impl BitOps for SoftBits {
    #[inline]
    fn extract(value: u32, mask: u32) -> u32 {
        let mut result = 0;
        let mut remaining = mask;
        let mut bit = 1u32;
        while remaining != 0 {
            let lowest = remaining & remaining.wrapping_neg();
            if value & lowest != 0 {
                result |= bit;
            }
            bit <<= 1;
            remaining &= remaining - 1;
        }
        result
    }

    #[inline]
    fn deposit(value: u32, mask: u32) -> u32 {
        let mut result = 0;
        let mut remaining = mask;
        let mut bit = 1u32;
        while remaining != 0 {
            let lowest = remaining & remaining.wrapping_neg();
            if value & bit != 0 {
                result |= lowest;
            }
            bit <<= 1;
            remaining &= remaining - 1;
        }
        result
    }

    #[inline]
    fn deposit_wide(value: u64, mask: u64) -> u64 {
        let mut result = 0;
        let mut remaining = mask;
        let mut bit = 1u64;
        while remaining != 0 {
            let lowest = remaining & remaining.wrapping_neg();
            if value & bit != 0 {
                result |= lowest;
            }
            bit <<= 1;
            remaining &= remaining - 1;
        }
        result
    }
}

/// BMI2 `PEXT`/`PDEP`.
///
/// Only instantiated by code running under `#[target_feature(enable = "bmi2")]`
/// after the engine was configured with BMI2 capabilities.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Bmi2Bits;

#[cfg(target_arch = "x86_64")]
impl BitOps for Bmi2Bits {
    #[inline(always)]
    fn extract(value: u32, mask: u32) -> u32 {
        // SAFETY: Bmi2Bits is crate-private and only used on paths gated by
        // `Capabilities::has_bmi2`.
        unsafe { core::arch::x86_64::_pext_u32(value, mask) }
    }

    #[inline(always)]
    fn deposit(value: u32, mask: u32) -> u32 {
        // SAFETY: see `extract`.
        unsafe { core::arch::x86_64::_pdep_u32(value, mask) }
    }

    #[inline(always)]
    fn deposit_wide(value: u64, mask: u64) -> u64 {
        // SAFETY: see `extract`.
        unsafe { core::arch::x86_64::_pdep_u64(value, mask) }
    }
}
