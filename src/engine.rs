//! Byte-order and capability selection.
//!
//! An [`Engine`] is configured once with a [`ByteOrder`] and
//! [`Capabilities`] and resolves every operation to a function pointer at
//! that moment, so the per-call path carries no configuration branches.
//! The accelerated and portable paths produce identical output; the choice
//! only affects throughput.

use core::fmt;

use crate::error::Result;
use crate::layout::{BigEndian, ByteLayout, LittleEndian};
use crate::log::{debug, trace};
use crate::scan::{Counter, Discard, SliceSink, scan};
use crate::synth::{Portable, Synthesis};
use crate::types::{ByteOrder, TranscodeStatus, Transcoded};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

type ValidateFn = fn(&[u8]) -> Result<()>;
type CountFn = fn(&[u8]) -> Result<usize>;
type TranscodeFn = fn(&[u8], &mut [u16]) -> Result<Transcoded>;

/// Hardware features the engine may use.
///
/// The crate never probes the CPU on its own outside [`Capabilities::detect`];
/// platform code hands in what it knows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    bmi2: bool,
}

impl Capabilities {
    /// No hardware acceleration.
    #[inline]
    pub const fn portable() -> Self {
        Self { bmi2: false }
    }

    /// Declare BMI2 (`PEXT`/`PDEP`) available.
    ///
    /// Ignored on targets other than x86_64.
    ///
    /// # Safety
    ///
    /// The CPU executing any engine built from these capabilities must
    /// support BMI2.
    #[inline]
    pub const unsafe fn assume_bmi2() -> Self {
        Self { bmi2: true }
    }

    /// Probe the running CPU.
    #[cfg(feature = "std")]
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if std::is_x86_feature_detected!("bmi2") {
                return Self { bmi2: true };
            }
        }
        Self::portable()
    }

    /// Returns true if BMI2 was declared available.
    #[inline]
    pub const fn has_bmi2(self) -> bool {
        self.bmi2
    }
}

/// A configured validation and transcoding engine.
#[derive(Clone, Copy)]
pub struct Engine {
    order: ByteOrder,
    accelerated: bool,
    validate_fn: ValidateFn,
    count_fn: CountFn,
    transcode_fn: TranscodeFn,
}

impl Engine {
    /// Engine for `order` that uses hardware paths `caps` allows.
    pub fn new(order: ByteOrder, caps: Capabilities) -> Self {
        let engine = if caps.has_bmi2() {
            Self::accelerated(order)
        } else {
            Self::portable(order)
        };
        debug!(
            "utf-8 engine: order={:?} accelerated={}",
            engine.order, engine.accelerated
        );
        engine
    }

    /// Engine for `order` using only portable formulas.
    pub const fn portable(order: ByteOrder) -> Self {
        match order {
            ByteOrder::Little => Self::with_layout::<LittleEndian>(),
            ByteOrder::Big => Self::with_layout::<BigEndian>(),
        }
    }

    /// Portable engine for the target's byte order.
    pub const fn native() -> Self {
        Self::portable(ByteOrder::NATIVE)
    }

    /// Engine for the target's byte order using every feature the running CPU has.
    #[cfg(feature = "std")]
    pub fn detect() -> Self {
        Self::new(ByteOrder::NATIVE, Capabilities::detect())
    }

    const fn with_layout<L: ByteLayout>() -> Self {
        Self {
            order: L::ORDER,
            accelerated: false,
            validate_fn: validate_with::<L>,
            count_fn: count_with::<L>,
            transcode_fn: transcode_with::<L, Portable>,
        }
    }

    #[cfg(target_arch = "x86_64")]
    fn accelerated(order: ByteOrder) -> Self {
        let transcode_fn: TranscodeFn = match order {
            ByteOrder::Little => bmi2::transcode::<LittleEndian>,
            ByteOrder::Big => bmi2::transcode::<BigEndian>,
        };
        Self {
            accelerated: true,
            transcode_fn,
            ..Self::portable(order)
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn accelerated(order: ByteOrder) -> Self {
        Self::portable(order)
    }

    /// Byte order the engine was built for.
    #[inline]
    pub const fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Returns true if transcoding uses hardware bit deposit/extract.
    #[inline]
    pub const fn is_accelerated(&self) -> bool {
        self.accelerated
    }

    /// Check that `src` is well-formed UTF-8.
    #[inline]
    pub fn validate(&self, src: &[u8]) -> Result<()> {
        (self.validate_fn)(src)
    }

    /// Number of UTF-16 code units `src` transcodes to.
    #[inline]
    pub fn utf16_len(&self, src: &[u8]) -> Result<usize> {
        (self.count_fn)(src)
    }

    /// Transcode `src` into `dst`.
    ///
    /// Stops before the first sequence that does not fit and reports
    /// [`TranscodeStatus::OutputFull`]. A `dst` at least as long as `src`
    /// always suffices. On failure, `dst` starts with the code units of
    /// `src[..err.valid_up_to()]` and nothing past them has been written.
    #[inline]
    pub fn transcode(&self, src: &[u8], dst: &mut [u16]) -> Result<Transcoded> {
        (self.transcode_fn)(src, dst)
    }

    /// Transcode `src` into a new vector.
    #[cfg(feature = "alloc")]
    pub fn transcode_to_vec(&self, src: &[u8]) -> Result<Vec<u16>> {
        let mut out = alloc::vec![0u16; src.len()];
        let done = self.transcode(src, &mut out)?;
        debug_assert!(done.is_complete());
        out.truncate(done.written);
        Ok(out)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("order", &self.order)
            .field("accelerated", &self.accelerated)
            .finish()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::native()
    }
}

fn validate_with<L: ByteLayout>(src: &[u8]) -> Result<()> {
    scan::<L, Portable, _>(src, &mut Discard)
        .map(|_| ())
        .inspect_err(|err| trace!("utf-8 validation failed: {}", err))
}

fn count_with<L: ByteLayout>(src: &[u8]) -> Result<usize> {
    let mut counter = Counter::default();
    scan::<L, Portable, _>(src, &mut counter)
        .inspect_err(|err| trace!("utf-16 length failed: {}", err))?;
    Ok(counter.count)
}

#[inline(always)]
fn transcode_with<L: ByteLayout, S: Synthesis>(src: &[u8], dst: &mut [u16]) -> Result<Transcoded> {
    let mut sink = SliceSink::new(dst);
    let read = scan::<L, S, _>(src, &mut sink)
        .inspect_err(|err| trace!("utf-8 transcoding failed: {}", err))?;
    let status = if read == src.len() {
        TranscodeStatus::Complete
    } else {
        TranscodeStatus::OutputFull
    };
    Ok(Transcoded {
        read,
        written: sink.written(),
        status,
    })
}

#[cfg(target_arch = "x86_64")]
mod bmi2 {
    use super::*;
    use crate::bits::Bmi2Bits;
    use crate::synth::Deposit;

    pub(super) fn transcode<L: ByteLayout>(src: &[u8], dst: &mut [u16]) -> Result<Transcoded> {
        // SAFETY: only installed by `Engine::accelerated`, reached when the
        // caller's `Capabilities` vouch for BMI2.
        unsafe { transcode_inner::<L>(src, dst) }
    }

    #[target_feature(enable = "bmi2")]
    unsafe fn transcode_inner<L: ByteLayout>(src: &[u8], dst: &mut [u16]) -> Result<Transcoded> {
        transcode_with::<L, Deposit<Bmi2Bits>>(src, dst)
    }
}

const NATIVE: Engine = Engine::native();

/// Check that `src` is well-formed UTF-8 using the native portable engine.
#[inline]
pub fn validate(src: &[u8]) -> Result<()> {
    NATIVE.validate(src)
}

/// Number of UTF-16 code units `src` transcodes to.
#[inline]
pub fn utf16_len(src: &[u8]) -> Result<usize> {
    NATIVE.utf16_len(src)
}

/// Transcode `src` into `dst` using the native portable engine.
#[inline]
pub fn transcode(src: &[u8], dst: &mut [u16]) -> Result<Transcoded> {
    NATIVE.transcode(src, dst)
}

/// Transcode `src` into a new vector using the native portable engine.
#[cfg(feature = "alloc")]
#[inline]
pub fn transcode_to_vec(src: &[u8]) -> Result<Vec<u16>> {
    NATIVE.transcode_to_vec(src)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Utf8Error};

    #[test]
    fn test_portable_engines() {
        let le = Engine::portable(ByteOrder::Little);
        assert_eq!(le.byte_order(), ByteOrder::Little);
        assert!(!le.is_accelerated());

        let be = Engine::portable(ByteOrder::Big);
        assert_eq!(be.byte_order(), ByteOrder::Big);

        let text = "naïve café 😀";
        let expected: std::vec::Vec<u16> = text.encode_utf16().collect();
        assert_eq!(le.transcode_to_vec(text.as_bytes()).unwrap(), expected);
        assert_eq!(be.transcode_to_vec(text.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn test_portable_capabilities_never_accelerate() {
        let engine = Engine::new(ByteOrder::NATIVE, Capabilities::portable());
        assert!(!engine.is_accelerated());
        assert!(!Capabilities::default().has_bmi2());
    }

    #[test]
    fn test_detected_engine_matches_portable() {
        let detected = Engine::detect();
        let portable = Engine::native();
        let text = "𝄞 clef, 😀 face, € sign, ü, plain";
        assert_eq!(
            detected.transcode_to_vec(text.as_bytes()),
            portable.transcode_to_vec(text.as_bytes())
        );
        #[cfg(target_arch = "x86_64")]
        assert_eq!(
            detected.is_accelerated(),
            std::is_x86_feature_detected!("bmi2")
        );
    }

    #[test]
    fn test_free_functions() {
        assert_eq!(validate(b"Hello"), Ok(()));
        assert_eq!(utf16_len("a😀".as_bytes()), Ok(3));
        assert_eq!(
            validate(&[0xC0, 0x80]),
            Err(Utf8Error::new(0, ErrorKind::OverlongEncoding))
        );

        let mut buf = [0u16; 8];
        let done = transcode("€".as_bytes(), &mut buf).unwrap();
        assert_eq!(done.read, 3);
        assert_eq!(done.written, 1);
        assert!(done.is_complete());
        assert_eq!(buf[0], 0x20AC);
    }

    #[test]
    fn test_transcode_failure_keeps_prefix() {
        let mut buf = [0u16; 8];
        let err = transcode(b"ok\xED\xA0\x80", &mut buf).unwrap_err();
        assert_eq!(err, Utf8Error::new(2, ErrorKind::EncodedSurrogate));
        assert_eq!(&buf[..2], &[b'o' as u16, b'k' as u16]);
    }

    #[test]
    fn test_truncated_sequence_reports_valid_prefix() {
        // "ok€😀" followed by the first two bytes of another "€"
        let src = b"ok\xE2\x82\xAC\xF0\x9F\x98\x80\xE2\x82";
        for engine in [Engine::portable(ByteOrder::Little), Engine::detect()] {
            let mut buf = [0xFFFFu16; 8];
            let err = engine.transcode(src, &mut buf).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTrailingByte);
            assert_eq!(err.offset(), src.len());
            assert_eq!(err.valid_up_to(), 9);

            let written = engine.utf16_len(&src[..err.valid_up_to()]).unwrap();
            assert_eq!(written, 5);
            assert_eq!(&buf[..written], &[0x6F, 0x6B, 0x20AC, 0xD83D, 0xDE00]);
            assert_eq!(buf[written], 0xFFFF);
        }
    }
}
