//! # utf8-transcode
//!
//! A `no_std` compatible crate for validating UTF-8 and transcoding it to
//! UTF-16 at close to memory bandwidth.
//!
//! Instead of decoding byte by byte, the engine loads 4- and 8-byte packs
//! and classifies, validates and converts them with closed-form bit
//! arithmetic. Every formula exists in a little-endian and a big-endian
//! spelling, and the surrogate-pair synthesis has a portable form and a
//! BMI2 `PEXT`/`PDEP` form that produce identical output.
//!
//! ## Features
//!
//! - `no_std` compatible, zero allocations in the core
//! - Exact failure offset and kind; no replacement characters
//! - Batched checks for runs of 2-byte and 3-byte sequences
//! - Optional BMI2 acceleration selected once per [`Engine`]
//! - `simd`: 32-byte ASCII run detection with `wide`
//! - `tracing`: engine selection and failure diagnostics
//!
//! ## Example
//!
//! ```
//! use utf8_transcode::{Engine, ErrorKind};
//!
//! let engine = Engine::native();
//!
//! let mut buf = [0u16; 8];
//! let done = engine.transcode("h€😀".as_bytes(), &mut buf).unwrap();
//! assert_eq!(&buf[..done.written], &[0x68, 0x20AC, 0xD83D, 0xDE00]);
//!
//! let err = engine.validate(&[0xED, 0xA0, 0x80]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::EncodedSurrogate);
//! assert_eq!(err.offset(), 0);
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

mod log;

pub mod ascii;
pub mod bits;
pub mod classify;
mod constants;
mod engine;
mod error;
pub mod layout;
mod scan;
pub mod synth;
mod types;
pub mod validate;

pub use bits::{BitOps, SoftBits};
pub use constants::*;
#[cfg(feature = "alloc")]
pub use engine::transcode_to_vec;
pub use engine::{Capabilities, Engine, transcode, utf16_len, validate};
pub use error::{ErrorKind, Result, Utf8Error};
pub use layout::{BigEndian, ByteLayout, LittleEndian};
pub use synth::{Deposit, Portable, Synthesis};
pub use types::*;
