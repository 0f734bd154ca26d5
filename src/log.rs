//! Diagnostic macros.
//!
//! Forward to `tracing` with the `tracing` feature and expand to nothing
//! otherwise. Arguments are still type-checked when disabled.

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(not(feature = "tracing"))]
        if false {
            let _ = ::core::format_args!($($arg)*);
        };
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(not(feature = "tracing"))]
        if false {
            let _ = ::core::format_args!($($arg)*);
        };
    }};
}

pub(crate) use debug;
pub(crate) use trace;
