//! Logging shims
//!
//! Forwards to `defmt` when the feature is enabled, otherwise expands to
//! nothing so call sites stay unconditional.
//!
//! The no-op macros carry a `log_` prefix; a bare `warn` would collide with
//! the built-in `#[warn]` attribute when re-exported by name.

#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, trace, warn};

#[cfg(not(feature = "defmt"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "defmt"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "defmt"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "defmt"))]
pub(crate) use log_debug as debug;
#[cfg(not(feature = "defmt"))]
pub(crate) use log_trace as trace;
#[cfg(not(feature = "defmt"))]
pub(crate) use log_warn as warn;
