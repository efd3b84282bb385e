//! Logging shims: `log` or `defmt` macros when enabled, no-ops otherwise.

#![allow(unused_macros, unused_imports)]

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        pub(crate) use log::{debug, trace};
    } else if #[cfg(feature = "defmt")] {
        pub(crate) use defmt::{debug, trace};
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! trace {
            ($($arg:tt)*) => {{}};
        }
        pub(crate) use debug;
        pub(crate) use trace;
    }
}
