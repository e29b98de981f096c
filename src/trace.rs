//! Feature-gated tracing macros for zero-overhead instrumentation.
//!
//! With the `tracing` feature enabled this re-exports the tracing crate's
//! macros; without it every macro compiles to a no-op and the argument
//! expressions are never evaluated.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info};

#[cfg(not(feature = "tracing"))]
mod noop {
    /// No-op debug macro
    #[macro_export]
    macro_rules! debug {
        ($($tt:tt)*) => {};
    }

    /// No-op info macro
    #[macro_export]
    macro_rules! info {
        ($($tt:tt)*) => {};
    }

    pub use crate::{debug, info};
}

#[cfg(not(feature = "tracing"))]
pub use noop::*;

/// Initialize a tracing subscriber for tests and development.
///
/// Respects `RUST_LOG`; safe to call more than once.
#[cfg(feature = "tracing")]
pub fn init_subscriber() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .ok();
}

#[cfg(not(feature = "tracing"))]
pub fn init_subscriber() {}
