//! # perf-stopwatch: Sub-Microsecond Stopwatch
//!
//! A minimal stopwatch over the host's highest-resolution counter featuring:
//! - Start/stop interval timing with sub-microsecond precision
//! - Cumulative totals across start/stop cycles, stored in raw counter ticks
//! - A settable accumulator for resetting or pre-seeding totals
//! - Scoped interval guards and a `timed!` macro for block timing
//!
//! The stopwatch performs no locking and no blocking; every operation is a
//! synchronous counter read. Mutating operations take `&mut self`, so sharing
//! one stopwatch across threads requires external synchronization.

pub mod counter;
pub mod error;
pub mod stopwatch;
pub mod utils;

pub use counter::{Backend, Counter};
pub use error::StopwatchError;
pub use stopwatch::{IntervalGuard, Stopwatch};

pub type Result<T> = std::result::Result<T, StopwatchError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.trim().is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "perf-stopwatch");
    }
}
