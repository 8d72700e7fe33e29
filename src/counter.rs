//! Platform high-resolution counter binding.
//!
//! Everything above this module works in counter units: a monotonic `u64` tick
//! value plus a fixed ticks-per-second frequency. The backend selection happens
//! once at open and is visible to callers through [`Counter::backend`].

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::StopwatchError;

/// Counter facility backing a [`Counter`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// CPU time-stamp counter, frequency calibrated against the OS clock.
    Tsc,
    /// `CLOCK_MONOTONIC_RAW` with fixed nanosecond ticks.
    Monotonic,
}

/// Read-only handle to the highest-resolution counter the host exposes.
#[derive(Debug, Clone, Copy)]
pub struct Counter {
    backend: Backend,
    /// Ticks per second; sampled once at open, immutable afterwards.
    frequency: f64,
}

impl Counter {
    /// Open the best counter available on this host.
    ///
    /// Fails with [`StopwatchError::PlatformUnsupported`] when no usable
    /// counter exists or the counter reports a nonpositive frequency.
    pub fn open() -> Result<Self, StopwatchError> {
        let counter = Self::detect()?;

        debug!(
            "Opened {:?} counter at {:.0} ticks/s",
            counter.backend, counter.frequency
        );

        Ok(counter)
    }

    fn detect() -> Result<Self, StopwatchError> {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            let frequency = *TSC_FREQUENCY;

            if !frequency.is_finite() || frequency <= 0.0 {
                return Err(StopwatchError::PlatformUnsupported {
                    reason: "time-stamp counter calibration reported a nonpositive frequency",
                });
            }

            Ok(Self {
                backend: Backend::Tsc,
                frequency,
            })
        }
        #[cfg(all(unix, not(any(target_arch = "x86", target_arch = "x86_64"))))]
        {
            // Probe the clock once so a missing facility surfaces at open
            let mut ts = libc::timespec {
                tv_sec: 0,
                tv_nsec: 0,
            };
            let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC_RAW, &mut ts) };

            if rc != 0 {
                return Err(StopwatchError::PlatformUnsupported {
                    reason: "clock_gettime(CLOCK_MONOTONIC_RAW) is not available",
                });
            }

            Ok(Self {
                backend: Backend::Monotonic,
                frequency: MONOTONIC_TICKS_PER_SEC,
            })
        }
        #[cfg(not(any(unix, target_arch = "x86", target_arch = "x86_64")))]
        {
            Err(StopwatchError::PlatformUnsupported {
                reason: "no high-resolution counter binding for this target",
            })
        }
    }

    /// Current counter value.
    #[inline]
    pub fn now_ticks(&self) -> u64 {
        match self.backend {
            Backend::Tsc => tsc_ticks(),
            Backend::Monotonic => monotonic_ticks(),
        }
    }

    /// Ticks per second.
    #[inline]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Convert a tick delta to seconds.
    #[inline]
    pub fn ticks_to_seconds(&self, ticks: u64) -> f64 {
        ticks as f64 / self.frequency
    }

    /// Convert seconds to the nearest whole tick count.
    #[inline]
    pub fn seconds_to_ticks(&self, seconds: f64) -> u64 {
        (seconds * self.frequency).round() as u64
    }
}

#[cfg(all(unix, not(any(target_arch = "x86", target_arch = "x86_64"))))]
const MONOTONIC_TICKS_PER_SEC: f64 = 1_000_000_000.0;

/// Process-wide calibrated TSC frequency in ticks per second.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
static TSC_FREQUENCY: Lazy<f64> = Lazy::new(calibrate_tsc);

/// Calibrate the TSC by measuring it against the OS monotonic clock.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn calibrate_tsc() -> f64 {
    use std::time::{Duration, Instant};

    const ROUNDS: usize = 5;
    const WINDOW: Duration = Duration::from_millis(20);

    let mut frequencies = [0.0f64; ROUNDS];

    for slot in frequencies.iter_mut() {
        let wall_start = Instant::now();
        let tick_start = tsc_ticks();

        // Busy wait for a tight wall-clock reference
        while wall_start.elapsed() < WINDOW {
            std::hint::spin_loop();
        }

        let tick_delta = tsc_ticks().wrapping_sub(tick_start) as f64;
        let elapsed = wall_start.elapsed().as_secs_f64();

        *slot = tick_delta / elapsed;
    }

    // Median discards rounds skewed by a deschedule
    frequencies.sort_unstable_by(f64::total_cmp);
    let median = frequencies[ROUNDS / 2];

    debug!("Calibrated TSC frequency: {:.0} Hz", median);

    median
}

#[inline]
fn tsc_ticks() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { std::arch::x86_64::_rdtsc() }
    }
    #[cfg(target_arch = "x86")]
    {
        unsafe { std::arch::x86::_rdtsc() }
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    {
        unreachable!("tsc backend is only constructed on x86")
    }
}

#[cfg(unix)]
#[inline]
fn monotonic_ticks() -> u64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC_RAW, &mut ts) };
    debug_assert_eq!(rc, 0);

    ts.tv_sec as u64 * 1_000_000_000 + ts.tv_nsec as u64
}

#[cfg(not(unix))]
#[inline]
fn monotonic_ticks() -> u64 {
    unreachable!("monotonic backend is only constructed on unix")
}
