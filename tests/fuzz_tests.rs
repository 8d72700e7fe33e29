//! Fuzzing tests to discover edge cases and ensure robustness
//!
//! These tests use property-based testing and random input generation
//! to find potential bugs and edge cases

use proptest::prelude::*;

use perf_stopwatch::Stopwatch;

proptest! {
    #[test]
    fn fuzz_set_total_round_trips_within_one_tick(seconds in 0.0f64..1_000_000.0) {
        let mut stopwatch = Stopwatch::new().unwrap();
        stopwatch.stop();

        stopwatch.set_total(seconds);
        let total = stopwatch.total();

        let one_tick = 1.0 / stopwatch.frequency();
        prop_assert!(
            (total - seconds).abs() <= one_tick,
            "set {} read back {}", seconds, total
        );
    }

    #[test]
    fn fuzz_last_set_total_wins(first in 0.0f64..1_000.0, second in 0.0f64..1_000.0) {
        let mut stopwatch = Stopwatch::new().unwrap();
        stopwatch.stop();

        stopwatch.set_total(first);
        stopwatch.set_total(second);

        let one_tick = 1.0 / stopwatch.frequency();
        prop_assert!((stopwatch.total() - second).abs() <= one_tick);
    }

    #[test]
    fn fuzz_stop_when_stopped_never_accumulates(seconds in 0.0f64..1_000.0) {
        let mut stopwatch = Stopwatch::new().unwrap();
        stopwatch.stop();

        stopwatch.set_total(seconds);
        let before = stopwatch.total();

        prop_assert_eq!(stopwatch.stop(), 0.0);
        prop_assert_eq!(stopwatch.total(), before);
        prop_assert_eq!(stopwatch.elapsed(), 0.0);
    }

    #[test]
    fn fuzz_total_never_decreases_while_running(spins in 1u32..10_000) {
        let mut stopwatch = Stopwatch::new().unwrap();
        stopwatch.set_total(0.0);

        let early = stopwatch.total();
        for _ in 0..spins {
            std::hint::black_box(0u64);
        }
        let late = stopwatch.total();

        prop_assert!(late >= early, "total went backwards: {} then {}", early, late);
        prop_assert!(stopwatch.is_running());
    }

    #[test]
    fn fuzz_restart_discards_the_previous_start_point(spins in 1u32..10_000) {
        let mut stopwatch = Stopwatch::new().unwrap();

        for _ in 0..spins {
            std::hint::black_box(0u64);
        }
        let before_restart = stopwatch.elapsed();

        stopwatch.start();
        let after_restart = stopwatch.elapsed();

        prop_assert!(after_restart <= before_restart + 1e-3);
    }
}
