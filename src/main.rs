use std::thread;
use std::time::Duration;

use tracing::{info, Level};

use perf_stopwatch::utils::format_seconds;
use perf_stopwatch::{timed, Stopwatch};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Starting perf-stopwatch demo v{}", env!("CARGO_PKG_VERSION"));

    let mut stopwatch = Stopwatch::new()?;
    info!(
        "Counter: {:?} backend at {:.2} MHz, precision {}",
        stopwatch.backend(),
        stopwatch.frequency() / 1e6,
        format_seconds(stopwatch.precision())
    );

    // The constructor starts timing immediately; close out that interval
    let startup = stopwatch.stop();
    info!("Startup interval: {}", format_seconds(startup));

    stopwatch.set_total(0.0);

    let checksum = timed!(stopwatch, {
        let mut acc = 0u64;
        for i in 0..5_000_000u64 {
            acc = acc.wrapping_add(i.wrapping_mul(i));
        }
        acc
    });
    info!(
        "Checksum workload ({}): {}",
        checksum,
        format_seconds(stopwatch.total())
    );

    stopwatch.start();
    thread::sleep(Duration::from_millis(100));
    let slept = stopwatch.stop();
    info!("Timed 100ms sleep: {}", format_seconds(slept));

    let sorted_len = {
        let guard = stopwatch.interval();
        let mut data: Vec<u64> = (0..500_000).rev().collect();
        data.sort_unstable();
        info!("Sort interval so far: {}", format_seconds(guard.elapsed()));
        data.len()
    };
    info!("Sorted {} elements", sorted_len);

    info!("Total measured time: {}", format_seconds(stopwatch.total()));

    Ok(())
}
