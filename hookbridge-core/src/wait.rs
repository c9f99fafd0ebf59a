//! Sub-millisecond precision delay.
//!
//! OS sleep granularity is around 1ms (often 15.6ms without a raised timer
//! resolution), so the waiter sleeps for all but the last millisecond and
//! spins on the monotonic clock for the remainder.  The spin tail costs at
//! most ~1ms of CPU per call.

use std::hint;
use std::thread;
use std::time::Duration;

use crate::clock::{self, MonotonicClock};

/// Block the calling thread for `ms` milliseconds on the session clock.
pub fn precise_sleep(ms: f64) {
    precise_sleep_on(clock::global(), ms);
}

/// Block for `ms` milliseconds measured on `clock`.
///
/// Returns immediately for `ms <= 0`, NaN, or infinity.
pub fn precise_sleep_on(clock: &MonotonicClock, ms: f64) {
    if !ms.is_finite() || ms <= 0.0 {
        return;
    }

    let start = clock.now_ms();
    if ms > 1.0 {
        thread::sleep(Duration::from_secs_f64((ms - 1.0) / 1000.0));
    }
    while clock.now_ms() - start < ms {
        hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_non_positive_returns_immediately() {
        for ms in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let start = Instant::now();
            precise_sleep(ms);
            assert!(start.elapsed() < Duration::from_millis(1), "{ms} waited");
        }
    }

    #[test]
    fn test_sub_millisecond_spin() {
        let start = Instant::now();
        precise_sleep(0.5);
        assert!(start.elapsed() >= Duration::from_micros(500));
    }

    #[test]
    fn test_waits_at_least_requested() {
        let clock = MonotonicClock::new();
        for ms in [1.0, 2.5, 10.0] {
            let start = clock.now_ms();
            precise_sleep_on(&clock, ms);
            assert!(clock.now_ms() - start >= ms);
        }
    }
}
