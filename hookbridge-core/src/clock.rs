//! Monotonic session clock.
//!
//! Timestamps are fractional milliseconds since an epoch fixed the first
//! time the clock is touched.  The epoch is set through `OnceLock`, so
//! concurrent first use from several threads agrees on a single anchor.

use std::sync::OnceLock;
use std::time::Instant;

/// Lazily anchored high-resolution clock.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    epoch: OnceLock<Instant>,
}

static SESSION_CLOCK: MonotonicClock = MonotonicClock::new();

/// The process-wide clock used by the hook session and `GetTimestamp`.
pub fn global() -> &'static MonotonicClock {
    &SESSION_CLOCK
}

impl MonotonicClock {
    pub const fn new() -> Self {
        Self {
            epoch: OnceLock::new(),
        }
    }

    /// Anchor the epoch if it is not anchored yet.  Later calls are no-ops.
    pub fn init(&self) -> Instant {
        *self.epoch.get_or_init(Instant::now)
    }

    pub fn is_initialized(&self) -> bool {
        self.epoch.get().is_some()
    }

    /// Milliseconds elapsed since the epoch, with sub-microsecond resolution.
    pub fn now_ms(&self) -> f64 {
        self.init().elapsed().as_nanos() as f64 / 1_000_000.0
    }
}
