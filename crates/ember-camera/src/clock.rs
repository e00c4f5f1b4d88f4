// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Monotonic time sources for camera transitions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Deterministic clock that only moves when told to.
///
/// Reports `origin + elapsed`; `elapsed` is stored as whole nanoseconds in an
/// atomic, so one clock can be shared between a driver thread and readers.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed_nanos: AtomicU64,
}

impl ManualClock {
    /// Clock frozen at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Clock frozen at `origin`.
    pub const fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            elapsed_nanos: AtomicU64::new(0),
        }
    }

    /// Instant the clock reports when no time has elapsed.
    pub const fn origin(&self) -> Instant {
        self.origin
    }

    /// Time elapsed since [`ManualClock::origin`].
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::Acquire))
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        let step = saturating_nanos(step);
        // fetch_update only fails when the closure returns None.
        let _ = self
            .elapsed_nanos
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(step))
            });
    }

    /// Sets the elapsed time since the origin. Moving backwards is allowed.
    pub fn set_elapsed(&self, elapsed: Duration) {
        self.elapsed_nanos
            .store(saturating_nanos(elapsed), Ordering::Release);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new();
        let t0 = clock.now();
        assert_eq!(clock.now(), t0);
        clock.advance(Duration::from_millis(250));
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - t0, Duration::from_millis(500));
        clock.set_elapsed(Duration::from_millis(100));
        assert_eq!(clock.elapsed(), Duration::from_millis(100));
        assert_eq!(clock.now(), clock.origin() + Duration::from_millis(100));
    }

    #[test]
    fn shared_clock_is_seen_by_every_handle() {
        let clock = Arc::new(ManualClock::new());
        let reader = Arc::clone(&clock);
        let driver = std::thread::spawn(move || clock.advance(Duration::from_secs(1)));
        driver.join().unwrap();
        assert_eq!(reader.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
