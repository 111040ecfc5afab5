//! # Simulated Clock
//!
//! The coordinator treats time as an opaque, monotonic source: it asks for the current
//! simulated time when stamping events and asks to be paused for a number of simulated
//! units while a stage (baking, paying, walking to the register) takes place.
//!
//! [`ScaledClock`] maps simulated units onto wall-clock time:
//! `now = baseline + floor(elapsed / unit)`, where `baseline` is the earliest arrival in
//! the schedule. It is built on `tokio::time`, so tests that run with a paused runtime
//! see exact, instantly advancing simulated time.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

use crate::model::SimTime;

/// Source of simulated time.
#[async_trait]
pub trait Clock: Send + Sync + 'static {
    /// Current simulated time.
    fn now(&self) -> SimTime;

    /// Suspends the caller for `units` simulated time units.
    async fn pause(&self, units: u64);

    /// Suspends the caller until the simulated clock reaches `time`.
    /// Returns immediately if it already has.
    async fn wait_until(&self, time: SimTime);
}

/// A [`Clock`] running at a fixed wall-clock rate.
#[derive(Debug, Clone)]
pub struct ScaledClock {
    baseline: SimTime,
    started: Instant,
    unit: Duration,
}

impl ScaledClock {
    /// Starts a clock reading `baseline` right now and advancing one unit per `unit`.
    pub fn start(baseline: SimTime, unit: Duration) -> Self {
        Self {
            baseline,
            started: Instant::now(),
            unit,
        }
    }

    pub fn baseline(&self) -> SimTime {
        self.baseline
    }

    fn offset_of(&self, time: SimTime) -> Duration {
        let units = u64::try_from(time.saturating_sub(self.baseline)).unwrap_or(0);
        self.span(units)
    }

    /// Wall-clock length of `units`, saturating instead of wrapping.
    fn span(&self, units: u64) -> Duration {
        self.unit.saturating_mul(u32::try_from(units).unwrap_or(u32::MAX))
    }
}

#[async_trait]
impl Clock for ScaledClock {
    fn now(&self) -> SimTime {
        let elapsed = self.started.elapsed().as_nanos();
        let unit = self.unit.as_nanos().max(1);
        let units = SimTime::try_from(elapsed / unit).unwrap_or(SimTime::MAX);
        self.baseline.saturating_add(units)
    }

    async fn pause(&self, units: u64) {
        if units == 0 {
            return;
        }
        tokio::time::sleep(self.span(units)).await;
    }

    async fn wait_until(&self, time: SimTime) {
        tokio::time::sleep_until(self.started + self.offset_of(time)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_scaled_clock_counts_whole_units() {
        let clock = ScaledClock::start(100, Duration::from_secs(1));
        assert_eq!(clock.baseline(), 100);
        assert_eq!(clock.now(), 100);

        clock.pause(2).await;
        assert_eq!(clock.now(), 102);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(clock.now(), 102);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_reaches_target() {
        let clock = ScaledClock::start(10, Duration::from_millis(100));
        clock.wait_until(15).await;
        assert_eq!(clock.now(), 15);

        // Already past: no wait.
        clock.wait_until(12).await;
        assert_eq!(clock.now(), 15);
    }

    #[tokio::test]
    async fn test_long_spans_saturate() {
        let clock = ScaledClock::start(0, Duration::from_secs(1));
        let max = Duration::from_secs(u64::from(u32::MAX));

        assert_eq!(clock.offset_of(3), Duration::from_secs(3));
        assert_eq!(clock.offset_of(i64::from(u32::MAX) + 5), max);
        assert_eq!(clock.offset_of(i64::MAX), max);
        assert_eq!(clock.offset_of(-4), Duration::ZERO);
        assert_eq!(clock.span(u64::MAX), max);
    }
}
