//! Fixed-rate simulation clock
//!
//! The timer turns irregular wall-clock polling into a whole number of
//! simulation ticks. Leftover time below one interval is carried into the
//! next poll, so the long-run tick rate stays exact no matter how unevenly
//! the render loop calls [`Timer::update`].

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Timer {
    interval: Duration,
    tick: u64,
    remainder: Duration,
    last_update: Option<Instant>,
}

impl Timer {
    /// Create a timer producing one tick per `interval`. A zero interval is
    /// raised to one nanosecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_nanos(1)),
            tick: 0,
            remainder: Duration::ZERO,
            last_update: None,
        }
    }

    /// Total ticks produced since creation or the last reset
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll the wall clock. Returns the number of ticks that elapsed since
    /// the previous poll. Never blocks.
    pub fn update(&mut self) -> u64 {
        self.update_at(Instant::now())
    }

    /// Poll with an explicit instant. The first call after creation, reset
    /// or [`Timer::rebase`] only records the baseline and returns 0.
    pub fn update_at(&mut self, now: Instant) -> u64 {
        let elapsed = match self.last_update {
            Some(prev) => now.saturating_duration_since(prev),
            None => Duration::ZERO,
        };
        self.last_update = Some(now);
        self.advance(elapsed)
    }

    /// Feed an explicit amount of elapsed time into the timer
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        let total = self.remainder.as_nanos() + elapsed.as_nanos();
        let interval = self.interval.as_nanos();
        let ticks = (total / interval) as u64;

        // The remainder is below one interval, which always fits in u64 nanos
        self.remainder = Duration::from_nanos((total % interval) as u64);
        self.tick += ticks;
        ticks
    }

    /// Forget the wall-clock baseline without touching the tick count, so
    /// time spent paused is not replayed as a burst of ticks.
    pub fn rebase(&mut self) {
        self.last_update = None;
    }

    /// Zero the tick count and remainder
    pub fn reset(&mut self) {
        self.tick = 0;
        self.remainder = Duration::ZERO;
        self.last_update = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twelve_hz() -> Timer {
        Timer::new(Duration::from_secs(1) / 12)
    }

    #[test]
    fn test_sub_interval_updates_accumulate() {
        let mut timer = twelve_hz();

        for _ in 0..83 {
            assert_eq!(timer.advance(Duration::from_millis(1)), 0);
        }
        assert_eq!(timer.tick(), 0);

        // 84ms crosses the 83.33ms interval
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(timer.tick(), 1);
    }

    #[test]
    fn test_no_drift_over_many_small_updates() {
        let mut timer = twelve_hz();

        for _ in 0..10_000 {
            timer.advance(Duration::from_millis(1));
        }

        // 10 seconds at 12 Hz
        assert_eq!(timer.tick(), 120);
    }

    #[test]
    fn test_large_delta_yields_multiple_ticks() {
        let mut timer = Timer::new(Duration::from_millis(100));
        assert_eq!(timer.advance(Duration::from_millis(350)), 3);
        assert_eq!(timer.advance(Duration::from_millis(50)), 1);
        assert_eq!(timer.tick(), 4);
        // 400ms left no remainder behind
        assert_eq!(timer.advance(Duration::from_millis(99)), 0);
    }

    #[test]
    fn test_update_at_uses_wall_clock_delta() {
        let mut timer = Timer::new(Duration::from_millis(100));
        let start = Instant::now();

        assert_eq!(timer.update_at(start), 0);
        assert_eq!(timer.update_at(start + Duration::from_millis(60)), 0);
        assert_eq!(timer.update_at(start + Duration::from_millis(120)), 1);
        assert_eq!(timer.update_at(start + Duration::from_millis(410)), 3);
        assert_eq!(timer.tick(), 4);
    }

    #[test]
    fn test_update_at_ignores_time_going_backwards() {
        let mut timer = Timer::new(Duration::from_millis(100));
        let start = Instant::now() + Duration::from_secs(1);

        timer.update_at(start);
        assert_eq!(timer.update_at(start - Duration::from_millis(500)), 0);
        assert_eq!(timer.tick(), 0);
    }

    #[test]
    fn test_rebase_skips_paused_time() {
        let mut timer = Timer::new(Duration::from_millis(100));
        let start = Instant::now();

        timer.update_at(start);
        timer.update_at(start + Duration::from_millis(150));
        assert_eq!(timer.tick(), 1);

        timer.rebase();
        assert_eq!(timer.update_at(start + Duration::from_secs(10)), 0);
        // Remainder from before the pause is kept
        assert_eq!(
            timer.update_at(start + Duration::from_secs(10) + Duration::from_millis(50)),
            1
        );
    }

    #[test]
    fn test_reset() {
        let mut timer = Timer::new(Duration::from_millis(100));
        timer.advance(Duration::from_millis(250));
        assert_eq!(timer.tick(), 2);

        timer.reset();
        assert_eq!(timer.tick(), 0);
        assert_eq!(timer.advance(Duration::from_millis(60)), 0);
        assert_eq!(timer.tick(), 0);
    }
}
