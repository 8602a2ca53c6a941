//! Stopwatch for measuring how long interactive steps take

use std::time::{Duration, Instant};

/// Accumulates elapsed time over any number of start/stop intervals
#[derive(Debug, Clone, Default)]
pub struct Timer {
    started: Option<Instant>,
    total: Duration,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an interval; restarting discards the running interval
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Stop the running interval and return its length.
    /// Returns zero when the timer was not running.
    pub fn stop(&mut self) -> Duration {
        let Some(started) = self.started.take() else {
            return Duration::ZERO;
        };
        let elapsed = started.elapsed();
        self.total += elapsed;
        elapsed
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Sum of all stopped intervals
    #[must_use]
    pub fn total(&self) -> Duration {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_without_start_is_zero() {
        let mut timer = Timer::new();
        assert_eq!(timer.stop(), Duration::ZERO);
        assert_eq!(timer.total(), Duration::ZERO);
    }

    #[test]
    fn test_intervals_accumulate() {
        let mut timer = Timer::new();
        timer.start();
        assert!(timer.is_running());
        std::thread::sleep(Duration::from_millis(2));
        let first = timer.stop();
        assert!(!timer.is_running());
        assert!(first >= Duration::from_millis(2));

        timer.start();
        let second = timer.stop();
        assert_eq!(timer.total(), first + second);
    }
}
