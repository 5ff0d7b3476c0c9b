use std::time::Duration;

/// Repeating timer advanced by explicit ticks.
///
/// Fires at most once per [`tick`](Self::tick) even when `dt` spans several
/// periods; the backlog is dropped so a stalled loop doesn't replay a burst of
/// updates.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    elapsed: Duration,
    running: bool,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self { period, elapsed: Duration::ZERO, running: false }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Changes the period; the phase restarts.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
        self.elapsed = Duration::ZERO;
    }

    pub fn start(&mut self) {
        self.running = true;
        self.elapsed = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances by `dt`; returns true when the period elapsed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.running || self.period.is_zero() {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.period {
            self.elapsed = Duration::from_nanos((self.elapsed.as_nanos() % self.period.as_nanos()) as u64);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_once_per_period() {
        let mut t = IntervalTimer::new(ms(1000));
        t.start();
        assert!(!t.tick(ms(600)));
        assert!(t.tick(ms(600)));
        assert!(!t.tick(ms(300)));
        assert!(t.tick(ms(500)));
    }

    #[test]
    fn stopped_timer_never_fires() {
        let mut t = IntervalTimer::new(ms(10));
        assert!(!t.tick(ms(100)));
        t.start();
        t.stop();
        assert!(!t.tick(ms(100)));
    }

    #[test]
    fn long_stall_fires_once() {
        let mut t = IntervalTimer::new(ms(100));
        t.start();
        assert!(t.tick(ms(1050)));
        assert!(!t.tick(ms(10)));
    }
}
