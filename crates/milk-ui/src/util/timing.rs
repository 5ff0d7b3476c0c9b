//! Call-rate limiters driven by the UI tick.
//!
//! Both are plain values owned by whoever needs them; dropping one drops any
//! pending call with it.

use std::time::Duration;

/// Delays a call until `delay` has passed without another request.
/// Each [`call`](Self::call) replaces the pending action and restarts the wait.
pub struct Debouncer {
    delay: Duration,
    elapsed: Duration,
    pending: Option<Box<dyn FnOnce()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, elapsed: Duration::ZERO, pending: None }
    }

    pub fn call(&mut self, action: impl FnOnce() + 'static) {
        self.pending = Some(Box::new(action));
        self.elapsed = Duration::ZERO;
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Runs the pending action once the delay has elapsed. Returns `true` if it ran.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.pending.is_none() {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.delay {
            return false;
        }
        match self.pending.take() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

/// Lets at most one call through per `interval`. The first call always runs.
pub struct Throttler {
    interval: Duration,
    since_last: Option<Duration>,
}

impl Throttler {
    pub fn new(interval: Duration) -> Self {
        Self { interval, since_last: None }
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Some(t) = self.since_last.as_mut() {
            *t += dt;
        }
    }

    /// Runs `action` if the interval has passed since the last run. Returns
    /// whether it ran.
    pub fn call(&mut self, action: impl FnOnce()) -> bool {
        let ready = self.since_last.is_none_or(|t| t >= self.interval);
        if ready {
            action();
            self.since_last = Some(Duration::ZERO);
        }
        ready
    }
}
