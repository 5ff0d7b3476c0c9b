use std::time::Duration;

use milk_engine::time::IntervalTimer;

/// Step period of the display-value approach.
const STEP: Duration = Duration::from_millis(16);
/// Share of the remaining gap closed per step.
const RATE: f64 = 0.15;
/// Gap below which the display value snaps onto the target.
const SNAP: f64 = 0.1;

/// A ranged value with a display value that eases toward it.
///
/// Used by bars and gauges: `set` clamps the target into `[min, max]`;
/// the display value then closes 15% of the gap every 16 ms until the gap
/// drops under 0.1, at which point it snaps. When smoothing is off the
/// display value follows the target immediately.
#[derive(Debug, Clone)]
pub struct SmoothedValue {
    value: f64,
    display: f64,
    min: f64,
    max: f64,
    animated: bool,
    timer: IntervalTimer,
}

impl SmoothedValue {
    pub fn new(min: f64, max: f64) -> Self {
        Self { value: min, display: min, min, max, animated: true, timer: IntervalTimer::new(STEP) }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn display(&self) -> f64 {
        self.display
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// True while the display value is still travelling.
    pub fn is_settling(&self) -> bool {
        self.timer.is_running()
    }

    pub fn set(&mut self, value: f64) {
        self.value = clamp_to(value, self.min, self.max);
        if self.animated {
            if !self.timer.is_running() {
                self.timer.start();
            }
        } else {
            self.display = self.value;
        }
    }

    /// Changes the range. The current target is not re-clamped until the
    /// next `set`.
    pub fn set_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
        if !animated {
            self.timer.stop();
            self.display = self.value;
        }
    }

    /// Fraction of the range covered by the display value, clamped to `[0, 1]`.
    /// A non-positive range yields 0.
    pub fn fraction(&self) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 { ((self.display - self.min) / range).clamp(0.0, 1.0) } else { 0.0 }
    }

    /// Advances the approach. Returns `true` when the display value moved.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.timer.tick(dt) {
            return false;
        }
        self.step();
        true
    }

    fn step(&mut self) {
        let gap = self.value - self.display;
        if gap.abs() < SNAP {
            self.display = self.value;
            self.timer.stop();
        } else {
            self.display += gap * RATE;
        }
    }
}

/// `value.clamp(min, max)` that tolerates an inverted range.
fn clamp_to(value: f64, min: f64, max: f64) -> f64 {
    if min <= max { value.clamp(min, max) } else { value.clamp(max, min) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(v: &mut SmoothedValue) -> bool {
        v.tick(STEP)
    }

    #[test]
    fn set_clamps_into_range() {
        let mut v = SmoothedValue::new(0.0, 100.0);
        v.set(150.0);
        assert_eq!(v.value(), 100.0);
        v.set(-5.0);
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn first_step_closes_fifteen_percent() {
        let mut v = SmoothedValue::new(0.0, 100.0);
        v.set(100.0);
        assert!(step(&mut v));
        assert!((v.display() - 15.0).abs() < 1e-9);
        assert!(step(&mut v));
        assert!((v.display() - 27.75).abs() < 1e-9);
    }

    #[test]
    fn converges_and_snaps() {
        let mut v = SmoothedValue::new(0.0, 100.0);
        v.set(80.0);
        let mut last_gap = f64::MAX;
        for _ in 0..200 {
            step(&mut v);
            let gap = (v.value() - v.display()).abs();
            assert!(gap <= last_gap);
            last_gap = gap;
        }
        assert_eq!(v.display(), 80.0);
        assert!(!v.is_settling());
    }

    #[test]
    fn unanimated_follows_immediately() {
        let mut v = SmoothedValue::new(0.0, 10.0);
        v.set_animated(false);
        v.set(7.0);
        assert_eq!(v.display(), 7.0);
        assert!(!step(&mut v));
    }

    #[test]
    fn partial_period_does_not_step() {
        let mut v = SmoothedValue::new(0.0, 100.0);
        v.set(50.0);
        assert!(!v.tick(Duration::from_millis(10)));
        assert_eq!(v.display(), 0.0);
    }

    #[test]
    fn fraction_of_zero_range_is_zero() {
        let mut v = SmoothedValue::new(5.0, 5.0);
        v.set_animated(false);
        v.set(5.0);
        assert_eq!(v.fraction(), 0.0);
    }
}
