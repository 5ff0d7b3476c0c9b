use std::time::Duration;

use super::target::WeakTarget;
use super::{AnimValue, Easing};

/// Intermediate value at a fraction of the eased timeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Keyframe {
    /// Position in (0, 1).
    pub at: f32,
    pub value: AnimValue,
}

/// Interpolates one property between key values over a duration.
///
/// The easing curve maps the overall progress of one loop; keyframes are then
/// interpolated linearly in eased time. When no start value is given it is
/// read from the target when the tween first advances.
#[derive(Debug, Clone)]
pub struct Tween {
    property: String,
    start: Option<AnimValue>,
    keyframes: Vec<Keyframe>,
    end: AnimValue,
    duration: Duration,
    easing: Easing,
    /// Number of passes; `-1` repeats forever.
    loops: i32,

    elapsed: Duration,
    resolved_start: Option<AnimValue>,
}

impl Tween {
    pub fn new(property: impl Into<String>, end: impl Into<AnimValue>, duration: Duration) -> Self {
        Self {
            property: property.into(),
            start: None,
            keyframes: Vec::new(),
            end: end.into(),
            duration,
            easing: Easing::default(),
            loops: 1,
            elapsed: Duration::ZERO,
            resolved_start: None,
        }
    }

    pub fn from(mut self, start: impl Into<AnimValue>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Adds a keyframe; positions outside (0, 1) are ignored.
    pub fn key(mut self, at: f32, value: impl Into<AnimValue>) -> Self {
        if at > 0.0 && at < 1.0 {
            self.keyframes.push(Keyframe { at, value: value.into() });
            self.keyframes.sort_by(|a, b| a.at.total_cmp(&b.at));
        }
        self
    }

    /// Loop count; `-1` loops forever, `0` is treated as one pass.
    pub fn loops(mut self, loops: i32) -> Self {
        self.loops = if loops == 0 { 1 } else { loops };
        self
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Total running time; `None` when looping forever.
    pub fn total_duration(&self) -> Option<Duration> {
        if self.loops < 0 {
            None
        } else {
            Some(self.duration * self.loops as u32)
        }
    }

    /// Property value at linear progress `p` within one loop.
    pub fn value_at(&self, start: AnimValue, p: f32) -> AnimValue {
        let t = self.easing.apply(p);
        let mut prev_at = 0.0;
        let mut prev = start;
        for kf in &self.keyframes {
            if t <= kf.at {
                return prev.lerp(kf.value, (t - prev_at) / (kf.at - prev_at));
            }
            prev_at = kf.at;
            prev = kf.value;
        }
        let span = 1.0 - prev_at;
        if span <= 0.0 {
            return self.end;
        }
        prev.lerp(self.end, (t - prev_at) / span)
    }

    pub(crate) fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.resolved_start = None;
    }

    /// Advances by `dt` and writes the new value. Returns the unused part of
    /// `dt` once the tween has finished.
    pub(crate) fn step(&mut self, dt: Duration, target: &WeakTarget) -> Option<Duration> {
        let start = *self.resolved_start.get_or_insert_with(|| {
            self.start.or_else(|| target.get(&self.property)).unwrap_or(self.end)
        });
        self.elapsed += dt;

        if let Some(total) = self.total_duration() {
            if self.elapsed >= total {
                target.set(&self.property, self.end);
                return Some(self.elapsed - total);
            }
        }

        let nanos = self.duration.as_nanos().max(1);
        let into_loop = self.elapsed.as_nanos() % nanos;
        let p = into_loop as f32 / nanos as f32;
        target.set(&self.property, self.value_at(start, p));
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyframes_split_the_timeline() {
        let t = Tween::new("opacity", 1.0, Duration::from_millis(100))
            .from(1.0)
            .key(0.5, 0.5)
            .easing(Easing::Linear);
        let s = AnimValue::Scalar(1.0);
        assert_eq!(t.value_at(s, 0.0), AnimValue::Scalar(1.0));
        assert_eq!(t.value_at(s, 0.25), AnimValue::Scalar(0.75));
        assert_eq!(t.value_at(s, 0.5), AnimValue::Scalar(0.5));
        assert_eq!(t.value_at(s, 1.0), AnimValue::Scalar(1.0));
    }

    #[test]
    fn out_of_range_keys_are_dropped() {
        let t = Tween::new("x", 1.0, Duration::from_millis(1)).key(0.0, 5.0).key(1.0, 5.0).key(1.5, 5.0);
        assert!(t.keyframes.is_empty());
    }

    #[test]
    fn infinite_has_no_total() {
        let t = Tween::new("x", 1.0, Duration::from_millis(10)).loops(-1);
        assert_eq!(t.total_duration(), None);
        let t = Tween::new("x", 1.0, Duration::from_millis(10)).loops(3);
        assert_eq!(t.total_duration(), Some(Duration::from_millis(30)));
    }
}
