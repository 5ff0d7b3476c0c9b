use std::time::Duration;

use super::Tween;
use super::target::WeakTarget;

/// Animation tree: a single tween or a group of children.
#[derive(Debug, Clone)]
pub enum Animation {
    Tween(Tween),
    /// Children run together; finishes when the last one finishes.
    Parallel(Group),
    /// Children run one after another.
    Sequential(Group),
}

/// Children plus per-child progress.
#[derive(Debug, Clone, Default)]
pub struct Group {
    children: Vec<Animation>,
    done: Vec<bool>,
    cursor: usize,
}

impl Group {
    fn new(children: Vec<Animation>) -> Self {
        let done = vec![false; children.len()];
        Self { children, done, cursor: 0 }
    }

    pub fn children(&self) -> &[Animation] {
        &self.children
    }
}

impl Animation {
    pub fn parallel(children: impl IntoIterator<Item = Animation>) -> Self {
        Animation::Parallel(Group::new(children.into_iter().collect()))
    }

    pub fn sequential(children: impl IntoIterator<Item = Animation>) -> Self {
        Animation::Sequential(Group::new(children.into_iter().collect()))
    }

    /// Total running time; `None` if any part loops forever.
    pub fn total_duration(&self) -> Option<Duration> {
        match self {
            Animation::Tween(t) => t.total_duration(),
            Animation::Parallel(g) => g
                .children
                .iter()
                .map(Animation::total_duration)
                .try_fold(Duration::ZERO, |acc, d| d.map(|d| acc.max(d))),
            Animation::Sequential(g) => g
                .children
                .iter()
                .map(Animation::total_duration)
                .try_fold(Duration::ZERO, |acc, d| d.map(|d| acc + d)),
        }
    }

    pub(crate) fn reset(&mut self) {
        match self {
            Animation::Tween(t) => t.reset(),
            Animation::Parallel(g) | Animation::Sequential(g) => {
                g.cursor = 0;
                g.done.iter_mut().for_each(|d| *d = false);
                g.children.iter_mut().for_each(Animation::reset);
            }
        }
    }

    /// Advances by `dt`, writing values into `target`. Returns leftover time
    /// once the whole tree has finished.
    pub(crate) fn step(&mut self, dt: Duration, target: &WeakTarget) -> Option<Duration> {
        match self {
            Animation::Tween(t) => t.step(dt, target),
            Animation::Parallel(g) => {
                let mut leftover: Option<Duration> = None;
                for (child, done) in g.children.iter_mut().zip(g.done.iter_mut()) {
                    if *done {
                        continue;
                    }
                    if let Some(left) = child.step(dt, target) {
                        *done = true;
                        leftover = Some(leftover.map_or(left, |l| l.min(left)));
                    }
                }
                if g.done.iter().all(|d| *d) {
                    Some(leftover.unwrap_or(dt))
                } else {
                    None
                }
            }
            Animation::Sequential(g) => {
                let mut dt = dt;
                while let Some(child) = g.children.get_mut(g.cursor) {
                    match child.step(dt, target) {
                        Some(left) => {
                            g.done[g.cursor] = true;
                            g.cursor += 1;
                            dt = left;
                        }
                        None => return None,
                    }
                }
                Some(dt)
            }
        }
    }
}

impl From<Tween> for Animation {
    fn from(t: Tween) -> Self {
        Animation::Tween(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{AnimTarget, Easing};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn sequential_runs_children_in_order() {
        let target = AnimTarget::new();
        let weak = target.downgrade();
        let mut anim = Animation::sequential([
            Tween::new("a", 1.0, ms(100)).from(0.0).easing(Easing::Linear).into(),
            Tween::new("b", 1.0, ms(100)).from(0.0).easing(Easing::Linear).into(),
        ]);
        assert!(anim.step(ms(50), &weak).is_none());
        assert_eq!(target.scalar("a"), Some(0.5));
        assert_eq!(target.scalar("b"), None);

        assert!(anim.step(ms(100), &weak).is_none());
        assert_eq!(target.scalar("a"), Some(1.0));
        assert_eq!(target.scalar("b"), Some(0.5));

        assert_eq!(anim.step(ms(60), &weak), Some(ms(10)));
        assert_eq!(target.scalar("b"), Some(1.0));
    }

    #[test]
    fn parallel_finishes_with_longest_child() {
        let target = AnimTarget::new();
        let weak = target.downgrade();
        let mut anim = Animation::parallel([
            Tween::new("a", 1.0, ms(50)).from(0.0).into(),
            Tween::new("b", 1.0, ms(100)).from(0.0).into(),
        ]);
        assert!(anim.step(ms(60), &weak).is_none());
        assert_eq!(target.scalar("a"), Some(1.0));
        assert!(anim.step(ms(40), &weak).is_some());
        assert_eq!(target.scalar("b"), Some(1.0));
    }

    #[test]
    fn total_duration_of_groups() {
        let seq = Animation::sequential([
            Tween::new("a", 1.0, ms(50)).into(),
            Tween::new("b", 1.0, ms(100)).into(),
        ]);
        assert_eq!(seq.total_duration(), Some(ms(150)));
        let par = Animation::parallel([
            Tween::new("a", 1.0, ms(50)).into(),
            Tween::new("b", 1.0, ms(100)).loops(-1).into(),
        ]);
        assert_eq!(par.total_duration(), None);
    }
}
