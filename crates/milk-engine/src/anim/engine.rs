use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use super::target::{TargetId, WeakTarget};
use super::{AnimTarget, AnimValue, Animation, Easing, Tween};

/// Completion callback for a named animation.
pub type FinishedCallback = Box<dyn FnOnce()>;

/// Engine shared between the application loop and widgets.
pub type SharedEngine = Rc<RefCell<AnimationEngine>>;

/// Address of a registered animation: a target plus a slot name.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AnimHandle {
    pub target: TargetId,
    pub name: String,
}

/// Natural completion of a named animation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AnimEvent {
    pub target: TargetId,
    pub name: String,
}

struct Running {
    anim: Animation,
    paused: bool,
    on_finished: Option<FinishedCallback>,
}

struct Slot {
    target: WeakTarget,
    running: HashMap<String, Running>,
}

/// Result of [`AnimationEngine::advance`]: events plus the callbacks still to run.
///
/// Splitting advance from [`fire`](Self::fire) lets callers release their
/// borrow of a [`SharedEngine`] before callbacks that may start new animations.
#[must_use]
pub struct Completed {
    events: Vec<AnimEvent>,
    callbacks: Vec<FinishedCallback>,
}

impl Completed {
    pub fn events(&self) -> &[AnimEvent] {
        &self.events
    }

    /// Runs completion callbacks in completion order and returns the events.
    pub fn fire(self) -> Vec<AnimEvent> {
        for cb in self.callbacks {
            cb();
        }
        self.events
    }
}

/// Registry of running animations, keyed by target and slot name.
///
/// At most one animation exists per `(target, name)`. Registering under an
/// occupied name discards the previous animation without running its
/// completion callback. Targets are held weakly; a dropped target's entries
/// are purged on the next [`advance`](Self::advance).
#[derive(Default)]
pub struct AnimationEngine {
    slots: HashMap<TargetId, Slot>,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedEngine {
        Rc::new(RefCell::new(Self::new()))
    }

    // ── registration ──────────────────────────────────────────────────────

    /// Registers `animation` under `name`, replacing any animation already there.
    pub fn play(&mut self, target: &AnimTarget, name: &str, animation: impl Into<Animation>) -> AnimHandle {
        let slot = self.slots.entry(target.id()).or_insert_with(|| Slot {
            target: target.downgrade(),
            running: HashMap::new(),
        });
        let replaced = slot.running.insert(
            name.to_string(),
            Running { anim: animation.into(), paused: false, on_finished: None },
        );
        if replaced.is_some() {
            log::trace!("animation {name:?} on {:?} replaced", target.id());
        }
        AnimHandle { target: target.id(), name: name.to_string() }
    }

    /// Tweens `property` from its current value to `end`. The slot name is the property name.
    pub fn animate(
        &mut self,
        target: &AnimTarget,
        property: &str,
        end: impl Into<AnimValue>,
        duration: Duration,
        easing: Easing,
    ) -> AnimHandle {
        self.play(target, property, Tween::new(property, end, duration).easing(easing))
    }

    /// Tweens `property` from `start` to `end`.
    pub fn animate_from(
        &mut self,
        target: &AnimTarget,
        property: &str,
        start: impl Into<AnimValue>,
        end: impl Into<AnimValue>,
        duration: Duration,
        easing: Easing,
    ) -> AnimHandle {
        let start = start.into();
        target.set(property, start);
        self.play(target, property, Tween::new(property, end, duration).from(start).easing(easing))
    }

    /// Attaches a completion callback. Returns false if the handle is no longer registered.
    pub fn on_finished(&mut self, handle: &AnimHandle, callback: impl FnOnce() + 'static) -> bool {
        match self.running_mut(handle) {
            Some(r) => {
                r.on_finished = Some(Box::new(callback));
                true
            }
            None => false,
        }
    }

    // ── control ───────────────────────────────────────────────────────────

    /// Removes one animation without running its callback.
    pub fn stop(&mut self, target: TargetId, name: &str) -> bool {
        let removed = self
            .slots
            .get_mut(&target)
            .and_then(|slot| slot.running.remove(name))
            .is_some();
        self.drop_empty(target);
        removed
    }

    /// Removes every animation of `target` without running callbacks.
    pub fn stop_all(&mut self, target: TargetId) {
        self.slots.remove(&target);
    }

    pub fn pause_all(&mut self, target: TargetId) {
        self.set_paused(target, true);
    }

    pub fn resume_all(&mut self, target: TargetId) {
        self.set_paused(target, false);
    }

    /// Restarts a registered animation from its beginning.
    pub fn restart(&mut self, handle: &AnimHandle) -> bool {
        match self.running_mut(handle) {
            Some(r) => {
                r.anim.reset();
                true
            }
            None => false,
        }
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn is_animating(&self, target: TargetId) -> bool {
        self.slots.get(&target).is_some_and(|s| s.target.is_alive() && !s.running.is_empty())
    }

    pub fn is_running(&self, target: TargetId, name: &str) -> bool {
        self.slots
            .get(&target)
            .is_some_and(|s| s.target.is_alive() && s.running.contains_key(name))
    }

    pub fn is_paused(&self, target: TargetId, name: &str) -> bool {
        self.slots
            .get(&target)
            .and_then(|s| s.running.get(name))
            .is_some_and(|r| r.paused)
    }

    /// Number of live registrations across all targets.
    pub fn active_count(&self) -> usize {
        self.slots
            .values()
            .filter(|s| s.target.is_alive())
            .map(|s| s.running.len())
            .sum()
    }

    // ── ticking ───────────────────────────────────────────────────────────

    /// Advances every unpaused animation by `dt`.
    ///
    /// Finished animations are deregistered; their callbacks are returned
    /// unexecuted in the [`Completed`] value.
    pub fn advance(&mut self, dt: Duration) -> Completed {
        let dead: Vec<TargetId> = self
            .slots
            .iter()
            .filter(|(_, s)| !s.target.is_alive())
            .map(|(id, _)| *id)
            .collect();
        for id in dead {
            log::trace!("purging animations of dropped target {id:?}");
            self.slots.remove(&id);
        }

        let mut completed = Completed { events: Vec::new(), callbacks: Vec::new() };
        for (id, slot) in &mut self.slots {
            let mut finished: Vec<String> = Vec::new();
            for (name, running) in &mut slot.running {
                if running.paused {
                    continue;
                }
                if running.anim.step(dt, &slot.target).is_some() {
                    finished.push(name.clone());
                }
            }
            // Stable order so callbacks fire deterministically within one target.
            finished.sort();
            for name in finished {
                if let Some(running) = slot.running.remove(&name) {
                    completed.callbacks.extend(running.on_finished);
                    completed.events.push(AnimEvent { target: *id, name });
                }
            }
        }
        self.slots.retain(|_, s| !s.running.is_empty());
        completed
    }

    /// [`advance`](Self::advance) followed by [`Completed::fire`].
    ///
    /// Callbacks run while `self` is still borrowed; use `advance` when they
    /// need the engine.
    pub fn tick(&mut self, dt: Duration) -> Vec<AnimEvent> {
        self.advance(dt).fire()
    }

    fn running_mut(&mut self, handle: &AnimHandle) -> Option<&mut Running> {
        self.slots.get_mut(&handle.target)?.running.get_mut(&handle.name)
    }

    fn set_paused(&mut self, target: TargetId, paused: bool) {
        if let Some(slot) = self.slots.get_mut(&target) {
            slot.running.values_mut().for_each(|r| r.paused = paused);
        }
    }

    fn drop_empty(&mut self, target: TargetId) {
        if self.slots.get(&target).is_some_and(|s| s.running.is_empty()) {
            self.slots.remove(&target);
        }
    }
}

impl core::fmt::Debug for AnimationEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationEngine").field("active", &self.active_count()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn flag() -> Rc<Cell<bool>> {
        Rc::new(Cell::new(false))
    }

    // ── replace semantics ─────────────────────────────────────────────────

    #[test]
    fn replacing_a_slot_drops_the_old_callback() {
        let mut engine = AnimationEngine::new();
        let target = AnimTarget::new();
        let (a, b) = (flag(), flag());

        let h = engine.animate_from(&target, "opacity", 0.0, 1.0, ms(100), Easing::Linear);
        let a2 = a.clone();
        engine.on_finished(&h, move || a2.set(true));

        let h = engine.animate_from(&target, "opacity", 1.0, 0.0, ms(100), Easing::Linear);
        let b2 = b.clone();
        engine.on_finished(&h, move || b2.set(true));

        assert_eq!(engine.active_count(), 1);
        let events = engine.tick(ms(150));
        assert!(!a.get());
        assert!(b.get());
        assert_eq!(events, vec![AnimEvent { target: target.id(), name: "opacity".into() }]);
        assert_eq!(target.scalar("opacity"), Some(0.0));
    }

    #[test]
    fn callback_fires_once_and_slot_is_freed() {
        let mut engine = AnimationEngine::new();
        let target = AnimTarget::new();
        let count = Rc::new(Cell::new(0));
        let h = engine.animate_from(&target, "x", 0.0, 1.0, ms(10), Easing::Linear);
        let c = count.clone();
        engine.on_finished(&h, move || c.set(c.get() + 1));
        engine.tick(ms(20));
        engine.tick(ms(20));
        assert_eq!(count.get(), 1);
        assert!(!engine.is_animating(target.id()));
        assert!(!engine.on_finished(&h, || {}));
    }

    // ── control ───────────────────────────────────────────────────────────

    #[test]
    fn stop_does_not_run_callback() {
        let mut engine = AnimationEngine::new();
        let target = AnimTarget::new();
        let f = flag();
        let h = engine.animate_from(&target, "x", 0.0, 1.0, ms(10), Easing::Linear);
        let f2 = f.clone();
        engine.on_finished(&h, move || f2.set(true));
        assert!(engine.stop(target.id(), "x"));
        engine.tick(ms(100));
        assert!(!f.get());
        assert!(!engine.stop(target.id(), "x"));
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let mut engine = AnimationEngine::new();
        let target = AnimTarget::new();
        engine.animate_from(&target, "x", 0.0, 1.0, ms(100), Easing::Linear);
        engine.tick(ms(50));
        engine.pause_all(target.id());
        assert!(engine.is_paused(target.id(), "x"));
        engine.tick(ms(500));
        assert_eq!(target.scalar("x"), Some(0.5));
        engine.resume_all(target.id());
        engine.tick(ms(50));
        assert_eq!(target.scalar("x"), Some(1.0));
    }

    #[test]
    fn stop_all_clears_every_slot() {
        let mut engine = AnimationEngine::new();
        let target = AnimTarget::new();
        engine.animate(&target, "a", 1.0, ms(100), Easing::Linear);
        engine.animate(&target, "b", 1.0, ms(100), Easing::Linear);
        assert_eq!(engine.active_count(), 2);
        engine.stop_all(target.id());
        assert_eq!(engine.active_count(), 0);
    }

    // ── target lifetime ───────────────────────────────────────────────────

    #[test]
    fn dropped_target_is_purged_without_callbacks() {
        let mut engine = AnimationEngine::new();
        let f = flag();
        let id = {
            let target = AnimTarget::new();
            let h = engine.animate(&target, "x", 1.0, ms(10), Easing::Linear);
            let f2 = f.clone();
            engine.on_finished(&h, move || f2.set(true));
            target.id()
        };
        assert!(!engine.is_animating(id));
        let events = engine.tick(ms(100));
        assert!(events.is_empty());
        assert!(!f.get());
        assert_eq!(engine.active_count(), 0);
    }

    #[test]
    fn start_value_comes_from_target_when_omitted() {
        let mut engine = AnimationEngine::new();
        let target = AnimTarget::new();
        target.set("x", 10.0);
        engine.animate(&target, "x", 20.0, ms(100), Easing::Linear);
        engine.tick(ms(50));
        assert_eq!(target.scalar("x"), Some(15.0));
    }

    #[test]
    fn callbacks_may_reenter_a_shared_engine_after_advance() {
        let engine = AnimationEngine::shared();
        let target = Rc::new(AnimTarget::new());
        let h = engine.borrow_mut().animate(&target, "x", 1.0, ms(10), Easing::Linear);
        let (e2, t2) = (engine.clone(), target.clone());
        engine.borrow_mut().on_finished(&h, move || {
            e2.borrow_mut().animate(&t2, "y", 1.0, ms(10), Easing::Linear);
        });
        let completed = engine.borrow_mut().advance(ms(20));
        completed.fire();
        assert!(engine.borrow().is_running(target.id(), "y"));
    }
}
