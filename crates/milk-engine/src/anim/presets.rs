//! Ready-made animations over the well-known properties in [`props`].
//!
//! Every preset registers under a fixed slot name, so starting the same
//! preset again replaces the running one. Presets read the target's current
//! `pos`/`geometry`/`opacity`; owners keep those in sync with their state.

use std::time::Duration;

use crate::coords::{Rect, Vec2};

use super::target::props;
use super::{AnimHandle, AnimTarget, Animation, AnimationEngine, Easing, Tween};

pub const FADE: &str = "fade";
pub const SLIDE: &str = "slide";
pub const BOUNCE: &str = "bounce";
pub const PULSE: &str = "pulse";
pub const SHAKE: &str = "shake";
pub const SCALE: &str = "scale";
pub const MOVE: &str = "move";

/// Screen edge a slide enters from or leaves towards.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SlideEdge {
    Top,
    Bottom,
    Left,
    Right,
    /// No offscreen offset; the slide degenerates to a move in place.
    None,
}

fn geometry(target: &AnimTarget) -> Rect {
    target.get(props::GEOMETRY).and_then(|v| v.as_rect()).unwrap_or_default()
}

fn pos(target: &AnimTarget) -> Vec2 {
    target
        .get(props::POS)
        .and_then(|v| v.as_point())
        .unwrap_or_else(|| geometry(target).origin)
}

fn offscreen(edge: SlideEdge, at: Vec2, size: Vec2, screen: Vec2) -> Vec2 {
    match edge {
        SlideEdge::Top => Vec2::new(at.x, -size.y),
        SlideEdge::Bottom => Vec2::new(at.x, screen.y),
        SlideEdge::Left => Vec2::new(-size.x, at.y),
        SlideEdge::Right => Vec2::new(screen.x, at.y),
        SlideEdge::None => at,
    }
}

pub fn fade_in(engine: &mut AnimationEngine, target: &AnimTarget, duration: Duration) -> AnimHandle {
    target.set(props::OPACITY, 0.0);
    let tween = Tween::new(props::OPACITY, 1.0, duration).from(0.0).easing(Easing::OutCubic);
    engine.play(target, FADE, tween)
}

/// Fades from the current opacity to zero. Hiding on completion is the caller's job.
pub fn fade_out(engine: &mut AnimationEngine, target: &AnimTarget, duration: Duration) -> AnimHandle {
    let tween = Tween::new(props::OPACITY, 0.0, duration).easing(Easing::OutCubic);
    engine.play(target, FADE, tween)
}

/// Slides from offscreen beyond `from` to the current position.
pub fn slide_in(
    engine: &mut AnimationEngine,
    target: &AnimTarget,
    from: SlideEdge,
    screen: Vec2,
    duration: Duration,
) -> AnimHandle {
    let end = pos(target);
    let start = offscreen(from, end, geometry(target).size, screen);
    target.set(props::POS, start);
    let tween = Tween::new(props::POS, end, duration).from(start).easing(Easing::OutCubic);
    engine.play(target, SLIDE, tween)
}

/// Slides from the current position to offscreen beyond `to`.
pub fn slide_out(
    engine: &mut AnimationEngine,
    target: &AnimTarget,
    to: SlideEdge,
    screen: Vec2,
    duration: Duration,
) -> AnimHandle {
    let start = pos(target);
    let end = offscreen(to, start, geometry(target).size, screen);
    let tween = Tween::new(props::POS, end, duration).from(start).easing(Easing::InCubic);
    engine.play(target, SLIDE, tween)
}

/// Hops up 10px over a quarter of `duration`, then bounces back.
pub fn bounce(engine: &mut AnimationEngine, target: &AnimTarget, duration: Duration) -> AnimHandle {
    let orig = geometry(target);
    let up = orig.translate(Vec2::new(0.0, -10.0));
    let anim = Animation::sequential([
        Tween::new(props::GEOMETRY, up, duration / 4).from(orig).easing(Easing::OutQuad).into(),
        Tween::new(props::GEOMETRY, orig, duration * 3 / 4).from(up).easing(Easing::OutBounce).into(),
    ]);
    engine.play(target, BOUNCE, anim)
}

/// Opacity 1 → 0.5 → 1, `count` times (`-1` forever).
pub fn pulse(engine: &mut AnimationEngine, target: &AnimTarget, duration: Duration, count: i32) -> AnimHandle {
    let tween = Tween::new(props::OPACITY, 1.0, duration)
        .from(1.0)
        .key(0.5, 0.5)
        .easing(Easing::InOutQuad)
        .loops(count);
    engine.play(target, PULSE, tween)
}

/// Eight alternating horizontal offsets of `intensity` px, then back to rest.
pub fn shake(engine: &mut AnimationEngine, target: &AnimTarget, duration: Duration, intensity: f32) -> AnimHandle {
    let orig = pos(target);
    let mut tween = Tween::new(props::POS, orig, duration).from(orig).easing(Easing::Linear);
    for i in 1..=8 {
        let dx = if i % 2 == 1 { intensity } else { -intensity };
        tween = tween.key(i as f32 / 10.0, orig + Vec2::new(dx, 0.0));
    }
    engine.play(target, SHAKE, tween)
}

/// Scales the geometry about its centre from `from`× to `to`× the current size.
pub fn scale(engine: &mut AnimationEngine, target: &AnimTarget, from: f32, to: f32, duration: Duration) -> AnimHandle {
    let orig = geometry(target);
    let at = |k: f32| {
        Rect::from_center(orig.center(), Vec2::new((orig.size.x * k).floor(), (orig.size.y * k).floor()))
    };
    let tween = Tween::new(props::GEOMETRY, at(to), duration).from(at(from)).easing(Easing::OutCubic);
    engine.play(target, SCALE, tween)
}

/// Moves the position to `to`.
pub fn move_to(
    engine: &mut AnimationEngine,
    target: &AnimTarget,
    to: Vec2,
    duration: Duration,
    easing: Easing,
) -> AnimHandle {
    let tween = Tween::new(props::POS, to, duration).easing(easing);
    engine.play(target, MOVE, tween)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn widget_like() -> AnimTarget {
        let t = AnimTarget::new();
        t.set(props::GEOMETRY, Rect::new(100.0, 100.0, 300.0, 200.0));
        t.set(props::POS, Vec2::new(100.0, 100.0));
        t.set(props::OPACITY, 1.0);
        t
    }

    #[test]
    fn fade_in_starts_transparent_and_ends_opaque() {
        let mut engine = AnimationEngine::new();
        let t = widget_like();
        fade_in(&mut engine, &t, ms(200));
        assert_eq!(t.scalar(props::OPACITY), Some(0.0));
        engine.tick(ms(250));
        assert_eq!(t.scalar(props::OPACITY), Some(1.0));
    }

    #[test]
    fn slide_in_from_right_starts_offscreen() {
        let mut engine = AnimationEngine::new();
        let t = widget_like();
        slide_in(&mut engine, &t, SlideEdge::Right, Vec2::new(1920.0, 1080.0), ms(300));
        assert_eq!(t.get(props::POS).and_then(|v| v.as_point()), Some(Vec2::new(1920.0, 100.0)));
        engine.tick(ms(400));
        assert_eq!(t.get(props::POS).and_then(|v| v.as_point()), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn bounce_returns_to_origin() {
        let mut engine = AnimationEngine::new();
        let t = widget_like();
        bounce(&mut engine, &t, ms(400));
        engine.tick(ms(100));
        assert_eq!(t.get(props::GEOMETRY).and_then(|v| v.as_rect()), Some(Rect::new(100.0, 90.0, 300.0, 200.0)));
        engine.tick(ms(400));
        assert_eq!(t.get(props::GEOMETRY).and_then(|v| v.as_rect()), Some(Rect::new(100.0, 100.0, 300.0, 200.0)));
    }

    #[test]
    fn pulse_with_count_finishes() {
        let mut engine = AnimationEngine::new();
        let t = widget_like();
        pulse(&mut engine, &t, ms(100), 2);
        engine.tick(ms(150));
        assert!(engine.is_running(t.id(), PULSE));
        let events = engine.tick(ms(100));
        assert_eq!(events.len(), 1);
        assert_eq!(t.scalar(props::OPACITY), Some(1.0));
    }

    #[test]
    fn shake_alternates_around_origin() {
        let mut engine = AnimationEngine::new();
        let t = widget_like();
        shake(&mut engine, &t, ms(1000), 10.0);
        engine.tick(ms(100));
        assert_eq!(t.get(props::POS).and_then(|v| v.as_point()), Some(Vec2::new(110.0, 100.0)));
        engine.tick(ms(100));
        assert_eq!(t.get(props::POS).and_then(|v| v.as_point()), Some(Vec2::new(90.0, 100.0)));
        engine.tick(ms(900));
        assert_eq!(t.get(props::POS).and_then(|v| v.as_point()), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn scale_keeps_centre() {
        let mut engine = AnimationEngine::new();
        let t = widget_like();
        scale(&mut engine, &t, 1.0, 0.5, ms(100));
        engine.tick(ms(200));
        let r = t.get(props::GEOMETRY).and_then(|v| v.as_rect()).unwrap();
        assert_eq!(r.size, Vec2::new(150.0, 100.0));
        assert_eq!(r.center(), Vec2::new(250.0, 200.0));
    }
}
