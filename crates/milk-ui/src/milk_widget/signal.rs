use milk_engine::coords::Vec2;

/// Animations that report completion through [`WidgetSignal::AnimationFinished`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AnimationKind {
    FadeIn,
    FadeOut,
    SlideIn,
    SlideOut,
    Bounce,
    Shake,
    Scale,
}

/// Lifecycle and input notifications, queued on the widget until the host
/// drains them with [`MilkWidget::take_signals`](super::MilkWidget::take_signals).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WidgetSignal {
    Created,
    Shown,
    Hidden,
    Clicked,
    /// New screen-space top-left corner after a drag step.
    PositionChanged(Vec2),
    AnimationFinished(AnimationKind),
    Hovered(bool),
}
