use milk_engine::coords::Vec2;

/// Pointer events routed through a widget's child tree.
///
/// Positions are in widget-local logical pixels (the widget's top-left
/// corner is the origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Primary button went down at `pos`.
    Press { pos: Vec2 },
    /// Primary button came up at `pos`. Fires even outside the pressed child.
    Release { pos: Vec2 },
    /// Pointer moved to `pos`.
    Hover { pos: Vec2 },
    /// Pointer left the widget.
    Leave,
}

impl UiEvent {
    pub fn pos(&self) -> Option<Vec2> {
        match *self {
            UiEvent::Press { pos } | UiEvent::Release { pos } | UiEvent::Hover { pos } => Some(pos),
            UiEvent::Leave => None,
        }
    }
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing to siblings.
    Consumed,
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
