use milk_engine::coords::Vec2;

/// Pointer gesture state of a widget window.
///
/// ```text
/// Idle ──press──▶ Pressed ──move──▶ Dragging ──release──▶ Idle
///                    └───release (click)──▶ Idle
/// ```
///
/// `offset` is the pointer position relative to the window's top-left corner
/// at press time; while dragging the window origin follows `pointer - offset`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Pressed { offset: Vec2 },
    Dragging { offset: Vec2 },
    /// A child consumed the press; the gesture belongs to it.
    Captured,
}

/// What the widget should do after a pointer step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DragOutcome {
    None,
    MoveTo(Vec2),
    Click,
}

impl DragState {
    /// Primary button down at `pointer` (screen space) on a window at `origin`.
    pub fn press(&mut self, pointer: Vec2, origin: Vec2) {
        *self = DragState::Pressed { offset: pointer - origin };
    }

    pub fn capture(&mut self) {
        *self = DragState::Captured;
    }

    /// Pointer moved with the button held. Non-draggable widgets never move.
    pub fn motion(&mut self, pointer: Vec2, draggable: bool) -> DragOutcome {
        match *self {
            DragState::Pressed { offset } | DragState::Dragging { offset } if draggable => {
                *self = DragState::Dragging { offset };
                DragOutcome::MoveTo(pointer - offset)
            }
            _ => DragOutcome::None,
        }
    }

    /// Button released. A press without motion is a click.
    pub fn release(&mut self) -> DragOutcome {
        let outcome = match *self {
            DragState::Pressed { .. } => DragOutcome::Click,
            _ => DragOutcome::None,
        };
        *self = DragState::Idle;
        outcome
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_release_is_a_click() {
        let mut d = DragState::default();
        d.press(Vec2::new(120.0, 130.0), Vec2::new(100.0, 100.0));
        assert_eq!(d.release(), DragOutcome::Click);
        assert_eq!(d, DragState::Idle);
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut d = DragState::default();
        d.press(Vec2::new(120.0, 130.0), Vec2::new(100.0, 100.0));
        assert_eq!(d.motion(Vec2::new(220.0, 330.0), true), DragOutcome::MoveTo(Vec2::new(200.0, 300.0)));
        assert!(d.is_dragging());
        assert_eq!(d.motion(Vec2::new(221.0, 330.0), true), DragOutcome::MoveTo(Vec2::new(201.0, 300.0)));
        assert_eq!(d.release(), DragOutcome::None);
    }

    #[test]
    fn not_draggable_still_clicks() {
        let mut d = DragState::default();
        d.press(Vec2::new(5.0, 5.0), Vec2::zero());
        assert_eq!(d.motion(Vec2::new(50.0, 50.0), false), DragOutcome::None);
        assert_eq!(d.release(), DragOutcome::Click);
    }

    #[test]
    fn captured_press_is_not_a_click() {
        let mut d = DragState::default();
        d.capture();
        assert_eq!(d.motion(Vec2::new(50.0, 50.0), true), DragOutcome::None);
        assert_eq!(d.release(), DragOutcome::None);
    }
}
