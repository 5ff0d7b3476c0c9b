use std::str::FromStr;

use milk_engine::coords::Rect;
use milk_engine::geometry::Outline;

/// How the window manager should treat a widget's window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum WindowType {
    #[default]
    Normal,
    /// Pinned under every other window.
    Desktop,
    Dock,
    /// Above everything and never takes focus.
    Notification,
    /// Above everything and transparent to input.
    Overlay,
}

impl WindowType {
    pub fn as_str(self) -> &'static str {
        match self {
            WindowType::Normal => "normal",
            WindowType::Desktop => "desktop",
            WindowType::Dock => "dock",
            WindowType::Notification => "notification",
            WindowType::Overlay => "overlay",
        }
    }

    /// Stacking and input flags this type implies. Frameless and
    /// skip-taskbar are always set for widgets and are not touched here.
    pub fn flags(self) -> WindowFlags {
        let base = WindowFlags::default();
        match self {
            WindowType::Normal | WindowType::Dock => WindowFlags { stay_on_top: true, ..base },
            WindowType::Desktop => WindowFlags { stay_on_top: false, stay_on_bottom: true, ..base },
            WindowType::Notification => WindowFlags { stay_on_top: true, no_focus: true, ..base },
            WindowType::Overlay => WindowFlags { stay_on_top: true, input_transparent: true, ..base },
        }
    }
}

impl FromStr for WindowType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(WindowType::Normal),
            "desktop" => Ok(WindowType::Desktop),
            "dock" => Ok(WindowType::Dock),
            "notification" => Ok(WindowType::Notification),
            "overlay" => Ok(WindowType::Overlay),
            _ => Err(()),
        }
    }
}

/// Window-manager hints a host applies to the widget's native window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowFlags {
    pub frameless: bool,
    pub translucent: bool,
    pub stay_on_top: bool,
    pub stay_on_bottom: bool,
    pub no_focus: bool,
    pub input_transparent: bool,
    /// Visible on every virtual desktop.
    pub sticky: bool,
    pub skip_taskbar: bool,
    pub skip_pager: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            frameless: true,
            translucent: true,
            stay_on_top: true,
            stay_on_bottom: false,
            no_focus: false,
            input_transparent: false,
            sticky: false,
            skip_taskbar: true,
            skip_pager: false,
        }
    }
}

/// Everything a host needs to place and present one widget window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRequest {
    /// Screen-space geometry.
    pub geometry: Rect,
    /// Window opacity in `[0, 1]`, including any running fade.
    pub opacity: f32,
    pub visible: bool,
    pub flags: WindowFlags,
    /// Input and visibility mask in window-local coordinates.
    pub mask: Outline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_flags() {
        assert!(WindowType::Normal.flags().stay_on_top);
        assert!(WindowType::Dock.flags().stay_on_top);

        let desktop = WindowType::Desktop.flags();
        assert!(desktop.stay_on_bottom && !desktop.stay_on_top);

        let note = WindowType::Notification.flags();
        assert!(note.stay_on_top && note.no_focus && !note.input_transparent);

        let overlay = WindowType::Overlay.flags();
        assert!(overlay.stay_on_top && overlay.input_transparent);
    }

    #[test]
    fn every_type_is_frameless() {
        for t in ["normal", "desktop", "dock", "notification", "overlay"] {
            let t: WindowType = t.parse().unwrap();
            assert!(t.flags().frameless);
            assert_eq!(t.as_str().parse(), Ok(t));
        }
    }
}
