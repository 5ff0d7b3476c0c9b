use milk_engine::coords::Vec2;
use milk_engine::paint::Color;

use crate::style::{BlurMode, ShadowSpec};

/// The single graphics effect slot of a widget. Installing one replaces
/// whatever was there.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Effect {
    #[default]
    None,
    Shadow(ShadowSpec),
    /// Offset-free halo around the outline.
    Glow { color: Color, blur: f32 },
    /// Backdrop blur request. Painted as a soft drop shadow; the real blur is
    /// up to the host compositor.
    Blur { mode: BlurMode, radius: f32 },
}

impl Effect {
    pub const GLOW_MIN_BLUR: f32 = 5.0;
    pub const GLOW_MAX_BLUR: f32 = 50.0;

    /// Glow whose blur is twice `intensity`, clamped to `[5, 50]`.
    pub fn glow(color: Color, intensity: f32) -> Self {
        Effect::Glow { color, blur: (intensity * 2.0).clamp(Self::GLOW_MIN_BLUR, Self::GLOW_MAX_BLUR) }
    }

    /// `BlurMode::None` clears the slot.
    pub fn blur(mode: BlurMode, radius: f32) -> Self {
        match mode {
            BlurMode::None => Effect::None,
            mode => Effect::Blur { mode, radius: radius.max(0.0) },
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Shadow the painter draws under the widget for this effect.
    pub fn painted_shadow(&self) -> Option<ShadowSpec> {
        match *self {
            Effect::None => None,
            Effect::Shadow(spec) => Some(spec),
            Effect::Glow { color, blur } => Some(ShadowSpec::new(color, blur, Vec2::zero())),
            Effect::Blur { .. } => Some(glass_shadow()),
        }
    }
}

/// Soft shadow that stands in for a backdrop blur.
pub fn glass_shadow() -> ShadowSpec {
    ShadowSpec::new(Color::rgba(0, 0, 0, 60), 15.0, Vec2::new(0.0, 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_blur_is_clamped() {
        assert_eq!(Effect::glow(Color::CYAN, 1.0), Effect::Glow { color: Color::CYAN, blur: 5.0 });
        assert_eq!(Effect::glow(Color::CYAN, 10.0), Effect::Glow { color: Color::CYAN, blur: 20.0 });
        assert_eq!(Effect::glow(Color::CYAN, 40.0), Effect::Glow { color: Color::CYAN, blur: 50.0 });
    }

    #[test]
    fn blur_paints_a_soft_shadow() {
        let s = Effect::blur(BlurMode::Glass, 10.0).painted_shadow().unwrap();
        assert_eq!(s.color, Color::rgba(0, 0, 0, 60));
        assert_eq!(s.blur, 15.0);
        assert_eq!(s.offset, Vec2::new(0.0, 3.0));
        assert_eq!(Effect::blur(BlurMode::None, 10.0), Effect::None);
    }

    #[test]
    fn glow_has_no_offset() {
        let s = Effect::glow(Color::RED, 8.0).painted_shadow().unwrap();
        assert_eq!(s.offset, Vec2::zero());
        assert_eq!(s.blur, 16.0);
    }
}
