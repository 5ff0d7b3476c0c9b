use crate::coords::Vec2;
use crate::geometry::Outline;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Soft shadow or glow cast by an outline.
///
/// `blur` is the blur radius in logical pixels; a zero offset with a bright
/// color renders as a glow.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowCmd {
    pub outline: Outline,
    pub color: Color,
    pub blur: f32,
    pub offset: Vec2,
    pub spread: f32,
}

impl DrawList {
    pub fn push_shadow(&mut self, z: ZIndex, outline: Outline, color: Color, blur: f32, offset: Vec2, spread: f32) {
        self.push(z, DrawCmd::Shadow(ShadowCmd { outline, color, blur: blur.max(0.0), offset, spread }));
    }
}
