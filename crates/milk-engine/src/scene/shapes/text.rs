use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::{HAlign, TextStyle, VAlign};

/// Text draw payload laid out inside `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub style: TextStyle,
    pub color: Color,
    pub rect: Rect,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub wrap: bool,
}

impl DrawList {
    #[allow(clippy::too_many_arguments)]
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        style: TextStyle,
        color: Color,
        rect: Rect,
        h_align: HAlign,
        v_align: VAlign,
        wrap: bool,
    ) {
        self.push(z, DrawCmd::Text(TextCmd {
            text: text.into(),
            style,
            color,
            rect,
            h_align,
            v_align,
            wrap,
        }));
    }
}
