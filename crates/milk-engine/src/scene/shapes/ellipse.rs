use crate::coords::Rect;
use crate::paint::Paint;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Ellipse inscribed in `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseCmd {
    pub rect: Rect,
    pub paint: Paint,
    pub border: Option<Border>,
}

impl DrawList {
    #[inline]
    pub fn push_ellipse(&mut self, z: ZIndex, rect: Rect, paint: Paint, border: Option<Border>) {
        self.push(z, DrawCmd::Ellipse(EllipseCmd { rect, paint, border }));
    }
}
