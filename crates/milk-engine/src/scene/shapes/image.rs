use std::rc::Rc;

use crate::coords::Rect;
use crate::geometry::Outline;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Decoded straight-alpha RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// Returns `None` if `rgba` does not hold exactly `width × height` pixels.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        (rgba.len() == width as usize * height as usize * 4).then_some(Self { width, height, rgba })
    }
}

/// Image blit; pixels are shared so repeated frames don't copy them.
///
/// `mask`, when set, restricts the visible pixels to an outline (rounded or
/// circular images).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub image: Rc<ImageData>,
    pub rect: Rect,
    pub mask: Option<Outline>,
}

impl DrawList {
    #[inline]
    pub fn push_image(&mut self, z: ZIndex, image: Rc<ImageData>, rect: Rect) {
        self.push(z, DrawCmd::Image(ImageCmd { image, rect, mask: None }));
    }

    #[inline]
    pub fn push_masked_image(&mut self, z: ZIndex, image: Rc<ImageData>, rect: Rect, mask: Outline) {
        self.push(z, DrawCmd::Image(ImageCmd { image, rect, mask: Some(mask) }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_data_rejects_short_buffers() {
        assert!(ImageData::new(2, 2, vec![0; 16]).is_some());
        assert!(ImageData::new(2, 2, vec![0; 15]).is_none());
    }
}
