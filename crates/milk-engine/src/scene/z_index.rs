/// Z-ordering key for draw items. Higher values appear on top.
///
/// Widgets paint their chrome (shadow, background, border) on fixed layers and
/// let content climb from [`ZIndex::CONTENT`] upward.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const SHADOW: ZIndex = ZIndex(-20);
    pub const BACKGROUND: ZIndex = ZIndex(-10);
    pub const CONTENT: ZIndex = ZIndex(0);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    /// The layer directly above this one.
    #[inline]
    pub const fn above(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}
