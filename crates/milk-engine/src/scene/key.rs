use super::ZIndex;

/// Stable sort key for draw items.
///
/// Field order matters for the derived ordering: `z` ascending (back-to-front),
/// then `order` ascending (insertion order for equal z).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_dominates_insertion_order() {
        assert!(SortKey::new(ZIndex(0), 9) < SortKey::new(ZIndex(1), 0));
        assert!(SortKey::new(ZIndex(1), 1) < SortKey::new(ZIndex(1), 2));
    }
}
