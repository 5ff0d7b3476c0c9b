use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::AnimValue;

/// Well-known property names shared by widgets and presets.
pub mod props {
    pub const OPACITY: &str = "opacity";
    pub const POS: &str = "pos";
    pub const GEOMETRY: &str = "geometry";
}

/// Identity of an animation target, stable for its lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TargetId(u64);

impl TargetId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TargetId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub(crate) struct TargetCell {
    id: TargetId,
    values: RefCell<HashMap<String, AnimValue>>,
}

/// Property bag an animation writes into.
///
/// The owner (usually a widget) holds the strong handle and reads animated
/// values back each tick. The engine only keeps a [`WeakTarget`], so dropping
/// the owner ends every animation registered for it.
#[derive(Debug)]
pub struct AnimTarget {
    cell: Rc<TargetCell>,
}

impl AnimTarget {
    pub fn new() -> Self {
        Self {
            cell: Rc::new(TargetCell { id: TargetId::next(), values: RefCell::new(HashMap::new()) }),
        }
    }

    #[inline]
    pub fn id(&self) -> TargetId {
        self.cell.id
    }

    pub fn get(&self, property: &str) -> Option<AnimValue> {
        self.cell.values.borrow().get(property).copied()
    }

    pub fn set(&self, property: &str, value: impl Into<AnimValue>) {
        self.cell.values.borrow_mut().insert(property.to_string(), value.into());
    }

    pub fn scalar(&self, property: &str) -> Option<f32> {
        self.get(property).and_then(AnimValue::as_scalar)
    }

    pub fn downgrade(&self) -> WeakTarget {
        WeakTarget { id: self.cell.id, cell: Rc::downgrade(&self.cell) }
    }
}

impl Default for AnimTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-owning reference to an [`AnimTarget`].
#[derive(Debug, Clone)]
pub struct WeakTarget {
    id: TargetId,
    cell: Weak<TargetCell>,
}

impl WeakTarget {
    #[inline]
    pub fn id(&self) -> TargetId {
        self.id
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.cell.strong_count() > 0
    }

    pub(crate) fn get(&self, property: &str) -> Option<AnimValue> {
        self.cell.upgrade()?.values.borrow().get(property).copied()
    }

    /// Writes `value`; returns false if the target is gone.
    pub(crate) fn set(&self, property: &str, value: AnimValue) -> bool {
        match self.cell.upgrade() {
            Some(cell) => {
                cell.values.borrow_mut().insert(property.to_string(), value);
                true
            }
            None => false,
        }
    }
}
