use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::milk_widget::{MilkWidget, WidgetId};

type Delivery = Box<dyn FnOnce(&mut MilkWidget)>;

/// Queue of deferred widget updates addressed by [`WidgetId`].
///
/// Asynchronous completions (weather fetches and similar) post here instead
/// of holding a reference to the widget. The application drains the queue
/// on its tick; posts for widgets that no longer exist are dropped.
#[derive(Clone, Default)]
pub struct Mailbox {
    queue: Rc<RefCell<VecDeque<(WidgetId, Delivery)>>>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, to: WidgetId, f: impl FnOnce(&mut MilkWidget) + 'static) {
        self.queue.borrow_mut().push_back((to, Box::new(f)));
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Delivers every queued post to its widget in `widgets`.
    ///
    /// The queue is detached before delivery, so posts made by the handlers
    /// themselves wait for the next drain. Returns the number delivered.
    pub fn drain(&self, widgets: &mut [MilkWidget]) -> usize {
        let pending = std::mem::take(&mut *self.queue.borrow_mut());
        let mut delivered = 0;
        for (id, f) in pending {
            match widgets.iter_mut().find(|w| w.id() == id) {
                Some(widget) => {
                    f(widget);
                    delivered += 1;
                }
                None => log::debug!("dropping post for removed widget {id}"),
            }
        }
        delivered
    }
}

impl std::fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailbox").field("pending", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_to_live_widgets_only() {
        let mailbox = Mailbox::new();
        let mut widgets = vec![MilkWidget::new(300.0, 200.0)];
        let gone = MilkWidget::new(10.0, 10.0).id();

        mailbox.post(widgets[0].id(), |w| w.set_opacity(0.5));
        mailbox.post(gone, |w| w.set_opacity(0.1));

        assert_eq!(mailbox.drain(&mut widgets), 1);
        assert!(mailbox.is_empty());
        assert_eq!(widgets[0].opacity(), 0.5);
    }
}
