use crate::mailbox::Mailbox;
use crate::providers::Services;
use crate::widget::{Element, Widget};
use crate::widgets::Container;

use super::WidgetId;

/// Boxed periodic update callback.
pub type UpdateFn = Box<dyn FnMut(&mut UpdateCtx<'_>)>;

/// What a periodic update callback gets to work with: the collaborators,
/// the mailbox for asynchronous results, and mutable access to the widget's
/// children by id.
///
/// ```rust,ignore
/// widget.on_update(|ctx| {
///     let cpu = ctx.services().system.snapshot().cpu;
///     if let Some(bar) = ctx.child_mut::<ProgressBar>("cpu") {
///         bar.set_value(cpu);
///     }
/// });
/// ```
pub struct UpdateCtx<'a> {
    services: &'a Services,
    mailbox: &'a Mailbox,
    widget: WidgetId,
    root: &'a mut Container,
}

impl<'a> UpdateCtx<'a> {
    pub(crate) fn new(services: &'a Services, mailbox: &'a Mailbox, widget: WidgetId, root: &'a mut Container) -> Self {
        Self { services, mailbox, widget, root }
    }

    pub fn services(&self) -> &Services {
        self.services
    }

    /// Post results of asynchronous work here, addressed to [`widget_id`](Self::widget_id).
    pub fn mailbox(&self) -> &Mailbox {
        self.mailbox
    }

    pub fn widget_id(&self) -> WidgetId {
        self.widget
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.elements_mut().iter_mut().find_map(|e| e.find_mut(id))
    }

    /// The descendant with markup id `id`, if it is a `W`.
    pub fn child_mut<W: Widget>(&mut self, id: &str) -> Option<&mut W> {
        self.element_mut(id)?.downcast_mut::<W>()
    }

    pub fn root_mut(&mut self) -> &mut Container {
        self.root
    }
}
