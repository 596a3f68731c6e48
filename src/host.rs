//! What the effects engine needs from the page hosting it.

use crate::fx::motion::{Point2D, Viewport};
use std::cell::RefCell;
use std::rc::Rc;

/// Element found under the pointer, reduced to the attributes the cursor's
/// hover test looks at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub role: Option<String>,
    pub classes: Vec<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Buttons, links, `role="button"` and anything tagged `cursor-pointer`.
    pub fn is_interactive(&self) -> bool {
        self.tag.eq_ignore_ascii_case("button")
            || self.tag.eq_ignore_ascii_case("a")
            || self.role.as_deref() == Some("button")
            || self.classes.iter().any(|c| c == "cursor-pointer")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Input delivered to a mounted driver. Handlers only record state; all
/// drawing happens in the tick.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove(Point2D),
    /// Touch points in viewport coordinates; only the first one is tracked.
    TouchMove(Vec<Point2D>),
    Resize,
}

pub trait Host {
    /// Current logical viewport and pixel density.
    fn viewport(&self) -> Viewport;
    /// Subscribe to pointer, touch and resize input.
    fn attach_listeners(&mut self) -> ListenerId;
    fn detach_listeners(&mut self, id: ListenerId);
    fn element_at(&self, p: Point2D) -> Option<Element>;
    fn set_native_pointer_hidden(&mut self, hidden: bool);
}

impl<H: Host> Host for Rc<RefCell<H>> {
    fn viewport(&self) -> Viewport {
        self.borrow().viewport()
    }

    fn attach_listeners(&mut self) -> ListenerId {
        self.borrow_mut().attach_listeners()
    }

    fn detach_listeners(&mut self, id: ListenerId) {
        self.borrow_mut().detach_listeners(id)
    }

    fn element_at(&self, p: Point2D) -> Option<Element> {
        self.borrow().element_at(p)
    }

    fn set_native_pointer_hidden(&mut self, hidden: bool) {
        self.borrow_mut().set_native_pointer_hidden(hidden)
    }
}
