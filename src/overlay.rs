use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::dom::Element;
use crate::modifier::ClassNameManager;

/// How the overlay was closed. Only the widget knows; the loader just observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Dismiss,
    Backdrop,
    Escape,
}

impl CloseReason {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dismiss" => Some(CloseReason::Dismiss),
            "backdrop" => Some(CloseReason::Backdrop),
            "escape" => Some(CloseReason::Escape),
            _ => None,
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CloseReason::Dismiss => "dismiss",
            CloseReason::Backdrop => "backdrop",
            CloseReason::Escape => "escape",
        })
    }
}

pub type CloseHook = Rc<dyn Fn(CloseReason)>;

/// The modal widget the loader drives. Animation and focus handling live behind it.
pub trait OverlayWidget {
    fn show(&self);
    fn is_open(&self) -> bool;
    /// Register a hook fired after every completed close, however it was triggered.
    fn subscribe_closed(&self, hook: CloseHook);
}

#[derive(Default)]
struct ModalInner {
    open: bool,
    shown: usize,
    hooks: Vec<CloseHook>,
}

/// Headless modal widget: open/closed flag plus close hooks.
#[derive(Clone, Default)]
pub struct ModalWidget(Rc<RefCell<ModalInner>>);

impl ModalWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the modal. Hooks fire only on an open -> closed transition.
    pub fn hide(&self, reason: CloseReason) {
        let hooks = {
            let mut inner = self.0.borrow_mut();
            if !inner.open {
                return;
            }
            inner.open = false;
            inner.hooks.clone()
        };
        tracing::trace!(%reason, "overlay closed");
        for hook in hooks {
            hook(reason);
        }
    }

    /// Number of `show` calls so far.
    pub fn shown(&self) -> usize {
        self.0.borrow().shown
    }
}

impl OverlayWidget for ModalWidget {
    fn show(&self) {
        let mut inner = self.0.borrow_mut();
        inner.open = true;
        inner.shown += 1;
    }

    fn is_open(&self) -> bool {
        self.0.borrow().open
    }

    fn subscribe_closed(&self, hook: CloseHook) {
        self.0.borrow_mut().hooks.push(hook);
    }
}

/// Opens the overlay, writes its body, and empties the body on every close.
pub struct OverlayLifecycle<E> {
    root: E,
    body: E,
    widget: Rc<dyn OverlayWidget>,
}

impl<E: Element + Clone + 'static> OverlayLifecycle<E> {
    /// Wires the body-clearing close hook immediately.
    pub fn new(root: E, body: E, widget: Rc<dyn OverlayWidget>) -> Self {
        let lifecycle = Self { root, body, widget };
        let body = lifecycle.body.clone();
        lifecycle.on_close(move |_| body.set_inner_html(""));
        lifecycle
    }

    pub fn open(&self) {
        self.widget.show();
    }

    pub fn write_body(&self, markup: &str) {
        self.body.set_inner_html(markup);
    }

    pub fn on_close(&self, hook: impl Fn(CloseReason) + 'static) {
        self.widget.subscribe_closed(Rc::new(hook));
    }

    pub fn is_open(&self) -> bool {
        self.widget.is_open()
    }

    pub fn root(&self) -> &E {
        &self.root
    }

    pub fn body(&self) -> &E {
        &self.body
    }
}

/// Point-in-time view of the shared overlay state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayState {
    pub applied_modifier_classes: Vec<String>,
    pub is_busy: bool,
    pub is_open: bool,
    pub body_content: String,
}

impl OverlayState {
    pub fn capture<E: Element>(
        root: &E,
        body: &E,
        indicator: &E,
        busy_class: &str,
        widget: &dyn OverlayWidget,
    ) -> Self {
        Self {
            applied_modifier_classes: ClassNameManager.applied(root),
            is_busy: indicator.has_class(busy_class),
            is_open: widget.is_open(),
            body_content: body.inner_html(),
        }
    }
}
