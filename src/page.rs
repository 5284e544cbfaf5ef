use std::rc::Rc;

use modal_loader::dom::Node;
use modal_loader::listener::OverlayElements;
use modal_loader::overlay::{CloseReason, ModalWidget, OverlayState, OverlayWidget};
use modal_loader::util::preview;

/// The daemon's stand-in page: `#content-modal`, its `.content-modal-body`, and `#loading`.
pub(crate) struct Page {
    root: Node,
    body: Node,
    indicator: Node,
    widget: ModalWidget,
    busy_class: String,
}

impl Page {
    pub(crate) fn new(busy_class: &str) -> Self {
        let widget = ModalWidget::new();
        widget.subscribe_closed(Rc::new(|reason: CloseReason| {
            tracing::info!(%reason, "overlay closed");
        }));
        Self {
            root: Node::new("div")
                .with_attr("id", "content-modal")
                .with_class("modal")
                .with_class("fade"),
            body: Node::new("div").with_class("content-modal-body"),
            indicator: Node::new("div").with_attr("id", "loading"),
            widget,
            busy_class: busy_class.to_string(),
        }
    }

    pub(crate) fn elements(&self) -> OverlayElements<Node> {
        OverlayElements {
            root: self.root.clone(),
            body: self.body.clone(),
            indicator: self.indicator.clone(),
        }
    }

    pub(crate) fn widget(&self) -> Rc<dyn OverlayWidget> {
        Rc::new(self.widget.clone())
    }

    pub(crate) fn close(&self, reason: CloseReason) {
        if !self.widget.is_open() {
            tracing::info!("overlay already closed");
        }
        self.widget.hide(reason);
    }

    pub(crate) fn state(&self) -> OverlayState {
        OverlayState::capture(
            &self.root,
            &self.body,
            &self.indicator,
            &self.busy_class,
            &self.widget,
        )
    }

    pub(crate) fn log_state(&self) {
        let state = self.state();
        tracing::info!(
            open = state.is_open,
            busy = state.is_busy,
            modifiers = ?state.applied_modifier_classes,
            body = %preview(&state.body_content, 120),
            "overlay state"
        );
        match serde_json::to_string(&state) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!("failed to serialize overlay state: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modal_loader::dom::Element;

    #[test]
    fn fresh_page_is_idle() {
        let page = Page::new("show");
        assert_eq!(
            page.state(),
            OverlayState {
                applied_modifier_classes: Vec::new(),
                is_busy: false,
                is_open: false,
                body_content: String::new(),
            }
        );
    }

    #[test]
    fn elements_share_the_page_nodes() {
        let page = Page::new("show");
        let elements = page.elements();
        elements.indicator.add_class("show");
        elements.root.add_class("modal-class-wide");
        elements.body.set_inner_html("<p>x</p>");
        page.widget().show();
        let state = page.state();
        assert!(state.is_busy);
        assert!(state.is_open);
        assert_eq!(state.applied_modifier_classes, vec!["modal-class-wide"]);
        page.close(CloseReason::Backdrop);
        assert!(!page.state().is_open);
    }
}
