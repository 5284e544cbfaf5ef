use crate::dom::Element;

pub const DEFAULT_BUSY_CLASS: &str = "show";

/// Busy signal: a class toggled on a pre-existing indicator element.
#[derive(Debug, Clone)]
pub struct LoadingIndicator<E> {
    element: E,
    class: String,
}

impl<E: Element> LoadingIndicator<E> {
    pub fn new(element: E, class: impl Into<String>) -> Self {
        Self {
            element,
            class: class.into(),
        }
    }

    pub fn show(&self) {
        self.element.add_class(&self.class);
    }

    pub fn hide(&self) {
        self.element.remove_class(&self.class);
    }

    pub fn is_visible(&self) -> bool {
        self.element.has_class(&self.class)
    }
}
