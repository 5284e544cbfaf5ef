use crate::dom::Element;
use crate::trigger::{MODIFIER_PREFIX, ModifierClass};

/// Keeps at most one modifier class on the overlay root.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassNameManager;

impl ClassNameManager {
    /// Strip every prefixed class, including one equal to the class about to be applied.
    pub fn reset<E: Element>(&self, overlay: &E) {
        for class in overlay.classes().iter().rev() {
            if class.starts_with(MODIFIER_PREFIX) {
                overlay.remove_class(class);
            }
        }
    }

    pub fn apply<E: Element>(&self, overlay: &E, class: Option<&ModifierClass>) {
        if let Some(class) = class {
            overlay.add_class(class.as_str());
        }
    }

    /// `reset` then `apply`, the order every invocation uses.
    pub fn replace<E: Element>(&self, overlay: &E, class: Option<&ModifierClass>) {
        self.reset(overlay);
        self.apply(overlay, class);
    }

    /// Prefixed classes currently on the overlay.
    pub fn applied<E: Element>(&self, overlay: &E) -> Vec<String> {
        overlay
            .classes()
            .into_iter()
            .filter(|c| c.starts_with(MODIFIER_PREFIX))
            .collect()
    }
}
