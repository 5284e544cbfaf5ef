use std::fmt;

use crate::dom::Element;
use crate::error::TriggerError;

/// Every overlay modifier class starts with this; cleanup matches on it.
pub const MODIFIER_PREFIX: &str = "modal-class-";

pub const DEFAULT_TRIGGER_CLASS: &str = "load-in-modal";
pub const DEFAULT_IMAGE_CLASS: &str = "load-raster-image-in-modal";

// --- Attribute names ---

pub const ATTR_HREF: &str = "href";
pub const ATTR_REST_PATH: &str = "data-rest-path";
pub const ATTR_MODAL_CLASS: &str = "data-modal-class";
pub const ATTR_IMAGE_ALT: &str = "data-alt";
pub const ATTR_IMAGE_CLASS: &str = "data-class";

/// An overlay class guaranteed to carry `MODIFIER_PREFIX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModifierClass(String);

impl ModifierClass {
    pub fn new(class: &str) -> Result<Self, TriggerError> {
        let class = class.trim();
        let suffix_ok = class
            .strip_prefix(MODIFIER_PREFIX)
            .is_some_and(|rest| !rest.is_empty() && !rest.contains(char::is_whitespace));
        if suffix_ok {
            Ok(ModifierClass(class.to_string()))
        } else {
            Err(TriggerError::InvalidModifierClass(class.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModifierClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything one invocation needs to know, read once from the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerDescriptor {
    pub is_image_mode: bool,
    pub target_url: String,
    pub rest_path: Option<String>,
    pub modifier_class: Option<ModifierClass>,
    pub image_alt: Option<String>,
    pub image_class: Option<String>,
}

impl TriggerDescriptor {
    /// Read the attribute contract off `element`.
    ///
    /// Only a missing (or blank) `href` is fatal. A modifier class without the
    /// required prefix is dropped with a warning and the invocation goes ahead
    /// unstyled. Empty attributes count as absent.
    pub fn parse<E: Element>(element: &E, image_marker: &str) -> Result<Self, TriggerError> {
        let target_url = non_empty(element, ATTR_HREF).ok_or(TriggerError::MissingUrl)?;

        let modifier_class = match non_empty(element, ATTR_MODAL_CLASS) {
            Some(raw) => match ModifierClass::new(&raw) {
                Ok(class) => Some(class),
                Err(e) => {
                    tracing::warn!(target_url = %target_url, "ignoring modifier class: {e}");
                    None
                }
            },
            None => None,
        };

        let is_image_mode = element.has_class(image_marker);
        let (image_alt, image_class) = if is_image_mode {
            (
                element.attribute(ATTR_IMAGE_ALT),
                non_empty(element, ATTR_IMAGE_CLASS),
            )
        } else {
            (None, None)
        };

        Ok(TriggerDescriptor {
            is_image_mode,
            target_url,
            rest_path: non_empty(element, ATTR_REST_PATH),
            modifier_class,
            image_alt,
            image_class,
        })
    }
}

fn non_empty<E: Element>(element: &E, name: &str) -> Option<String> {
    element
        .attribute(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// --- Trigger matching ---

/// Decides whether an interaction target is a trigger.
pub trait TriggerPredicate<E> {
    fn is_trigger(&self, element: &E) -> bool;
}

/// Matches elements carrying a marker class.
#[derive(Debug, Clone)]
pub struct ClassPredicate {
    class: String,
}

impl ClassPredicate {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into() }
    }
}

impl Default for ClassPredicate {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_CLASS)
    }
}

impl<E: Element> TriggerPredicate<E> for ClassPredicate {
    fn is_trigger(&self, element: &E) -> bool {
        element.has_class(&self.class)
    }
}

/// Matches elements carrying an attribute, optionally with an exact value
/// (e.g. `data-loader="modal"` or `role="dialog-link"`).
#[derive(Debug, Clone)]
pub struct AttributePredicate {
    name: String,
    value: Option<String>,
}

impl AttributePredicate {
    pub fn present(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

impl<E: Element> TriggerPredicate<E> for AttributePredicate {
    fn is_trigger(&self, element: &E) -> bool {
        match (element.attribute(&self.name), &self.value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == *expected,
            (None, _) => false,
        }
    }
}
