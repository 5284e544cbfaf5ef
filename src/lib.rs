//! Load secondary page content into a shared overlay when a marked link is clicked.
//!
//! The [`listener::TriggerListener`] owns the flow: filter the click, read the
//! trigger's attributes, restyle the overlay, show the busy indicator, resolve the
//! content (image, REST API, or page fragment), then write and open, or suppress.
//! Page elements, the modal widget, and the network are injected, so the same
//! state machine runs against a browser adapter or the in-memory [`dom::Node`].

pub mod command;
pub mod config;
pub mod dom;
pub mod error;
pub mod indicator;
pub mod listener;
pub mod modifier;
pub mod overlay;
pub mod resolver;
pub mod transport;
pub mod trigger;
pub mod util;

#[cfg(test)]
mod testing;

pub use config::{Config, SettlePolicy};
pub use listener::{Dispatch, InteractionEvent, OverlayElements, Settlement, TriggerListener};
pub use overlay::{CloseReason, ModalWidget, OverlayState};
pub use resolver::{ResolutionOutcome, StatusKind, Strategy};
pub use trigger::TriggerDescriptor;
