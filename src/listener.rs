//! Click-to-overlay orchestration.
//!
//! One invocation walks `Filtering -> Preparing -> Resolving -> Settling` and ends
//! either `Opened` or `Suppressed`. Nothing survives an invocation except the
//! overlay elements themselves. Invocations may overlap: `start` keeps every
//! in-flight resolution polled while new events keep arriving, and the configured
//! `SettlePolicy` decides what a late settlement may still do.

use std::cell::Cell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, Stream, StreamExt};

use crate::config::{Config, SettlePolicy};
use crate::dom::Element;
use crate::error::{SelectorError, TriggerError};
use crate::indicator::LoadingIndicator;
use crate::modifier::ClassNameManager;
use crate::overlay::{OverlayLifecycle, OverlayState, OverlayWidget};
use crate::resolver::{ContentResolver, Resolution, ResolutionOutcome};
use crate::transport::Transport;
use crate::trigger::{ClassPredicate, DEFAULT_IMAGE_CLASS, TriggerDescriptor, TriggerPredicate};
use crate::util::preview;

/// An interaction observed anywhere on the page.
#[derive(Debug)]
pub struct InteractionEvent<E> {
    target: E,
    default_prevented: Cell<bool>,
}

impl<E> InteractionEvent<E> {
    pub fn new(target: E) -> Self {
        Self {
            target,
            default_prevented: Cell::new(false),
        }
    }

    pub fn target(&self) -> &E {
        &self.target
    }

    /// Stop the trigger's own navigation.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// How a settled invocation left the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Opened,
    Suppressed,
    /// Discarded under `SettlePolicy::LatestIssued`: a newer invocation exists.
    Superseded,
}

/// A finished resolution tagged with its invocation sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub seq: u64,
    pub outcome: ResolutionOutcome,
}

pub enum Dispatch {
    /// Not a trigger; nothing happened.
    Ignored,
    /// A trigger, but unusable. The indicator was never shown.
    Aborted(TriggerError),
    /// Settled without suspending (image mode).
    Settled(Settlement),
    /// Waiting on the network. Hand the result to `settle`.
    Pending(LocalBoxFuture<'static, Settled>),
}

/// The overlay's pre-existing elements.
pub struct OverlayElements<E> {
    pub root: E,
    pub body: E,
    pub indicator: E,
}

pub struct TriggerListener<E> {
    predicate: Box<dyn TriggerPredicate<E>>,
    image_marker: String,
    classes: ClassNameManager,
    indicator: LoadingIndicator<E>,
    overlay: OverlayLifecycle<E>,
    resolver: ContentResolver,
    policy: SettlePolicy,
    issued: Cell<u64>,
}

impl<E: Element + Clone + 'static> TriggerListener<E> {
    pub fn new(
        overlay: OverlayLifecycle<E>,
        indicator: LoadingIndicator<E>,
        resolver: ContentResolver,
    ) -> Self {
        Self {
            predicate: Box::new(ClassPredicate::default()),
            image_marker: DEFAULT_IMAGE_CLASS.to_string(),
            classes: ClassNameManager,
            indicator,
            overlay,
            resolver,
            policy: SettlePolicy::default(),
            issued: Cell::new(0),
        }
    }

    /// Wire a listener from config and injected collaborators.
    pub fn from_config(
        config: &Config,
        elements: OverlayElements<E>,
        widget: Rc<dyn OverlayWidget>,
        transport: Rc<dyn Transport>,
    ) -> Result<Self, SelectorError> {
        let resolver = ContentResolver::new(transport, config.extractor()?);
        let overlay = OverlayLifecycle::new(elements.root, elements.body, widget);
        let indicator = LoadingIndicator::new(elements.indicator, config.busy_class.clone());
        Ok(Self::new(overlay, indicator, resolver)
            .with_predicate(ClassPredicate::new(config.trigger_class.clone()))
            .with_image_marker(config.image_class.clone())
            .with_settle_policy(config.settle_policy))
    }

    pub fn with_predicate(mut self, predicate: impl TriggerPredicate<E> + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn with_image_marker(mut self, class: impl Into<String>) -> Self {
        self.image_marker = class.into();
        self
    }

    pub fn with_settle_policy(mut self, policy: SettlePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn indicator(&self) -> &LoadingIndicator<E> {
        &self.indicator
    }

    pub fn state(&self) -> OverlayState {
        OverlayState {
            applied_modifier_classes: self.classes.applied(self.overlay.root()),
            is_busy: self.indicator.is_visible(),
            is_open: self.overlay.is_open(),
            body_content: self.overlay.body().inner_html(),
        }
    }

    /// Run one event through filtering and preparation, and start resolving.
    pub fn dispatch(&self, event: &InteractionEvent<E>) -> Dispatch {
        let target = event.target();
        if !self.predicate.is_trigger(target) {
            return Dispatch::Ignored;
        }
        event.prevent_default();

        let descriptor = match TriggerDescriptor::parse(target, &self.image_marker) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("ignoring malformed trigger: {e}");
                return Dispatch::Aborted(e);
            }
        };

        self.classes
            .replace(self.overlay.root(), descriptor.modifier_class.as_ref());

        let seq = self.issued.get() + 1;
        self.issued.set(seq);
        tracing::trace!(seq, target_url = %descriptor.target_url, "preparing -> resolving");

        self.indicator.show();
        match self.resolver.begin(&descriptor) {
            Resolution::Ready(outcome) => Dispatch::Settled(self.settle(Settled { seq, outcome })),
            Resolution::Pending(pending) => Dispatch::Pending(
                async move {
                    Settled {
                        seq,
                        outcome: pending.await,
                    }
                }
                .boxed_local(),
            ),
        }
    }

    /// Apply a finished resolution to the overlay. Always hides the indicator.
    pub fn settle(&self, settled: Settled) -> Settlement {
        let Settled { seq, outcome } = settled;
        let latest = self.issued.get();

        if self.policy == SettlePolicy::LatestIssued && seq != latest {
            self.indicator.hide();
            tracing::debug!(seq, latest, "discarding superseded resolution");
            return Settlement::Superseded;
        }

        if let Some(markup) = outcome.markup() {
            self.overlay.write_body(markup);
            tracing::debug!(seq, body = %preview(markup, 80), "body written");
        }
        self.indicator.hide();

        if outcome.opens_overlay() {
            self.overlay.open();
            tracing::debug!(seq, outcome = outcome.label(), "overlay opened");
            Settlement::Opened
        } else {
            tracing::debug!(seq, outcome = outcome.label(), "overlay suppressed");
            Settlement::Suppressed
        }
    }

    /// Observe `events` until the stream ends, then drain what is still in flight.
    ///
    /// Single-threaded: drive it on a local executor.
    pub async fn start<S>(self, events: S)
    where
        S: Stream<Item = InteractionEvent<E>> + Unpin,
    {
        let mut events = events.fuse();
        let mut in_flight = FuturesUnordered::new();

        loop {
            futures::select! {
                event = events.next() => match event {
                    Some(event) => {
                        if let Dispatch::Pending(pending) = self.dispatch(&event) {
                            in_flight.push(pending);
                        }
                    }
                    None => break,
                },
                settled = in_flight.select_next_some() => {
                    self.settle(settled);
                }
                complete => break,
            }
        }

        while let Some(settled) = in_flight.next().await {
            self.settle(settled);
        }
        tracing::debug!("event stream closed");
    }
}
