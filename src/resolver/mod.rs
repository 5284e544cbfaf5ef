//! Strategy selection and execution for one invocation.
//!
//! Image mode wins over everything, then a REST path, then the page itself.
//! Strategies never touch the busy indicator; the listener brackets them.

pub mod fragment;
pub mod image;
pub mod rest;

use std::fmt;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::error::TransportError;
use crate::transport::{Response, Transport};
use crate::trigger::TriggerDescriptor;
use fragment::FragmentExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Image,
    StructuredApi,
    FragmentFallback,
}

impl Strategy {
    pub fn select(descriptor: &TriggerDescriptor) -> Self {
        match (descriptor.is_image_mode, descriptor.rest_path.is_some()) {
            (true, _) => Strategy::Image,
            (false, true) => Strategy::StructuredApi,
            (false, false) => Strategy::FragmentFallback,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Image => "image",
            Strategy::StructuredApi => "rest",
            Strategy::FragmentFallback => "fragment",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure flavour, used for log wording only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    BadRequest,
    Other,
}

impl StatusKind {
    pub fn from_status(status: u16) -> Self {
        if (400..500).contains(&status) {
            StatusKind::BadRequest
        } else {
            StatusKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    ImageReady { markup: String },
    ContentReady { markup: String },
    EmptyContent,
    MissingContentElement,
    /// `status` is `None` when no response arrived at all.
    RequestFailed { kind: StatusKind, status: Option<u16> },
}

impl ResolutionOutcome {
    /// Everything except a failed request still opens the overlay.
    pub fn opens_overlay(&self) -> bool {
        !matches!(self, ResolutionOutcome::RequestFailed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOutcome::ImageReady { .. } => "image-ready",
            ResolutionOutcome::ContentReady { .. } => "content-ready",
            ResolutionOutcome::EmptyContent => "empty-content",
            ResolutionOutcome::MissingContentElement => "missing-content-element",
            ResolutionOutcome::RequestFailed { .. } => "request-failed",
        }
    }

    /// What settling writes into the body. An empty result clears stale content;
    /// a page without a container leaves the body untouched.
    pub fn markup(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::ImageReady { markup }
            | ResolutionOutcome::ContentReady { markup } => Some(markup),
            ResolutionOutcome::EmptyContent => Some(""),
            _ => None,
        }
    }
}

/// A resolution that either finished synchronously or still waits on the network.
pub enum Resolution {
    Ready(ResolutionOutcome),
    Pending(LocalBoxFuture<'static, ResolutionOutcome>),
}

pub struct ContentResolver {
    transport: Rc<dyn Transport>,
    extractor: Rc<FragmentExtractor>,
}

impl ContentResolver {
    pub fn new(transport: Rc<dyn Transport>, extractor: FragmentExtractor) -> Self {
        Self {
            transport,
            extractor: Rc::new(extractor),
        }
    }

    /// Start resolving. The image strategy settles here without suspending.
    pub fn begin(&self, descriptor: &TriggerDescriptor) -> Resolution {
        let strategy = Strategy::select(descriptor);
        tracing::debug!(%strategy, target_url = %descriptor.target_url, "resolving");
        match strategy {
            Strategy::Image => Resolution::Ready(image::resolve(descriptor)),
            Strategy::StructuredApi => {
                // select() guarantees the path is present
                let path = descriptor.rest_path.as_deref().unwrap_or_default();
                let request = self.transport.get(path);
                let path = path.to_string();
                Resolution::Pending(
                    async move {
                        match accept(request.await, Strategy::StructuredApi, &path) {
                            Ok(body) => rest::extract(&body, &path),
                            Err(failed) => failed,
                        }
                    }
                    .boxed_local(),
                )
            }
            Strategy::FragmentFallback => {
                let url = descriptor.target_url.clone();
                let request = self.transport.get(&url);
                let extractor = self.extractor.clone();
                Resolution::Pending(
                    async move {
                        match accept(request.await, Strategy::FragmentFallback, &url) {
                            Ok(body) => extractor.resolve(&body, &url),
                            Err(failed) => failed,
                        }
                    }
                    .boxed_local(),
                )
            }
        }
    }

    pub async fn resolve(&self, descriptor: &TriggerDescriptor) -> ResolutionOutcome {
        match self.begin(descriptor) {
            Resolution::Ready(outcome) => outcome,
            Resolution::Pending(pending) => pending.await,
        }
    }
}

/// Turn a transport result into a body, or the `RequestFailed` outcome to report.
fn accept(
    result: Result<Response, TransportError>,
    strategy: Strategy,
    target: &str,
) -> Result<String, ResolutionOutcome> {
    match result {
        Ok(response) if response.is_success() => Ok(response.body),
        Ok(response) => {
            let kind = StatusKind::from_status(response.status);
            match kind {
                StatusKind::BadRequest => tracing::warn!(
                    %strategy, url = target, status = response.status,
                    "request rejected (bad request), check the REST path"
                ),
                StatusKind::Other => tracing::warn!(
                    %strategy, url = target, status = response.status,
                    "request failed, check the URL"
                ),
            }
            Err(ResolutionOutcome::RequestFailed {
                kind,
                status: Some(response.status),
            })
        }
        Err(e) => {
            tracing::warn!(%strategy, url = target, "request failed: {e}");
            Err(ResolutionOutcome::RequestFailed {
                kind: StatusKind::Other,
                status: None,
            })
        }
    }
}
