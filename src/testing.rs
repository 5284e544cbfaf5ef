//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::error::TransportError;
use crate::transport::{Response, Transport};

#[derive(Default)]
struct Script {
    immediate: HashMap<String, Response>,
    deferred: HashMap<String, oneshot::Receiver<Response>>,
    requests: Vec<String>,
}

/// Transport answering from a script. Unscripted URLs fail at the transport level.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport(Rc<RefCell<Script>>);

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer every GET of `url` with `response` right away.
    pub(crate) fn respond(&self, url: &str, response: Response) {
        self.0
            .borrow_mut()
            .immediate
            .insert(url.to_string(), response);
    }

    /// Hold the next GET of `url` until the returned sender fires.
    pub(crate) fn defer(&self, url: &str) -> oneshot::Sender<Response> {
        let (tx, rx) = oneshot::channel();
        self.0.borrow_mut().deferred.insert(url.to_string(), rx);
        tx
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.0.borrow().requests.clone()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> LocalBoxFuture<'static, Result<Response, TransportError>> {
        let mut script = self.0.borrow_mut();
        script.requests.push(url.to_string());
        let failure = |reason: &str| TransportError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };
        if let Some(rx) = script.deferred.remove(url) {
            let dropped = failure("connection dropped");
            return async move { rx.await.map_err(|_| dropped) }.boxed_local();
        }
        let result = match script.immediate.get(url) {
            Some(response) => Ok(response.clone()),
            None => Err(failure("unscripted")),
        };
        futures::future::ready(result).boxed_local()
    }
}
