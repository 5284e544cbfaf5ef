use futures::FutureExt;
use futures::future::LocalBoxFuture;
use url::Url;

use crate::error::TransportError;

/// A settled GET: status plus the body as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches bytes for the network-backed strategies.
///
/// Returned futures are `'static` so the orchestrator can hold several in flight.
pub trait Transport {
    fn get(&self, url: &str) -> LocalBoxFuture<'static, Result<Response, TransportError>>;
}

/// `reqwest`-backed transport. Relative targets are joined onto `base`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Option<Url>,
}

impl HttpTransport {
    pub fn new(base_url: Option<&str>) -> Result<Self, TransportError> {
        let base = base_url
            .map(|b| {
                Url::parse(b).map_err(|e| TransportError::InvalidUrl {
                    url: b.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("modal-loader/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base })
    }

    pub fn resolve_url(&self, target: &str) -> Result<Url, TransportError> {
        match Url::parse(target) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base {
                Some(base) => base.join(target).map_err(|e| TransportError::InvalidUrl {
                    url: target.to_string(),
                    reason: e.to_string(),
                }),
                None => Err(TransportError::RelativeWithoutBase(target.to_string())),
            },
            Err(e) => Err(TransportError::InvalidUrl {
                url: target.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> LocalBoxFuture<'static, Result<Response, TransportError>> {
        let client = self.client.clone();
        let resolved = self.resolve_url(url);
        async move {
            let url = resolved?;
            tracing::debug!(%url, "GET");
            let response = client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(Response { status, body })
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_any_2xx() {
        assert!(Response::ok("").is_success());
        assert!(Response::status(204).is_success());
        assert!(!Response::status(301).is_success());
        assert!(!Response::status(404).is_success());
        assert!(!Response::status(0).is_success());
    }

    #[test]
    fn relative_targets_join_base() {
        let t = HttpTransport::new(Some("https://example.org/blog/")).unwrap();
        assert_eq!(
            t.resolve_url("/about").unwrap().as_str(),
            "https://example.org/about"
        );
        assert_eq!(
            t.resolve_url("/wp-json/wp/v2/pages?slug=about").unwrap().as_str(),
            "https://example.org/wp-json/wp/v2/pages?slug=about"
        );
        assert_eq!(
            t.resolve_url("post").unwrap().as_str(),
            "https://example.org/blog/post"
        );
    }

    #[test]
    fn absolute_targets_ignore_base() {
        let t = HttpTransport::new(Some("https://example.org/")).unwrap();
        assert_eq!(
            t.resolve_url("http://other.test/x").unwrap().as_str(),
            "http://other.test/x"
        );
    }

    #[test]
    fn relative_without_base_is_an_error() {
        let t = HttpTransport::new(None).unwrap();
        assert!(matches!(
            t.resolve_url("/about"),
            Err(TransportError::RelativeWithoutBase(ref u)) if u == "/about"
        ));
    }

    #[test]
    fn bad_base_is_rejected() {
        assert!(matches!(
            HttpTransport::new(Some("not a url")),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn unresolvable_target_fails_the_future() {
        let t = HttpTransport::new(None).unwrap();
        let result = futures::executor::block_on(t.get("/about"));
        assert!(matches!(result, Err(TransportError::RelativeWithoutBase(_))));
    }
}
