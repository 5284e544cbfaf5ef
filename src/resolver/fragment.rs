//! Fallback: fetch the full page and lift out its main content container.

use scraper::{Html, Selector};

use super::ResolutionOutcome;
use crate::error::SelectorError;

/// `<article>` first, then anything with the `main` class.
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &["article", ".main"];

/// Ordered container selectors; the first selector with any match wins.
#[derive(Debug, Clone)]
pub struct FragmentExtractor {
    selectors: Vec<Selector>,
}

impl FragmentExtractor {
    pub fn new<I, S>(selectors: I) -> Result<Self, SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selectors = selectors
            .into_iter()
            .map(|s| {
                let s = s.as_ref();
                Selector::parse(s).map_err(|e| SelectorError {
                    selector: s.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }

    #[cfg(test)]
    pub(crate) fn default_set() -> Self {
        Self::new(DEFAULT_CONTENT_SELECTORS).unwrap()
    }

    /// Inner markup of the first matching container, if any.
    pub fn extract(&self, document: &str) -> Option<String> {
        let html = Html::parse_document(document);
        self.selectors
            .iter()
            .find_map(|selector| html.select(selector).next())
            .map(|element| element.inner_html())
    }

    pub(crate) fn resolve(&self, document: &str, url: &str) -> ResolutionOutcome {
        match self.extract(document) {
            Some(markup) => ResolutionOutcome::ContentReady { markup },
            None => {
                tracing::debug!(url, "no content container in fetched page");
                ResolutionOutcome::MissingContentElement
            }
        }
    }
}
