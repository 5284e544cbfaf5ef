//! Structured content API: a JSON array of records, each with `content.rendered`.

use serde::Deserialize;

use super::ResolutionOutcome;

#[derive(Debug, Deserialize)]
struct Record {
    content: Option<Rendered>,
}

#[derive(Debug, Deserialize)]
struct Rendered {
    rendered: Option<String>,
}

/// Pull the first record's rendered content out of an API response body.
///
/// An empty array, a record without the field, or a body of some other shape
/// all degrade to `EmptyContent` so the overlay still opens.
pub(crate) fn extract(body: &str, path: &str) -> ResolutionOutcome {
    let records: Vec<serde_json::Value> = match serde_json::from_str(body) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(path, "REST response is not a JSON array: {e}");
            return ResolutionOutcome::EmptyContent;
        }
    };

    let rendered = records
        .into_iter()
        .next()
        .and_then(|first| serde_json::from_value::<Record>(first).ok())
        .and_then(|record| record.content)
        .and_then(|content| content.rendered);

    match rendered {
        Some(markup) => ResolutionOutcome::ContentReady { markup },
        None => {
            tracing::debug!(path, "no rendered content at route, check the REST path");
            ResolutionOutcome::EmptyContent
        }
    }
}
