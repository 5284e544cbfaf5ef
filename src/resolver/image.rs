//! Direct image display: no network, just an escaped `<img>` element.

use std::path::Path;

use image::ImageFormat;

use super::ResolutionOutcome;
use crate::trigger::TriggerDescriptor;

pub(crate) fn resolve(descriptor: &TriggerDescriptor) -> ResolutionOutcome {
    if !is_raster_url(&descriptor.target_url) {
        tracing::debug!(
            target_url = %descriptor.target_url,
            "image trigger does not point at a known raster format"
        );
    }
    ResolutionOutcome::ImageReady {
        markup: build_markup(
            &descriptor.target_url,
            descriptor.image_alt.as_deref(),
            descriptor.image_class.as_deref(),
        ),
    }
}

/// `<img>` markup with every attribute value escaped. `alt` is always present.
pub fn build_markup(src: &str, alt: Option<&str>, class: Option<&str>) -> String {
    let mut out = String::with_capacity(src.len() + 32);
    out.push_str("<img src=\"");
    push_escaped(&mut out, src);
    out.push_str("\" alt=\"");
    push_escaped(&mut out, alt.unwrap_or_default());
    out.push('"');
    if let Some(class) = class {
        out.push_str(" class=\"");
        push_escaped(&mut out, class);
        out.push('"');
    }
    out.push_str(" />");
    out
}

fn push_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Whether the URL path ends in an extension the image crate knows.
pub fn is_raster_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    Path::new(path)
        .extension()
        .and_then(ImageFormat::from_extension)
        .is_some()
}
