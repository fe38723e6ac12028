//! Response rendering, one renderer per [`Format`].
//!
//! Both renderers start from a fixed set of headers and then merge in the
//! headers carried by the error, which may replace the fixed ones.

use crate::common::RenderedResponse;
use crate::error::{RenderError, Result};
use crate::exception::{CanonicalOutput, Payload};
use crate::negotiate::Format;
use axum::http::{
    HeaderMap, HeaderName, HeaderValue, StatusCode,
    header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS},
};

pub mod html;
pub mod json;

pub use html::render_html;
pub use json::render_json;

pub fn render(format: Format, output: &CanonicalOutput) -> RenderedResponse {
    match format {
        Format::Html => render_html(output),
        Format::Json => render_json(output),
    }
}

/// `Content-Type` for the format plus `X-Content-Type-Options: nosniff`.
fn base_headers(format: Format) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(format.content_type()));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers
}

/// Merge error-supplied headers; invalid ones are dropped.
fn merge_headers(headers: &mut HeaderMap, supplied: &[(String, String)]) {
    for (name, value) in supplied {
        match to_header(name, value) {
            Ok((name, value)) => {
                headers.insert(name, value);
            }
            Err(err) => tracing::warn!(error = %err, "dropping error-supplied header"),
        }
    }
}

fn to_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| RenderError::invalid_name(name))?;
    let header_value = HeaderValue::from_str(value).map_err(|_| RenderError::invalid_value(name))?;
    Ok((header_name, header_value))
}

/// Serialize the payload, degrading to a status-only body on failure.
fn serialize(payload: &Payload, status: StatusCode, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(payload)
    } else {
        serde_json::to_string(payload)
    };

    result.map_err(RenderError::from).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "falling back to minimal error body");
        format!("{{\"status\":{}}}", status.as_u16())
    })
}
