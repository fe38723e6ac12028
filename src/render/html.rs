use super::{base_headers, merge_headers, serialize};
use crate::common::RenderedResponse;
use crate::exception::CanonicalOutput;
use crate::negotiate::Format;
use axum::http::{HeaderValue, header::CONTENT_SECURITY_POLICY};

/// Render the payload as indented JSON inside a `<pre>` block.
///
/// Runs of two spaces become `" &nbsp;"` so browsers keep the indentation.
pub fn render_html(output: &CanonicalOutput) -> RenderedResponse {
    let json = serialize(&output.payload, output.status, true);
    let content = html_escape::encode_quoted_attribute(&json).replace("  ", " &nbsp;");
    let body = format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Error</title></head><body><pre>{content}</pre></body></html>"
    );

    let mut headers = base_headers(Format::Html);
    headers.insert(
        CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'"),
    );
    merge_headers(&mut headers, &output.headers);

    RenderedResponse::new(output.status, headers, body)
}
