use super::{base_headers, merge_headers, serialize};
use crate::common::RenderedResponse;
use crate::exception::CanonicalOutput;
use crate::negotiate::Format;

/// Render the payload as compact JSON.
pub fn render_json(output: &CanonicalOutput) -> RenderedResponse {
    let body = serialize(&output.payload, output.status, false);

    let mut headers = base_headers(Format::Json);
    merge_headers(&mut headers, &output.headers);

    RenderedResponse::new(output.status, headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::{ErrorValue, HttpException, to_output};
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_compact_body() {
        let output = to_output(&ErrorValue::from(json!({ "message": "boom!" })), false);
        let rendered = render_json(&output);

        assert_eq!(rendered.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            rendered.body(),
            r#"{"status":500,"error":"500 Error","message":"boom!"}"#
        );
        assert_eq!(rendered.header("content-type"), Some("application/json"));
        assert_eq!(rendered.header("x-content-type-options"), Some("nosniff"));
        assert_eq!(rendered.header("content-security-policy"), None);
    }

    #[test]
    fn test_supplied_payload_keeps_key_order() {
        let output = to_output(&HttpException::bad_request("data has an issue").into(), true);
        let rendered = render_json(&output);

        assert_eq!(rendered.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            rendered.body(),
            r#"{"statusCode":400,"error":"Bad Request","message":"data has an issue"}"#
        );
    }

    #[test]
    fn test_error_headers_merged() {
        let output = to_output(
            &HttpException::unauthorized("token expired")
                .with_header("WWW-Authenticate", "Bearer")
                .into(),
            true,
        );
        let rendered = render_json(&output);

        assert_eq!(rendered.header("www-authenticate"), Some("Bearer"));
        assert_eq!(rendered.header("x-content-type-options"), Some("nosniff"));
    }
}
