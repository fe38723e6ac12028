//! The error handler: one per request.
//!
//! # Data Flow
//! ```text
//! error value
//!     → exception::to_output (normalize, redact)
//!     → Format::from_accept  (negotiate)
//!     → render::render       (HTML or JSON)
//!     → RenderedResponse
//! ```
//!
//! # Example
//! ```
//! use error_responder::prelude::*;
//! use axum::http::Request;
//!
//! let request = Request::builder()
//!     .header("accept", "text/html")
//!     .body(())
//!     .unwrap();
//!
//! let handler = error_handler(&request, HandlerOptions::development());
//! let rendered = handler.handle(HttpException::not_found("no such user"));
//!
//! assert_eq!(rendered.status(), StatusCode::NOT_FOUND);
//! assert_eq!(rendered.header("content-type"), Some("text/html"));
//! ```

use crate::common::RenderedResponse;
use crate::config::HandlerOptions;
use crate::exception::{ErrorValue, ExceptionFilter, to_output};
use crate::negotiate::Format;
use crate::render::render;
use axum::http::{HeaderMap, Request, header::ACCEPT};
use axum::response::{IntoResponse, Response};
use std::error::Error;

/// Renders errors for one request.
///
/// Only the request's `Accept` header is kept. Every call to
/// [`handle`](Self::handle) is independent, so one handler can serve any
/// number of failures, from any number of threads.
#[derive(Debug, Clone)]
pub struct ErrorHandler {
    accept: Option<String>,
    options: HandlerOptions,
}

/// Bind an [`ErrorHandler`] to a request.
pub fn error_handler<B>(request: &Request<B>, options: HandlerOptions) -> ErrorHandler {
    ErrorHandler::from_headers(request.headers(), options)
}

impl ErrorHandler {
    /// An empty `accept` is treated as absent.
    pub fn new(accept: Option<&str>, options: HandlerOptions) -> Self {
        Self {
            accept: accept.filter(|a| !a.is_empty()).map(str::to_string),
            options,
        }
    }

    /// Read `Accept` from request headers. Repeated headers are joined
    /// with `", "`; values that are not visible ASCII are ignored.
    pub fn from_headers(headers: &HeaderMap, options: HandlerOptions) -> Self {
        let accept = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(Some(accept.as_str()), options)
    }

    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }

    pub fn options(&self) -> HandlerOptions {
        self.options
    }

    pub fn format(&self) -> Format {
        Format::from_accept(self.accept())
    }

    /// Render an error value into a response. Never panics.
    pub fn handle(&self, err: impl Into<ErrorValue>) -> RenderedResponse {
        let output = to_output(&err.into(), self.options.production);
        let format = self.format();
        tracing::debug!(status = %output.status, format = %format, "rendering error response");
        render(format, &output)
    }

    /// A reusable closure rendering straight to an axum [`Response`].
    pub fn into_fn(self) -> impl Fn(ErrorValue) -> Response + Clone + Send + Sync + 'static {
        move |err| self.handle(err).into_response()
    }
}

impl ExceptionFilter for ErrorHandler {
    fn catch(&self, error: Box<dyn Error + Send + Sync>) -> Response {
        self.handle(error).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::HttpException;
    use axum::http::{HeaderValue, StatusCode};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::thread;

    fn json_body(rendered: &RenderedResponse) -> Value {
        serde_json::from_str(rendered.body()).unwrap()
    }

    #[test]
    fn test_non_error_value() {
        let handler = ErrorHandler::new(None, HandlerOptions::development());
        let rendered = handler.handle("test");
        assert_eq!(rendered.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            rendered.body(),
            r#"{"status":500,"error":"500 Error","message":"test"}"#
        );
    }

    #[test]
    fn test_empty_error() {
        let handler = ErrorHandler::new(None, HandlerOptions::development());
        let rendered = handler.handle(ErrorValue::absent());
        assert_eq!(json_body(&rendered)["message"], json!("Empty error: null"));
    }

    #[test]
    fn test_production_redacts_message() {
        let err = std::io::Error::other("boom!");

        let handler = ErrorHandler::new(None, HandlerOptions::default());
        let body = json_body(&handler.handle(ErrorValue::from_error(&err)));
        assert_eq!(body, json!({ "status": 500, "error": "500 Error" }));

        let handler = ErrorHandler::new(None, HandlerOptions::development());
        let body = json_body(&handler.handle(ErrorValue::from_error(&err)));
        assert_eq!(body["message"], json!("boom!"));
    }

    #[test]
    fn test_missing_message_in_development() {
        let handler = ErrorHandler::new(None, HandlerOptions::development());
        let body = json_body(&handler.handle(json!({})));
        assert_eq!(body["message"], json!("Error"));
    }

    #[test]
    fn test_nested_output_error() {
        let handler = ErrorHandler::new(Some("application/json"), HandlerOptions::default());
        let rendered = handler.handle(HttpException::bad_request("data has an issue"));
        assert_eq!(rendered.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(&rendered),
            json!({ "statusCode": 400, "error": "Bad Request", "message": "data has an issue" })
        );
    }

    #[test]
    fn test_flat_status_error() {
        let handler = ErrorHandler::new(None, HandlerOptions::development());
        let rendered = handler.handle(json!({
            "message": "data has an issue",
            "status": 400,
            "statusCode": 400,
            "expose": true,
        }));
        assert_eq!(rendered.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(&rendered),
            json!({ "status": 400, "error": "400 Error", "message": "data has an issue" })
        );
    }

    #[test]
    fn test_negotiated_content_type() {
        let cases = [
            (Some("text/html"), "text/html"),
            (Some("application/json"), "application/json"),
            (None, "application/json"),
        ];
        for (accept, expected) in cases {
            let handler = ErrorHandler::new(accept, HandlerOptions::default());
            let rendered = handler.handle("boom!");
            assert_eq!(rendered.header("content-type"), Some(expected), "{accept:?}");
            assert_eq!(rendered.header("x-content-type-options"), Some("nosniff"));
        }
    }

    #[test]
    fn test_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            ErrorHandler::from_headers(&headers, HandlerOptions::default()).accept(),
            None
        );

        headers.append(ACCEPT, HeaderValue::from_static("application/json;q=0.5"));
        headers.append(ACCEPT, HeaderValue::from_static("text/html"));
        let handler = ErrorHandler::from_headers(&headers, HandlerOptions::default());
        assert_eq!(handler.accept(), Some("application/json;q=0.5, text/html"));
        assert_eq!(handler.format(), Format::Html);
    }

    #[test]
    fn test_error_handler_binds_request() {
        let request = Request::builder()
            .header(ACCEPT, "text/html")
            .body(())
            .unwrap();
        let handler = error_handler(&request, HandlerOptions::default());
        assert_eq!(handler.format(), Format::Html);
        assert!(handler.options().production);
    }

    #[test]
    fn test_handler_is_reusable_across_threads() {
        let handler = Arc::new(ErrorHandler::new(None, HandlerOptions::development()));

        let threads: Vec<_> = (0..4)
            .map(|i| {
                let handler = Arc::clone(&handler);
                thread::spawn(move || {
                    handler.handle(json!({ "status": 400 + i, "message": format!("failure {i}") }))
                })
            })
            .collect();

        for (i, thread) in threads.into_iter().enumerate() {
            let rendered = thread.join().unwrap();
            assert_eq!(rendered.status().as_u16(), 400 + i as u16);
            assert_eq!(json_body(&rendered)["message"], json!(format!("failure {i}")));
        }
    }

    #[test]
    fn test_catch_boxed_error() {
        let handler = ErrorHandler::new(None, HandlerOptions::default());
        let response = handler.catch(Box::new(HttpException::forbidden("nope")));
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = handler.catch("plain failure".into());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_fn_is_reusable() {
        let handler = ErrorHandler::new(Some("text/html"), HandlerOptions::default()).into_fn();
        for status in [400, 404, 503] {
            let response = handler(json!({ "statusCode": status }).into());
            assert_eq!(response.status().as_u16(), status);
            assert_eq!(response.headers()["content-type"], "text/html");
        }
    }
}
