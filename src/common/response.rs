use axum::{
    body::Body,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

/// A fully rendered error response
///
/// Holds everything that goes on the wire: status, headers and body text.
/// Built fresh for every error and handed straight to the caller.
///
/// # Example
/// ```
/// use error_responder::prelude::*;
///
/// let handler = ErrorHandler::new(Some("application/json"), HandlerOptions::default());
/// let rendered = handler.handle("boom");
///
/// assert_eq!(rendered.status(), StatusCode::INTERNAL_SERVER_ERROR);
/// assert_eq!(rendered.header("content-type"), Some("application/json"));
/// ```
#[derive(Debug, Clone)]
pub struct RenderedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl RenderedResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Look up a header as text. Names are case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

impl IntoResponse for RenderedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
