use crate::exception::value::ErrorValue;
use axum::http::StatusCode;
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Message placed in the payload of every 5xx exception.
const INTERNAL_MESSAGE: &str = "An internal server error occurred";

/// A status-bearing error that already knows its client-facing output.
///
/// Converts into an [`ErrorValue`] in the nested "output" convention:
///
/// ```json
/// {
///   "message": "data has an issue",
///   "output": {
///     "statusCode": 400,
///     "headers": {},
///     "payload": { "statusCode": 400, "error": "Bad Request", "message": "data has an issue" }
///   }
/// }
/// ```
///
/// Server errors never put their own message in the payload.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HttpException {
    status: StatusCode,
    message: String,
    headers: Vec<(String, String)>,
    data: Option<Value>,
}

impl HttpException {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            headers: Vec::new(),
            data: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Add a response header, e.g. `WWW-Authenticate` on a 401.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach extra data. It travels with the error value but is not sent.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn payload(&self) -> Value {
        let message = if self.status.is_server_error() {
            INTERNAL_MESSAGE
        } else {
            self.message.as_str()
        };
        json!({
            "statusCode": self.status.as_u16(),
            "error": self.status.canonical_reason().unwrap_or("Unknown"),
            "message": message,
        })
    }
}

impl From<&HttpException> for ErrorValue {
    fn from(exception: &HttpException) -> Self {
        let headers: Map<String, Value> = exception
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();

        let mut value = json!({
            "message": exception.message,
            "output": {
                "statusCode": exception.status.as_u16(),
                "headers": headers,
                "payload": exception.payload(),
            },
        });
        if let (Some(data), Some(fields)) = (&exception.data, value.as_object_mut()) {
            fields.insert("data".to_string(), data.clone());
        }
        ErrorValue::from(value)
    }
}

impl From<HttpException> for ErrorValue {
    fn from(exception: HttpException) -> Self {
        ErrorValue::from(&exception)
    }
}
