//! Normalization of arbitrary error values.
//!
//! [`to_output`] reads a small, fixed set of optional fields off an error
//! value and produces a [`CanonicalOutput`]. Two shaping conventions are
//! understood:
//!
//! ```text
//! nested: { output: { statusCode, headers, payload } }
//! flat:   { statusCode | status, headers, message }
//! ```
//!
//! Nested fields win over flat ones. Every lookup takes the first *truthy*
//! candidate: `null`, `false`, `0` and `""` are skipped.

use crate::exception::value::ErrorValue;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Literal used when no message may or can be shown.
const FALLBACK_MESSAGE: &str = "Error";

/// Renderer-agnostic result of normalizing an error value.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalOutput {
    pub status: StatusCode,
    /// Header pairs as supplied by the error, names unchanged.
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
}

/// The body to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Taken verbatim from `output.payload`.
    Supplied(Value),
    Generated(GeneratedPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPayload {
    pub status: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

/// The error as the normalizer sees it.
enum ErrorView<'a> {
    /// Object-like value; arrays carry no readable fields.
    Fields(Option<&'a Map<String, Value>>),
    /// Absent or primitive value, reduced to a synthesized message.
    Message(String),
}

impl<'a> ErrorView<'a> {
    fn new(err: &'a ErrorValue) -> Self {
        match err.as_value() {
            Value::Null => Self::Message(format!("Empty error: {}", err.as_value())),
            Value::Object(_) | Value::Array(_) => Self::Fields(err.fields()),
            Value::String(text) => Self::Message(text.clone()),
            Value::Number(n) => Self::Message(number_to_string(n)),
            primitive => Self::Message(primitive.to_string()),
        }
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        match self {
            Self::Fields(Some(fields)) => fields.get(name),
            _ => None,
        }
    }

    fn output_field(&self, name: &str) -> Option<&'a Value> {
        self.field("output")
            .and_then(Value::as_object)
            .and_then(|output| output.get(name))
    }

    fn message(&self) -> Option<Value> {
        match self {
            Self::Fields(_) => self.field("message").filter(|v| is_truthy(v)).cloned(),
            Self::Message(text) if !text.is_empty() => Some(Value::String(text.clone())),
            Self::Message(_) => None,
        }
    }
}

/// Convert any error value into a [`CanonicalOutput`].
///
/// In production the error's own message never reaches the payload.
/// Never panics.
pub fn to_output(err: &ErrorValue, production: bool) -> CanonicalOutput {
    let error = ErrorView::new(err);

    let status_source = first_truthy([
        error.output_field("statusCode"),
        error.field("statusCode"),
        error.field("status"),
    ]);
    let status = status_source.and_then(coerce_status).unwrap_or_else(|| {
        tracing::debug!("no usable status on error value, using 500");
        StatusCode::INTERNAL_SERVER_ERROR
    });

    let headers = collect_headers(first_truthy([
        error.output_field("headers"),
        error.field("headers"),
    ]));

    let payload = match error.output_field("payload").filter(|v| is_truthy(v)) {
        Some(payload) => Payload::Supplied(payload.clone()),
        None => Payload::Generated(GeneratedPayload {
            status: status.as_u16(),
            error: format!("{} Error", status.as_u16()),
            message: redact(error.message(), production),
        }),
    };

    CanonicalOutput {
        status,
        headers,
        payload,
    }
}

fn redact(message: Option<Value>, production: bool) -> Option<Value> {
    match (production, message) {
        (true, Some(_)) => None,
        (false, Some(message)) => Some(message),
        (_, None) => Some(Value::String(FALLBACK_MESSAGE.to_string())),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_truthy<'a, const N: usize>(candidates: [Option<&'a Value>; N]) -> Option<&'a Value> {
    candidates.into_iter().flatten().find(|v| is_truthy(v))
}

/// Coerce a status candidate the way a numeric conversion of the raw
/// value would: numbers as-is, numeric strings (including `0x`/`0o`/`0b`
/// literals), and single-element arrays through their only element.
///
/// Only final statuses (200..=599) survive; 1xx cannot end a response.
fn coerce_status(value: &Value) -> Option<StatusCode> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_number(s.trim())?,
        Value::Array(items) => match items.as_slice() {
            [only] => return coerce_status(only),
            _ => return None,
        },
        _ => return None,
    };
    if !number.is_finite() || number.fract() != 0.0 || !(200.0..=599.0).contains(&number) {
        return None;
    }
    StatusCode::from_u16(number as u16).ok()
}

fn parse_number(text: &str) -> Option<f64> {
    let radix = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| text.strip_prefix(prefix).map(|digits| (digits, radix)));

    match radix {
        Some((digits, radix)) => u64::from_str_radix(digits, radix).ok().map(|n| n as f64),
        None => text.parse::<f64>().ok(),
    }
}

/// Integral numbers print without a fraction and `-0` prints as `0`.
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

fn collect_headers(source: Option<&Value>) -> Vec<(String, String)> {
    let Some(fields) = source.and_then(Value::as_object) else {
        return Vec::new();
    };

    fields
        .iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => number_to_string(n),
                Value::Bool(b) => b.to_string(),
                _ => {
                    tracing::debug!(header = %name, "skipping non-scalar header value");
                    return None;
                }
            };
            Some((name.clone(), value))
        })
        .collect()
}
