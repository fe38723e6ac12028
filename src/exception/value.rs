//! A generic, read-only view of whatever was thrown.

use crate::exception::http::HttpException;
use serde_json::{Map, Value, json};
use std::error::Error;

/// An arbitrary error value.
///
/// Nothing about its shape is guaranteed: it may be absent (`null`), a
/// primitive, an array or an object. The normalizer only ever reads
/// fields off objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorValue(Value);

impl ErrorValue {
    /// The absent error (`null`).
    pub fn absent() -> Self {
        Self(Value::Null)
    }

    /// View a Rust error as an object carrying its display text as `message`.
    ///
    /// An [`HttpException`] keeps its structured shape.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        match error.downcast_ref::<HttpException>() {
            Some(exception) => exception.into(),
            None => Self(json!({ "message": error.to_string() })),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The value's own fields, if it is an object.
    pub(crate) fn fields(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }
}

impl From<Value> for ErrorValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for ErrorValue {
    fn from(message: &str) -> Self {
        Self(Value::String(message.to_string()))
    }
}

impl From<String> for ErrorValue {
    fn from(message: String) -> Self {
        Self(Value::String(message))
    }
}

impl<T: Into<ErrorValue>> From<Option<T>> for ErrorValue {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::absent, Into::into)
    }
}

impl From<Box<dyn Error + Send + Sync>> for ErrorValue {
    fn from(error: Box<dyn Error + Send + Sync>) -> Self {
        Self::from_error(error.as_ref())
    }
}

impl From<anyhow::Error> for ErrorValue {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast_ref::<HttpException>() {
            Some(exception) => exception.into(),
            None => Self(json!({ "message": error.to_string() })),
        }
    }
}
