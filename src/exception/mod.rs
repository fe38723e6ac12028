//! Error values and their normalization.
//!
//! # Data Flow
//! ```text
//! anything thrown
//!     → value.rs (ErrorValue: generic read-only view)
//!     → normalize.rs (status / headers / payload triple)
//!     → [negotiated renderer]
//! ```

use axum::response::Response;
use std::error::Error;

pub mod http;
pub mod normalize;
pub mod value;

pub use http::HttpException;
pub use normalize::{CanonicalOutput, GeneratedPayload, Payload, to_output};
pub use value::ErrorValue;

/// The ExceptionFilter trait
///
/// Filters handle errors thrown during request processing.
/// They must return a valid Response.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch an exception and return a response
    fn catch(&self, error: Box<dyn Error + Send + Sync>) -> Response;
}
