//! # error-responder
//!
//! Turns anything thrown while handling a request into a safe HTTP
//! response, rendered as HTML or JSON depending on the client's `Accept`
//! header.
//!
//! ## Features
//!
//! - **Total**: every input, including `null` and malformed objects,
//!   becomes a valid response; rendering never fails
//! - **Convention-aware**: understands nested `output` errors
//!   (`output.statusCode` / `output.headers` / `output.payload`) and flat
//!   `statusCode` / `status` errors
//! - **Production redaction**: error messages stay out of generated
//!   payloads unless production mode is explicitly turned off
//! - **Content negotiation**: quality-aware `Accept` handling, JSON by default
//! - **Safe headers**: `X-Content-Type-Options: nosniff` always, plus a
//!   `Content-Security-Policy` on HTML
//!
//! ## Quick Start
//!
//! ```rust
//! use error_responder::prelude::*;
//! use axum::http::HeaderMap;
//!
//! async fn find_user(headers: HeaderMap) -> Response {
//!     let handler = ErrorHandler::from_headers(&headers, HandlerOptions::default());
//!
//!     // ... the actual work failed:
//!     handler
//!         .handle(HttpException::not_found("no such user"))
//!         .into_response()
//! }
//!
//! let app: Router = Router::new().route("/users/{id}", axum::routing::get(find_user));
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod exception;
pub mod handler;
pub mod negotiate;
pub mod render;

// Re-export core types
pub use common::RenderedResponse;
pub use config::{ConfigService, HandlerOptions};
pub use error::{RenderError, Result};
pub use exception::{CanonicalOutput, ErrorValue, ExceptionFilter, HttpException, to_output};
pub use handler::{ErrorHandler, error_handler};
pub use negotiate::{Format, negotiate};

// Re-export commonly used types from dependencies
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use error_responder::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::RenderedResponse;
    pub use crate::config::{ConfigService, HandlerOptions};
    pub use crate::exception::{ErrorValue, ExceptionFilter, HttpException};
    pub use crate::handler::{ErrorHandler, error_handler};
    pub use crate::negotiate::Format;
    pub use axum::{
        Router,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
}
