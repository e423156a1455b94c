//! # luft-http — Axum Adapters for Luft Schemas
//!
//! Thin collaborator layer between HTTP handlers and the schema engine.
//! Nothing here decides whether data is valid; it only moves request data
//! into the engine and moves its verdict back out as a response.
//!
//! ## Modules
//!
//! - [`error`]: [`AppError`] and the structured JSON error body.
//! - [`extractors`]: [`Coerced`] and [`CoercedQuery`] extractors plus
//!   helpers for handlers holding runtime schemas.
//! - [`openapi`]: projection of schema metadata into `utoipa` schema objects.
//! - [`telemetry`]: `tracing-subscriber` bootstrap.
//!
//! ## Crate Policy
//!
//! - No route tree, listener, or middleware. Callers own the `Router`.
//! - All rejections map to structured HTTP responses via `AppError`.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod telemetry;

pub use error::{AppError, ErrorBody, ErrorDetail};
pub use extractors::{Coerced, CoercedQuery, Described, QueryConfig};
pub use openapi::schema_object;
pub use telemetry::{init_tracing, LogFormat, TelemetryConfig};
