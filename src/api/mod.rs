//! HTTP API module.
//!
//! JSON endpoints return the bare payload on success and an `ErrorResponse`
//! on failure. Frame endpoints always answer with a frame document.

mod admin;
mod frames;
mod images;
mod polls;

pub use admin::*;
pub use frames::*;
pub use images::*;
pub use polls::*;

use axum::Json;

use crate::errors::AppError;

/// Response type for JSON endpoints.
pub type ApiResult<T> = Result<Json<T>, AppError>;
