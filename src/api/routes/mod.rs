//! API Routes
//!
//! Route handlers organized by functionality.

pub mod aggregate;
pub mod charts;
pub mod dashboard;
pub mod health;

use axum::http::Uri;

use crate::api::error::ApiError;

/// Fallback for unmatched paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
