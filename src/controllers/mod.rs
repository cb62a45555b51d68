//! All axum route handlers

use axum::http::StatusCode;
use axum::response::IntoResponse;

pub mod auth;
pub mod availability;
pub mod court;
pub mod payment;
pub mod profile;
pub mod reservation;

/// Service healthcheck
pub async fn healthcheck() -> impl IntoResponse { StatusCode::OK }
