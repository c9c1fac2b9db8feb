//! Request logging middleware and company event logging.
//!
//! This module provides structured logging for all API requests including:
//! - Unique request ID tracking
//! - Request timing
//! - Method, path, and status logging
//! - Request ID propagation in response headers

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, Response},
    middleware::Next,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Company state change event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyEvent {
    /// Company was created
    Created,
    /// Company fields were updated
    Updated,
    /// Countdown was decremented by the sweep
    Decayed,
    /// Out-of-range countdown was clamped back to the reset window
    Reset,
    /// Company expired into the graveyard tier
    Graveyarded,
}

impl std::fmt::Display for CompanyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CompanyEvent::Created => "created",
            CompanyEvent::Updated => "updated",
            CompanyEvent::Decayed => "decayed",
            CompanyEvent::Reset => "reset",
            CompanyEvent::Graveyarded => "graveyarded",
        };
        write!(f, "{}", s)
    }
}

/// Log a company state change event.
///
/// One line per state change, for audit and debugging purposes.
pub fn log_company_event(event: CompanyEvent, company_id: &str, details: Option<&str>) {
    let span = info_span!(
        "company_event",
        event = %event,
        company_id = %company_id,
    );
    let _enter = span.enter();

    if let Some(d) = details {
        info!(details = %d, "Company event occurred");
    } else {
        info!("Company event occurred");
    }
}

/// Header name for the request ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Generate a new unique request ID.
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Logging middleware that tracks request timing and generates request IDs.
///
/// This middleware:
/// 1. Generates a unique request ID for each incoming request
/// 2. Creates a tracing span with the request ID
/// 3. Logs the request method and path
/// 4. Measures and logs the response time
/// 5. Adds the request ID to the response headers
pub async fn request_logging_middleware(request: Request, next: Next) -> Response<Body> {
    let request_id = generate_request_id();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let path = uri.path().to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = Instant::now();

    let response = async move {
        info!("Started processing request");
        next.run(request).await
    }
    .instrument(span.clone())
    .await;

    let duration = start.elapsed();
    let status = response.status();

    let _enter = span.enter();
    info!(
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    // Add request ID to response headers
    let (mut parts, body) = response.into_parts();
    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(REQUEST_ID_HEADER, header_value);
    }

    Response::from_parts(parts, body)
}

/// Health check response structure.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status ("healthy" or "degraded")
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Database connectivity status
    pub database: DatabaseHealth,
}

/// Database health status.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DatabaseHealth {
    /// Whether the database is connected
    pub connected: bool,
    /// Database type
    pub db_type: String,
}

impl HealthResponse {
    /// Create a health response from database connectivity.
    pub fn healthy(db_connected: bool) -> Self {
        Self {
            status: if db_connected { "healthy" } else { "degraded" }.to_string(),
            service: "sexton".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: DatabaseHealth {
                connected: db_connected,
                db_type: "sqlite".to_string(),
            },
        }
    }
}
