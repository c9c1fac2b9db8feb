//! Server-side components for Sexton.
//!
//! This module contains:
//! - `database`    → SQLite store adapter for company records
//! - `repository`  → CRUD façade shared by handlers and background jobs
//! - `handlers`    → Axum HTTP handlers for company endpoints
//! - `routes`      → Router builder
//! - `api_error`   → Standardized JSON error responses
//! - `validation`  → Request validation utilities
//! - `logging`     → Request-id middleware and company event logging

pub mod api_error;
pub mod database;
pub mod handlers;
pub mod logging;
pub mod repository;
pub mod routes;
pub mod validation;

// Convenient re-exports so callers can do `sexton::server::X`
// instead of digging into submodules.

pub use api_error::{ApiError, ErrorCode};
pub use database::Database;
pub use handlers::{
    create_company_handler, get_company_handler, health_handler, list_companies_handler,
    update_company_handler, AppState, CompanyResponse, CreateCompanyRequest,
    ListCompaniesResponse,
};
pub use logging::{
    log_company_event, request_logging_middleware, CompanyEvent, HealthResponse,
    REQUEST_ID_HEADER,
};
pub use repository::CompanyRepository;
pub use routes::build_router;
pub use validation::{
    validate_company_id, validate_length, validate_not_empty, validate_phone_number,
    ValidationError, ValidationResult,
};
