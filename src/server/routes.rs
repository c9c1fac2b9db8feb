use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::server::handlers::{
    create_company_handler, get_company_handler, health_handler, list_companies_handler,
    update_company_handler, AppState,
};

/// Build the main application router for the Sexton server.
///
/// This is a convenience helper so `main.rs` or tests can
/// construct the router in a single call.
///
/// # Routes
///
/// - `POST /api/v1/companies` - Create a company
/// - `GET /api/v1/companies` - List companies (optional `user_id` query param)
/// - `GET /api/v1/companies/{company_id}` - Get a company
/// - `PATCH /api/v1/companies/{company_id}` - Partial update (sets the
///   initial countdown, among other fields)
/// - `GET /api/v1/health` - Service and database health
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/companies", post(create_company_handler))
        .route("/api/v1/companies", get(list_companies_handler))
        .route("/api/v1/companies/:company_id", get(get_company_handler))
        .route(
            "/api/v1/companies/:company_id",
            patch(update_company_handler),
        )
        .route("/api/v1/health", get(health_handler))
        .with_state(state)
}
