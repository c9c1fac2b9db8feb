use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::company::{Company, CompanyPatch};
use crate::errors::SextonError;
use crate::server::api_error::ApiError;
use crate::server::logging::{log_company_event, CompanyEvent, HealthResponse};
use crate::server::repository::CompanyRepository;

/// Shared application state for handlers.
///
/// Right now this only wraps the repository, but later you can add:
/// config, metrics handles, etc. without touching every handler signature.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<CompanyRepository>,
}

/// Request body for creating a company.
///
/// The acting user is an explicit field; upstream authentication decides
/// what goes in it.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCompanyRequest {
    pub user_id: i64,
    pub name: String,
    pub phone_number: Option<String>,
}

/// Query parameters for listing companies.
#[derive(Debug, Deserialize)]
pub struct ListCompaniesQuery {
    /// Filter by owning user
    pub user_id: Option<i64>,
}

/// Response for a single company.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub company_id: String,
    pub user_id: i64,
    pub name: String,
    pub phone_number: Option<String>,
    pub time_stamp: Option<i64>,
    pub level: Option<i64>,
    pub tier: Option<String>,
    pub created_at: String,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            company_id: company.company_id,
            user_id: company.user_id,
            name: company.name,
            phone_number: company.phone_number,
            time_stamp: company.time_stamp,
            level: company.level,
            tier: company.tier,
            created_at: company.created_at.to_string(),
        }
    }
}

/// Response for listing companies.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListCompaniesResponse {
    pub companies: Vec<CompanyResponse>,
    pub total: usize,
}

/// Handler for creating a company.
///
/// The record starts with no countdown; decay is enrolled later via the
/// update endpoint.
pub async fn create_company_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    info!(
        "Creating company '{}' for user_id={}",
        payload.name, payload.user_id
    );

    let company = state
        .repo
        .create(
            payload.user_id,
            &payload.name,
            payload.phone_number.as_deref(),
        )
        .await?;

    log_company_event(CompanyEvent::Created, &company.company_id, None);

    Ok((StatusCode::CREATED, Json(company.into())))
}

/// Handler for fetching a single company by id.
pub async fn get_company_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let company = state.repo.get(&company_id).await.map_err(|e| match e {
        SextonError::NotFound(_) => ApiError::company_not_found(&company_id),
        other => other.into(),
    })?;

    Ok(Json(company.into()))
}

/// Handler for listing companies, all or by owning user.
pub async fn list_companies_handler(
    State(state): State<AppState>,
    Query(query): Query<ListCompaniesQuery>,
) -> Result<Json<ListCompaniesResponse>, ApiError> {
    let companies = match query.user_id {
        Some(user_id) => state.repo.all_by_user(user_id).await?,
        None => state.repo.all().await?,
    };

    let companies: Vec<CompanyResponse> = companies.into_iter().map(Into::into).collect();
    let total = companies.len();

    Ok(Json(ListCompaniesResponse { companies, total }))
}

/// Handler for updating a company with a typed partial update.
///
/// This is also how a company is enrolled in decay: setting `time_stamp`
/// starts the countdown.
pub async fn update_company_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Json(patch): Json<CompanyPatch>,
) -> Result<Json<CompanyResponse>, ApiError> {
    info!("Updating company {}", company_id);

    let company = state.repo.update(&company_id, &patch).await?;

    log_company_event(CompanyEvent::Updated, &company.company_id, None);

    Ok(Json(company.into()))
}

/// Handler for the health endpoint.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.repo.database().ping().await;
    Json(HealthResponse::healthy(connected))
}
