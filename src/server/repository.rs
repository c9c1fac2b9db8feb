//! CRUD façade over the store adapter.
//!
//! `CompanyRepository` is the single entry point for company persistence:
//! HTTP handlers and the decay sweep both go through it. It validates input,
//! assigns ids, and turns "row not found" into [`SextonError::NotFound`].

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::company::{Company, CompanyPatch, UNOWNED_USER};
use crate::errors::{SextonError, SextonResult};
use crate::server::database::Database;
use crate::server::validation::{validate_length, validate_not_empty, validate_phone_number};

#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: Arc<Database>,
}

impl CompanyRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// The underlying store adapter (used for health reporting).
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Create a company owned by `user_id`, with no countdown set.
    ///
    /// The countdown is enrolled later via [`CompanyRepository::update`].
    pub async fn create(
        &self,
        user_id: i64,
        name: &str,
        phone_number: Option<&str>,
    ) -> SextonResult<Company> {
        validate_not_empty(name, "name")
            .and_then(|_| validate_length(name, 1, 120, "name"))
            .map_err(|e| SextonError::InvalidRequest(e.to_string()))?;

        if let Some(phone) = phone_number {
            validate_phone_number(phone, "phone_number")
                .map_err(|e| SextonError::InvalidRequest(e.to_string()))?;
        }

        let company = Company {
            company_id: Uuid::new_v4().to_string(),
            user_id,
            name: name.trim().to_string(),
            phone_number: phone_number.map(str::to_string),
            time_stamp: None,
            level: None,
            tier: None,
            created_at: Utc::now().naive_utc(),
        };

        self.db.insert_company(&company).await?;

        info!(
            "Created company {} ('{}') for user {}",
            company.company_id, company.name, company.user_id
        );

        Ok(company)
    }

    /// Fetch a company by id, or `NotFound`.
    pub async fn get(&self, company_id: &str) -> SextonResult<Company> {
        self.db
            .get_company(company_id)
            .await?
            .ok_or_else(|| SextonError::NotFound(format!("company {company_id}")))
    }

    /// Every company record, store order, unbounded.
    pub async fn all(&self) -> SextonResult<Vec<Company>> {
        self.db.list_companies().await
    }

    /// Every company owned by `user_id`.
    pub async fn all_by_user(&self, user_id: i64) -> SextonResult<Vec<Company>> {
        self.db.list_companies_by_user(user_id).await
    }

    /// Merge a typed patch into the company with the given id.
    ///
    /// Keyed by id, not name: names are merely unique, ids are the stable
    /// handle. Returns the updated record.
    pub async fn update(&self, company_id: &str, patch: &CompanyPatch) -> SextonResult<Company> {
        let updated = self.db.update_company(company_id, patch).await?;
        if !updated {
            return Err(SextonError::NotFound(format!("company {company_id}")));
        }

        self.get(company_id).await
    }

    /// Merge a patch into the company with the given name, creating an
    /// unowned record first when none exists.
    pub async fn upsert(&self, name: &str, patch: &CompanyPatch) -> SextonResult<Company> {
        let existing = self.db.get_company_by_name(name).await?;

        let company_id = match existing {
            Some(company) => company.company_id,
            None => {
                let created = self
                    .create(
                        patch.user_id.unwrap_or(UNOWNED_USER),
                        name,
                        patch.phone_number.as_deref(),
                    )
                    .await?;
                created.company_id
            }
        };

        self.update(&company_id, patch).await
    }
}
