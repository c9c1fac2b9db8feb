use std::sync::Arc;

use sqlx::{query, query_as, SqlitePool};
use tracing::error;

use crate::company::{Company, CompanyPatch};
use crate::config::get_config;
use crate::errors::{SextonError, SextonResult};

/// SQLite store adapter for company records.
///
/// All operations are typed against [`Company`] / [`CompanyPatch`]; there is
/// no free-form field merging. Driver errors are logged and mapped to
/// [`SextonError::Store`], unique-constraint violations to
/// [`SextonError::Conflict`].
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Initialize the database connection based on configuration.
    ///
    /// Uses the global configuration from `config.toml` and environment
    /// variables. See `crate::config` for configuration options.
    pub async fn new() -> SextonResult<Arc<Self>> {
        let config = get_config()?;
        let db = Self::connect(&config.database.url).await?;
        Ok(Arc::new(db))
    }

    /// Connect to an explicit SQLite URL.
    pub async fn connect(url: &str) -> SextonResult<Self> {
        let pool = SqlitePool::connect(url).await.map_err(|e| {
            error!("Failed to connect to SQLite: {e}");
            SextonError::Store(format!("failed to connect to SQLite: {e}"))
        })?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `companies` table if it does not exist.
    ///
    /// `name` carries a UNIQUE constraint so the name-keyed upsert stays
    /// well defined.
    pub async fn migrate(&self) -> SextonResult<()> {
        query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                company_id   TEXT PRIMARY KEY,
                user_id      INTEGER NOT NULL DEFAULT 0,
                name         TEXT NOT NULL UNIQUE,
                phone_number TEXT,
                time_stamp   INTEGER,
                level        INTEGER,
                tier         TEXT,
                created_at   TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("SQLite migrate failed: {e}");
            SextonError::Store(format!("database error: {e}"))
        })?;

        Ok(())
    }

    /// Insert a new company record.
    ///
    /// Returns `SextonError::Conflict` when the name (or id) is already
    /// taken.
    pub async fn insert_company(&self, company: &Company) -> SextonResult<()> {
        query(
            r#"
            INSERT INTO companies (
                company_id,
                user_id,
                name,
                phone_number,
                time_stamp,
                level,
                tier,
                created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&company.company_id)
        .bind(company.user_id)
        .bind(&company.name)
        .bind(&company.phone_number)
        .bind(company.time_stamp)
        .bind(company.level)
        .bind(&company.tier)
        .bind(company.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                SextonError::Conflict(format!("company name '{}' already exists", company.name))
            }
            _ => {
                error!("SQLite insert_company failed: {e}");
                SextonError::Store(format!("database error: {e}"))
            }
        })?;

        Ok(())
    }

    /// Fetch a company by its id.
    ///
    /// Returns:
    /// - `Ok(Some(Company))` if found
    /// - `Ok(None)` if not found
    /// - `Err(SextonError::Store)` on DB failure
    pub async fn get_company(&self, company_id: &str) -> SextonResult<Option<Company>> {
        let company = query_as::<_, Company>("SELECT * FROM companies WHERE company_id = ?")
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite get_company failed: {e}");
                SextonError::Store(format!("database error: {e}"))
            })?;

        Ok(company)
    }

    /// Fetch a company by its (unique) name.
    pub async fn get_company_by_name(&self, name: &str) -> SextonResult<Option<Company>> {
        let company = query_as::<_, Company>("SELECT * FROM companies WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite get_company_by_name failed: {e}");
                SextonError::Store(format!("database error: {e}"))
            })?;

        Ok(company)
    }

    /// Fetch every company record, store order, unbounded.
    pub async fn list_companies(&self) -> SextonResult<Vec<Company>> {
        let companies = query_as::<_, Company>("SELECT * FROM companies")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite list_companies failed: {e}");
                SextonError::Store(format!("database error: {e}"))
            })?;

        Ok(companies)
    }

    /// Fetch every company owned by the given user.
    pub async fn list_companies_by_user(&self, user_id: i64) -> SextonResult<Vec<Company>> {
        let companies = query_as::<_, Company>("SELECT * FROM companies WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite list_companies_by_user failed: {e}");
                SextonError::Store(format!("database error: {e}"))
            })?;

        Ok(companies)
    }

    /// Apply a typed partial update to the company with the given id.
    ///
    /// Unset patch fields leave the stored column untouched.
    ///
    /// Returns:
    /// - `Ok(true)` if a row was updated
    /// - `Ok(false)` if no matching row was found
    /// - `Err(SextonError::Store)` on DB failure
    pub async fn update_company(
        &self,
        company_id: &str,
        patch: &CompanyPatch,
    ) -> SextonResult<bool> {
        let rows_affected = query(
            r#"
            UPDATE companies SET
                user_id      = COALESCE(?, user_id),
                phone_number = COALESCE(?, phone_number),
                time_stamp   = COALESCE(?, time_stamp),
                level        = COALESCE(?, level),
                tier         = COALESCE(?, tier)
            WHERE company_id = ?
            "#,
        )
        .bind(patch.user_id)
        .bind(&patch.phone_number)
        .bind(patch.time_stamp)
        .bind(patch.level)
        .bind(&patch.tier)
        .bind(company_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("SQLite update_company failed: {e}");
            SextonError::Store(format!("database error: {e}"))
        })?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Check connectivity for health reporting.
    pub async fn ping(&self) -> bool {
        query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
