//! Company records and typed partial updates.
//!
//! A company is the unit of engagement tracking: it belongs to a user, may
//! carry a countdown (`time_stamp`) once enrolled in decay, and ends up in the
//! `"graveyard"` tier when the countdown runs out.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Tier tag applied to expired companies.
pub const GRAVEYARD_TIER: &str = "graveyard";

/// Sentinel user id for a company with no owner.
pub const UNOWNED_USER: i64 = 0;

/// Represents a company record stored in the database.
///
/// This mirrors the `companies` table schema created by `Database::migrate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Company {
    /// Opaque unique identifier, assigned at creation (UUID v4).
    pub company_id: String,
    /// Owning user reference; `UNOWNED_USER` (0) once ownership is released.
    pub user_id: i64,
    /// Display name; unique across the store.
    pub name: String,
    /// Optional contact string.
    pub phone_number: Option<String>,
    /// Countdown units remaining before expiry. Absent means the company is
    /// not yet enrolled in decay.
    pub time_stamp: Option<i64>,
    /// Engagement level; read as 5 when absent.
    pub level: Option<i64>,
    /// Optional tier tag; `"graveyard"` marks an expired record.
    pub tier: Option<String>,
    /// Insertion timestamp.
    pub created_at: NaiveDateTime,
}

impl Company {
    /// Whether this company has expired into the graveyard tier.
    pub fn is_graveyarded(&self) -> bool {
        self.tier.as_deref() == Some(GRAVEYARD_TIER)
    }

    /// Whether this company currently has an owner.
    pub fn is_owned(&self) -> bool {
        self.user_id != UNOWNED_USER
    }
}

/// Typed partial update for a company record.
///
/// `Some(v)` sets the field, `None` leaves the stored value untouched.
/// Patches never clear a column to NULL; ownership release writes the
/// `UNOWNED_USER` sentinel instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyPatch {
    pub user_id: Option<i64>,
    pub phone_number: Option<String>,
    pub time_stamp: Option<i64>,
    pub level: Option<i64>,
    pub tier: Option<String>,
}

impl CompanyPatch {
    /// Whether the patch sets no fields at all.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.phone_number.is_none()
            && self.time_stamp.is_none()
            && self.level.is_none()
            && self.tier.is_none()
    }

    /// Apply the patch to an in-memory record, mirroring what the store
    /// adapter does column by column.
    pub fn apply(&self, company: &mut Company) {
        if let Some(user_id) = self.user_id {
            company.user_id = user_id;
        }
        if let Some(phone_number) = &self.phone_number {
            company.phone_number = Some(phone_number.clone());
        }
        if let Some(time_stamp) = self.time_stamp {
            company.time_stamp = Some(time_stamp);
        }
        if let Some(level) = self.level {
            company.level = Some(level);
        }
        if let Some(tier) = &self.tier {
            company.tier = Some(tier.clone());
        }
    }
}
