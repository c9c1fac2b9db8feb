//! Decay sweep job.
//!
//! One tick: load every company record, apply the decay transition, and
//! issue one id-keyed partial update per record whose countdown is set.

use tracing::{debug, error};

use crate::decay::{decay_transition, SENTINEL_RESET};
use crate::server::logging::{log_company_event, CompanyEvent};
use crate::server::repository::CompanyRepository;

use super::JobError;

/// Run one decay sweep over all company records.
///
/// For each record with a countdown:
/// - decrement it by one unit, or
/// - clamp an out-of-range value back to the reset window, or
/// - expire the record into the graveyard tier and release its owner.
///
/// Records with no countdown are skipped without a store call. A failed
/// per-record update is logged and does not block the remaining records;
/// a failed initial fetch aborts the tick.
///
/// Returns the number of records that were updated.
pub async fn run_decay_sweep(repo: &CompanyRepository) -> Result<u32, JobError> {
    let companies = repo.all().await?;

    debug!("Decay sweep over {} companies", companies.len());

    let mut count = 0;

    for company in companies {
        let Some(patch) = decay_transition(&company) else {
            // Not enrolled in decay.
            continue;
        };

        let event = if patch.tier.is_some() {
            CompanyEvent::Graveyarded
        } else if company.time_stamp == Some(SENTINEL_RESET + 1) {
            CompanyEvent::Reset
        } else {
            CompanyEvent::Decayed
        };

        match repo.update(&company.company_id, &patch).await {
            Ok(updated) => {
                count += 1;
                let details = updated
                    .time_stamp
                    .map(|t| format!("time_stamp={t}"));
                log_company_event(event, &company.company_id, details.as_deref());
            }
            Err(e) => {
                error!(
                    "Decay update failed for company {}: {}",
                    company.company_id, e
                );
            }
        }
    }

    Ok(count)
}
