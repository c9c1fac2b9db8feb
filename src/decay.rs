//! Countdown decay policy for company records.
//!
//! Each scheduler tick decrements a company's countdown by one unit. Reaching
//! zero is terminal: the company is archived into the `"graveyard"` tier and
//! its ownership is released so it can be re-assigned. A countdown that
//! decrements to exactly [`SENTINEL_RESET`] is treated as out of range and
//! clamped back to a short [`RESET_WINDOW`]; no transition here ever produces
//! that value.
//!
//! The policy is a pure function over a [`Company`] snapshot so it can be
//! tested without a store. I/O lives in `jobs::decay_sweep`.

use crate::company::{Company, CompanyPatch, GRAVEYARD_TIER, UNOWNED_USER};

/// Engagement level assumed when a record has none.
pub const DEFAULT_LEVEL: i64 = 5;

/// Out-of-range countdown value that triggers a reset instead of a decrement.
pub const SENTINEL_RESET: i64 = 1000;

/// Countdown assigned when the sentinel is hit.
pub const RESET_WINDOW: i64 = 7;

/// Position of a company in the decay lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayState {
    /// No countdown set; the record is untouched by the sweep.
    Unenrolled,
    /// Countdown set and still running.
    Active,
    /// Expired into the graveyard tier.
    Graveyard,
}

/// Classify a company record.
pub fn decay_state(company: &Company) -> DecayState {
    if company.is_graveyarded() {
        DecayState::Graveyard
    } else if company.time_stamp.is_some() {
        DecayState::Active
    } else {
        DecayState::Unenrolled
    }
}

/// Compute the next persisted state for one company record.
///
/// Returns `None` when the record carries no countdown, in which case the
/// sweep issues no store call for it. Otherwise the returned patch always
/// carries `level` (defaulted to [`DEFAULT_LEVEL`] when absent) alongside the
/// decremented countdown, the sentinel reset, or the terminal graveyard
/// fields.
///
/// The transition does not look at `tier`: a graveyarded record pinned at
/// `time_stamp = 0` recomputes the same terminal patch on every tick, so
/// re-application is idempotent by value.
pub fn decay_transition(company: &Company) -> Option<CompanyPatch> {
    let time_stamp = company.time_stamp?;
    let level = company.level.unwrap_or(DEFAULT_LEVEL);
    let t = time_stamp - 1;

    let patch = if t == SENTINEL_RESET {
        CompanyPatch {
            time_stamp: Some(RESET_WINDOW),
            level: Some(level),
            ..Default::default()
        }
    } else if t <= 0 {
        CompanyPatch {
            tier: Some(GRAVEYARD_TIER.to_string()),
            user_id: Some(UNOWNED_USER),
            level: Some(level),
            time_stamp: Some(0),
            ..Default::default()
        }
    } else {
        CompanyPatch {
            time_stamp: Some(t),
            level: Some(level),
            ..Default::default()
        }
    };

    Some(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn company(time_stamp: Option<i64>, level: Option<i64>, tier: Option<&str>) -> Company {
        Company {
            company_id: "c-1".to_string(),
            user_id: 7,
            name: "Acme".to_string(),
            phone_number: None,
            time_stamp,
            level,
            tier: tier.map(str::to_string),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn no_countdown_is_a_no_op() {
        assert_eq!(decay_transition(&company(None, Some(3), None)), None);
    }

    #[test]
    fn active_countdown_decrements_by_one() {
        let patch = decay_transition(&company(Some(5), Some(3), None)).unwrap();
        assert_eq!(patch.time_stamp, Some(4));
        assert_eq!(patch.level, Some(3));
        assert!(patch.tier.is_none());
        assert!(patch.user_id.is_none());
    }

    #[test]
    fn level_defaults_to_five_only_when_absent() {
        let defaulted = decay_transition(&company(Some(5), None, None)).unwrap();
        assert_eq!(defaulted.level, Some(DEFAULT_LEVEL));

        let preserved = decay_transition(&company(Some(5), Some(2), None)).unwrap();
        assert_eq!(preserved.level, Some(2));
    }

    #[test]
    fn reaching_zero_is_terminal() {
        let patch = decay_transition(&company(Some(1), Some(3), None)).unwrap();
        assert_eq!(patch.tier.as_deref(), Some(GRAVEYARD_TIER));
        assert_eq!(patch.user_id, Some(UNOWNED_USER));
        assert_eq!(patch.time_stamp, Some(0));
        assert_eq!(patch.level, Some(3));
    }

    #[test]
    fn sentinel_clamps_to_reset_window() {
        let patch = decay_transition(&company(Some(SENTINEL_RESET + 1), None, None)).unwrap();
        assert_eq!(patch.time_stamp, Some(RESET_WINDOW));
        assert_eq!(patch.level, Some(DEFAULT_LEVEL));
        assert!(patch.tier.is_none());
    }

    #[test]
    fn graveyarded_record_reapplies_the_same_terminal_patch() {
        let mut c = company(Some(1), Some(3), None);
        let first = decay_transition(&c).unwrap();
        first.apply(&mut c);
        assert!(c.is_graveyarded());
        assert_eq!(c.time_stamp, Some(0));

        // The transition ignores tier, so the next tick recomputes t = -1 and
        // lands in the terminal branch with identical values.
        let second = decay_transition(&c).unwrap();
        assert_eq!(second, first);

        let snapshot = c.clone();
        second.apply(&mut c);
        assert_eq!(c, snapshot);
    }

    #[test]
    fn state_classification() {
        assert_eq!(decay_state(&company(None, None, None)), DecayState::Unenrolled);
        assert_eq!(decay_state(&company(Some(4), None, None)), DecayState::Active);
        assert_eq!(
            decay_state(&company(Some(0), None, Some(GRAVEYARD_TIER))),
            DecayState::Graveyard
        );
    }
}
