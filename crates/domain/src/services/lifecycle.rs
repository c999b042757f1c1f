//! Certification lifecycle state machine.
//!
//! Pure transition rules; the certification repository wraps them in a
//! per-entity transaction so a successful transition and its history entry
//! commit together, and a rejected one mutates nothing.
//!
//! Transition table:
//!
//! | Action       | Allowed from                    | Resulting state |
//! |--------------|---------------------------------|-----------------|
//! | issue        | pending                         | active          |
//! | renew        | active, expiring-soon, expired  | active          |
//! | suspend      | active, expiring-soon           | suspended       |
//! | revoke       | any except revoked              | revoked         |
//! | reactivate   | suspended                       | active          |
//!
//! Revoked is terminal. Status recompute moves active -> expiring-soon ->
//! expired only, based on days until expiry; manual statuses (suspended,
//! revoked) and pending are never touched by recompute.

use crate::error::DomainError;
use crate::models::{CertificationStatus, LifecycleAction, EXPIRING_SOON_WINDOW_DAYS};

/// Resolve the state a caller-invoked action leads to.
///
/// Fails with `InvalidTransition` when `action` is not allowed from `from`;
/// the caller must then leave the certification untouched.
pub fn apply_action(
    from: CertificationStatus,
    action: LifecycleAction,
) -> Result<CertificationStatus, DomainError> {
    use CertificationStatus::*;
    use LifecycleAction::*;

    let allowed = match action {
        Issue => matches!(from, Pending),
        Renew => matches!(from, Active | ExpiringSoon | Expired),
        Suspend => matches!(from, Active | ExpiringSoon),
        Revoke => !matches!(from, Revoked),
        Reactivate => matches!(from, Suspended),
    };

    if !allowed {
        return Err(DomainError::InvalidTransition { from, action });
    }

    Ok(match action {
        Issue | Renew | Reactivate => Active,
        Suspend => Suspended,
        Revoke => Revoked,
    })
}

/// Recompute date-derived status from the days remaining until expiry.
///
/// Idempotent: applying it twice with the same `days_until_expiry` yields
/// the same state. It only ever advances active -> expiring-soon ->
/// expired; going back requires an explicit renew or reactivate action.
pub fn recompute_status(
    current: CertificationStatus,
    days_until_expiry: i64,
) -> CertificationStatus {
    use CertificationStatus::*;

    match current {
        Active => {
            if days_until_expiry < 0 {
                Expired
            } else if days_until_expiry <= EXPIRING_SOON_WINDOW_DAYS {
                ExpiringSoon
            } else {
                Active
            }
        }
        ExpiringSoon => {
            if days_until_expiry < 0 {
                Expired
            } else {
                ExpiringSoon
            }
        }
        // Pending certifications are not yet in force; suspended and revoked
        // are manual overrides; expired is already terminal for recompute.
        Pending | Expired | Suspended | Revoked => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CertificationStatus::*;
    use LifecycleAction::*;

    #[test]
    fn test_issue_from_pending() {
        assert_eq!(apply_action(Pending, Issue).unwrap(), Active);
    }

    #[test]
    fn test_issue_rejected_from_other_states() {
        for from in [Active, ExpiringSoon, Expired, Suspended, Revoked] {
            assert!(apply_action(from, Issue).is_err());
        }
    }

    #[test]
    fn test_renew_allowed_states() {
        for from in [Active, ExpiringSoon, Expired] {
            assert_eq!(apply_action(from, Renew).unwrap(), Active);
        }
        assert!(apply_action(Pending, Renew).is_err());
        assert!(apply_action(Suspended, Renew).is_err());
    }

    #[test]
    fn test_suspend_allowed_states() {
        assert_eq!(apply_action(Active, Suspend).unwrap(), Suspended);
        assert_eq!(apply_action(ExpiringSoon, Suspend).unwrap(), Suspended);
        assert!(apply_action(Expired, Suspend).is_err());
        assert!(apply_action(Pending, Suspend).is_err());
    }

    #[test]
    fn test_reactivate_only_from_suspended() {
        assert_eq!(apply_action(Suspended, Reactivate).unwrap(), Active);
        for from in [Pending, Active, ExpiringSoon, Expired, Revoked] {
            assert!(apply_action(from, Reactivate).is_err());
        }
    }

    #[test]
    fn test_revoke_from_anywhere_except_revoked() {
        for from in [Pending, Active, ExpiringSoon, Expired, Suspended] {
            assert_eq!(apply_action(from, Revoke).unwrap(), Revoked);
        }
    }

    #[test]
    fn test_revoked_is_terminal() {
        for action in [Issue, Renew, Suspend, Revoke, Reactivate] {
            let err = apply_action(Revoked, action).unwrap_err();
            match err {
                DomainError::InvalidTransition { from, .. } => assert_eq!(from, Revoked),
                other => panic!("Expected InvalidTransition, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_recompute_active_within_window() {
        assert_eq!(recompute_status(Active, 30), ExpiringSoon);
        assert_eq!(recompute_status(Active, 0), ExpiringSoon);
        assert_eq!(recompute_status(Active, 90), ExpiringSoon);
    }

    #[test]
    fn test_recompute_active_outside_window() {
        assert_eq!(recompute_status(Active, 91), Active);
        assert_eq!(recompute_status(Active, 365), Active);
    }

    #[test]
    fn test_recompute_past_expiry() {
        assert_eq!(recompute_status(Active, -1), Expired);
        assert_eq!(recompute_status(ExpiringSoon, -1), Expired);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        for status in CertificationStatus::ALL {
            for days in [-10i64, -1, 0, 45, 90, 91, 400] {
                let once = recompute_status(status, days);
                let twice = recompute_status(once, days);
                assert_eq!(once, twice, "status {} days {}", status, days);
            }
        }
    }

    #[test]
    fn test_recompute_never_moves_backward() {
        assert_eq!(recompute_status(ExpiringSoon, 200), ExpiringSoon);
        assert_eq!(recompute_status(Expired, 200), Expired);
    }

    #[test]
    fn test_recompute_leaves_manual_and_pending_states() {
        for status in [Pending, Suspended, Revoked] {
            assert_eq!(recompute_status(status, -5), status);
            assert_eq!(recompute_status(status, 5), status);
        }
    }
}
