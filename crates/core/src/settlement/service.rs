//! Settlement service for split state transitions.
//!
//! Authorization is checked before state: a caller with the wrong role gets
//! an authorization error no matter what status the split is in.

use tally_shared::types::UserId;

use crate::settlement::error::SettlementError;
use crate::settlement::types::{ExpenseStatus, SettlementAction, SplitStatus};

/// Stateless service for split status transitions.
///
/// Each method validates one attempted transition and returns the status the
/// split must move to. Applying it is the storage layer's job.
pub struct SettlementService;

impl SettlementService {
    /// Debtor declares that they have paid.
    ///
    /// # Returns
    /// * `Ok(SplitStatus::Requested)` if the transition is valid
    /// * `Err(SettlementError::NotDebtor)` if `actor` is not the debtor
    /// * `Err(SettlementError::InvalidTransition)` if not in Pending status
    pub fn request_payment(
        current_status: SplitStatus,
        debtor_id: UserId,
        actor: UserId,
    ) -> Result<SplitStatus, SettlementError> {
        if actor != debtor_id {
            return Err(SettlementError::NotDebtor { actor });
        }

        match current_status {
            SplitStatus::Pending => Ok(SplitStatus::Requested),
            _ => Err(SettlementError::InvalidTransition {
                from: current_status,
                action: SettlementAction::RequestPayment,
            }),
        }
    }

    /// Payer confirms the debtor's payment.
    ///
    /// The payer does not have to wait for a request.
    ///
    /// # Returns
    /// * `Ok(SplitStatus::Settled)` if the transition is valid
    /// * `Err(SettlementError::NotPayer)` if `actor` is not the payer
    /// * `Err(SettlementError::InvalidTransition)` if already Settled
    pub fn verify_payment(
        current_status: SplitStatus,
        payer_id: UserId,
        actor: UserId,
    ) -> Result<SplitStatus, SettlementError> {
        if actor != payer_id {
            return Err(SettlementError::NotPayer { actor });
        }

        match current_status {
            SplitStatus::Pending | SplitStatus::Requested => Ok(SplitStatus::Settled),
            SplitStatus::Settled => Err(SettlementError::InvalidTransition {
                from: current_status,
                action: SettlementAction::VerifyPayment,
            }),
        }
    }

    /// Derives an expense's status from the statuses of its splits.
    ///
    /// An expense with no splits has nothing outstanding and is settled.
    #[must_use]
    pub fn expense_status<I>(split_statuses: I) -> ExpenseStatus
    where
        I: IntoIterator<Item = SplitStatus>,
    {
        if split_statuses.into_iter().all(|s| s.is_terminal()) {
            ExpenseStatus::Settled
        } else {
            ExpenseStatus::Open
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Requested
    /// - Pending → Settled
    /// - Requested → Settled
    #[must_use]
    pub fn is_valid_transition(from: SplitStatus, to: SplitStatus) -> bool {
        matches!(
            (from, to),
            (SplitStatus::Pending, SplitStatus::Requested | SplitStatus::Settled)
                | (SplitStatus::Requested, SplitStatus::Settled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_request_from_pending() {
        let debtor = UserId::new();
        let result = SettlementService::request_payment(SplitStatus::Pending, debtor, debtor);
        assert_eq!(result, Ok(SplitStatus::Requested));
    }

    #[rstest]
    #[case(SplitStatus::Requested)]
    #[case(SplitStatus::Settled)]
    fn test_request_from_non_pending_fails(#[case] status: SplitStatus) {
        let debtor = UserId::new();
        let result = SettlementService::request_payment(status, debtor, debtor);
        assert_eq!(
            result,
            Err(SettlementError::InvalidTransition {
                from: status,
                action: SettlementAction::RequestPayment,
            })
        );
    }

    #[test]
    fn test_request_by_other_user_fails() {
        let debtor = UserId::new();
        let other = UserId::new();
        let result = SettlementService::request_payment(SplitStatus::Pending, debtor, other);
        assert_eq!(result, Err(SettlementError::NotDebtor { actor: other }));
    }

    #[rstest]
    #[case(SplitStatus::Pending)]
    #[case(SplitStatus::Requested)]
    fn test_verify_by_payer(#[case] status: SplitStatus) {
        let payer = UserId::new();
        let result = SettlementService::verify_payment(status, payer, payer);
        assert_eq!(result, Ok(SplitStatus::Settled));
    }

    #[test]
    fn test_verify_settled_fails() {
        let payer = UserId::new();
        let result = SettlementService::verify_payment(SplitStatus::Settled, payer, payer);
        assert!(matches!(
            result,
            Err(SettlementError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_verify_by_debtor_fails() {
        let payer = UserId::new();
        let debtor = UserId::new();
        let result = SettlementService::verify_payment(SplitStatus::Requested, payer, debtor);
        assert_eq!(result, Err(SettlementError::NotPayer { actor: debtor }));
    }

    #[test]
    fn test_expense_status_derivation() {
        use SplitStatus::{Pending, Requested, Settled};

        assert_eq!(
            SettlementService::expense_status([Settled, Settled]),
            ExpenseStatus::Settled
        );
        assert_eq!(
            SettlementService::expense_status([Settled, Requested]),
            ExpenseStatus::Open
        );
        assert_eq!(
            SettlementService::expense_status([Pending]),
            ExpenseStatus::Open
        );
        assert_eq!(
            SettlementService::expense_status(Vec::new()),
            ExpenseStatus::Settled
        );
    }

    #[test]
    fn test_valid_transitions() {
        use SplitStatus::{Pending, Requested, Settled};

        assert!(SettlementService::is_valid_transition(Pending, Requested));
        assert!(SettlementService::is_valid_transition(Pending, Settled));
        assert!(SettlementService::is_valid_transition(Requested, Settled));

        assert!(!SettlementService::is_valid_transition(Requested, Pending));
        assert!(!SettlementService::is_valid_transition(Settled, Pending));
        assert!(!SettlementService::is_valid_transition(Settled, Requested));
        assert!(!SettlementService::is_valid_transition(Pending, Pending));
    }
}
