//! Property-based tests for SettlementService.

use proptest::prelude::*;
use tally_shared::types::UserId;
use uuid::Uuid;

use crate::settlement::error::SettlementError;
use crate::settlement::service::SettlementService;
use crate::settlement::types::{ExpenseStatus, SplitStatus};

fn arb_status() -> impl Strategy<Value = SplitStatus> {
    prop_oneof![
        Just(SplitStatus::Pending),
        Just(SplitStatus::Requested),
        Just(SplitStatus::Settled),
    ]
}

fn arb_user() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId::from_uuid(Uuid::from_u128(n)))
}

fn rank(status: SplitStatus) -> u8 {
    match status {
        SplitStatus::Pending => 0,
        SplitStatus::Requested => 1,
        SplitStatus::Settled => 2,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any user other than the debtor is rejected, whatever the status.
    #[test]
    fn prop_request_by_non_debtor_always_unauthorized(
        status in arb_status(),
        debtor in arb_user(),
        actor in arb_user(),
    ) {
        prop_assume!(debtor != actor);
        let result = SettlementService::request_payment(status, debtor, actor);
        prop_assert_eq!(result, Err(SettlementError::NotDebtor { actor }));
    }

    /// Any user other than the payer is rejected, whatever the status.
    #[test]
    fn prop_verify_by_non_payer_always_unauthorized(
        status in arb_status(),
        payer in arb_user(),
        actor in arb_user(),
    ) {
        prop_assume!(payer != actor);
        let result = SettlementService::verify_payment(status, payer, actor);
        prop_assert_eq!(result, Err(SettlementError::NotPayer { actor }));
    }

    /// Every successful transition moves strictly forward and agrees with
    /// `is_valid_transition`.
    #[test]
    fn prop_transitions_only_move_forward(status in arb_status(), user in arb_user()) {
        let outcomes = [
            SettlementService::request_payment(status, user, user),
            SettlementService::verify_payment(status, user, user),
        ];

        for next in outcomes.into_iter().flatten() {
            prop_assert!(rank(next) > rank(status));
            prop_assert!(SettlementService::is_valid_transition(status, next));
        }
    }

    /// Settled is terminal for both actions.
    #[test]
    fn prop_settled_is_terminal(user in arb_user()) {
        prop_assert!(SettlementService::request_payment(SplitStatus::Settled, user, user).is_err());
        prop_assert!(SettlementService::verify_payment(SplitStatus::Settled, user, user).is_err());
    }

    /// An expense is settled exactly when every split is settled.
    #[test]
    fn prop_expense_status_matches_splits(
        statuses in prop::collection::vec(arb_status(), 0..12)
    ) {
        let derived = SettlementService::expense_status(statuses.iter().copied());
        let all_settled = statuses.iter().all(|s| *s == SplitStatus::Settled);
        prop_assert_eq!(derived == ExpenseStatus::Settled, all_settled);
    }
}
