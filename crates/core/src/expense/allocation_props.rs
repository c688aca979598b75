//! Property-based tests for SplitAllocation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::expense::allocation::SplitAllocation;

/// Positive amounts with two decimal places, 0.01 to 1,000,000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Debtor shares plus the payer share equal the total exactly.
    #[test]
    fn prop_allocation_conserves_total(amount in arb_amount(), participants in 1usize..50) {
        let allocation = SplitAllocation::allocate(amount, participants);
        prop_assert_eq!(allocation.debtor_total() + allocation.payer_share, amount);
    }

    /// The payer absorbs the remainder, so no debtor pays more than the payer.
    #[test]
    fn prop_debtor_share_never_exceeds_payer_share(
        amount in arb_amount(),
        participants in 1usize..50,
    ) {
        let allocation = SplitAllocation::allocate(amount, participants);
        prop_assert!(allocation.debtor_share <= allocation.payer_share);
        prop_assert!(allocation.debtor_share >= Decimal::ZERO);
    }

    /// The remainder is smaller than one cent per debtor.
    #[test]
    fn prop_remainder_is_bounded(amount in arb_amount(), participants in 2usize..50) {
        let allocation = SplitAllocation::allocate(amount, participants);
        let remainder = allocation.payer_share - allocation.debtor_share;
        let bound = Decimal::new(i64::try_from(participants).unwrap_or(i64::MAX), 2);
        prop_assert!(remainder < bound);
    }

    /// Every share is carried at two decimal places.
    #[test]
    fn prop_shares_have_money_scale(amount in arb_amount(), participants in 1usize..50) {
        let allocation = SplitAllocation::allocate(amount, participants);
        prop_assert_eq!(allocation.debtor_share.scale(), 2);
        prop_assert_eq!(allocation.payer_share.scale(), 2);
    }
}
